use criterion::{criterion_group, criterion_main, Criterion};
use docsearch_core::tokenizer::{tokenize, StopWords};

fn bench_tokenize(c: &mut Criterion) {
    let stop = StopWords::english();
    let text = "The borrow checker guarantees memory safety without garbage collection; \
                systems programming with zero-cost abstractions, fearless concurrency, \
                and no data races. "
        .repeat(128);
    c.bench_function("tokenize_sample", |b| b.iter(|| tokenize(&text, &stop)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
