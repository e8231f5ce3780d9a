use anyhow::Result;
use clap::Parser;
use docsearch_core::persist::{load_index, IndexPaths};
use docsearch_core::{SearchHit, Searcher, StopWords};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "docsearch-query")]
#[command(about = "Query a persisted docsearch index", long_about = None)]
struct Args {
    /// Index directory path
    #[arg(long, default_value = "./index")]
    index: String,
    /// Run QUERY as an exact phrase instead of OR-ranked terms
    #[arg(long, default_value_t = false)]
    phrase: bool,
    /// One-shot query; without it an interactive session starts
    query: Option<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let paths = IndexPaths::new(&args.index);
    let index = load_index(&paths)?;
    tracing::info!(num_docs = index.num_docs(), index = args.index, "index loaded");

    let stop = StopWords::english();
    let searcher = Searcher::new(&index, &stop);

    match args.query {
        Some(query) => run_query(&searcher, &query, args.phrase),
        None => repl(&searcher)?,
    }
    Ok(())
}

fn run_query(searcher: &Searcher, query: &str, phrase: bool) {
    let hits = if phrase {
        searcher.phrase_search(query)
    } else {
        searcher.search(query)
    };
    print_hits(query, &hits);
}

/// Interactive session: each line is a query; wrap it in double quotes to
/// run it as an exact phrase. An empty line ends the session.
fn repl(searcher: &Searcher) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("query> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let (query, phrase) = match line
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => (inner, true),
            None => (line, false),
        };
        run_query(searcher, query, phrase);
    }
    Ok(())
}

fn print_hits(query: &str, hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("no documents found for '{query}'");
        return;
    }
    for hit in hits {
        println!("doc {:>4}  score {:>9.4}  {}", hit.doc_id, hit.score, hit.path);
    }
    println!("{} document(s) found", hits.len());
}
