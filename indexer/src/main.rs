mod extract;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docsearch_core::persist::{save_index, save_meta, IndexPaths, MetaFile, FORMAT_VERSION};
use docsearch_core::{DocId, Index, IndexBuilder, StopWords};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};
use std::thread;

#[derive(Parser)]
#[command(name = "docsearch-indexer")]
#[command(about = "Build a positional TF-IDF index over a document directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory and build the index over every file in it
    Build {
        /// Directory holding the corpus
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Worker threads for extraction and tokenization
        #[arg(long, default_value_t = 1)]
        jobs: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, jobs } => build(&input, &output, jobs),
    }
}

fn build(input: &str, output: &str, jobs: usize) -> Result<()> {
    let files = scan(Path::new(input));
    tracing::info!(files = files.len(), input, "scanned corpus directory");

    let stop = StopWords::english();
    let index = build_corpus(&files, &stop, jobs);

    let paths = IndexPaths::new(output);
    save_index(&paths, &index)?;
    let meta = MetaFile {
        num_docs: index.num_docs(),
        num_terms: index.dictionary.len(),
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
    };
    save_meta(&paths, &meta)?;
    tracing::info!(
        num_docs = meta.num_docs,
        num_terms = meta.num_terms,
        output,
        "index build complete"
    );
    Ok(())
}

/// Collect corpus files in deterministic scan order. Every regular file
/// consumes a document id in this order, with or without an extractor for
/// its extension, so rebuilding an unchanged directory reproduces the ids.
fn scan(input: &Path) -> Vec<PathBuf> {
    WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Build the index over `files`. With more than one worker the corpus is
/// split into contiguous chunks with pre-reserved id ranges; merging the
/// partial indexes in chunk order reproduces the sequential id assignment.
fn build_corpus(files: &[PathBuf], stop: &StopWords, jobs: usize) -> Index {
    let jobs = jobs.clamp(1, files.len().max(1));
    if jobs == 1 {
        return build_chunk(files, stop, 0);
    }
    let chunk_len = files.len().div_ceil(jobs);
    let mut partials = Vec::new();
    thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_len)
            .enumerate()
            .map(|(at, chunk)| {
                let first_id = (at * chunk_len) as DocId;
                scope.spawn(move || build_chunk(chunk, stop, first_id))
            })
            .collect();
        for handle in handles {
            partials.push(handle.join().expect("index worker panicked"));
        }
    });
    let mut index = Index::new();
    for partial in partials {
        index.merge(partial);
    }
    index
}

fn build_chunk(files: &[PathBuf], stop: &StopWords, first_id: DocId) -> Index {
    let mut builder = IndexBuilder::starting_at(stop, first_id);
    for file in files {
        let text = extract::extract_text(file);
        builder.add_document(&file.to_string_lossy(), &text);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "cat dog cat").unwrap();
        fs::write(
            dir.path().join("b.html"),
            "<html><body>dog bird</body></html>",
        )
        .unwrap();
        fs::write(dir.path().join("c.txt"), "cat fish").unwrap();
        fs::write(dir.path().join("skip.dat"), "never indexed").unwrap();
        dir
    }

    #[test]
    fn scan_is_sorted_and_keeps_files_without_an_extractor() {
        let dir = corpus_dir();
        let files = scan(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.html", "c.txt", "skip.dat"]);
    }

    #[test]
    fn files_without_an_extractor_consume_an_id_but_add_no_tokens() {
        let dir = corpus_dir();
        let files = scan(dir.path());
        let stop = StopWords::english();
        let index = build_corpus(&files, &stop, 1);
        assert_eq!(index.num_docs(), 4);
        assert!(index.path(3).unwrap().ends_with("skip.dat"));
        assert!(index.doc_ids("never").is_none());
        index.validate().unwrap();
    }

    #[test]
    fn parallel_build_equals_sequential_build() {
        let dir = corpus_dir();
        let files = scan(dir.path());
        let stop = StopWords::english();
        let sequential = build_corpus(&files, &stop, 1);
        let parallel = build_corpus(&files, &stop, 2);
        assert_eq!(parallel, sequential);
        parallel.validate().unwrap();
        assert_eq!(parallel.num_docs(), 4);
    }

    #[test]
    fn empty_corpus_builds_an_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let files = scan(dir.path());
        let stop = StopWords::english();
        let index = build_corpus(&files, &stop, 4);
        assert_eq!(index.num_docs(), 0);
    }
}
