// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use kbsearch::protocol::Worker;
use kbsearch::{Document, SearchEngine};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{display, Cli, Commands, SearchArgs};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            preload,
            progress_interval,
        } => {
            let engine = match preload {
                Some(path) => load_engine(&path)?,
                None => SearchEngine::new(),
            };
            serve(Worker::new(engine).with_progress_interval(progress_interval))
        }
        Commands::Search {
            docs,
            query,
            options,
        } => run_search(&docs, &query, &options),
        Commands::Suggest { docs, prefix, limit } => {
            let engine = load_engine(&docs)?;
            display::print_suggestions(&prefix, &engine.suggestions(&prefix, Some(limit)));
            Ok(())
        }
        Commands::Stats { docs, json } => {
            let stats = load_engine(&docs)?.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                display::print_stats(&stats);
            }
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays a clean output channel.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("KBSEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_engine(path: &Path) -> Result<SearchEngine> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let documents: Vec<Document> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let mut engine = SearchEngine::new();
    let count = engine
        .add_documents(documents)
        .with_context(|| format!("indexing {}", path.display()))?;
    tracing::info!(count, path = %path.display(), "loaded documents");
    Ok(engine)
}

fn run_search(docs: &Path, query: &str, args: &SearchArgs) -> Result<()> {
    let engine = load_engine(docs)?;
    let mut options = args.to_options();

    if args.json {
        let outcome = engine.search_detailed(query, &options);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if let Some(tags) = display::terminal_highlight_tags() {
        options.highlight_tags = tags;
    }
    let outcome = engine.search_detailed(query, &options);
    display::print_results(query, &outcome.results, outcome.total_matches, &outcome.errors);
    Ok(())
}

/// One request per stdin line, one response per stdout line, until EOF.
fn serve(mut worker: Worker) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading request")?;
        if line.trim().is_empty() {
            continue;
        }

        let mut write_error = None;
        worker.handle_line(&line, |response| {
            if write_error.is_some() {
                return;
            }
            let written = serde_json::to_writer(&mut out, &response)
                .map_err(io::Error::from)
                .and_then(|()| out.write_all(b"\n"))
                .and_then(|()| out.flush());
            if let Err(err) = written {
                write_error = Some(err);
            }
        });
        if let Some(err) = write_error {
            return Err(err).context("writing response");
        }
    }
    Ok(())
}
