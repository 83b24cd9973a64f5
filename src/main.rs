use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use recordbookd::{config::Config, dataset, ipc};

fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cfg = Config::parse();

    let ds = match dataset::load_dataset(&cfg.data_path, &cfg.passwords_path) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "failed to load dataset");
            return Err(e);
        }
    };
    tracing::info!(
        path = %ds.data_path().to_string_lossy(),
        classes = ds.classes().len(),
        sha256 = %ds.sha256(),
        "dataset loaded"
    );

    let mut state = ipc::AppState::new(Arc::new(ds), cfg.title);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => {
                tracing::debug!(id = %req.id, method = %req.method, "request");
                ipc::handle_request(&mut state, req)
            }
            Err(e) => ipc::bad_json(&e),
        };
        writeln!(stdout, "{resp}").context("failed to write response")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    Ok(())
}
