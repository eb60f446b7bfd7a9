//! ArgoChat — terminal chat over Argo float data.
//!
//! Reads one utterance per line from stdin, prints replies to stdout and
//! writes rendered charts as JSON files. Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use ac_argo_data::{CachedFetcher, DatasetFetcher, ErddapFetcher, MockFetcher};
use ac_chat::config::AppConfig;
use ac_chat::output::ChartWriter;
use ac_chat::shell::COMMANDS_HELP;
use ac_chat::{DialogueRouter, Shell};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "argo-chat starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args().nth(1);
    let config = AppConfig::load(config_path.as_deref())?;
    tracing::info!(
        base_url = %config.archive.base_url,
        dataset = %config.archive.dataset,
        offline = config.archive.offline,
        "config loaded"
    );

    // ── Data source ─────────────────────────────────────────────
    let source: Arc<dyn DatasetFetcher> = if config.archive.offline {
        tracing::info!("offline mode, serving built-in sample floats");
        Arc::new(MockFetcher::with_sample_floats())
    } else {
        Arc::new(ErddapFetcher::new(config.archive.clone())?)
    };
    let fetcher = Arc::new(CachedFetcher::new(source));

    let router = DialogueRouter::with_fetcher(fetcher);
    let writer = ChartWriter::new(&config.charts.output_dir);
    let mut shell = Shell::new(router, config.chat.clone());

    // ── REPL ────────────────────────────────────────────────────
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("Ask about Argo floats. {COMMANDS_HELP}\n> ").as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let out = shell.handle_line(&line).await;

        let mut text = String::new();
        for reply in &out.lines {
            text.push_str(reply);
            text.push('\n');
        }
        for chart in &out.charts {
            match writer.write(chart).await {
                Ok(path) => text.push_str(&format!("[chart] {}\n", path.display())),
                Err(e) => {
                    tracing::warn!(key = %chart.key, error = %e, "failed to write chart");
                    text.push_str(&format!("[chart] {} could not be written\n", chart.key));
                }
            }
        }
        if out.quit {
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
            break;
        }
        text.push_str("> ");
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!(
        session_id = %shell.session().id(),
        turns = shell.session().transcript().len(),
        "argo-chat exiting"
    );
    Ok(())
}
