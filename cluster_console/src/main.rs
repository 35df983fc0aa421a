mod command;
mod session;

use anyhow::Context;
use command::Command;
use session::{Outcome, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use zoom_cluster::EngineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr so `json` output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env().context("invalid ZC_* configuration")?;
    let mut session = match std::env::var("ZC_SEED") {
        Ok(seed) => {
            let seed: u64 = seed.parse().with_context(|| format!("ZC_SEED must be an integer, got {seed:?}"))?;
            Session::with_seed(config, seed)?
        }
        Err(_) => Session::new(config)?,
    };

    match std::env::args().nth(1) {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("opening script {path}"))?;
            run(BufReader::new(file), &mut session).await
        }
        None => {
            println!("zoom_cluster console - type `help` for commands");
            run(BufReader::new(tokio::io::stdin()), &mut session).await
        }
    }
}

async fn run<R>(reader: R, session: &mut Session) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("reading input")? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(input = %line.trim(), "{err:#}");
                continue;
            }
        };

        match session.execute(command)? {
            Outcome::Continue(text) => println!("{text}"),
            Outcome::Quit => break,
        }
    }
    Ok(())
}
