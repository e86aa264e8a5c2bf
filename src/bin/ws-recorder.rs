use anyhow::{anyhow, Result};
use clap::Parser;
use sea_recorder::{
    Outcome, RecordWriter, Recorder, RecorderOptions, WsConnector, DEFAULT_MAX_BACKOFF,
    DEFAULT_OUTPUT, DEFAULT_URL,
};
use std::{path::PathBuf, process::ExitCode, time::Duration};
use url::Url;

#[derive(Debug, Parser)]
#[clap(about = "Listen to a WebSocket and append every message to a JSON Lines file")]
struct Args {
    #[clap(long, help = "WebSocket URL", default_value = DEFAULT_URL)]
    url: Url,
    #[clap(long, help = "Output JSONL file. Appends if exist", default_value = DEFAULT_OUTPUT)]
    out: PathBuf,
    #[clap(long, help = "Do not reconnect after a failure")]
    no_reconnect: bool,
    #[clap(long, value_parser = parse_duration, help = "Upper bound of the reconnect delay. e.g. 30s, 1m")]
    max_backoff: Option<Duration>,
    #[clap(long, value_parser = parse_duration, help = "Give up a connection attempt after. e.g. 500ms, 10s")]
    connect_timeout: Option<Duration>,
}

/// A non-zero duration.
fn parse_duration(src: &str) -> Result<Duration> {
    let duration = if let Some(s) = src.strip_suffix("ms") {
        Duration::from_millis(s.parse()?)
    } else if let Some(s) = src.strip_suffix('s') {
        Duration::from_secs(s.parse()?)
    } else if let Some(s) = src.strip_suffix('m') {
        let mins: u64 = s.parse()?;
        Duration::from_secs(
            mins.checked_mul(60)
                .ok_or_else(|| anyhow!("{} is too long", src))?,
        )
    } else {
        return Err(anyhow!("Failed to parse {} as Duration", src));
    };
    if duration.is_zero() {
        return Err(anyhow!("Duration must be greater than zero"));
    }
    Ok(duration)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args {
        url,
        out,
        no_reconnect,
        max_backoff,
        connect_timeout,
    } = Args::parse();

    let mut options = RecorderOptions::default();
    options
        .set_reconnect(!no_reconnect)
        .set_max_backoff(max_backoff.unwrap_or(DEFAULT_MAX_BACKOFF));
    if connect_timeout.is_some() {
        options.set_connect_timeout(connect_timeout);
    }

    log::info!("Recording {url} into {}", out.display());
    let connector = WsConnector::new(options.connect_timeout().copied());
    let recorder = Recorder::new(url, connector, RecordWriter::new(out), options);

    match recorder.run(interrupt()).await {
        Outcome::Shutdown => {
            log::info!("Shut down by user");
            ExitCode::SUCCESS
        }
        Outcome::Failed(e) => {
            log::error!("Recorder terminated with error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for interrupt: {e:?}");
        std::future::pending::<()>().await;
    }
}
