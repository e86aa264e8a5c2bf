#![cfg(feature = "runtime-tokio")]
mod util;
use util::*;

use sea_recorder::{
    export::{
        async_tungstenite::tungstenite::{self, error::UrlError, Message},
        futures::{
            future::{self, Future, FutureExt},
            stream::{self, BoxStream, StreamExt},
        },
        url::Url,
    },
    Connector, Outcome, RecordWriter, Recorder, RecorderErr, RecorderOptions, RecorderResult,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::Instant;

static INIT: std::sync::Once = std::sync::Once::new();

type Item = Result<Message, tungstenite::Error>;

#[derive(Debug)]
enum Attempt {
    Refused,
    Connect(Vec<Item>),
    /// Plays the frames, then stays open without sending anything.
    Hang(Vec<Item>),
    /// The handshake never completes.
    Stall,
    Unsupported,
}

/// Plays back a fixed sequence of connection attempts, then keeps refusing.
#[derive(Debug)]
struct Scripted {
    script: VecDeque<Attempt>,
    attempts: Arc<Mutex<Vec<Instant>>>,
}

impl Scripted {
    fn new(script: Vec<Attempt>) -> (Self, Arc<Mutex<Vec<Instant>>>) {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                script: script.into(),
                attempts: attempts.clone(),
            },
            attempts,
        )
    }
}

impl Connector for Scripted {
    type Stream = BoxStream<'static, Item>;

    fn connect(&mut self, _: &Url) -> impl Future<Output = RecorderResult<Self::Stream>> + Send {
        self.attempts.lock().unwrap().push(Instant::now());
        let result = match self.script.pop_front().unwrap_or(Attempt::Refused) {
            Attempt::Refused => Err(RecorderErr::WebSocket(tungstenite::Error::Io(
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
            ))),
            Attempt::Connect(frames) => Ok(stream::iter(frames).boxed()),
            Attempt::Hang(frames) => Ok(stream::iter(frames).chain(stream::pending()).boxed()),
            Attempt::Stall => return future::pending::<RecorderResult<Self::Stream>>().boxed(),
            Attempt::Unsupported => Err(RecorderErr::WebSocket(tungstenite::Error::Url(
                UrlError::UnsupportedUrlScheme,
            ))),
        };
        future::ready(result).boxed()
    }
}

fn url() -> Url {
    "ws://localhost:21213/".parse().unwrap()
}

/// Seconds between consecutive attempts.
fn delays(attempts: &Mutex<Vec<Instant>>) -> Vec<u64> {
    attempts
        .lock()
        .unwrap()
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).as_secs())
        .collect()
}

// cargo test --test recorder -- --nocapture
#[tokio::test(start_paused = true)]
async fn backoff_doubles_up_to_max() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let mut script: Vec<Attempt> = (0..9).map(|_| Attempt::Refused).collect();
    script.push(Attempt::Unsupported);
    let (connector, attempts) = Scripted::new(script);
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        RecorderOptions::default(),
    );

    let outcome = recorder.run(std::future::pending()).await;
    assert!(matches!(
        outcome,
        Outcome::Failed(RecorderErr::WebSocket(tungstenite::Error::Url(_)))
    ));
    assert_eq!(delays(&attempts), [1, 2, 4, 8, 16, 32, 60, 60, 60]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn backoff_resets_on_connect() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let (connector, attempts) = Scripted::new(vec![
        Attempt::Refused,
        Attempt::Refused,
        Attempt::Refused,
        Attempt::Connect(Vec::new()),
        Attempt::Refused,
        Attempt::Refused,
        Attempt::Unsupported,
    ]);
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        RecorderOptions::default(),
    );

    let outcome = recorder.run(std::future::pending()).await;
    assert!(!outcome.is_shutdown());
    // the close waits out the initial delay, then failures start over from it
    assert_eq!(delays(&attempts), [1, 2, 4, 1, 1, 2]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn custom_backoff_bounds() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let mut script: Vec<Attempt> = (0..5).map(|_| Attempt::Refused).collect();
    script.push(Attempt::Unsupported);
    let (connector, attempts) = Scripted::new(script);
    let mut options = RecorderOptions::default();
    options
        .set_initial_backoff(Duration::from_secs(2))
        .set_max_backoff(Duration::from_secs(5));
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        options,
    );

    recorder.run(std::future::pending()).await;
    assert_eq!(delays(&attempts), [2, 4, 5, 5, 5]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn interrupt_during_backoff() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let (connector, attempts) = Scripted::new(Vec::new());
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        RecorderOptions::default(),
    );

    let start = Instant::now();
    let outcome = recorder
        .run(tokio::time::sleep(Duration::from_millis(2500)))
        .await;
    assert!(outcome.is_shutdown());
    // attempts at 0s and 1s, then interrupted half way through the 2s sleep
    assert_eq!(attempts.lock().unwrap().len(), 2);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(2500));
    assert!(elapsed < Duration::from_secs(3));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn no_reconnect_fails_fast() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let (connector, attempts) = Scripted::new(Vec::new());
    let mut options = RecorderOptions::default();
    options.set_reconnect(false);
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        options,
    );

    let outcome = recorder.run(std::future::pending()).await;
    match outcome {
        Outcome::Failed(RecorderErr::WebSocket(tungstenite::Error::Io(e))) => {
            assert_eq!(e.kind(), std::io::ErrorKind::ConnectionRefused)
        }
        outcome => panic!("Unexpected {outcome:?}"),
    }
    assert_eq!(attempts.lock().unwrap().len(), 1);

    // a clean close is not a failure, so the recorder comes back even without reconnection
    let (connector, attempts) =
        Scripted::new(vec![Attempt::Connect(Vec::new()), Attempt::Unsupported]);
    let mut options = RecorderOptions::default();
    options.set_reconnect(false);
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        options,
    );

    let outcome = recorder.run(std::future::pending()).await;
    assert!(matches!(
        outcome,
        Outcome::Failed(RecorderErr::WebSocket(tungstenite::Error::Url(_)))
    ));
    assert_eq!(delays(&attempts), [1]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn interrupt_while_receiving() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let path = temp_path("recorder-receiving");
    let (connector, attempts) = Scripted::new(vec![Attempt::Hang(vec![Ok(Message::Text(
        r#"{"event":"chat"}"#.to_owned(),
    ))])]);
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(&path),
        RecorderOptions::default(),
    );

    let shutdown = {
        let path = path.clone();
        async move {
            while !std::fs::read_to_string(&path).is_ok_and(|content| content.ends_with('\n')) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    };
    let outcome = recorder.run(shutdown).await;
    assert!(outcome.is_shutdown());
    assert_eq!(read_lines(&path).len(), 1);
    assert_eq!(attempts.lock().unwrap().len(), 1);

    std::fs::remove_file(&path)?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn interrupt_while_connecting() -> anyhow::Result<()> {
    INIT.call_once(env_logger::init);

    let (connector, attempts) = Scripted::new(vec![Attempt::Stall]);
    let recorder = Recorder::new(
        url(),
        connector,
        RecordWriter::new(temp_path("unused")),
        RecorderOptions::default(),
    );

    let outcome = recorder
        .run(tokio::time::sleep(Duration::from_secs(1)))
        .await;
    assert!(outcome.is_shutdown());
    assert_eq!(attempts.lock().unwrap().len(), 1);

    Ok(())
}
