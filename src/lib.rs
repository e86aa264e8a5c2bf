//! # 🌊 SeaRecorder
//!
//! Records a live WebSocket feed into an append-only [JSON Lines](https://jsonlines.org/) file,
//! surviving connection failures without operator intervention.
//!
//! Every frame received becomes one line:
//!
//! ```json
//! {"received_at":"2024-01-02T03:04:05.678901Z","data":{"event":"chat","user":"a"}}
//! {"received_at":"2024-01-02T03:04:05.679012Z","raw":"not json"}
//! ```
//!
//! ## Architecture
//!
//! + [`Recorder`]: the reconnection supervisor. Connects, runs a [`Session`], waits with
//!   exponential [`Backoff`] on failure and tries again. Ends with an [`Outcome`].
//! + [`Session`]: one live connection. Timestamps, [`decode`]s and persists every frame in order.
//! + [`RecordWriter`]: appends a [`Record`] to the log file without blocking the async runtime.
//!
//! Delivery is at-least-once: frames around a reconnect may be delivered twice by the source.
//!
//! ## Usage
//!
//! ```ignore
//! let url = "ws://localhost:21213/".parse()?;
//! let options = RecorderOptions::default();
//! let connector = WsConnector::new(options.connect_timeout().copied());
//! let recorder = Recorder::new(url, connector, RecordWriter::new("events.jsonl"), options);
//! match recorder.run(async { tokio::signal::ctrl_c().await.ok(); }).await {
//!     Outcome::Shutdown => println!("bye"),
//!     Outcome::Failed(e) => eprintln!("{e}"),
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod backoff;
mod connector;
mod decoder;
mod error;
mod options;
mod record;
mod recorder;
mod session;
mod writer;

pub use backoff::*;
pub use connector::*;
pub use decoder::*;
pub use error::*;
pub use options::*;
pub use record::*;
pub use recorder::*;
pub use session::*;
pub use writer::*;

/// Re-export types from related libraries
pub mod export {
    pub use async_tungstenite;
    pub use futures;
    pub use time;
    pub use url;
}
