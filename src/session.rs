use crate::{decode, summary, Frame, Record, RecordWriter, RecorderErr, Timestamp};
use async_tungstenite::tungstenite::{self, Message};
use futures::{Stream, StreamExt};

/// One established connection, from open to close.
///
/// Frames are handled strictly one after another: a frame is timestamped, decoded, written and
/// its write acknowledged before the next one is read, so the log preserves arrival order.
pub struct Session<'c, S> {
    stream: S,
    writer: RecordWriter,
    clock: &'c mut ReceiptClock,
    frames: u64,
}

#[derive(Debug)]
/// How a session ended.
pub enum SessionEnd {
    /// The peer closed the connection, or the stream simply ended.
    Closed { frames: u64, reason: Option<String> },
    /// The transport failed.
    Failed { frames: u64, error: RecorderErr },
}

#[derive(Debug, Default, Clone)]
/// Hands out receipt timestamps that never go backwards, even if the wall clock does.
///
/// Owned by the supervisor and lent to every session, so the guarantee holds across reconnects.
pub struct ReceiptClock {
    last: Option<Timestamp>,
}

impl<S> std::fmt::Debug for Session<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("writer", &self.writer)
            .field("clock", &self.clock)
            .field("frames", &self.frames)
            .finish()
    }
}

impl<'c, S> Session<'c, S>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    pub fn new(stream: S, writer: RecordWriter, clock: &'c mut ReceiptClock) -> Self {
        Self {
            stream,
            writer,
            clock,
            frames: 0,
        }
    }

    /// Receive until the transport ends. Per-frame failures never end the session.
    pub async fn run(mut self) -> SessionEnd {
        let end = loop {
            let message = match self.stream.next().await {
                Some(Ok(message)) => message,
                Some(Err(tungstenite::Error::ConnectionClosed)) | None => {
                    break SessionEnd::Closed {
                        frames: self.frames,
                        reason: None,
                    };
                }
                Some(Err(e)) => {
                    break SessionEnd::Failed {
                        frames: self.frames,
                        error: RecorderErr::WebSocket(e),
                    };
                }
            };
            let received_at = self.clock.now();
            match message {
                Message::Close(frame) => {
                    break SessionEnd::Closed {
                        frames: self.frames,
                        reason: frame.map(|f| f.reason.into_owned()),
                    };
                }
                message => match Frame::from_message(message) {
                    Some(frame) => self.handle(received_at, frame).await,
                    None => log::trace!("Control frame ignored"),
                },
            }
        };
        log::info!("Session ended after {} frames", end.frames());
        end
    }

    async fn handle(&mut self, received_at: Timestamp, frame: Frame) {
        self.frames += 1;
        let record = Record::new(received_at, decode(frame));
        let summary = summary(record.payload());
        match self.writer.append(&record).await {
            Ok(()) => log::info!("Saved{summary}"),
            Err(e) => log::error!(
                "Failed to save{summary} to {}: {e:?}",
                self.writer.path().display()
            ),
        }
    }
}

impl SessionEnd {
    pub fn frames(&self) -> u64 {
        match self {
            Self::Closed { frames, .. } | Self::Failed { frames, .. } => *frames,
        }
    }
}

impl ReceiptClock {
    pub fn now(&mut self) -> Timestamp {
        self.stamp(Timestamp::now_utc())
    }

    /// `now`, but never earlier than the previous receipt.
    pub fn stamp(&mut self, now: Timestamp) -> Timestamp {
        let received_at = match self.last {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last = Some(received_at);
        received_at
    }

    pub fn last(&self) -> Option<&Timestamp> {
        self.last.as_ref()
    }
}
