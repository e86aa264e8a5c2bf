use crate::{
    Backoff, Connector, ReceiptClock, RecordWriter, RecorderErr, RecorderOptions, Session,
    SessionEnd,
};
use futures::future::{select, Either, Future};
use sea_recorder_runtime::sleep;
use url::Url;

/// The reconnection supervisor: keeps one session alive at a time, retrying with exponential
/// backoff, until the operator asks it to stop or a failure is fatal.
#[derive(Debug)]
pub struct Recorder<C> {
    url: Url,
    connector: C,
    writer: RecordWriter,
    options: RecorderOptions,
}

#[derive(Debug)]
/// Terminal outcome of [`Recorder::run`].
pub enum Outcome {
    /// Shut down by user.
    Shutdown,
    /// Reconnection is disabled and the connection failed, or the failure cannot be retried.
    Failed(RecorderErr),
}

impl<C: Connector> Recorder<C> {
    pub fn new(url: Url, connector: C, writer: RecordWriter, options: RecorderOptions) -> Self {
        Self {
            url,
            connector,
            writer,
            options,
        }
    }

    /// Record until `shutdown` resolves or a failure is fatal.
    ///
    /// `shutdown` is observed while connecting, receiving, waiting on a write and sleeping
    /// between attempts alike.
    pub async fn run<F>(self, shutdown: F) -> Outcome
    where
        F: Future<Output = ()>,
    {
        let listen = self.listen();
        futures::pin_mut!(listen);
        futures::pin_mut!(shutdown);
        match select(listen, shutdown).await {
            Either::Left((error, _)) => Outcome::Failed(error),
            Either::Right(((), _)) => {
                log::info!("Interrupted, closing recorder");
                Outcome::Shutdown
            }
        }
    }

    /// Never returns, unless with a fatal error.
    ///
    /// A clean close by the peer is not a failure: the recorder reconnects after the initial
    /// delay, whether or not reconnection is enabled.
    async fn listen(mut self) -> RecorderErr {
        let mut backoff =
            Backoff::new(*self.options.initial_backoff(), *self.options.max_backoff());
        let mut clock = ReceiptClock::default();
        loop {
            log::debug!("Connecting to {}", self.url);
            let error = match self.connector.connect(&self.url).await {
                Ok(stream) => {
                    log::info!("Connected to {}", self.url);
                    backoff.reset();
                    match Session::new(stream, self.writer.clone(), &mut clock)
                        .run()
                        .await
                    {
                        SessionEnd::Closed { reason, .. } => {
                            match reason {
                                Some(reason) if !reason.is_empty() => {
                                    log::info!("Connection closed by peer: {reason}")
                                }
                                _ => log::info!("Connection closed by peer"),
                            }
                            let delay = backoff.peek();
                            log::info!("Reconnecting in {delay:?}");
                            sleep(delay).await;
                            continue;
                        }
                        SessionEnd::Failed { error, .. } => error,
                    }
                }
                Err(error) => error,
            };

            if !error.is_recoverable() {
                log::error!("Unrecoverable failure: {error:?}");
                return error;
            }
            log::warn!("Connection failed: {error}");
            log::debug!("{error:?}");
            if !self.options.reconnect() {
                return error;
            }

            let delay = backoff.next_delay();
            log::warn!("Reconnecting in {delay:?}");
            sleep(delay).await;
        }
    }
}

impl Outcome {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown)
    }
}
