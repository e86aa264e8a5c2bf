use std::time::Duration;

use crate::{RecorderErr, RecorderResult};
use async_tungstenite::tungstenite::{self, Message};
use futures::{future::Future, stream::BoxStream, Stream};
use url::Url;

/// Opens transports for the supervisor. One call, one connection attempt.
pub trait Connector: Send {
    type Stream: Stream<Item = Result<Message, tungstenite::Error>> + Unpin + Send;

    fn connect(&mut self, url: &Url) -> impl Future<Output = RecorderResult<Self::Stream>> + Send;
}

#[derive(Debug, Default, Clone)]
/// Receive-only WebSocket client.
pub struct WsConnector {
    timeout: Option<Duration>,
}

impl WsConnector {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Connector for WsConnector {
    type Stream = BoxStream<'static, Result<Message, tungstenite::Error>>;

    fn connect(&mut self, url: &Url) -> impl Future<Output = RecorderResult<Self::Stream>> + Send {
        let request = url.as_str().to_owned();
        let timeout = self.timeout;
        async move {
            let handshake = connect_async(request);
            let (stream, response) = match timeout {
                Some(dur) => sea_recorder_runtime::timeout(dur, handshake)
                    .await
                    .map_err(|_| RecorderErr::ConnectTimeout)??,
                None => handshake.await?,
            };
            log::debug!("Handshake response {}", response.status());
            Ok(stream)
        }
    }
}

#[cfg(feature = "runtime-tokio")]
async fn connect_async(
    request: String,
) -> RecorderResult<(BoxStream<'static, Result<Message, tungstenite::Error>>, Response)> {
    use futures::StreamExt;

    let (stream, response) = async_tungstenite::tokio::connect_async(request)
        .await
        .map_err(RecorderErr::WebSocket)?;
    Ok((stream.boxed(), response))
}

#[cfg(feature = "runtime-async-std")]
async fn connect_async(
    request: String,
) -> RecorderResult<(BoxStream<'static, Result<Message, tungstenite::Error>>, Response)> {
    use futures::StreamExt;

    let (stream, response) = async_tungstenite::async_std::connect_async(request)
        .await
        .map_err(RecorderErr::WebSocket)?;
    Ok((stream.boxed(), response))
}

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
async fn connect_async(
    _: String,
) -> RecorderResult<(BoxStream<'static, Result<Message, tungstenite::Error>>, Response)> {
    Err(RecorderErr::Runtime("Please enable a runtime".into()))
}

type Response = tungstenite::handshake::client::Response;
