use std::time::Duration;

/// Where the recorder connects to, unless told otherwise.
pub const DEFAULT_URL: &str = "ws://localhost:21213/";
/// Where records are appended to, unless told otherwise.
pub const DEFAULT_OUTPUT: &str = "tiktok-live-connector-events.jsonl";
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options of the reconnection supervisor.
pub struct RecorderOptions {
    reconnect: bool,
    initial_backoff: Duration,
    max_backoff: Duration,
    connect_timeout: Option<Duration>,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            reconnect: true,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
        }
    }
}

impl RecorderOptions {
    /// If false, the first connection failure ends the recorder with an error.
    pub fn reconnect(&self) -> bool {
        self.reconnect
    }
    pub fn set_reconnect(&mut self, v: bool) -> &mut Self {
        self.reconnect = v;
        self
    }

    /// Delay before the first retry, and after every successful connection.
    /// Default is [`DEFAULT_INITIAL_BACKOFF`].
    pub fn initial_backoff(&self) -> &Duration {
        &self.initial_backoff
    }
    pub fn set_initial_backoff(&mut self, v: Duration) -> &mut Self {
        self.initial_backoff = v;
        self
    }

    /// Default is [`DEFAULT_MAX_BACKOFF`].
    pub fn max_backoff(&self) -> &Duration {
        &self.max_backoff
    }
    pub fn set_max_backoff(&mut self, v: Duration) -> &mut Self {
        self.max_backoff = v;
        self
    }

    /// If None, a connection attempt may take as long as the OS allows.
    pub fn connect_timeout(&self) -> Option<&Duration> {
        self.connect_timeout.as_ref()
    }
    pub fn set_connect_timeout(&mut self, v: Option<Duration>) -> &mut Self {
        self.connect_timeout = v;
        self
    }
}
