use futures::future::FutureExt;

pub type TaskHandle<T> =
    futures::future::Map<async_std::task::JoinHandle<T>, fn(T) -> Result<T, JoinError>>;

/// `async-std` propagates panics instead of reporting them, so this is never constructed.
#[derive(Debug)]
pub struct JoinError;

pub fn spawn_blocking<F, T>(f: F) -> TaskHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    async_std::task::spawn_blocking(f).map(Result::Ok)
}

impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JoinError")
    }
}

impl std::error::Error for JoinError {}
