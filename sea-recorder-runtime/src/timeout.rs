use futures::future::Future;
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
pub use tokio::time::error::Elapsed as TimeoutError;

#[cfg(feature = "runtime-async-std")]
pub use async_std::future::TimeoutError;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
#[derive(Debug)]
pub struct TimeoutError;

/// Fail with [`TimeoutError`] if `f` does not complete within `dur`.
pub async fn timeout<F, T>(dur: Duration, f: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    #[cfg(feature = "runtime-tokio")]
    return tokio::time::timeout(dur, f).await;

    #[cfg(feature = "runtime-async-std")]
    return async_std::future::timeout(dur, f).await;

    #[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
    {
        let _ = (dur, f);
        Err(TimeoutError)
    }
}

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
impl std::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Please enable a runtime")
    }
}

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
impl std::error::Error for TimeoutError {}
