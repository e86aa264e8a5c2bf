//! ### `sea-recorder-runtime`: Async runtime abstraction
//!
//! The handful of runtime primitives the recorder needs (sleeping, timing out a future and
//! offloading blocking work), aligned between `async-std` and `tokio`.

#[cfg(all(feature = "runtime-async-std", feature = "runtime-tokio"))]
compile_error!("'runtime-async-std' and 'runtime-tokio' cannot be enabled at the same time");

mod sleep;
mod task;
mod timeout;

pub use sleep::*;
pub use task::*;
pub use timeout::*;
