pub mod delay;
pub mod request_executor;

pub use delay::{Delay, RecordingDelay, TokioDelay};
pub use request_executor::{RequestAttempt, RequestExecutor};
