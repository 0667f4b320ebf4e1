pub mod logging;

#[cfg(any(test, feature = "test-utils"))]
pub mod recording;

pub use logging::LoggingObserver;

#[cfg(any(test, feature = "test-utils"))]
pub use recording::RecordingObserver;
