//! Discovery client implementations.

pub mod blocking;
pub mod file;
pub mod memory;

#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;

pub use blocking::{AsyncDiscoveryClient, BlockingDiscoveryClient};
pub use file::FileDiscoveryClient;
pub use memory::InMemoryDiscoveryClient;

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedDiscoveryClient;
