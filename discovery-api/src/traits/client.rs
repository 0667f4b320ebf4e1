//! Defines the `DiscoveryClient` trait, the selector's view of the backend.

use crate::model::descriptor::ServiceDescriptor;
use crate::model::error::DiscoveryError;

/// A synchronous handle on the discovery backend.
///
/// Implementations are owned outside the selector and are usually shared by
/// many selectors. Any timeout is the implementation's business; the selector
/// treats a timeout like any other error.
///
/// # Examples
///
/// ```
/// use discovery::{DiscoveryClient, DiscoveryError, ServiceDescriptor};
///
/// struct Unreachable;
///
/// impl DiscoveryClient for Unreachable {
///     fn list_services(&self, _service_type: &str) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
///         Err(DiscoveryError::transport("connection refused"))
///     }
/// }
/// ```
pub trait DiscoveryClient: Send + Sync {
    /// Lists every announced instance of `service_type`.
    ///
    /// The result is not required to be filtered by pool, and a misbehaving
    /// backend may even return other types.
    fn list_services(&self, service_type: &str) -> Result<Vec<ServiceDescriptor>, DiscoveryError>;
}
