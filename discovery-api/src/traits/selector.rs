use crate::model::descriptor::ServiceDescriptor;
use std::sync::Arc;

/// Read access to the set of instances of one service type in one pool.
pub trait ServiceSelector: Send + Sync {
    fn service_type(&self) -> &str;

    fn pool(&self) -> &str;

    /// Returns the current set of matching instances.
    ///
    /// Never performs I/O and never fails. The returned collection is shared
    /// and immutable; later refreshes replace it rather than change it.
    fn select_all_services(&self) -> Arc<Vec<ServiceDescriptor>>;
}
