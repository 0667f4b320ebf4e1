use discovery::{DiscoveryClient, DiscoveryError, ServiceDescriptor};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// A discovery backend living in process memory.
///
/// Services are announced and withdrawn by hand. Lookups filter by type only,
/// like a real backend queried by type; pool filtering is left to selectors.
#[derive(Debug, Default)]
pub struct InMemoryDiscoveryClient {
    services: RwLock<HashMap<Uuid, ServiceDescriptor>>,
}

impl InMemoryDiscoveryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces a service, replacing any previous descriptor with the same id.
    pub fn add_discovered_service(&self, descriptor: ServiceDescriptor) {
        let mut services = self.services.write().unwrap_or_else(|p| p.into_inner());
        services.insert(descriptor.id(), descriptor);
    }

    /// Withdraws a service.
    ///
    /// # Returns
    ///
    /// * `Some(ServiceDescriptor)` if the id was announced.
    /// * `None` otherwise.
    pub fn remove_discovered_service(&self, id: Uuid) -> Option<ServiceDescriptor> {
        let mut services = self.services.write().unwrap_or_else(|p| p.into_inner());
        services.remove(&id)
    }

    /// Returns every announced service regardless of type.
    pub fn discovered_services(&self) -> Vec<ServiceDescriptor> {
        let services = self.services.read().unwrap_or_else(|p| p.into_inner());
        services.values().cloned().collect()
    }
}

impl DiscoveryClient for InMemoryDiscoveryClient {
    fn list_services(&self, service_type: &str) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
        let services = self.services.read().unwrap_or_else(|p| p.into_inner());
        Ok(services
            .values()
            .filter(|d| d.service_type() == service_type)
            .cloned()
            .collect())
    }
}
