use crate::config::ServiceSelectorConfig;
use crate::error::SelectorError;
use crate::observer::LoggingObserver;
use crate::selector::caching::CachingServiceSelector;
use discovery::{DiscoveryClient, RefreshObserver, Scheduler};
use std::sync::Arc;

/// Builds started selectors that share one discovery client, one scheduler
/// and one observer.
#[derive(Clone)]
pub struct ServiceSelectorFactory {
    client: Arc<dyn DiscoveryClient>,
    scheduler: Arc<dyn Scheduler>,
    observer: Arc<dyn RefreshObserver>,
    defaults: ServiceSelectorConfig,
}

impl ServiceSelectorFactory {
    pub fn new(client: Arc<dyn DiscoveryClient>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            client,
            scheduler,
            observer: Arc::new(LoggingObserver),
            defaults: ServiceSelectorConfig::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RefreshObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Configuration used by [`create`](Self::create).
    pub fn with_defaults(mut self, defaults: ServiceSelectorConfig) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &ServiceSelectorConfig {
        &self.defaults
    }

    /// Creates and starts a selector for `service_type` in the default pool.
    pub fn create(&self, service_type: &str) -> Result<Arc<CachingServiceSelector>, SelectorError> {
        self.create_with_config(service_type, self.defaults.clone())
    }

    /// Creates and starts a selector for `service_type` in `pool`, keeping
    /// the default refresh interval.
    pub fn create_with_pool(
        &self,
        service_type: &str,
        pool: &str,
    ) -> Result<Arc<CachingServiceSelector>, SelectorError> {
        self.create_with_config(service_type, self.defaults.clone().with_pool(pool))
    }

    pub fn create_with_config(
        &self,
        service_type: &str,
        config: ServiceSelectorConfig,
    ) -> Result<Arc<CachingServiceSelector>, SelectorError> {
        let selector = CachingServiceSelector::with_observer(
            service_type,
            config,
            self.client.clone(),
            self.scheduler.clone(),
            self.observer.clone(),
        )?;
        selector.start()?;
        Ok(Arc::new(selector))
    }
}
