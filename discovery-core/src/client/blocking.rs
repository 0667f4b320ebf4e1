use async_trait::async_trait;
use discovery::{DiscoveryClient, DiscoveryError, ServiceDescriptor};
use std::time::Duration;
use tokio::runtime::Handle;

/// Asynchronous access to a discovery backend, as networked clients expose it.
#[async_trait]
pub trait AsyncDiscoveryClient: Send + Sync {
    async fn list_services(
        &self,
        service_type: &str,
    ) -> Result<Vec<ServiceDescriptor>, DiscoveryError>;
}

/// Adapts an [`AsyncDiscoveryClient`] to the synchronous [`DiscoveryClient`]
/// contract selectors consume.
///
/// Each call is driven to completion on the given runtime. It must be made
/// from a thread outside the runtime's async workers, which is where the
/// schedulers run refreshes.
pub struct BlockingDiscoveryClient<C> {
    inner: C,
    handle: Handle,
    timeout: Option<Duration>,
}

impl<C: AsyncDiscoveryClient> BlockingDiscoveryClient<C> {
    pub fn new(inner: C, handle: Handle) -> Self {
        Self {
            inner,
            handle,
            timeout: None,
        }
    }

    /// Bounds every call; an elapsed deadline becomes [`DiscoveryError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: AsyncDiscoveryClient> DiscoveryClient for BlockingDiscoveryClient<C> {
    fn list_services(&self, service_type: &str) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
        let call = self.inner.list_services(service_type);
        match self.timeout {
            Some(limit) => self
                .handle
                .block_on(async { tokio::time::timeout(limit, call).await })
                .map_err(|_| DiscoveryError::Timeout(limit))?,
            None => self.handle.block_on(call),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowClient {
        delay: Duration,
    }

    #[async_trait]
    impl AsyncDiscoveryClient for SlowClient {
        async fn list_services(
            &self,
            service_type: &str,
        ) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![ServiceDescriptor::builder(service_type, "pool").build()])
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn test_blocks_until_async_client_answers() {
        let rt = runtime();
        let client = BlockingDiscoveryClient::new(
            SlowClient {
                delay: Duration::from_millis(10),
            },
            rt.handle().clone(),
        );

        let services = client.list_services("apple").unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].service_type(), "apple");
    }

    #[test]
    fn test_elapsed_deadline_is_timeout_error() {
        let rt = runtime();
        let client = BlockingDiscoveryClient::new(
            SlowClient {
                delay: Duration::from_secs(5),
            },
            rt.handle().clone(),
        )
        .with_timeout(Duration::from_millis(20));

        let err = client.list_services("apple").unwrap_err();
        assert_eq!(err, DiscoveryError::Timeout(Duration::from_millis(20)));
    }
}
