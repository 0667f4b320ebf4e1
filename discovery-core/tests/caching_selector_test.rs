use discovery::{DiscoveryError, ServiceDescriptor, ServiceSelector, ServiceState};
use discovery_core::client::{InMemoryDiscoveryClient, ScriptedDiscoveryClient};
use discovery_core::observer::RecordingObserver;
use discovery_core::scheduler::TokioScheduler;
use discovery_core::{CachingServiceSelector, ServiceSelectorConfig};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn service(node: &str, service_type: &str, pool: &str, key: &str) -> ServiceDescriptor {
    ServiceDescriptor::new(
        Uuid::new_v4(),
        node,
        service_type,
        pool,
        "location",
        ServiceState::Running,
        [(key.to_string(), service_type.to_string())],
    )
}

struct Services {
    apple_1: ServiceDescriptor,
    apple_2: ServiceDescriptor,
    different_type: ServiceDescriptor,
    different_pool: ServiceDescriptor,
}

impl Services {
    fn new() -> Self {
        Self {
            apple_1: service("node-A", "apple", "pool", "a"),
            apple_2: service("node-B", "apple", "pool", "a"),
            different_type: service("node-A", "banana", "pool", "b"),
            different_pool: service("node-B", "apple", "fool", "a"),
        }
    }

    fn all(&self) -> Vec<ServiceDescriptor> {
        vec![
            self.apple_1.clone(),
            self.apple_2.clone(),
            self.different_type.clone(),
            self.different_pool.clone(),
        ]
    }

    fn in_memory(&self) -> Arc<InMemoryDiscoveryClient> {
        let client = Arc::new(InMemoryDiscoveryClient::new());
        for descriptor in self.all() {
            client.add_discovered_service(descriptor);
        }
        client
    }

    fn apples(&self) -> HashSet<ServiceDescriptor> {
        HashSet::from([self.apple_1.clone(), self.apple_2.clone()])
    }
}

fn as_set(services: &[ServiceDescriptor]) -> HashSet<ServiceDescriptor> {
    services.iter().cloned().collect()
}

#[tokio::test]
async fn test_basics() {
    let selector = CachingServiceSelector::new(
        "type",
        ServiceSelectorConfig::new("pool"),
        Arc::new(InMemoryDiscoveryClient::new()),
        Arc::new(TokioScheduler::current()),
    )
    .unwrap();

    assert_eq!(selector.service_type(), "type");
    assert_eq!(selector.pool(), "pool");
}

#[tokio::test]
async fn test_not_started_empty() {
    let selector = CachingServiceSelector::new(
        "type",
        ServiceSelectorConfig::new("pool"),
        Arc::new(InMemoryDiscoveryClient::new()),
        Arc::new(TokioScheduler::current()),
    )
    .unwrap();

    assert!(selector.select_all_services().is_empty());
}

#[tokio::test]
async fn test_started_empty() {
    let selector = CachingServiceSelector::new(
        "type",
        ServiceSelectorConfig::new("pool"),
        Arc::new(InMemoryDiscoveryClient::new()),
        Arc::new(TokioScheduler::current()),
    )
    .unwrap();

    selector.start().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(selector.select_all_services().is_empty());
}

#[tokio::test]
async fn test_not_started_with_services() {
    let services = Services::new();
    let selector = CachingServiceSelector::new(
        "apple",
        ServiceSelectorConfig::new("pool"),
        services.in_memory(),
        Arc::new(TokioScheduler::current()),
    )
    .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(selector.select_all_services().is_empty());
}

#[tokio::test]
async fn test_started_with_services() {
    let _ = env_logger::builder().is_test(true).try_init();
    let services = Services::new();
    let selector = CachingServiceSelector::new(
        "apple",
        ServiceSelectorConfig::new("pool"),
        services.in_memory(),
        Arc::new(TokioScheduler::current()),
    )
    .unwrap();

    selector.start().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(as_set(&selector.select_all_services()), services.apples());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_backend_outage_serves_last_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();
    let services = Services::new();
    let client = Arc::new(ScriptedDiscoveryClient::returning(services.all()));
    let observer = Arc::new(RecordingObserver::new());
    let selector = CachingServiceSelector::with_observer(
        "apple",
        ServiceSelectorConfig::new("pool").with_refresh_interval(Duration::from_millis(100)),
        client.clone(),
        Arc::new(TokioScheduler::current()),
        observer.clone(),
    )
    .unwrap();

    selector.start().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(as_set(&selector.select_all_services()), services.apples());

    client.set_error(DiscoveryError::Backend {
        status: 503,
        message: "unavailable".to_string(),
    });
    tokio::time::sleep(Duration::from_millis(450)).await;

    assert!(observer.failures().len() >= 3);
    assert_eq!(as_set(&selector.select_all_services()), services.apples());

    client.set_services(vec![services.apple_2.clone()]);
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(*selector.select_all_services(), vec![services.apple_2.clone()]);
}

#[tokio::test]
async fn test_stop_freezes_snapshot() {
    let services = Services::new();
    let client = services.in_memory();
    let selector = CachingServiceSelector::new(
        "apple",
        ServiceSelectorConfig::new("pool").with_refresh_interval(Duration::from_millis(100)),
        client.clone(),
        Arc::new(TokioScheduler::current()),
    )
    .unwrap();

    selector.start().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    selector.stop();

    client.remove_discovered_service(services.apple_1.id());
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(as_set(&selector.select_all_services()), services.apples());
}
