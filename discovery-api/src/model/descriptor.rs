//! Description of one running service instance as reported by discovery.

use crate::model::state::ServiceState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An immutable record describing a single service instance.
///
/// The `id` is assigned by whoever announced the service, never by the
/// selector. Equality and hashing cover every field, so two descriptors with
/// the same `id` but different properties are different values.
///
/// The serialized form uses the discovery backend's field names
/// (`nodeId`, `type`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    id: Uuid,
    node_id: String,
    #[serde(rename = "type")]
    service_type: String,
    pool: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    state: ServiceState,
    #[serde(default)]
    properties: BTreeMap<String, String>,
}

impl ServiceDescriptor {
    /// Creates a new descriptor.
    ///
    /// # Arguments
    ///
    /// * `id` - Globally unique identifier of the instance.
    /// * `node_id` - Identifier of the node hosting the instance.
    /// * `service_type` - The service type name (e.g. "storage").
    /// * `pool` - The deployment pool (e.g. "general").
    /// * `location` - Opaque placement hint.
    /// * `state` - Reported lifecycle state.
    /// * `properties` - Free-form key/value properties such as connection URIs.
    ///
    /// # Returns
    ///
    /// * A new `ServiceDescriptor` instance.
    pub fn new<P>(
        id: Uuid,
        node_id: &str,
        service_type: &str,
        pool: &str,
        location: &str,
        state: ServiceState,
        properties: P,
    ) -> Self
    where
        P: IntoIterator<Item = (String, String)>,
    {
        Self {
            id,
            node_id: node_id.to_string(),
            service_type: service_type.to_string(),
            pool: pool.to_string(),
            location: location.to_string(),
            state,
            properties: properties.into_iter().collect(),
        }
    }

    /// Starts a builder for a descriptor of the given type and pool.
    ///
    /// The builder assigns a random id and the `Running` state unless told
    /// otherwise.
    pub fn builder(service_type: &str, pool: &str) -> ServiceDescriptorBuilder {
        ServiceDescriptorBuilder::new(service_type, pool)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn pool(&self) -> &str {
        &self.pool
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns true if this descriptor belongs to the given type and pool.
    pub fn matches(&self, service_type: &str, pool: &str) -> bool {
        self.service_type == service_type && self.pool == pool
    }
}

/// Step-by-step construction of a [`ServiceDescriptor`].
#[derive(Debug, Clone)]
pub struct ServiceDescriptorBuilder {
    id: Uuid,
    node_id: String,
    service_type: String,
    pool: String,
    location: String,
    state: ServiceState,
    properties: BTreeMap<String, String>,
}

impl ServiceDescriptorBuilder {
    fn new(service_type: &str, pool: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            node_id: String::new(),
            service_type: service_type.to_string(),
            pool: pool.to_string(),
            location: String::new(),
            state: ServiceState::Running,
            properties: BTreeMap::new(),
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn node_id(mut self, node_id: &str) -> Self {
        self.node_id = node_id.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn state(mut self, state: ServiceState) -> Self {
        self.state = state;
        self
    }

    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ServiceDescriptor {
        ServiceDescriptor {
            id: self.id,
            node_id: self.node_id,
            service_type: self.service_type,
            pool: self.pool,
            location: self.location,
            state: self.state,
            properties: self.properties,
        }
    }
}
