use anyhow::{Context, Result};
use discovery::{DiscoveryClient, DiscoveryError, ServiceDescriptor};
use std::path::{Path, PathBuf};

/// A discovery backend read from a JSON file.
///
/// The file holds an array of descriptors in the backend's JSON shape and is
/// re-read on every call, so edits show up on the next refresh. A missing or
/// unparsable file is reported as a discovery failure.
#[derive(Debug, Clone)]
pub struct FileDiscoveryClient {
    path: PathBuf,
}

impl FileDiscoveryClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ServiceDescriptor>> {
        let raw = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let descriptors = serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(descriptors)
    }
}

impl DiscoveryClient for FileDiscoveryClient {
    fn list_services(&self, service_type: &str) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
        let descriptors = self.load().map_err(|e| {
            if e.downcast_ref::<serde_json::Error>().is_some() {
                DiscoveryError::malformed(format!("{:#}", e))
            } else {
                DiscoveryError::from(e)
            }
        })?;

        Ok(descriptors
            .into_iter()
            .filter(|d| d.service_type() == service_type)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_descriptors_of_requested_type() {
        let apple = ServiceDescriptor::builder("apple", "pool").node_id("node-A").build();
        let banana = ServiceDescriptor::builder("banana", "pool").build();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_vec(&vec![apple.clone(), banana]).unwrap();
        file.write_all(&json).unwrap();

        let client = FileDiscoveryClient::new(file.path());
        assert_eq!(client.list_services("apple").unwrap(), vec![apple]);
    }

    #[test]
    fn test_missing_file_is_transport_error() {
        let client = FileDiscoveryClient::new("/nonexistent/services.json");
        let err = client.list_services("apple").unwrap_err();
        assert!(matches!(err, DiscoveryError::Transport(_)));
    }

    #[test]
    fn test_garbage_is_malformed_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let client = FileDiscoveryClient::new(file.path());
        let err = client.list_services("apple").unwrap_err();
        assert!(matches!(err, DiscoveryError::Malformed(_)));
    }
}
