//! Device services the client consumes but does not implement.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

impl Permission {
    pub fn is_granted(self) -> bool {
        self == Permission::Granted
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn request_permission(&self) -> Permission;
    async fn current_position(&self) -> Result<Position, ClientError>;
}

/// On-device key-value persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    async fn set(&self, key: &str, value: String) -> Result<(), ClientError>;
}

/// Local (on-device) notifications.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    async fn request_permission(&self) -> Permission;

    /// Fire-and-forget.
    fn schedule(&self, title: &str, body: &str);
}

#[async_trait]
pub trait PhotoPicker: Send + Sync {
    async fn request_permission(&self) -> Permission;

    /// Raw image bytes, or `None` when the user cancelled.
    async fn pick(&self) -> Option<Vec<u8>>;
}

/// `KeyValueStore` kept in process memory.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(format!("store lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(format!("store lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
