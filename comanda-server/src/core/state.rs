use std::sync::Arc;

use dashmap::DashMap;
use shared::event::{BusEvent, EventPayload};

use crate::core::Config;
use crate::db::Store;
use crate::message::EventBus;

/// Resource version manager
///
/// Lock-free per-resource version counters backed by DashMap. Every
/// published event carries the incremented version of its resource so
/// subscribers can order updates and detect gaps.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the version for a resource and return the new value
    ///
    /// Unknown resources start at 0 and return 1.
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version for a resource, 0 if never published
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state
///
/// Holds singleton references to all services. Cloning is shallow (Arc),
/// so handlers and background tasks share the same store and bus.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | store | Arc<Store> | In-process entity store |
/// | events | EventBus | Broadcast bus for entity changes |
/// | versions | Arc<ResourceVersions> | Per-resource version counters |
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<Store>,
    pub events: EventBus,
    pub versions: Arc<ResourceVersions>,
}

impl AppState {
    /// Initialize application state from configuration
    pub fn initialize(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: Arc::new(Store::new()),
            events: EventBus::new(config.event_capacity),
            versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// Publish an entity-change event
    ///
    /// The version is incremented per resource kind ("order", "table", ...).
    /// Called by services after the write section has committed; never from
    /// inside a held store lock.
    pub fn publish(&self, resource: &str, payload: EventPayload) {
        let version = self.versions.increment(resource);
        self.events.publish(BusEvent::new(version, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("order"), 0);
        assert_eq!(versions.increment("order"), 1);
        assert_eq!(versions.increment("order"), 2);
        assert_eq!(versions.increment("table"), 1);
        assert_eq!(versions.get("order"), 2);
    }

    #[tokio::test]
    async fn test_publish_assigns_versions() {
        use shared::models::{Table, TableStatus};

        let state = AppState::initialize(&Config::from_env());
        let mut rx = state.events.subscribe();

        let table = Table {
            id: 1,
            number: 1,
            capacity: 4,
            status: TableStatus::Available,
            location: None,
            reserved_by: None,
        };
        state.publish("table", EventPayload::TableUpdated {
            table: table.clone(),
        });
        state.publish("table", EventPayload::TableUpdated { table });

        assert_eq!(rx.recv().await.unwrap().version, 1);
        assert_eq!(rx.recv().await.unwrap().version, 2);
    }
}
