use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{GroupRef, Installation, InstallationId};

// ============================================================================
// Connection Identifiers
// ============================================================================

/// Opaque handle of one node-to-group link. External consumers keep these to
/// match later "connection deleted" notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Monotonic id source scoped to one network. Ids are never reused, even
/// after their connection is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionIdAllocator {
    next: u64,
}

impl Default for ConnectionIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ConnectionIdAllocator {
    pub(crate) fn allocate(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next);
        self.next += 1;
        id
    }
}

// ============================================================================
// Network Node
// ============================================================================

/// A participating installation's anchor group plus its links to
/// infrastructure and point-defense groups.
#[derive(Debug, Clone, PartialEq)]
pub struct IadsNetworkNode {
    primary: GroupRef,
    primary_group_name: String,
    connections: BTreeMap<ConnectionId, GroupRef>,
}

impl IadsNetworkNode {
    pub(crate) fn new(primary: GroupRef, primary_group_name: impl Into<String>) -> Self {
        Self {
            primary,
            primary_group_name: primary_group_name.into(),
            connections: BTreeMap::new(),
        }
    }

    pub fn primary(&self) -> &GroupRef {
        &self.primary
    }

    pub fn installation_id(&self) -> &InstallationId {
        &self.primary.installation
    }

    pub fn connections(&self) -> &BTreeMap<ConnectionId, GroupRef> {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&GroupRef> {
        self.connections.get(&id)
    }

    pub fn is_connected_to(&self, installation: &str) -> bool {
        self.connections
            .values()
            .any(|group| group.belongs_to(installation))
    }

    /// Ids of every connection whose group belongs to `installation`.
    pub fn connections_to(&self, installation: &str) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .filter(|(_, group)| group.belongs_to(installation))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Links every participating group of `installation`. Range and side are
    /// the caller's concern.
    pub(crate) fn add_connections_for_installation(
        &mut self,
        installation: &Installation,
        ids: &mut ConnectionIdAllocator,
    ) -> Vec<ConnectionId> {
        let mut added = Vec::new();
        for group in &installation.groups {
            if group.role.participates() {
                let group_ref = GroupRef::new(installation.name.as_str(), group.name.as_str());
                added.push(self.add_connection_for_group(group_ref, ids));
            }
        }
        added
    }

    pub(crate) fn add_connection_for_group(
        &mut self,
        group: GroupRef,
        ids: &mut ConnectionIdAllocator,
    ) -> ConnectionId {
        let id = ids.allocate();
        self.connections.insert(id, group);
        id
    }

    pub(crate) fn remove_connection(&mut self, id: ConnectionId) -> Option<GroupRef> {
        self.connections.remove(&id)
    }

    pub(crate) fn into_connection_ids(self) -> Vec<ConnectionId> {
        self.connections.into_keys().collect()
    }
}

impl fmt::Display for IadsNetworkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary_group_name)
    }
}
