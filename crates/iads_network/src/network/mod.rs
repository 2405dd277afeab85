//! The IADS network graph.
//!
//! The network represents every possible link between installations,
//! regardless of which side currently holds them. It is built once, either
//! from the authored adjacency list (config mode) or by proximity (range
//! mode), and falls back to nodes without links (basic mode) when neither
//! produces anything. Afterwards it is kept in sync incrementally through
//! [`IadsNetwork::update`].

use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

use crate::config::{IadsAdjacency, NetworkConfig};
use crate::models::{DefenseGroup, GroupRef, Installation, InstallationId, InstallationKind};
use crate::role::{IadsRole, RoleCatalog};

mod events;
mod node;
mod update;

pub use events::{IadsEvent, IadsEventSink};
pub use node::{ConnectionId, ConnectionIdAllocator, IadsNetworkNode};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    /// Links come from the authored adjacency list.
    Config,
    /// Links are formed by proximity to comms and power installations.
    Range,
    /// Nodes only.
    Basic,
}

#[derive(Debug, Clone)]
pub struct IadsNetwork {
    advanced: bool,
    adjacency: IadsAdjacency,
    roles: RoleCatalog,
    installations: BTreeMap<InstallationId, Installation>,
    /// At most one node per installation, keyed by the anchor's installation.
    nodes: BTreeMap<InstallationId, IadsNetworkNode>,
    connection_ids: ConnectionIdAllocator,
    /// Set when construction found no node and fell back to basic mode.
    basic_fallback: bool,
}

impl IadsNetwork {
    pub fn new(advanced: bool, adjacency: IadsAdjacency) -> Self {
        Self {
            advanced,
            adjacency,
            roles: RoleCatalog::default(),
            installations: BTreeMap::new(),
            nodes: BTreeMap::new(),
            connection_ids: ConnectionIdAllocator::default(),
            basic_fallback: false,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.advanced, config.adjacency()).with_role_catalog(config.role_catalog())
    }

    pub fn with_role_catalog(mut self, roles: RoleCatalog) -> Self {
        self.roles = roles;
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Configured resolution mode. Updates keep following it even after
    /// construction fell back to basic mode; see [`Self::effective_mode`].
    pub fn mode(&self) -> NetworkMode {
        if !self.advanced {
            NetworkMode::Basic
        } else if self.adjacency.is_empty() {
            NetworkMode::Range
        } else {
            NetworkMode::Config
        }
    }

    /// Mode the last construction actually produced.
    pub fn effective_mode(&self) -> NetworkMode {
        if self.basic_fallback {
            NetworkMode::Basic
        } else {
            self.mode()
        }
    }

    pub fn used_basic_fallback(&self) -> bool {
        self.basic_fallback
    }

    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    pub fn role_catalog(&self) -> &RoleCatalog {
        &self.roles
    }

    pub fn installation(&self, id: &str) -> Option<&Installation> {
        self.installations.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &IadsNetworkNode> {
        self.nodes.values()
    }

    pub fn node(&self, installation: &str) -> Option<&IadsNetworkNode> {
        self.nodes.get(installation)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.nodes.values().map(|node| node.connections().len()).sum()
    }

    /// Resolves a group handle against the current registry state.
    pub fn resolve_group(&self, group: &GroupRef) -> Option<(&Installation, &DefenseGroup)> {
        let installation = self.installations.get(&group.installation)?;
        let defense_group = installation.group(&group.group)?;
        Some((installation, defense_group))
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Registers the theater's installations and builds the network in the
    /// configured mode, falling back to basic mode if that yields no node.
    pub fn initialize<I>(&mut self, installations: I)
    where
        I: IntoIterator<Item = Installation>,
    {
        for installation in installations {
            self.installations
                .insert(installation.name.clone(), installation);
        }

        match self.mode() {
            NetworkMode::Config => self.initialize_from_config(),
            NetworkMode::Range => self.initialize_from_range(),
            NetworkMode::Basic => {}
        }

        self.basic_fallback = self.nodes.is_empty() && self.mode() != NetworkMode::Basic;
        if self.nodes.is_empty() {
            self.initialize_basic();
        }

        info!(
            mode = ?self.mode(),
            effective_mode = ?self.effective_mode(),
            installations = self.installations.len(),
            nodes = self.nodes.len(),
            connections = self.connection_count(),
            "iads network initialized"
        );
    }

    fn initialize_basic(&mut self) {
        let anchors: Vec<InstallationId> = self
            .installations
            .values()
            .filter(|installation| installation.kind == InstallationKind::AirDefense)
            .map(|installation| installation.name.clone())
            .collect();
        for id in anchors {
            self.node_for_installation(&id);
        }
    }

    fn initialize_from_config(&mut self) {
        let primaries: Vec<InstallationId> = self.adjacency.primaries().cloned().collect();
        for primary in primaries {
            if !self.installations.contains_key(&primary) {
                // Expected when the campaign asks for a unit type the faction
                // does not have: the installation is never populated.
                warn!(installation = %primary, "IADS: no installation found for configured node");
                continue;
            }
            if self.node_for_installation(&primary).is_none() {
                warn!(
                    installation = %primary,
                    "IADS: configured installation does not participate, this can be normal behaviour"
                );
                continue;
            }
            self.add_connections_from_config(&primary);
        }
    }

    fn initialize_from_range(&mut self) {
        let anchors: Vec<InstallationId> = self
            .installations
            .values()
            .filter(|installation| self.is_range_anchor(installation))
            .map(|installation| installation.name.clone())
            .collect();
        for id in anchors {
            if self.node_for_installation(&id).is_none() {
                continue;
            }
            self.add_connections_by_range(&id);
        }
    }

    fn is_range_anchor(&self, installation: &Installation) -> bool {
        match installation.kind {
            InstallationKind::AirDefense | InstallationKind::Naval => true,
            InstallationKind::Building => {
                self.roles.for_category(&installation.category).role == IadsRole::CommandCenter
            }
            InstallationKind::Other => false,
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Returns the installation's node, creating it on first discovery.
    /// `None` means the installation does not participate, which is normal.
    pub fn node_for_installation(&mut self, installation_id: &str) -> Option<&IadsNetworkNode> {
        if !self.nodes.contains_key(installation_id) {
            let installation = self.installations.get(installation_id)?;
            let node = derive_node(installation, &mut self.connection_ids)?;
            debug!(installation = installation_id, group = %node, "iads node created");
            self.nodes.insert(installation_id.to_string(), node);
        }
        self.nodes.get(installation_id)
    }

    // ========================================================================
    // Connections
    // ========================================================================

    pub(crate) fn add_connections_from_config(&mut self, primary: &str) {
        let Some(node) = self.nodes.get_mut(primary) else {
            return;
        };
        for secondary in self.adjacency.secondaries(primary) {
            match self.installations.get(secondary) {
                Some(installation) => {
                    node.add_connections_for_installation(installation, &mut self.connection_ids);
                }
                None => {
                    error!(
                        node = primary,
                        connection = %secondary,
                        "IADS: no installation found for connection"
                    );
                }
            }
        }
    }

    /// Links the node to every allied comms or power installation whose
    /// range covers it, boundary included.
    pub(crate) fn add_connections_by_range(&mut self, node_id: &str) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        let Some(anchor) = self.installations.get(node_id) else {
            return;
        };
        for candidate in self.installations.values() {
            let role = self.roles.for_category(&candidate.category);
            if !role.is_infrastructure || candidate.name == anchor.name {
                continue;
            }
            let distance_m = anchor.pos.planar_distance_m(candidate.pos);
            let in_range = distance_m <= role.connection_range_m;
            if in_range && candidate.is_friendly(anchor.side) {
                node.add_connections_for_installation(candidate, &mut self.connection_ids);
            }
        }
    }

    /// Deletes a connection by id from whichever node owns it.
    pub fn delete_connection<S>(&mut self, id: ConnectionId, events: &mut S) -> Option<GroupRef>
    where
        S: IadsEventSink + ?Sized,
    {
        let removed = self
            .nodes
            .values_mut()
            .find_map(|node| node.remove_connection(id))?;
        events.connection_deleted(id);
        Some(removed)
    }
}

/// The first living participating group anchors the node; later living
/// point-defense groups of the same installation become its connections.
fn derive_node(
    installation: &Installation,
    ids: &mut ConnectionIdAllocator,
) -> Option<IadsNetworkNode> {
    let mut node: Option<IadsNetworkNode> = None;
    for group in &installation.groups {
        if !group.has_alive_units() {
            continue;
        }
        let group_ref = GroupRef::new(installation.name.as_str(), group.name.as_str());
        match node.as_mut() {
            Some(anchor) => {
                if group.role == IadsRole::PointDefense {
                    anchor.add_connection_for_group(group_ref, ids);
                }
            }
            None => {
                if group.role.participates() && !group.role.is_infrastructure() {
                    node = Some(IadsNetworkNode::new(group_ref, group.name.as_str()));
                }
            }
        }
    }

    if node.is_none() {
        debug!(installation = %installation.name, "installation not participating in iads");
    }
    node
}
