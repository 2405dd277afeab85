//! Incremental maintenance driven by installation-level simulation events
//! (built, destroyed, captured).

use tracing::debug;

use super::{ConnectionId, IadsEventSink, IadsNetwork};
use crate::models::{Installation, InstallationId};

/// Outcome for one existing link to a changed comms or power installation.
enum LinkChange {
    /// Both ends are still allied: the installation was destroyed, not
    /// captured, and the link stays.
    Refresh { node: InstallationId },
    /// The installation changed hands, or the linked group is gone or no
    /// longer participates.
    Sever {
        node: InstallationId,
        connection: ConnectionId,
    },
}

impl IadsNetwork {
    /// Applies the installation's current state to the network. Comms and
    /// power installations only touch links in advanced mode; every other
    /// installation has its node rebuilt from scratch.
    pub fn update<S>(&mut self, installation: Installation, events: &mut S)
    where
        S: IadsEventSink + ?Sized,
    {
        let id = installation.name.clone();
        let is_infrastructure = self
            .roles
            .for_category(&installation.category)
            .is_infrastructure;
        if self.installations.insert(id.clone(), installation).is_none() {
            debug!(installation = %id, "installation registered on first update");
        }

        if self.advanced && is_infrastructure {
            self.update_infrastructure(&id, events);
        } else {
            self.update_primary(&id, events);
        }
    }

    fn update_primary<S>(&mut self, id: &str, events: &mut S)
    where
        S: IadsEventSink + ?Sized,
    {
        if let Some(removed) = self.nodes.remove(id) {
            for connection in removed.into_connection_ids() {
                events.connection_deleted(connection);
            }
        }

        let Some(node) = self.node_for_installation(id) else {
            return;
        };
        events.node_updated(node);

        if !self.advanced {
            return;
        }
        if self.adjacency.is_empty() {
            self.add_connections_by_range(id);
        } else {
            self.add_connections_from_config(id);
        }
    }

    fn update_infrastructure<S>(&mut self, id: &str, events: &mut S)
    where
        S: IadsEventSink + ?Sized,
    {
        let Some(installation) = self.installations.get(id) else {
            return;
        };
        let side = installation.side;

        let mut changes = Vec::new();
        for (node_id, node) in &self.nodes {
            let allied = self
                .installations
                .get(node_id)
                .is_some_and(|anchor| anchor.is_friendly(side));
            for connection in node.connections_to(id) {
                let usable = node
                    .connection(connection)
                    .and_then(|target| installation.group(&target.group))
                    .is_some_and(|group| group.role.participates());
                changes.push(if allied && usable {
                    LinkChange::Refresh {
                        node: node_id.clone(),
                    }
                } else {
                    LinkChange::Sever {
                        node: node_id.clone(),
                        connection,
                    }
                });
            }
        }

        for change in changes {
            match change {
                LinkChange::Refresh { node } => {
                    if let Some(node) = self.nodes.get(&node) {
                        events.node_updated(node);
                    }
                }
                LinkChange::Sever { node, connection } => {
                    let removed = self
                        .nodes
                        .get_mut(&node)
                        .and_then(|node| node.remove_connection(connection));
                    if removed.is_some() {
                        debug!(node = %node, connection = %connection, "iads link severed");
                        events.connection_deleted(connection);
                    }
                }
            }
        }

        if self.adjacency.is_empty() {
            self.link_infrastructure_by_range(id, events);
        }
    }

    /// Forms new links from a comms or power installation to allied nodes it
    /// covers, boundary excluded. Nodes already linked to it are left alone.
    fn link_infrastructure_by_range<S>(&mut self, id: &str, events: &mut S)
    where
        S: IadsEventSink + ?Sized,
    {
        let Some(installation) = self.installations.get(id) else {
            return;
        };
        if installation.is_dead() {
            return;
        }
        let role = self.roles.for_category(&installation.category);
        if !role.is_infrastructure {
            return;
        }

        for (node_id, node) in self.nodes.iter_mut() {
            if node.is_connected_to(id) {
                continue;
            }
            let Some(anchor) = self.installations.get(node_id) else {
                continue;
            };
            let distance_m = anchor.pos.planar_distance_m(installation.pos);
            let in_range = distance_m < role.connection_range_m;
            if !in_range || !installation.is_friendly(anchor.side) {
                continue;
            }
            let added =
                node.add_connections_for_installation(installation, &mut self.connection_ids);
            if !added.is_empty() {
                events.node_updated(node);
            }
        }
    }
}
