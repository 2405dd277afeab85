//! Notifications the network pushes to the simulation's event bus.

use serde::{Deserialize, Serialize};

use super::node::{ConnectionId, IadsNetworkNode};
use crate::models::InstallationId;

/// Receiver for network change notifications. Delivery is fire-and-forget.
pub trait IadsEventSink {
    fn node_updated(&mut self, node: &IadsNetworkNode);
    fn connection_deleted(&mut self, id: ConnectionId);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum IadsEvent {
    NodeUpdated {
        installation: InstallationId,
        group: String,
    },
    ConnectionDeleted {
        connection_id: ConnectionId,
    },
}

/// Recording sink, used by hosts that batch notifications per simulation step.
impl IadsEventSink for Vec<IadsEvent> {
    fn node_updated(&mut self, node: &IadsNetworkNode) {
        self.push(IadsEvent::NodeUpdated {
            installation: node.installation_id().clone(),
            group: node.to_string(),
        });
    }

    fn connection_deleted(&mut self, id: ConnectionId) {
        self.push(IadsEvent::ConnectionDeleted { connection_id: id });
    }
}
