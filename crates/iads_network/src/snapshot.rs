//! Read-only projection of the live network for the plugin data exporter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::IadsError;
use crate::models::{DefenseGroup, Installation, Side};
use crate::network::IadsNetwork;
use crate::role::IadsRole;

/// One node as the downstream plugin sees it. Carries names only, never a
/// handle back into the live network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub name: String,
    pub side: Side,
    pub role: IadsRole,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Role tag to connected identity names.
    #[serde(default)]
    pub connections: BTreeMap<String, Vec<String>>,
}

impl SnapshotNode {
    pub fn from_group(installation: &Installation, group: &DefenseGroup) -> Result<Self, IadsError> {
        Ok(Self {
            name: identity_name(group)?,
            side: installation.side,
            role: group.role,
            properties: group.properties.clone(),
            connections: BTreeMap::new(),
        })
    }

    pub fn connected(&self, role: IadsRole) -> &[String] {
        self.connections
            .get(role.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Name the plugin uses to find the group in the mission. Radars, command
/// centers, comms and power are addressed by unit; everything else by group.
pub fn identity_name(group: &DefenseGroup) -> Result<String, IadsError> {
    if !group.role.uses_unit_identity() {
        return Ok(group.name.clone());
    }
    if let Some(unit) = group.units.iter().find(|unit| unit.alive) {
        return Ok(unit.name.clone());
    }
    // Statics remain in the mission as dead placements.
    match group.units.first() {
        Some(unit) if unit.is_static => Ok(unit.name.clone()),
        _ => Err(IadsError::NoUsableUnit {
            group: group.name.clone(),
        }),
    }
}

impl IadsNetwork {
    /// Projects the network, skipping dead nodes and links, links to groups
    /// that no longer participate or to installations not allied with the
    /// node, and anything `is_culled` flags as not currently relevant.
    pub fn project<F>(&self, is_culled: F) -> Result<Vec<SnapshotNode>, IadsError>
    where
        F: Fn(&Installation) -> bool,
    {
        let mut snapshot = Vec::new();
        for node in self.nodes() {
            let Some((installation, group)) = self.resolve_group(node.primary()) else {
                continue;
            };
            if is_culled(installation) || !group.has_alive_units() {
                continue;
            }

            let mut entry = SnapshotNode::from_group(installation, group)?;
            for connection in node.connections().values() {
                let Some((target, target_group)) = self.resolve_group(connection) else {
                    continue;
                };
                if !target_group.role.participates() || !target_group.has_alive_units() {
                    continue;
                }
                if target.is_friendly(entry.side) && !is_culled(target) {
                    entry
                        .connections
                        .entry(target_group.role.as_str().to_string())
                        .or_default()
                        .push(identity_name(target_group)?);
                }
            }
            snapshot.push(entry);
        }
        Ok(snapshot)
    }

    pub fn project_all(&self) -> Result<Vec<SnapshotNode>, IadsError> {
        self.project(|_| false)
    }
}
