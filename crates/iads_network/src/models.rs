//! Simulation-side entities the network refers to: installations, their
//! defense groups and units.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::GeoPos;
use crate::role::IadsRole;

// ============================================================================
// Type Aliases
// ============================================================================

/// Stable identity name of an installation (the name authored in the campaign).
pub type InstallationId = String;

// ============================================================================
// Side
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Blue,
    Red,
    Neutral,
}

// ============================================================================
// Units and Groups
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub alive: bool,
    /// Static placements stay in the mission as wrecks once destroyed.
    #[serde(default)]
    pub is_static: bool,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alive: true,
            is_static: false,
        }
    }

    pub fn new_static(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::new(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseGroup {
    pub name: String,
    pub role: IadsRole,
    pub units: Vec<Unit>,
    /// Plugin settings of the group's unit type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl DefenseGroup {
    pub fn new(name: impl Into<String>, role: IadsRole, units: Vec<Unit>) -> Self {
        Self {
            name: name.into(),
            role,
            units,
            properties: BTreeMap::new(),
        }
    }

    pub fn has_alive_units(&self) -> bool {
        self.units.iter().any(|unit| unit.alive)
    }
}

// ============================================================================
// Installation
// ============================================================================

/// Broad installation class, used to decide which installations may anchor
/// a node in range and basic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstallationKind {
    AirDefense,
    Naval,
    Building,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    pub name: InstallationId,
    pub category: String,
    #[serde(default)]
    pub kind: InstallationKind,
    pub pos: GeoPos,
    pub side: Side,
    pub groups: Vec<DefenseGroup>,
}

impl Installation {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        kind: InstallationKind,
        pos: GeoPos,
        side: Side,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            kind,
            pos,
            side,
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: DefenseGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn is_dead(&self) -> bool {
        !self.groups.iter().any(DefenseGroup::has_alive_units)
    }

    pub fn is_friendly(&self, side: Side) -> bool {
        self.side == side
    }

    pub fn group(&self, name: &str) -> Option<&DefenseGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Marks every unit of every group as destroyed.
    pub fn destroy(&mut self) {
        for unit in self.groups.iter_mut().flat_map(|group| group.units.iter_mut()) {
            unit.alive = false;
        }
    }
}

// ============================================================================
// Group Reference
// ============================================================================

/// Handle to one defense group of a registered installation. The network
/// never holds the group itself, only this key into the registry. Groups are
/// keyed by name, so a refreshed installation may reorder its groups freely.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupRef {
    pub installation: InstallationId,
    pub group: String,
}

impl GroupRef {
    pub fn new(installation: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            installation: installation.into(),
            group: group.into(),
        }
    }

    pub fn belongs_to(&self, installation: &str) -> bool {
        self.installation == installation
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.installation, self.group)
    }
}
