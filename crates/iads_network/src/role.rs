//! IADS roles and the static role catalog.

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

pub const CATEGORY_COMMS: &str = "comms";
pub const CATEGORY_POWER: &str = "power";
pub const CATEGORY_COMMAND_CENTER: &str = "commandcenter";

/// 15 NM.
pub const DEFAULT_CONNECTION_NODE_RANGE_M: f64 = 27_780.0;
/// 35 NM.
pub const DEFAULT_POWER_SOURCE_RANGE_M: f64 = 64_820.0;

// ============================================================================
// Role
// ============================================================================

/// The role a defense group plays in the network. Serialized names match the
/// tags the downstream plugin expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IadsRole {
    #[serde(rename = "Sam")]
    Sam,
    #[serde(rename = "SamAsEwr")]
    SamAsEwr,
    #[serde(rename = "Ewr")]
    Ewr,
    #[serde(rename = "CommandCenter")]
    CommandCenter,
    #[serde(rename = "ConnectionNode")]
    ConnectionNode,
    #[serde(rename = "PowerSource")]
    PowerSource,
    #[serde(rename = "PointDefense")]
    PointDefense,
    #[serde(rename = "NoSkynetBehavior")]
    NoBehavior,
}

impl IadsRole {
    /// Role derived from an installation category. Only infrastructure and
    /// command-center buildings carry a role in their category.
    pub fn for_category(category: &str) -> IadsRole {
        match category {
            CATEGORY_COMMS => IadsRole::ConnectionNode,
            CATEGORY_POWER => IadsRole::PowerSource,
            CATEGORY_COMMAND_CENTER => IadsRole::CommandCenter,
            _ => IadsRole::NoBehavior,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IadsRole::Sam => "Sam",
            IadsRole::SamAsEwr => "SamAsEwr",
            IadsRole::Ewr => "Ewr",
            IadsRole::CommandCenter => "CommandCenter",
            IadsRole::ConnectionNode => "ConnectionNode",
            IadsRole::PowerSource => "PowerSource",
            IadsRole::PointDefense => "PointDefense",
            IadsRole::NoBehavior => "NoSkynetBehavior",
        }
    }

    pub fn participates(&self) -> bool {
        !matches!(self, IadsRole::NoBehavior)
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, IadsRole::ConnectionNode | IadsRole::PowerSource)
    }

    /// Roles whose plugin identity is a unit name rather than a group name.
    pub fn uses_unit_identity(&self) -> bool {
        matches!(
            self,
            IadsRole::Ewr
                | IadsRole::CommandCenter
                | IadsRole::ConnectionNode
                | IadsRole::PowerSource
        )
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleDescriptor {
    pub role: IadsRole,
    /// May anchor a node or be attached as a connection.
    pub participates: bool,
    /// Comms or power: link-only, never a primary node.
    pub is_infrastructure: bool,
    pub connection_range_m: f64,
}

/// Connection range overrides, in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub connection_node_m: f64,
    pub power_source_m: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            connection_node_m: DEFAULT_CONNECTION_NODE_RANGE_M,
            power_source_m: DEFAULT_POWER_SOURCE_RANGE_M,
        }
    }
}

/// Role descriptor table resolved once per lookup instead of branching on
/// role identity at every call site.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleCatalog {
    ranges: RangeConfig,
}

impl RoleCatalog {
    pub fn new(ranges: RangeConfig) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &RangeConfig {
        &self.ranges
    }

    pub fn descriptor(&self, role: IadsRole) -> RoleDescriptor {
        let connection_range_m = match role {
            IadsRole::ConnectionNode => self.ranges.connection_node_m,
            IadsRole::PowerSource => self.ranges.power_source_m,
            _ => 0.0,
        };
        RoleDescriptor {
            role,
            participates: role.participates(),
            is_infrastructure: role.is_infrastructure(),
            connection_range_m,
        }
    }

    pub fn for_category(&self, category: &str) -> RoleDescriptor {
        self.descriptor(IadsRole::for_category(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_map_to_roles() {
        assert_eq!(IadsRole::for_category("comms"), IadsRole::ConnectionNode);
        assert_eq!(IadsRole::for_category("power"), IadsRole::PowerSource);
        assert_eq!(
            IadsRole::for_category("commandcenter"),
            IadsRole::CommandCenter
        );
        assert_eq!(IadsRole::for_category("aa"), IadsRole::NoBehavior);
    }

    #[test]
    fn only_no_behavior_is_excluded() {
        assert!(IadsRole::PointDefense.participates());
        assert!(IadsRole::PowerSource.participates());
        assert!(!IadsRole::NoBehavior.participates());
    }

    #[test]
    fn catalog_applies_range_overrides() {
        let catalog = RoleCatalog::new(RangeConfig {
            connection_node_m: 10.0,
            power_source_m: 20.0,
        });
        let power = catalog.for_category(CATEGORY_POWER);
        assert!(power.is_infrastructure);
        assert_eq!(power.connection_range_m, 20.0);
        assert_eq!(catalog.descriptor(IadsRole::Sam).connection_range_m, 0.0);
    }

    #[test]
    fn role_tags_match_serialized_names() {
        let encoded = serde_json::to_string(&IadsRole::NoBehavior).expect("encode role");
        assert_eq!(encoded, format!("\"{}\"", IadsRole::NoBehavior.as_str()));
    }
}
