//! Network configuration: the authored adjacency list, the advanced switch
//! and connection range overrides, plus the scenario file the demo binary
//! reads installations from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::IadsError;
use crate::models::{Installation, InstallationId};
use crate::role::{RangeConfig, RoleCatalog};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "iads.toml";

// ============================================================================
// Adjacency
// ============================================================================

/// One authored adjacency entry: either a bare primary with no explicit
/// connections, or a mapping from primaries to their secondaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IadsConfigEntry {
    Primary(InstallationId),
    Links(BTreeMap<InstallationId, Vec<InstallationId>>),
}

impl IadsConfigEntry {
    pub fn primary(name: impl Into<String>) -> Self {
        IadsConfigEntry::Primary(name.into())
    }

    pub fn links<I, S>(primary: impl Into<String>, secondaries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut links = BTreeMap::new();
        links.insert(
            primary.into(),
            secondaries.into_iter().map(Into::into).collect(),
        );
        IadsConfigEntry::Links(links)
    }
}

/// Primary identity to secondary identities, in authored order. A primary
/// listed twice keeps its first position and its last list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IadsAdjacency {
    entries: Vec<(InstallationId, Vec<InstallationId>)>,
}

impl IadsAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = IadsConfigEntry>,
    {
        let mut adjacency = Self::new();
        for entry in entries {
            match entry {
                IadsConfigEntry::Primary(primary) => adjacency.insert(primary, Vec::new()),
                IadsConfigEntry::Links(links) => {
                    for (primary, secondaries) in links {
                        adjacency.insert(primary, secondaries);
                    }
                }
            }
        }
        adjacency
    }

    /// Parses adjacency data embedded in a JSON campaign document. Any entry
    /// that is neither a string nor a string-to-list object is rejected.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, IadsError> {
        let items = value
            .as_array()
            .ok_or_else(|| IadsError::InvalidConfigEntry {
                index: 0,
                message: "iads config root is not a list".to_string(),
            })?;
        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let entry = serde_json::from_value::<IadsConfigEntry>(item.clone()).map_err(|_| {
                IadsError::InvalidConfigEntry {
                    index,
                    message: format!("expected a name or a name-to-list mapping, got {item}"),
                }
            })?;
            entries.push(entry);
        }
        Ok(Self::from_entries(entries))
    }

    pub fn insert(&mut self, primary: InstallationId, secondaries: Vec<InstallationId>) {
        match self.entries.iter_mut().find(|(name, _)| *name == primary) {
            Some((_, existing)) => *existing = secondaries,
            None => self.entries.push((primary, secondaries)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn primaries(&self) -> impl Iterator<Item = &InstallationId> {
        self.entries.iter().map(|(primary, _)| primary)
    }

    /// Secondaries for a primary; empty when the primary is not configured.
    pub fn secondaries(&self, primary: &str) -> &[InstallationId] {
        self.entries
            .iter()
            .find(|(name, _)| name == primary)
            .map(|(_, secondaries)| secondaries.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// Network Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Enables comms, power and command-center links. Without it the network
    /// only holds nodes.
    pub advanced: bool,
    pub iads: Vec<IadsConfigEntry>,
    pub ranges: RangeConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            advanced: true,
            iads: Vec::new(),
            ranges: RangeConfig::default(),
        }
    }
}

impl NetworkConfig {
    pub fn from_path(path: &Path) -> Result<Self, IadsError> {
        let content = fs::read_to_string(path).map_err(|err| IadsError::ReadFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::parse_toml(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, IadsError> {
        Self::parse_toml(content, "<inline>")
    }

    fn parse_toml(content: &str, origin: &str) -> Result<Self, IadsError> {
        toml::from_str(content).map_err(|err| IadsError::ParseConfig {
            path: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn adjacency(&self) -> IadsAdjacency {
        IadsAdjacency::from_entries(self.iads.iter().cloned())
    }

    pub fn role_catalog(&self) -> RoleCatalog {
        RoleCatalog::new(self.ranges.clone())
    }
}

// ============================================================================
// Scenario
// ============================================================================

/// Installation list as exported by the campaign loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scenario {
    pub installations: Vec<Installation>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self, IadsError> {
        let content = fs::read_to_string(path).map_err(|err| IadsError::ReadFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|err| IadsError::ParseScenario {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::DEFAULT_POWER_SOURCE_RANGE_M;

    #[test]
    fn toml_config_mixes_bare_names_and_mappings() {
        let config = NetworkConfig::from_toml_str(
            r#"
advanced = true
iads = ["SAM-NORTH", { "SAM-SOUTH" = ["POWER-1", "COMMS-1"] }]

[ranges]
connection_node_m = 1000.0
"#,
        )
        .expect("parse config");

        let adjacency = config.adjacency();
        let primaries: Vec<_> = adjacency.primaries().cloned().collect();
        assert_eq!(primaries, vec!["SAM-NORTH", "SAM-SOUTH"]);
        assert!(adjacency.secondaries("SAM-NORTH").is_empty());
        assert_eq!(
            adjacency.secondaries("SAM-SOUTH"),
            &["POWER-1".to_string(), "COMMS-1".to_string()]
        );
        assert_eq!(config.ranges.connection_node_m, 1000.0);
        assert_eq!(config.ranges.power_source_m, DEFAULT_POWER_SOURCE_RANGE_M);
    }

    #[test]
    fn empty_config_defaults_to_advanced_range_mode() {
        let config = NetworkConfig::from_toml_str("").expect("parse empty config");
        assert!(config.advanced);
        assert!(config.adjacency().is_empty());
    }

    #[test]
    fn malformed_toml_entry_is_fatal() {
        let err = NetworkConfig::from_toml_str("iads = [42]").expect_err("reject number");
        assert!(matches!(err, IadsError::ParseConfig { .. }));
    }

    #[test]
    fn json_adjacency_rejects_malformed_entries() {
        let value = serde_json::json!(["SAM-1", { "SAM-2": ["PWR"] }, 7]);
        let err = IadsAdjacency::from_json_value(&value).expect_err("reject number entry");
        assert!(matches!(err, IadsError::InvalidConfigEntry { index: 2, .. }));

        let value = serde_json::json!([{ "SAM-2": "PWR" }]);
        let err = IadsAdjacency::from_json_value(&value).expect_err("reject scalar mapping");
        assert!(matches!(err, IadsError::InvalidConfigEntry { index: 0, .. }));
    }

    #[test]
    fn repeated_primary_keeps_position_and_last_list() {
        let adjacency = IadsAdjacency::from_entries([
            IadsConfigEntry::links("A", ["X"]),
            IadsConfigEntry::primary("B"),
            IadsConfigEntry::links("A", ["Y", "Z"]),
        ]);
        let primaries: Vec<_> = adjacency.primaries().cloned().collect();
        assert_eq!(primaries, vec!["A", "B"]);
        assert_eq!(adjacency.secondaries("A"), &["Y".to_string(), "Z".to_string()]);
        assert_eq!(adjacency.len(), 2);
    }
}
