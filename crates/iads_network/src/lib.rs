pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod network;
pub mod role;
pub mod snapshot;

pub use config::{
    IadsAdjacency, IadsConfigEntry, NetworkConfig, Scenario, DEFAULT_CONFIG_FILE_NAME,
};
pub use error::IadsError;
pub use geometry::{planar_distance_m, GeoPos, CM_PER_M};
pub use models::{
    DefenseGroup, GroupRef, Installation, InstallationId, InstallationKind, Side, Unit,
};
pub use network::{
    ConnectionId, ConnectionIdAllocator, IadsEvent, IadsEventSink, IadsNetwork, IadsNetworkNode,
    NetworkMode,
};
pub use role::{
    IadsRole, RangeConfig, RoleCatalog, RoleDescriptor, CATEGORY_COMMAND_CENTER, CATEGORY_COMMS,
    CATEGORY_POWER, DEFAULT_CONNECTION_NODE_RANGE_M, DEFAULT_POWER_SOURCE_RANGE_M,
};
pub use snapshot::{identity_name, SnapshotNode};
