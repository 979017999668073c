//! CLI commands.

pub mod resource_type;
pub mod snapshot;

pub use resource_type::ResourceTypeCommand;
pub use snapshot::SnapshotCommand;
