//! # tdo-core
//!
//! Record types, hierarchical paths, and identifier resolution for tdo.
//!
//! This crate holds everything that does not touch the network:
//! - Entity structs mirroring the task service's projects, sections, and tasks
//! - Value enums shared by the CLI and the API client
//! - The path builder producing `Parent » Child` breadcrumbs
//! - The resolver turning user tokens into unique record ids
//! - The snapshot that one command invocation resolves against

pub mod entities;
pub mod enums;
pub mod errors;
pub mod path;
pub mod resolve;
pub mod snapshot;

pub use errors::{Candidate, EntityKind, ResolveError};
pub use path::{Hierarchical, PATH_DELIMITER, PathIndex};
pub use resolve::MatchMode;
pub use snapshot::{BatchResolution, Snapshot, SnapshotIndex, TaskScope};
