//! Entity structs for the records served by the task service.
//!
//! Field names follow the service's JSON so responses deserialize directly.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for output
//! rendering and schema dumps.

pub mod id;
mod project;
mod section;
mod task;

pub use project::Project;
pub use section::Section;
pub use task::{Due, Task};
