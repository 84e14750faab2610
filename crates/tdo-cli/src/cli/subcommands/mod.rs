pub mod project;
pub mod section;
pub mod task;

pub use project::ProjectCommands;
pub use section::SectionCommands;
pub use task::{DestinationArgs, TaskCommands, TaskFieldArgs, TaskRefArgs, TaskSelectorArgs};
