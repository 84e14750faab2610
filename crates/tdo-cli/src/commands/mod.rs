pub mod dispatch;
pub mod project;
pub mod schema;
pub mod section;
pub mod shared;
pub mod task;
