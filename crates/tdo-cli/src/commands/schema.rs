use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::views::{ProjectView, SectionView, TaskView, WriteReport};

/// Handle `tdo schema`. Always prints JSON, whatever `--format` says.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_of(args.record);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn schema_of(record: SchemaType) -> Schema {
    match record {
        SchemaType::Project => schema_for!(ProjectView),
        SchemaType::Section => schema_for!(SectionView),
        SchemaType::Task => schema_for!(TaskView),
        SchemaType::WriteReport => schema_for!(WriteReport<serde_json::Value>),
    }
}
