//! Schema command implementation.
//!
//! JSON Schema for the shapes `--json` output and seed files use.

use anyhow::Result;
use gorodplus_lib::present::{IssueCard, MapView};
use gorodplus_lib::Issue;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::json;

use crate::cli::{SchemaArgs, SchemaTarget};
use crate::format::StatsOutput;
use crate::output::OutputContext;

#[must_use]
pub fn schema_of(target: SchemaTarget) -> serde_json::Value {
    fn value(schema: &RootSchema) -> serde_json::Value {
        serde_json::to_value(schema).unwrap_or_default()
    }

    match target {
        SchemaTarget::Issue => value(&schema_for!(Issue)),
        SchemaTarget::Statistics => value(&schema_for!(StatsOutput)),
        SchemaTarget::Card => value(&schema_for!(IssueCard)),
        SchemaTarget::Map => value(&schema_for!(MapView)),
        SchemaTarget::All => json!({
            "issue": value(&schema_for!(Issue)),
            "statistics": value(&schema_for!(StatsOutput)),
            "card": value(&schema_for!(IssueCard)),
            "map": value(&schema_for!(MapView)),
        }),
    }
}

/// Execute the schema command. Output is always JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &SchemaArgs, ctx: &OutputContext) -> Result<()> {
    ctx.json(&schema_of(args.target))
}
