//! Action table listing

use anyhow::Result;
use clap::Args;
use std::collections::BTreeMap;
use vellum_policy::{ActionTable, Requirement};

/// Arguments for the actions command
#[derive(Args)]
pub struct ActionsArgs {
    /// Print the table as JSON
    #[clap(long)]
    pub json: bool,
}

/// Implementation of the actions command
pub fn execute(args: &ActionsArgs) -> Result<()> {
    let table = ActionTable::standard();

    if args.json {
        let entries: BTreeMap<String, &Requirement> = table
            .iter()
            .map(|(action, requirement)| (action.to_string(), requirement))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (action, requirement) in table.iter() {
        println!("{:<16} {:<16} {requirement}", action.as_str(), action.view_name());
    }
    Ok(())
}
