//! Authorization check command
//!
//! Loads a fixture, resolves the caller's principals, and evaluates one
//! action against one resource.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use vellum_core::{Action, AuthorizationConfig, Credentials, ModelId, RecordId, Resource, TokenId};
use vellum_policy::{Authorizer, PrincipalResolver};

use crate::fixture::Fixture;

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Fixture with models, records, and tokens (TOML, or JSON by extension)
    #[clap(long)]
    pub fixture: PathBuf,

    /// Action name (`patch-record`) or view name (`patch_record`)
    #[clap(long)]
    pub action: Action,

    /// Target model. Omit to check creating a new model
    #[clap(long)]
    pub model: Option<ModelId>,

    /// Target record within the model
    #[clap(long, requires = "model")]
    pub record: Option<RecordId>,

    /// Token presented by the caller
    #[clap(long, requires = "secret")]
    pub token: Option<TokenId>,

    /// Secret presented with the token
    #[clap(long, requires = "token")]
    pub secret: Option<String>,

    /// Print the decision record as JSON
    #[clap(long)]
    pub json: bool,
}

impl CheckArgs {
    fn resource(&self) -> Resource {
        match (&self.model, &self.record) {
            (Some(model), Some(record)) => Resource::record(model.clone(), record.clone()),
            (Some(model), None) => Resource::model(model.clone()),
            (None, _) => Resource::new_model(),
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        match (&self.token, &self.secret) {
            (Some(token), Some(secret)) => Some(Credentials::new(token.clone(), secret.clone())),
            _ => None,
        }
    }
}

/// Implementation of the check command. Returns whether the action is allowed.
pub fn execute(args: &CheckArgs, config: &AuthorizationConfig) -> Result<bool> {
    let store = Fixture::load(&args.fixture)?.into_store()?;
    let authorizer = Authorizer::from_config(store.clone(), config)?;
    let resolver = PrincipalResolver::new(store);

    let credentials = args.credentials();
    let principals = resolver.resolve(credentials.as_ref());
    if credentials.is_some() && !principals.is_authenticated() {
        log::info!("Credentials not accepted, checking as anonymous");
    }

    let resource = args.resource();
    let evaluation = authorizer.evaluate(args.action, &resource, &principals);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        let verdict = if evaluation.is_allowed() { "ALLOW" } else { "DENY" };
        println!("{verdict} {} on {resource}", args.action);
        println!("  principals: {principals}");
        println!("  effective:  {}", evaluation.effective);
        println!("  outcome:    {}", evaluation.outcome);
    }

    Ok(evaluation.is_allowed())
}
