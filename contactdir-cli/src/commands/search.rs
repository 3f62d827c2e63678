//! Search from the command line

use anyhow::{Context, Result};
use clap::Parser;
use contactdir_core::{search_contacts, SearchFields};

use super::connect::{connect, database_config, ConnectArgs};

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Free-text query
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub query: String,

    /// Comma separated fields to search (first_name, last_name, email or their spaced aliases)
    #[arg(long, default_value = "")]
    pub fields: String,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

pub async fn run_search(args: SearchArgs) -> Result<()> {
    let config = database_config()?;
    let pool = connect(&config, &args.connect).await?;

    let fields = SearchFields::parse(&args.fields);
    let contacts = search_contacts(&pool, &args.query, &fields)
        .await
        .context("Failed to perform full-text search")?;

    println!("{}", serde_json::to_string_pretty(&contacts)?);
    Ok(())
}
