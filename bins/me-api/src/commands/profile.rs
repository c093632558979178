//! Profile command

use crate::commands::{print_json, scalar};
use crate::Format;
use me_api_client::MeApiClient;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Fetch and print the profile
pub async fn run(client: &MeApiClient, format: Format) -> anyhow::Result<()> {
    let profile = client.profile().fetch().await?;

    if format == Format::Json {
        return print_json(&profile);
    }

    let fields = match profile {
        Value::Object(fields) => fields,
        other => {
            println!("{}", scalar(&other));
            return Ok(());
        }
    };

    println!();
    println!("  {}", "Profile".blue().bold());
    println!();
    let width = fields.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in &fields {
        println!("  {:width$}  {}", key.dimmed(), scalar(value));
    }
    println!();

    Ok(())
}
