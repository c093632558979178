//! Search command

use crate::commands::print_json;
use crate::Format;
use me_api_client::MeApiClient;
use owo_colors::OwoColorize;

/// Run a search and print ranked results
pub async fn run(client: &MeApiClient, query: &str, format: Format) -> anyhow::Result<()> {
    let results = client.search().query(query).await;

    if format == Format::Json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("{}", format!("No results for \"{query}\"").yellow());
        return Ok(());
    }

    for result in &results {
        let kind = format!("[{}]", result.kind);
        println!(
            "  {:10} {} {}",
            kind.cyan(),
            result.name.bold(),
            format!("({:.2})", result.score).dimmed()
        );
        if let Some(ref description) = result.description {
            println!("  {:10} {}", "", description.dimmed());
        }
    }

    Ok(())
}
