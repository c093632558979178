//! Config command

use crate::commands::print_json;
use crate::Format;
use me_api_client::MeApiClient;
use owo_colors::OwoColorize;

/// Print the resolved client configuration
pub fn run(client: &MeApiClient, format: Format) -> anyhow::Result<()> {
    let config = client.config();

    if format == Format::Json {
        return print_json(config);
    }

    println!("  {}  {}", "base url:    ".dimmed(), client.base_url());
    println!(
        "  {}  {}",
        "api version: ".dimmed(),
        config.endpoint.api_version().unwrap_or("-")
    );
    println!("  {}  {}s", "timeout:     ".dimmed(), config.timeout.as_secs());
    println!("  {}  {}", "max retries: ".dimmed(), config.max_retries);
    println!("  {}  {}s", "retry cap:   ".dimmed(), config.max_retry_after.as_secs());
    println!("  {}  {}", "search limit:".dimmed(), config.search_limit);
    println!(
        "  {}  {}",
        "origin:      ".dimmed(),
        config.origin.as_deref().unwrap_or("-")
    );

    Ok(())
}
