//! Health check command

use crate::commands::print_json;
use crate::Format;
use me_api_client::endpoints::HealthStatus;
use me_api_client::MeApiClient;
use owo_colors::OwoColorize;

/// Check API health; fails the process when the API is unhealthy
pub async fn run(client: &MeApiClient, format: Format) -> anyhow::Result<()> {
    let status = client.health().check().await;

    if format == Format::Json {
        print_json(&status)?;
    } else {
        print!("  {}  ", client.base_url());
        match &status {
            HealthStatus::Ok { version, .. } => {
                println!("{} (v{})", "✓ OK".green(), version);
            }
            HealthStatus::Error {
                error, status_code, ..
            } => {
                let code = status_code.map(|c| format!(" [{c}]")).unwrap_or_default();
                println!("{}{} {}", "✗ Error".red(), code, error.dimmed());
            }
        }
    }

    if status.is_ok() {
        Ok(())
    } else {
        anyhow::bail!("API at {} is unhealthy", client.base_url())
    }
}
