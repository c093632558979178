//! Projects commands

use crate::commands::{first_str, print_json, scalar};
use crate::Format;
use me_api_client::MeApiClient;
use owo_colors::OwoColorize;

/// List projects, optionally filtered by skill
pub async fn list(client: &MeApiClient, skill: Option<&str>, format: Format) -> anyhow::Result<()> {
    let projects = client.projects().list(skill).await?;

    if format == Format::Json {
        return print_json(&projects);
    }

    if projects.is_empty() {
        println!("{}", "No projects found".yellow());
        return Ok(());
    }

    for project in &projects {
        let title = first_str(project, &["title", "name"]).unwrap_or("Untitled Project");
        match first_str(project, &["description"]) {
            Some(description) => println!("  {} {}  {}", "•".blue(), title.bold(), description.dimmed()),
            None => println!("  {} {}", "•".blue(), title.bold()),
        }
    }
    println!();
    println!("  {} project(s)", projects.len());

    Ok(())
}

/// Show a single project
pub async fn show(client: &MeApiClient, id: &str, format: Format) -> anyhow::Result<()> {
    let project = client.projects().get(id).await?;

    if format == Format::Json {
        return print_json(&project);
    }

    match project.as_object() {
        Some(fields) => {
            for (key, value) in fields {
                println!("  {}: {}", key.dimmed(), scalar(value));
            }
        }
        None => println!("{}", scalar(&project)),
    }

    Ok(())
}
