//! Artifact resolution commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use artipoll_adapters::default_registry;
use artipoll_core::{Error, RepositoryQueryService};
use owo_colors::OwoColorize;

use crate::formatting::{print_key_value, print_section_header, print_warning, SectionStyle};

use super::load_config;

fn build_service(config_path: &Path) -> Result<RepositoryQueryService> {
    let config = load_config(config_path)?;
    if config.searches.is_empty() {
        print_warning("No searches configured");
    }
    Ok(RepositoryQueryService::over_http(
        config.searches,
        Arc::new(default_registry()),
    ))
}

pub async fn cmd_versions(
    config_path: &Path,
    artifact_type: &str,
    name: &str,
    json: bool,
) -> Result<()> {
    let service = build_service(config_path)?;
    let versions = service.list_versions(artifact_type, name, &[]).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }

    print_section_header(&format!("Versions of {} ({})", name, artifact_type), SectionStyle::Primary);
    if versions.is_empty() {
        println!("  {} {}", "→".cyan(), "(none)".bright_black());
    } else {
        for version in &versions {
            println!("  {} {}", "→".cyan(), version.bold().white());
        }
    }
    println!();
    Ok(())
}

pub async fn cmd_artifact(
    config_path: &Path,
    artifact_type: &str,
    name: &str,
    version: &str,
    json: bool,
) -> Result<()> {
    let service = build_service(config_path)?;
    let artifact = match service.get_artifact(artifact_type, name, version).await {
        Ok(artifact) => artifact,
        Err(e @ Error::ArtifactNotFound { .. }) => {
            print_warning(&e.to_string());
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
        return Ok(());
    }

    print_section_header(&format!("{} {}", artifact.name, artifact.version), SectionStyle::Primary);
    print_key_value("Type", &artifact.artifact_type);
    print_key_value("Reference", &artifact.reference);
    print_key_value("Location", &artifact.location);
    print_key_value("Provenance", &artifact.provenance);
    print_key_value("Provider", service.provider());
    println!();
    Ok(())
}
