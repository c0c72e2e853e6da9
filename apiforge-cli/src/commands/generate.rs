use apiforge_core::ForgeConfig;
use apiforge_openapi::{compose, Composition, Document, DocumentConfig};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::discover::discover_modules;

/// Compose the document and write it to the configured (or overridden) output path.
pub async fn run(
    config_dir: &Path,
    profile: &str,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ForgeConfig::load(config_dir, profile)?;
    if let Some(output) = output {
        config = config.with_output(output);
    }

    let Composition { document, report } = generate(&config).await?;
    let target = config.resolve(&config.output);
    write_document(&document, &target).await?;

    tracing::info!(output = %target.display(), "OpenAPI document written");
    println!(
        "{} {} ({} routes, {} paths, {} definitions)",
        "Generated".green().bold(),
        target.display(),
        report.routes,
        document.paths.len(),
        document.definitions.len(),
    );
    if report.definition_conflicts > 0 {
        println!(
            "  {} {} conflicting definition(s) discarded, first declaration kept",
            "warning:".yellow().bold(),
            report.definition_conflicts
        );
    }
    if report.replaced_operations > 0 {
        println!(
            "  {} {} operation(s) declared more than once",
            "warning:".yellow().bold(),
            report.replaced_operations
        );
    }

    Ok(())
}

/// Resolve document inputs, discover and load routes, compose.
pub async fn generate(config: &ForgeConfig) -> Result<Composition, Box<dyn std::error::Error>> {
    let doc_config = DocumentConfig::from_forge_config(config).await?;
    let modules = discover_modules(config)?;
    Ok(compose(&doc_config, &modules).await?)
}

/// Serialize according to the target extension: YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn render(document: &Document, target: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let is_yaml = target
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    if is_yaml {
        Ok(document.to_yaml_string()?)
    } else {
        Ok(document.to_json_string()?)
    }
}

/// Write through a temporary sibling file then rename it over `target`, so a
/// failed run never leaves a truncated document behind.
pub async fn write_document(document: &Document, target: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = render(document, target)?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp = target.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let persisted = match tokio::fs::write(&tmp, rendered).await {
        Ok(()) => tokio::fs::rename(&tmp, target).await,
        Err(e) => Err(e),
    };
    if let Err(e) = persisted {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
