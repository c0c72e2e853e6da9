use apiforge_core::{load_routes, ForgeConfig, LoadedRoute};
use colored::Colorize;
use std::path::Path;

use super::discover::discover_modules;

pub async fn run(config_dir: &Path, profile: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = ForgeConfig::load(config_dir, profile)?;
    let modules = discover_modules(&config)?;
    let mut routes = load_routes(&modules).await?;

    if routes.is_empty() {
        println!("{}", "No routes found.".dimmed());
        return Ok(());
    }

    routes.sort_by(|a, b| {
        a.meta
            .path
            .cmp(&b.meta.path)
            .then_with(|| a.meta.method.cmp(&b.meta.method))
    });

    println!("{}", "Declared routes:".bold());
    println!();
    println!(
        "  {:<8} {:<35} {:<20} {:<5} {}",
        "METHOD".dimmed(),
        "PATH".dimmed(),
        "TAGS".dimmed(),
        "AUTH".dimmed(),
        "MODULE".dimmed()
    );
    println!("  {}", "-".repeat(90).dimmed());

    for route in &routes {
        println!("{}", format_route(route, config.base_dir()));
    }

    println!();
    println!("  {} routes total", routes.len());

    Ok(())
}

/// One table line: method (WS for WebSocket upgrades), path, tags, auth flag, module.
pub fn format_route(route: &LoadedRoute, base: &Path) -> String {
    let meta = &route.meta;
    let method = if meta.is_web_socket {
        "WS".to_string()
    } else {
        meta.method.to_uppercase()
    };
    let method_colored = match method.as_str() {
        "GET" => method.green(),
        "POST" => method.blue(),
        "PUT" => method.yellow(),
        "DELETE" => method.red(),
        "PATCH" => method.magenta(),
        "WS" => method.cyan(),
        _ => method.normal(),
    };

    let module = route.module.strip_prefix(base).unwrap_or(&route.module);
    let auth = if meta.has_auth() { "yes" } else { "-" };

    format!(
        "  {:<8} {:<35} {:<20} {:<5} {}",
        method_colored,
        meta.path,
        meta.tags.join(","),
        auth,
        module.display(),
    )
}
