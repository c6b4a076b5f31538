//! Command implementations for the schemagen CLI.

use anyhow::{anyhow, Context, Result};
use schemagen_core::catalog::Catalog;
use schemagen_core::{Document, TypeDescriptor};
use std::path::Path;

/// How a rendered document is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty { indent: usize },
    Compact,
}

/// Load and parse a catalog file.
fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::from_path(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}

/// Render one catalog type to JSON text.
pub fn render_type(
    catalog: &Catalog,
    type_name: &str,
    schema: Option<String>,
    format: OutputFormat,
) -> Result<String> {
    let ty = catalog
        .get(type_name)
        .ok_or_else(|| anyhow!("Type '{}' not found in catalog", type_name))?;

    let mut document = match schema {
        Some(uri) => Document::with_schema(uri),
        None => Document::new(),
    };
    document.read(&ty);

    let rendered = match format {
        OutputFormat::Pretty { indent } => document.render_with_indent(indent),
        OutputFormat::Compact => document.render_compact(),
    };
    rendered.context("Failed to render schema")
}

/// Generate command: render a type's schema to stdout or a file.
pub fn generate(
    catalog_path: &Path,
    type_name: &str,
    schema: Option<String>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    if let Err(e) = catalog.check() {
        tracing::warn!("{e}; unresolved types render untyped");
    }

    let rendered = render_type(&catalog, type_name, schema, format)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote schema for '{}' to {}", type_name, path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// One summary line per catalog type: its kind, and its field count for records.
pub fn describe_types(catalog: &Catalog) -> Vec<String> {
    catalog
        .names()
        .filter_map(|name| catalog.get(name))
        .map(|ty| {
            let fields = ty.fields().len();
            if fields > 0 {
                format!("{} ({}, {} fields)", ty.name(), ty.kind(), fields)
            } else {
                format!("{} ({})", ty.name(), ty.kind())
            }
        })
        .collect()
}

/// List command: show all types defined in a catalog.
pub fn list(catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let lines = describe_types(&catalog);
    println!("Catalog types: {}", lines.len());

    if lines.is_empty() {
        return Ok(());
    }

    println!();
    for line in lines {
        println!("  {}", line);
    }

    Ok(())
}

/// Verify a loaded catalog and summarize it.
pub fn check_catalog(catalog: &Catalog, origin: &Path) -> Result<String> {
    catalog
        .check()
        .with_context(|| format!("Catalog {} is incomplete", origin.display()))?;
    Ok(format!(
        "Catalog {} is complete ({} types)",
        origin.display(),
        catalog.types.len()
    ))
}

/// Check command: verify that every reference resolves.
pub fn check(catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    println!("{}", check_catalog(&catalog, catalog_path)?);
    Ok(())
}
