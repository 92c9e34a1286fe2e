//! Implementation of the `graft templates` command.

use serde::Serialize;

use graft_core::application::{TemplateInfo, TemplateService};

use crate::{
    cli::{ListFormat, TemplatesArgs},
    commands::template_source,
    config::AppConfig,
    error::CliResult,
    output::{JsonEnvelope, OutputManager},
};

#[derive(Debug, Serialize)]
struct Listing<'a> {
    source: String,
    bundle: &'a str,
    fingerprint: &'a str,
    templates: &'a [TemplateInfo],
}

pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(template_source(&config));
    let bundle = service.load()?;
    let templates = TemplateService::list(&bundle);

    if output.is_json() {
        return output.json(&JsonEnvelope::new(
            "templates",
            Listing {
                source: service.describe(),
                bundle: bundle.name(),
                fingerprint: bundle.fingerprint(),
                templates: &templates,
            },
        ));
    }

    match args.format {
        ListFormat::Table => {
            output.header(&format!(
                "Templates: {} ({})",
                bundle.name(),
                service.describe()
            ))?;
            for t in &templates {
                output.print(&format!(
                    "  {:<64} {:>6} B  {}",
                    t.path,
                    t.size,
                    &t.digest[..t.digest.len().min(12)]
                ))?;
            }
            output.detail(&format!("fingerprint {}", bundle.fingerprint()))?;
        }

        ListFormat::List => {
            for t in &templates {
                output.print(&t.path)?;
            }
        }

        // Parseable even when stdout is piped, regardless of --output-format.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&templates).unwrap_or_else(|_| "[]".into());
            println!("{json}");
        }
    }

    Ok(())
}
