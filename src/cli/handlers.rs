//! Command handlers for the data-extract binary

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

use super::commands::CliArgs;
use super::output::{OutputFormatter, Selection};
use crate::config::ExtractConfig;
use crate::extract::{extract_with, Extractor};

/// Extracts every path in `args`, printing results to stdout
///
/// Returns the process exit code: 0 when every path was extracted or skipped
/// as unsupported, 1 when any path failed.
pub fn handle_extract(args: &CliArgs) -> i32 {
    let config = match ExtractConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    debug!(?config, "Loaded configuration");

    let formatter = OutputFormatter::new(args.format.into());
    let show_headers = args.paths.len() > 1 && args.format == super::OutputFormatArg::Human;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for path in &args.paths {
        match process_path(path, args, &config, &formatter) {
            Ok(Some(rendered)) => {
                let written = if show_headers {
                    writeln!(out, "==> {} <==\n{}\n", path, rendered)
                } else {
                    writeln!(out, "{}", rendered)
                };
                if let Err(e) = written {
                    eprintln!("Error: failed to write output: {}", e);
                    return 1;
                }
            }
            Ok(None) => debug!(path = path.as_str(), "Skipped unsupported path"),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                failures += 1;
            }
        }
    }

    info!(
        total = args.paths.len(),
        failed = failures,
        "Extraction finished"
    );

    if failures > 0 {
        1
    } else {
        0
    }
}

/// Extracts one path and renders it; `None` for unsupported suffixes
fn process_path(
    path: &str,
    args: &CliArgs,
    config: &ExtractConfig,
    formatter: &OutputFormatter,
) -> Result<Option<String>> {
    let Some(extractor) = extract_with(path, config)? else {
        return Ok(None);
    };

    let selection = select(path, &extractor, args)?;
    formatter.format(path, &selection).map(Some)
}

fn select<'a>(path: &str, extractor: &'a Extractor, args: &CliArgs) -> Result<Selection<'a>> {
    match extractor {
        Extractor::Json(json) => {
            if args.query.is_some() {
                debug!(path, "Ignoring --query for JSON document");
            }
            match &args.json_pointer {
                Some(pointer) => json
                    .parsed_data()
                    .pointer(pointer)
                    .map(Selection::Json)
                    .with_context(|| format!("No value at JSON pointer '{}' in {}", pointer, path)),
                None => Ok(Selection::Json(json.parsed_data())),
            }
        }
        Extractor::Xml(xml) => {
            if args.json_pointer.is_some() {
                debug!(path, "Ignoring --json-pointer for XML document");
            }
            match &args.query {
                Some(query) => {
                    let matches = xml
                        .parsed_data()
                        .find_all(query)
                        .with_context(|| format!("Invalid query for {}", path))?;
                    Ok(Selection::XmlMatches(matches))
                }
                None => Ok(Selection::XmlDocument(xml.parsed_data())),
            }
        }
    }
}
