//! Command-line front end.
//!
//! `main` only installs the logger, parses arguments and reports errors;
//! the subcommands run here against any writer.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::batch::parse_all_parallel;
use crate::config::ParserConfig;
use crate::error::LeadParserError;
use crate::input::{InputOptions, InputSource, load_inputs};
use crate::models::ParsedLeadData;
use crate::normalizer::normalize_lead_data;
use crate::parser::detect_portal_source;

#[derive(Parser, Debug)]
#[command(
    name = "lead-parser",
    about = "Extract structured leads from real-estate portal notification emails"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parse emails and print a JSON array of leads.
    Parse {
        /// Email files to parse; reads stdin when none are given.
        files: Vec<PathBuf>,

        /// Apply currency, area and phone formatting to every lead.
        #[arg(long)]
        normalize: bool,

        /// Treat every input as a full MIME message.
        #[arg(long)]
        mime: bool,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,

        /// Worker threads for batch parsing (defaults to LEAD_PARSER_THREADS or the CPU count).
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Print the detected portal for each input.
    Detect {
        files: Vec<PathBuf>,

        #[arg(long)]
        mime: bool,
    },
    /// Normalize a lead JSON object read from a file or stdin.
    Normalize {
        file: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
}

/// Settings for `parse` once command-line flags are layered over the
/// environment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSettings {
    pub threads: usize,
    pub normalize: bool,
    pub input: InputOptions,
}

impl ParseSettings {
    pub fn resolve(
        threads: Option<usize>,
        normalize: bool,
        mime: bool,
        config: &ParserConfig,
    ) -> Self {
        Self {
            threads: threads.unwrap_or(config.worker_threads).max(1),
            normalize: normalize || config.normalize,
            input: InputOptions {
                max_input_bytes: config.max_input_bytes,
                force_mime: mime,
            },
        }
    }
}

fn sources(files: Vec<PathBuf>) -> Vec<InputSource> {
    if files.is_empty() {
        vec![InputSource::Stdin]
    } else {
        files.into_iter().map(InputSource::File).collect()
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, LeadParserError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Run one subcommand, writing its output to `out`.
pub fn run<W: Write>(
    args: Args,
    config: &ParserConfig,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Command::Parse {
            files,
            normalize,
            mime,
            pretty,
            threads,
        } => {
            let settings = ParseSettings::resolve(threads, normalize, mime, config);
            let inputs = load_inputs(&sources(files), &settings.input)?;
            let outcome = parse_all_parallel(inputs, settings.threads)?;

            let leads: Vec<ParsedLeadData> = if settings.normalize {
                outcome.leads.into_iter().map(normalize_lead_data).collect()
            } else {
                outcome.leads
            };

            log::info!("batch stats: {}", serde_json::to_string(&outcome.stats)?);
            writeln!(out, "{}", to_json(&leads, pretty)?)?;
        }
        Command::Detect { files, mime } => {
            let options = InputOptions {
                max_input_bytes: config.max_input_bytes,
                force_mime: mime,
            };
            for (label, text) in load_inputs(&sources(files), &options)? {
                writeln!(out, "{}\t{}", label, detect_portal_source(&text))?;
            }
        }
        Command::Normalize { file, pretty } => {
            let json = match file {
                Some(path) => {
                    std::fs::read_to_string(&path).map_err(|e| LeadParserError::io(path, e))?
                }
                None => {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .map_err(|e| LeadParserError::io("<stdin>", e))?;
                    buffer
                }
            };
            let lead: ParsedLeadData = serde_json::from_str(&json).map_err(LeadParserError::from)?;
            writeln!(out, "{}", to_json(&normalize_lead_data(lead), pretty)?)?;
        }
    }

    Ok(())
}
