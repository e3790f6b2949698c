//! fb2pack - keyword templates and EPUB finalizing

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use fb2pack::{EpubFinalizer, FinalizeConfig, Keywords, expand};

#[derive(Parser)]
#[command(name = "fb2pack")]
#[command(version, about = "Keyword templates and EPUB finalizing", long_about = None)]
#[command(after_help = "EXAMPLES:
    fb2pack expand '#title{ (#series)}' -k '#title=Dune' -k '#series='
    fb2pack pack staging/ out/book.epub --overwrite")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log every archive entry
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a keyword pattern
    Expand {
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Keyword definition, e.g. -k '#title=Dune' (repeatable)
        #[arg(short, long = "keyword", value_name = "KEY=VALUE", value_parser = parse_keyword)]
        keywords: Vec<(String, String)>,
    },

    /// Pack a staging directory into an EPUB
    Pack {
        /// Directory holding mimetype, META-INF/ and content
        #[arg(value_name = "STAGING")]
        staging: PathBuf,

        /// EPUB file to create
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Replace OUTPUT if it exists
        #[arg(long)]
        overwrite: bool,

        /// Debug run (always replaces OUTPUT)
        #[arg(long)]
        debug: bool,

        /// Deflate level for content entries (0-9)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: Option<u32>,

        /// Print the packing summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Command::Expand { pattern, keywords } => {
            let keywords: Keywords = keywords.into_iter().collect();
            println!("{}", expand(&pattern, &keywords));
            Ok(())
        }
        Command::Pack {
            staging,
            output,
            overwrite,
            debug,
            level,
            json,
        } => {
            let config = FinalizeConfig {
                overwrite,
                debug,
                compression_level: level,
                ..Default::default()
            };
            pack(&staging, &output, config, json, cli.quiet)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn pack(
    staging: &Path,
    output: &Path,
    config: FinalizeConfig,
    json: bool,
    quiet: bool,
) -> Result<(), String> {
    let report = EpubFinalizer::new()
        .with_config(config)
        .finalize(staging, output)
        .map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
    } else if !quiet {
        println!("File: {}", output.display());
        println!("Entries: {}", report.entries.len());
        println!("Bytes: {}", report.bytes);
    }
    Ok(())
}

fn parse_keyword(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err("keyword name must not be empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}
