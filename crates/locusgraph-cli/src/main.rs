//! Locusgraph CLI
//!
//! Command-line front end for the locus view engine:
//! - `view`: apply a selection and scheme to a locus response and print the result
//! - `window`: print the ±1Mb window opened around a single position

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use locusgraph_core::{compute_locus_view, LocusData, LocusWindow, Selection};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::Level;

mod config;
mod render;

use config::{OutputFormat, ViewConfig, ViewOverrides, LOG_ENV};

#[derive(Parser)]
#[command(name = "locusgraph")]
#[command(author, version, about = "Selection-aware views of genomic locus graphs")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the plot, table rows and lookups for a locus response.
    View {
        /// Locus response JSON (bare or wrapped in `gecko`)
        data: PathBuf,
        /// Selection JSON (`selectedGenes`, `selectedTagVariants`, ...)
        #[arg(long)]
        selection: Option<PathBuf>,
        /// Select a gene by id (repeatable)
        #[arg(long = "gene")]
        genes: Vec<String>,
        /// Select a tag variant by id (repeatable)
        #[arg(long = "tag-variant")]
        tag_variants: Vec<String>,
        /// Select an index variant by id (repeatable)
        #[arg(long = "index-variant")]
        index_variants: Vec<String>,
        /// Select a study by id (repeatable)
        #[arg(long = "study")]
        studies: Vec<String>,
        /// Rendering scheme: chained, all or all_genes (1, 2, 3 also accepted)
        #[arg(long)]
        scheme: Option<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Config JSON with defaults for scheme/format/pretty/color
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
        /// Disable colored table output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the locus window linked from a single position.
    Window {
        /// Chromosome name (1-22, X, Y, MT)
        chromosome: String,
        /// 1-based position on the chromosome
        position: u64,
    },
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => env::var(LOG_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(std::io::stderr)
        .init();
}

fn load_selection(path: Option<&PathBuf>) -> Result<Selection> {
    let Some(path) = path else {
        return Ok(Selection::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read selection {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse selection {}", path.display()))
}

#[allow(clippy::too_many_arguments)]
fn cmd_view(
    data: &PathBuf,
    selection: Option<&PathBuf>,
    genes: Vec<String>,
    tag_variants: Vec<String>,
    index_variants: Vec<String>,
    studies: Vec<String>,
    config: ViewConfig,
) -> Result<()> {
    let text = fs::read_to_string(data)
        .with_context(|| format!("failed to read locus data {}", data.display()))?;
    let locus = LocusData::from_json(&text)
        .with_context(|| format!("failed to decode locus data {}", data.display()))?;

    let mut flags = Selection::new();
    if !genes.is_empty() {
        flags = flags.with_genes(genes);
    }
    if !tag_variants.is_empty() {
        flags = flags.with_tag_variants(tag_variants);
    }
    if !index_variants.is_empty() {
        flags = flags.with_index_variants(index_variants);
    }
    if !studies.is_empty() {
        flags = flags.with_studies(studies);
    }
    let selection = load_selection(selection)?.merge(flags);
    tracing::debug!(?selection, scheme = %config.scheme, "computing locus view");

    let view = compute_locus_view(config.scheme, &locus, &selection)
        .context("locus data failed referential integrity")?;

    match config.format {
        OutputFormat::Json => {
            let json = if config.pretty {
                serde_json::to_string_pretty(&view)?
            } else {
                serde_json::to_string(&view)?
            };
            println!("{json}");
        }
        OutputFormat::Table => print!("{}", render::render_table(&view, config.color)),
    }
    Ok(())
}

fn cmd_window(chromosome: &str, position: u64) -> Result<()> {
    let window = LocusWindow::around(chromosome, position)?;
    println!("{window}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::View {
            data,
            selection,
            genes,
            tag_variants,
            index_variants,
            studies,
            scheme,
            format,
            config,
            compact,
            no_color,
        } => {
            let config = ViewConfig::load(config.as_deref())?.apply(&ViewOverrides {
                scheme,
                format,
                compact,
                no_color,
            });
            cmd_view(
                &data,
                selection.as_ref(),
                genes,
                tag_variants,
                index_variants,
                studies,
                config,
            )?;
        }
        Commands::Window {
            chromosome,
            position,
        } => cmd_window(&chromosome, position)?,
    }
    Ok(())
}
