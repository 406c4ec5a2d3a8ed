//! man2zig: generate documented Zig bindings from an HTML reference manual.
//!
//! - `man2zig generate manual.html -o lua.zig`
//! - `man2zig split manual.html -o definitions.json`
//! - `man2zig extract manual.html lua_pcall`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use man2zig::config::Config;
use man2zig::extract::SectionSource;
use man2zig::manual::{self, Manual};
use man2zig::registry::Registry;
use man2zig::synth::Synthesizer;
use man2zig::{render, split};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "man2zig",
    version,
    about = "Generate documented Zig bindings from an HTML C library reference manual"
)]
struct Cli {
    /// Manual conventions, symbol registry and templates (TOML).
    /// Defaults to the bundled Lua 5.1 configuration.
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log extraction progress
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a binding for every registered symbol
    Generate {
        /// Path to the HTML reference manual
        manual: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format: zig (default), json
        #[arg(short = 'f', long, default_value = "zig")]
        format: String,

        /// Fail without writing output if any symbol cannot be extracted
        #[arg(long)]
        strict: bool,
    },

    /// Split the configured manual sections into a JSON fragment cache
    Split {
        /// Path to the HTML reference manual
        manual: PathBuf,

        /// Cache file to write
        #[arg(short = 'o', long, default_value = "definitions.json")]
        output: PathBuf,
    },

    /// Print the extracted prose and prototype of one symbol
    Extract {
        /// Path to the HTML reference manual
        manual: PathBuf,

        /// Anchor name of the symbol, e.g. lua_pcall
        symbol: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::bundled()?,
    };

    match cli.command {
        Command::Generate {
            ref manual,
            ref output,
            ref format,
            strict,
        } => generate(&config, manual, output.as_deref(), format, strict),
        Command::Split {
            ref manual,
            ref output,
        } => split_mode(&config, manual, output),
        Command::Extract {
            ref manual,
            ref symbol,
        } => extract_mode(&config, manual, symbol),
    }
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn read_manual(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read manual: {}", path.display()))
}

/// generate: extract every registered symbol and render the bindings.
fn generate(
    config: &Config,
    manual_path: &Path,
    output: Option<&Path>,
    format: &str,
    strict: bool,
) -> Result<()> {
    let renderer = render::create_renderer(format, config.output.preamble.as_deref())?;
    let registry = Registry::from_config(config)?;
    let manual = Manual::from_bytes(&read_manual(manual_path)?, &config.manual)?;

    let synthesis = Synthesizer::new(&manual, &registry, &config.templates, &config.manual).run();

    if !synthesis.failures.is_empty() {
        for failure in &synthesis.failures {
            if strict {
                tracing::error!(symbol = %failure.symbol, category = %failure.category, "{}", failure.error);
            } else {
                tracing::warn!(symbol = %failure.symbol, category = %failure.category, "skipped: {}", failure.error);
            }
        }
        if strict {
            bail!(
                "{} of {} symbols could not be extracted",
                synthesis.failures.len(),
                registry.len()
            );
        }
    }

    let rendered = renderer.render(&synthesis.bindings)?;
    match output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    tracing::info!(
        bindings = synthesis.bindings.len(),
        skipped = synthesis.failures.len(),
        "generated bindings"
    );
    Ok(())
}

/// split: carve the configured regions into the fragment cache.
fn split_mode(config: &Config, manual_path: &Path, output: &Path) -> Result<()> {
    let text = manual::decode(&read_manual(manual_path)?, config.manual.encoding)?;
    if config.split.regions.is_empty() {
        bail!("no [[split.regions]] configured");
    }

    let fragments = split::split_manual(&text, &config.split)?;
    split::write_cache(output, &fragments)?;

    tracing::info!(fragments = fragments.len(), path = %output.display(), "wrote fragment cache");
    Ok(())
}

/// extract: show what the extractor sees for one symbol.
fn extract_mode(config: &Config, manual_path: &Path, symbol: &str) -> Result<()> {
    let manual = Manual::from_bytes(&read_manual(manual_path)?, &config.manual)?;
    let section = manual
        .extract(symbol)
        .with_context(|| format!("failed to extract {}", symbol))?;

    for node in &section.prose {
        println!("{}", node.markup);
    }
    match section.prototype {
        Some(ref prototype) => println!("{}", prototype.text),
        None => tracing::warn!(symbol, "no prototype found"),
    }
    Ok(())
}
