use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use coded_targets::pipeline::{self, Error};
use coded_targets::print::{SheetFormat, SheetLayout};
use coded_targets::ring::GenerateConfig;
use coded_targets::RingCodeParams;
use log::LevelFilter;

/// Generate and print circular coded photogrammetry targets (DE19733466A1).
#[derive(Parser, Debug)]
#[command(name = "coded-targets", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the code catalog and list it.
    Codes {
        #[command(flatten)]
        scheme: SchemeArgs,
        /// Print the catalog as JSON instead of the plain listing.
        #[arg(long)]
        json: bool,
        /// Write the catalog JSON to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate the code catalog and write printable sheets.
    Sheets {
        #[command(flatten)]
        scheme: SchemeArgs,
        /// Directory receiving sheet_000.svg, sheet_001.svg, ...
        #[arg(long, default_value = "sheets")]
        out_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,
        /// Raster resolution for PNG output.
        #[arg(long, default_value_t = 300)]
        dpi: u32,
        /// JSON sheet layout; missing fields keep the letter-size defaults.
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// Re-check a catalog JSON file against the coding rule.
    Verify {
        /// Catalog written by `codes --output`.
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SchemeArgs {
    /// Number of sectors in the ring (even integer).
    #[arg(value_name = "N", default_value_t = 14)]
    bits: usize,
    /// Only keep codes with exactly this many runs of set sectors.
    #[arg(short, long, value_name = "T")]
    transitions: Option<u32>,
    /// Minimum circular Hamming distance between codes.
    #[arg(short = 'd', long, default_value_t = 2)]
    min_distance: u32,
    /// JSON generation config; replaces the scheme flags above.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SchemeArgs {
    /// Resolve parameters and the optional catalog output path.
    fn resolve(&self) -> Result<(RingCodeParams, Option<PathBuf>), Error> {
        if let Some(path) = &self.config {
            let cfg = GenerateConfig::load_json(path)?;
            let output = cfg.output_path.as_ref().map(|_| cfg.output_path());
            return Ok((cfg.params, output));
        }
        let params = RingCodeParams {
            ring_length: self.bits,
            min_distance: self.min_distance,
            transitions: self.transitions,
        };
        Ok((params, None))
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Svg,
    Png,
}

fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) {
    let _ = coded_targets::core::init_with_level(level_from_verbosity(verbose));
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8) {
    coded_targets::core::init_tracing(false, level_from_verbosity(verbose));
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Codes {
            scheme,
            json,
            output,
        } => {
            let (params, config_output) = scheme.resolve()?;
            let catalog = pipeline::generate(&params)?;
            if let Some(path) = output.or(config_output) {
                catalog.write_json(&path)?;
                log::info!("catalog written to {}", path.display());
            }
            if json {
                println!("{}", catalog.to_json()?);
            } else {
                print!("{}", pipeline::code_listing(&catalog));
            }
        }
        Command::Sheets {
            scheme,
            out_dir,
            format,
            dpi,
            layout,
        } => {
            let (params, _) = scheme.resolve()?;
            let layout = match layout {
                Some(path) => SheetLayout::load_json(path)?,
                None => SheetLayout::default(),
            };
            let format = match format {
                Format::Svg => SheetFormat::Svg,
                Format::Png => SheetFormat::Png { dpi },
            };
            let written = pipeline::generate_sheets(&params, &layout, &out_dir, format)?;
            println!("wrote {} sheets to {}", written.len(), out_dir.display());
        }
        Command::Verify { path } => {
            let catalog = pipeline::verify_catalog_file(&path)?;
            println!(
                "{}: {} codes, ring_length {}, min_distance {}: ok",
                path.display(),
                catalog.len(),
                catalog.ring_length(),
                catalog.params().min_distance
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
