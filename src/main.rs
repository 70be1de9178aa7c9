//! StitchKit command-line interface.
//!
//! Reads an SVG file, compiles it into a DST stitch file for the given
//! garment placement, and prints a JSON conversion report on stdout.
//! Errors are printed as JSON on stderr with a non-zero exit status.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use stitchkit::{convert_with_registry, ConversionOptions, ConversionReport, GarmentRegistry};

#[derive(Parser)]
#[command(version, about = "Convert SVG line art into Tajima DST embroidery files")]
struct Cli {
    /// Input SVG file
    input: PathBuf,

    /// Output DST file
    output: PathBuf,

    /// Garment placement preset (hat, shirt, jacket)
    #[arg(default_value = stitchkit::DEFAULT_GARMENT_ID)]
    garment: String,

    /// Design label embedded in the DST header (defaults to the output
    /// file stem)
    #[arg(long)]
    name: Option<String>,

    /// Load garment profiles from a JSON file instead of the built-ins
    #[arg(long, value_name = "FILE")]
    profiles: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        let payload = serde_json::json!({
            "success": false,
            "error": err.to_string(),
        });
        eprintln!("{payload}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    stitchkit::init_logging()?;
    let cli = Cli::parse();

    let svg = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let registry = match &cli.profiles {
        Some(path) => GarmentRegistry::from_json_file(path)
            .with_context(|| format!("failed to load profiles from {}", path.display()))?,
        None => GarmentRegistry::builtin(),
    };

    let design_name = cli.name.clone().unwrap_or_else(|| {
        cli.output
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "DESIGN".to_string())
    });

    let options = ConversionOptions { design_name };
    let conversion = convert_with_registry(&registry, &svg, &cli.garment, &options)?;

    fs::write(&cli.output, &conversion.dst)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    let report = ConversionReport::new(&conversion, &cli.output.display().to_string());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
