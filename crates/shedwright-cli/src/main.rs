//! shedwright CLI - build timber-building models from JSON configs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shedwright::{build_model, default_materials, BuildOptions, Component};
use shedwright_config::BuildingConfig;

#[derive(Parser)]
#[command(name = "shedwright")]
#[command(about = "Parametric timber garden-building generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a config and export the model as binary STL
    Build {
        /// Input config (.json)
        input: PathBuf,
        /// Output STL file
        output: PathBuf,
        /// Pose door leaves swung open
        #[arg(long)]
        open_doors: bool,
    },
    /// Print the material quantity report for a config
    Quantities {
        /// Input config (.json)
        input: PathBuf,
    },
    /// Display summary information about a config
    Info {
        /// Input config (.json)
        input: PathBuf,
    },
    /// Write an example config
    Example {
        /// Output file (stdout when omitted)
        output: Option<PathBuf>,
    },
    /// Print the default material definitions
    Materials,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            open_doors,
        } => build(&input, &output, open_doors),
        Commands::Quantities { input } => quantities(&input),
        Commands::Info { input } => info(&input),
        Commands::Example { output } => example(output.as_deref()),
        Commands::Materials => {
            println!("{}", serde_json::to_string_pretty(&default_materials())?);
            Ok(())
        }
    }
}

fn load_config(input: &PathBuf) -> Result<BuildingConfig> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    BuildingConfig::from_json(&json)
        .with_context(|| format!("parsing {}", input.display()))
}

fn build(input: &PathBuf, output: &PathBuf, open_doors: bool) -> Result<()> {
    let cfg = load_config(input)?;
    let opts = BuildOptions {
        open_doors,
        ..BuildOptions::default()
    };
    let model = build_model(&cfg, &opts);
    for id in &model.invalid_openings {
        log::warn!("opening {id} does not fit its wall; rendered in alert material");
    }
    let bytes = shedwright::export::model_stl_bytes(&model);
    fs::write(output, bytes).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Exported {} pieces ({} triangles) to {}",
        model.pieces.len(),
        model
            .pieces
            .iter()
            .map(|p| p.mesh.indices.len() / 3)
            .sum::<usize>(),
        output.display()
    );
    Ok(())
}

fn quantities(input: &PathBuf) -> Result<()> {
    let cfg = load_config(input)?;
    let model = build_model(&cfg, &BuildOptions::default());
    println!("{}", serde_json::to_string_pretty(&model.quantities)?);
    Ok(())
}

fn info(input: &PathBuf) -> Result<()> {
    let cfg = load_config(input)?;
    let model = build_model(&cfg, &BuildOptions::default());
    let d = &model.dims;
    println!("Config version: {}", cfg.version);
    println!(
        "Base:  {:.0} x {:.0} mm",
        d.base.width_mm, d.base.depth_mm
    );
    println!(
        "Frame: {:.0} x {:.0} mm",
        d.frame.width_mm, d.frame.depth_mm
    );
    println!(
        "Roof:  {:.0} x {:.0} mm",
        d.roof.width_mm, d.roof.depth_mm
    );
    println!("Pieces: {}", model.pieces.len());
    for c in [
        Component::Base,
        Component::Walls,
        Component::Cladding,
        Component::Roof,
        Component::Openings,
        Component::Dividers,
        Component::Attachments,
    ] {
        let n = model.pieces.iter().filter(|p| p.component == c).count();
        if n > 0 {
            println!("  {c:?}: {n}");
        }
    }
    if !model.invalid_openings.is_empty() {
        println!("Invalid openings: {:?}", model.invalid_openings);
    }
    Ok(())
}

fn example(output: Option<&std::path::Path>) -> Result<()> {
    let cfg = BuildingConfig::example();
    let json = cfg.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote example config to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
