use clap::{Parser, Subcommand};
use quadrant::dataset;
use quadrant::rings::{Extent, RingTable};
use quadrant::svg::{ChartOptions, render_chart};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "quadrant", version, about, long_about = None)]
struct Cli {
    /// Path to the tools dataset (TOML, [[tools]] array)
    #[arg(short, long)]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the dataset to a standalone SVG radar chart
    Export {
        #[arg(short, long, default_value = "radar.svg")]
        out: PathBuf,

        /// Edge length of the square chart, in pixels
        #[arg(long, default_value_t = 720.0)]
        size: f64,

        /// Outer edge convention: "bounded" or "open"
        #[arg(long, default_value = "bounded")]
        extent: String,
    },
    /// Validate the dataset and report records that cannot be placed
    Check,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tools = dataset::load_dataset(&cli.data)?;

    match cli.command {
        Commands::Export { out, size, extent } => export(&tools, &out, size, &extent),
        Commands::Check => check(&tools),
    }
}

fn export(tools: &[quadrant::Tool], out: &Path, size: f64, extent: &str) -> anyhow::Result<()> {
    let extent: Extent = extent
        .parse()
        .map_err(|_| anyhow::anyhow!("extent must be 'bounded' or 'open', got '{}'", extent))?;

    let opts = ChartOptions { size, extent };
    let svg = render_chart(tools, &RingTable::default(), &opts);
    fs_err::write(out, svg)?;

    log::info!("Wrote {} tools to {}", tools.len(), out.display());
    Ok(())
}

fn check(tools: &[quadrant::Tool]) -> anyhow::Result<()> {
    if tools.is_empty() {
        anyhow::bail!("Dataset contains no tools.");
    }

    let skipped: Vec<_> = dataset::unplaced(tools).collect();
    for tool in &skipped {
        println!("unplaced: '{}' has no recognized category", tool.id);
    }
    for id in dataset::duplicate_ids(tools) {
        println!("duplicate id: '{}'", id);
    }

    println!(
        "{} tools, {} placeable, {} skipped",
        tools.len(),
        tools.len() - skipped.len(),
        skipped.len()
    );
    Ok(())
}
