use clap::Parser;

use std::path::PathBuf;

use nvperf_report_gen::report::range_debug_file_name;
use nvperf_report_gen::{check_out_dir, generate_report_definitions, known_chips, provider_for, write_output, ReportConfig};

/// Generate HTML report definition
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Chip name, e.g. tu10x
    #[arg(long)]
    chip: String,
    /// Output directory; must already exist
    #[arg(long = "outDir")]
    out_dir: PathBuf,
    /// Accepted for build script compatibility; has no effect
    #[arg(long)]
    pypath: Vec<PathBuf>,
    /// Build root stripped from the depfile target
    #[arg(long, default_value = "")]
    buildroot: String,
    /// File whose contents are prepended to the header
    #[arg(long)]
    copyright: Option<PathBuf>,
    /// Open the per-range debug report in a browser
    #[arg(long)]
    open: bool,
    /// Be more chatty
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        for p in &cli.pypath {
            eprintln!("Ignoring --pypath {}", p.display());
        }
    }

    let config = ReportConfig {
        chip: cli.chip,
        buildroot: cli.buildroot,
        copyright: cli.copyright,
        verbose: cli.verbose,
    };
    if provider_for(&config.chip).is_err() {
        eprintln!("Known chips: {}", known_chips().collect::<Vec<_>>().join(", "));
    }
    // Chip lookup errors take precedence over a bad --outDir
    let output = generate_report_definitions(&config, &cli.out_dir)?;
    check_out_dir(&cli.out_dir)?;
    write_output(&cli.out_dir, output, cli.verbose)?;

    if cli.open {
        opener::open(cli.out_dir.join(range_debug_file_name(&config.chip)))?;
    }
    Ok(())
}
