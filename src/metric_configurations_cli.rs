use clap::Parser;

use std::path::PathBuf;

use nvperf_report_gen::{check_out_dir, generate_metric_configurations, write_output, MetricConfigurationsConfig};

/// Embed metric configuration YAML files into a C++ header
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
    /// Directories holding the *.yaml files. Missing directories are skipped
    #[arg(long = "yamlPaths", num_args = 1.., required = true)]
    yaml_paths: Vec<PathBuf>,
    /// Accepted for build script compatibility; has no effect
    #[arg(long)]
    pypath: Vec<PathBuf>,
    /// Build root stripped from the depfile target
    #[arg(long, default_value = "")]
    buildroot: String,
    /// File whose contents are prepended to the header
    #[arg(long)]
    copyright: Option<PathBuf>,
    /// Be more chatty
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    check_out_dir(&cli.out_dir)?;
    if cli.verbose {
        for p in &cli.pypath {
            eprintln!("Ignoring --pypath {}", p.display());
        }
    }

    let config = MetricConfigurationsConfig {
        chip: cli.chip,
        yaml_paths: cli.yaml_paths,
        buildroot: cli.buildroot,
        copyright: cli.copyright,
        verbose: cli.verbose,
    };
    let output = generate_metric_configurations(&config, &cli.out_dir)?;
    write_output(&cli.out_dir, output, cli.verbose)
}
