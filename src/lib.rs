use anyhow::bail;

use std::fs;
use std::path::Path;

pub mod breakdown;
pub mod chips;
pub mod depfile;
pub mod embed;
pub mod metric_configurations;
pub mod report;
pub mod tables;
pub mod templates;
pub mod types;

pub use crate::chips::{known_chips, provider_for, ReportDefinitionProvider};
pub use crate::metric_configurations::{generate_metric_configurations, MetricConfigurationsConfig};
pub use crate::report::{generate_report_definitions, ReportConfig};
pub use crate::types::GenOutput;

/// Fails unless `out_dir` is an existing directory.
pub fn check_out_dir(out_dir: &Path) -> anyhow::Result<()> {
    if !out_dir.is_dir() {
        bail!("Invalid argument for --outDir: {}", out_dir.display());
    }
    Ok(())
}

/// Writes every generated file under `out_dir`.
pub fn write_output(out_dir: &Path, output: GenOutput, verbose: bool) -> anyhow::Result<()> {
    for (filename, contents) in output {
        let out_file = out_dir.join(filename);
        if let Some(dir) = out_file.parent() {
            fs::create_dir_all(dir)?;
        }
        if verbose {
            eprintln!("Writing {}", out_file.display());
        }
        fs::write(out_file, contents)?;
    }
    Ok(())
}
