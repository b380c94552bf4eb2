use anyhow::{bail, Context};
use regex::Regex;

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::depfile::Depfile;
use crate::embed::bytes_to_c_array;
use crate::types::GenOutput;

pub struct MetricConfigurationsConfig {
    pub chip: String,
    pub yaml_paths: Vec<PathBuf>,
    pub buildroot: String,
    pub copyright: Option<PathBuf>,
    pub verbose: bool,
}

pub fn header_file_name(chip: &str) -> String {
    format!("NvPerfMetricConfigurations{}.h", chip.to_uppercase())
}

/// Lists the `*.yaml` files directly inside each of `yaml_paths`.
///
/// A path that does not exist is skipped; a path naming a regular file is an
/// error. Separators are normalized to `/` and the result is sorted.
pub fn find_yaml_files(yaml_paths: &[PathBuf], verbose: bool) -> anyhow::Result<Vec<String>> {
    let mut files = Vec::new();
    for yaml_path in yaml_paths {
        if yaml_path.is_file() {
            bail!("Invalid argument for --yamlPaths: {} is a file", yaml_path.display());
        }
        if !yaml_path.exists() {
            if verbose {
                eprintln!("Skipping missing yaml path {}", yaml_path.display());
            }
            continue;
        }
        let entries = fs::read_dir(yaml_path)
            .with_context(|| format!("Failed to list {}", yaml_path.display()))?;
        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // glob's `*` does not match a leading dot
            if name.starts_with('.') || !name.ends_with(".yaml") || !path.is_file() {
                continue;
            }
            files.push(path.to_string_lossy().replace('\\', "/"));
        }
    }
    files.sort();
    if verbose {
        for f in &files {
            eprintln!("Found metric configuration {}", f);
        }
    }
    Ok(files)
}

/// Shortens absolute paths to start at the SDK's `NvPerfUtility/` directory.
fn display_name(prefix: &Regex, file_name: &str) -> String {
    prefix.replace(file_name, "NvPerfUtility/").into_owned()
}

/// Renders the C++ header embedding every YAML file.
pub fn metric_configurations_header(chip: &str, yaml_files: &[String]) -> anyhow::Result<String> {
    let prefix = Regex::new(r".*NvPerfUtility/")?;
    let mut out = String::new();
    write!(
        out,
        r#"
#pragma once

#include <cstddef>

namespace nv {{ namespace perf {{ namespace {chip} {{ namespace MetricConfigurations {{

    inline size_t GetMetricConfigurationsSize()
    {{
        return {};
    }}
"#,
        yaml_files.len()
    )?;

    if yaml_files.is_empty() {
        out.push_str(
            r#"
    inline const char** GetMetricConfigurationsFileNames()
    {
        return nullptr;
    }
    
    inline const char** GetMetricConfigurations()
    {
        return nullptr;
    }
    
} } } } }"#,
        );
        return Ok(out);
    }

    let last = yaml_files.len() - 1;
    out.push_str(
        r#"
    inline const char** GetMetricConfigurationsFileNames()
    {
        static const char* yamlFileNames[] = {"#,
    );
    for (index, file_name) in yaml_files.iter().enumerate() {
        let sep = if index < last { ", " } else { "" };
        write!(out, "\n            \"{}\"{}", display_name(&prefix, file_name), sep)?;
    }
    out.push_str(
        r#"
        };
        return yamlFileNames;
    }
    
    inline const char** GetMetricConfigurations()
    {"#,
    );

    let mut pointers = Vec::with_capacity(yaml_files.len());
    for (index, file_name) in yaml_files.iter().enumerate() {
        let contents =
            fs::read(Path::new(file_name)).with_context(|| format!("Failed to read {}", file_name))?;
        write!(
            out,
            "\n        // {}\n        static const unsigned char yamlContents{}[] = {{",
            display_name(&prefix, file_name),
            index
        )?;
        out.push_str(&bytes_to_c_array(&contents, 12));
        out.push_str("0x0a, 0x00\n        };\n");
        pointers.push(format!(" (const char*)yamlContents{}", index));
    }
    write!(
        out,
        r#"
        static const char* yamlContents[] = {{{} }};
        return (const char**) yamlContents;
    }}
    
}} }} }} }}"#,
        pointers.join(", ")
    )?;
    Ok(out)
}

/// Produces the metric configuration header and its depfile.
///
/// `out_dir` is only used to name the depfile target; nothing is written.
pub fn generate_metric_configurations(
    config: &MetricConfigurationsConfig,
    out_dir: &Path,
) -> anyhow::Result<GenOutput> {
    let yaml_files = find_yaml_files(&config.yaml_paths, config.verbose)?;

    let mut header = String::new();
    if let Some(copyright) = &config.copyright {
        header.push_str(
            &fs::read_to_string(copyright)
                .with_context(|| format!("Failed to read copyright {}", copyright.display()))?,
        );
    }
    header.push_str(&metric_configurations_header(&config.chip, &yaml_files)?);

    let file_name = header_file_name(&config.chip);
    let depfile_name = format!("{file_name}.d");
    let depfile = Depfile::new(out_dir.join(&file_name))
        .generator_inputs(std::env::current_exe().ok())
        .generator_inputs(config.copyright.iter())
        .inputs(yaml_files.iter())
        .render(&config.buildroot);

    Ok(vec![
        (PathBuf::from(file_name), header),
        (PathBuf::from(depfile_name), depfile),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_keeps_utility_root() {
        let prefix = Regex::new(r".*NvPerfUtility/").unwrap();
        assert_eq!(
            display_name(&prefix, "C:/sdk/NvPerfUtility/include/NvPerfUtility/x.yaml"),
            "NvPerfUtility/x.yaml"
        );
        assert_eq!(display_name(&prefix, "/tmp/a.yaml"), "/tmp/a.yaml");
    }

    #[test]
    fn test_find_yaml_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.yaml", "a.yaml", ".hidden.yaml", "c.yml", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.yaml")).unwrap();
        let files = find_yaml_files(&[dir.path().to_path_buf(), dir.path().join("nope")], false).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.rsplit('/').next().unwrap()).collect();
        assert_eq!(names, vec!["a.yaml", "b.yaml"]);
    }

    #[test]
    fn test_find_yaml_files_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.yaml");
        fs::write(&file, "x").unwrap();
        assert!(find_yaml_files(&[file], false).is_err());
    }

    #[test]
    fn test_empty_header_returns_nullptr() {
        let header = metric_configurations_header("ga10x", &[]).unwrap();
        assert!(header.contains("namespace nv { namespace perf { namespace ga10x { namespace MetricConfigurations {"));
        assert!(header.contains("return 0;"));
        assert_eq!(header.matches("return nullptr;").count(), 2);
        assert!(!header.contains("yamlContents"));
        assert!(header.ends_with("} } } } }"));
        assert!(header.contains("    }\n    \n    inline const char** GetMetricConfigurations()\n"));
        assert!(header.contains("        return nullptr;\n    }\n    \n} "));
    }

    #[test]
    fn test_header_separators_are_indented() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("a.yaml");
        fs::write(&yaml, "a: 1").unwrap();
        let header = metric_configurations_header("tu102", &[yaml.to_string_lossy().into_owned()]).unwrap();
        assert!(header.contains("        return yamlFileNames;\n    }\n    \n    inline const char** GetMetricConfigurations()\n"));
        assert!(header.ends_with("        return (const char**) yamlContents;\n    }\n    \n} } } }"));
    }
}
