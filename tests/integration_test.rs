use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use nvperf_report_gen::report::{generate_report_definitions, ReportConfig};
use nvperf_report_gen::{generate_metric_configurations, write_output, MetricConfigurationsConfig};

fn decode_c_array(text: &str) -> Vec<u8> {
    text.split(',')
        .map(str::trim)
        .filter_map(|s| s.strip_prefix("0x"))
        .filter_map(|s| u8::from_str_radix(s, 16).ok())
        .collect()
}

/// Decoded bytes of the array initializer that follows `marker`.
fn array_after(text: &str, marker: &str) -> Vec<u8> {
    let start = text.find(marker).unwrap() + marker.len();
    let end = start + text[start..].find("};").unwrap();
    decode_c_array(&text[start..end])
}

fn metric_config(chip: &str, yaml_paths: Vec<PathBuf>) -> MetricConfigurationsConfig {
    MetricConfigurationsConfig {
        chip: chip.to_string(),
        yaml_paths,
        buildroot: String::new(),
        copyright: None,
        verbose: false,
    }
}

#[test]
fn test_metric_configurations_two_files() {
    let yaml_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    fs::write(yaml_dir.path().join("b.yaml"), "name: b\nvalue: 2").unwrap();
    fs::write(yaml_dir.path().join("a.yaml"), "name: a\n").unwrap();

    let output = generate_metric_configurations(&metric_config("tu102", vec![yaml_dir.path().to_path_buf()]), out_dir.path()).unwrap();
    let map: HashMap<PathBuf, String> = output.into_iter().collect();
    let header = &map[&PathBuf::from("NvPerfMetricConfigurationsTU102.h")];
    assert!(map.contains_key(&PathBuf::from("NvPerfMetricConfigurationsTU102.h.d")));

    assert!(header.contains("namespace nv { namespace perf { namespace tu102 { namespace MetricConfigurations {"));
    assert!(header.contains("return 2;"));
    let a_pos = header.find("a.yaml\", ").unwrap();
    let b_pos = header.find("b.yaml\"\n").unwrap();
    assert!(a_pos < b_pos);

    assert_eq!(array_after(header, "yamlContents0[] = {"), b"name: a\n\n\0".to_vec());
    assert_eq!(array_after(header, "yamlContents1[] = {"), b"name: b\nvalue: 2\n\0".to_vec());
    assert!(header.contains("static const char* yamlContents[] = { (const char*)yamlContents0,  (const char*)yamlContents1 };"));
}

#[test]
fn test_metric_configurations_missing_dir() {
    let out_dir = tempfile::tempdir().unwrap();
    let missing = out_dir.path().join("does-not-exist");
    let output = generate_metric_configurations(&metric_config("ga10x", vec![missing]), out_dir.path()).unwrap();
    let header = &output[0].1;
    assert!(header.contains("return 0;"));
    assert_eq!(header.matches("return nullptr;").count(), 2);
}

#[test]
fn test_metric_configurations_copyright_and_depfile() {
    let yaml_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let yaml = yaml_dir.path().join("with space.yaml");
    fs::write(&yaml, "x: 1\n").unwrap();
    let copyright = yaml_dir.path().join("copyright.txt");
    fs::write(&copyright, "// (c) test\n").unwrap();

    let mut config = metric_config("tu10x", vec![yaml_dir.path().to_path_buf()]);
    config.copyright = Some(copyright);
    config.buildroot = out_dir.path().to_string_lossy().into_owned();
    let output = generate_metric_configurations(&config, out_dir.path()).unwrap();
    let map: HashMap<PathBuf, String> = output.into_iter().collect();

    assert!(map[&PathBuf::from("NvPerfMetricConfigurationsTU10X.h")].starts_with("// (c) test\n\n#pragma once"));
    let depfile = &map[&PathBuf::from("NvPerfMetricConfigurationsTU10X.h.d")];
    assert!(depfile.starts_with("NvPerfMetricConfigurationsTU10X.h:\\\n"));
    assert!(depfile.contains("with\\ space.yaml \\"));
    assert!(depfile.contains("copyright.txt \\"));
}

#[test]
fn test_yaml_path_that_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.yaml");
    fs::write(&file, "x").unwrap();
    assert!(generate_metric_configurations(&metric_config("tu10x", vec![file]), dir.path()).is_err());
}

#[test]
fn test_report_definitions_tu10x() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        chip: "tu10x".to_string(),
        buildroot: String::new(),
        copyright: None,
        verbose: false,
    };
    let output = generate_report_definitions(&config, out_dir.path()).unwrap();
    let names: Vec<String> = output.iter().map(|(p, _)| p.to_string_lossy().into_owned()).collect();
    assert_eq!(
        names,
        vec![
            "NvPerfReportDefinitionTU10X_range_debug.html",
            "NvPerfReportDefinitionTU10X_summary_debug.html",
            "NvPerfReportDefinitionTU10X.h.d",
            "NvPerfReportDefinitionTU10X.h",
        ]
    );
    let map: HashMap<PathBuf, String> = output.into_iter().collect();
    let range_html = &map[&PathBuf::from("NvPerfReportDefinitionTU10X_range_debug.html")];
    let header = &map[&PathBuf::from("NvPerfReportDefinitionTU10X.h")];

    assert!(header.starts_with("\n#pragma once\n\n#include \"NvPerfReportDefinition.h\"\n\nnamespace nv { namespace perf { namespace tu10x {\n"));
    assert!(header.ends_with("\n} } }"));
    assert!(header.contains("\n    namespace PerRangeReport {\n"));
    assert!(header.contains("\n    namespace SummaryReport {\n"));
    assert!(header.contains("                \"lts__average_t_sector_srcunit_tex_aperture_device_op_read\",\n"));

    // The first embedded document is the per-range debug report
    let contents = array_after(header, "ReportContents[] = {");
    assert_eq!(&contents[..contents.len() - 1], range_html.as_bytes());
    assert_eq!(contents.last(), Some(&0));

    assert!(range_html.contains("<div class=\"section_title\">Memory Performance Section</div>"));
    assert!(range_html.contains("function tbody_L2SectorTrafficBreakdownBySource(tbody)"));
    assert!(range_html.contains("/***JSON_DATA_HERE***/"));
}

#[test]
fn test_report_definitions_gb20x_written() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        chip: "gb20x".to_string(),
        buildroot: String::new(),
        copyright: None,
        verbose: false,
    };
    let output = generate_report_definitions(&config, out_dir.path()).unwrap();
    write_output(out_dir.path(), output, false).unwrap();
    let summary = fs::read_to_string(out_dir.path().join("NvPerfReportDefinitionGB20X_summary_debug.html")).unwrap();
    assert!(summary.contains("function tbody_Summary(tbody)"));
    assert!(out_dir.path().join("NvPerfReportDefinitionGB20X.h.d").is_file());
}

#[test]
fn test_report_definitions_ga10b_soc_memory() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        chip: "ga10b".to_string(),
        buildroot: String::new(),
        copyright: None,
        verbose: false,
    };
    let output = generate_report_definitions(&config, out_dir.path()).unwrap();
    let map: HashMap<PathBuf, String> = output.into_iter().collect();
    let range_html = &map[&PathBuf::from("NvPerfReportDefinitionGA10B_range_debug.html")];
    let header = &map[&PathBuf::from("NvPerfReportDefinitionGA10B.h")];

    assert!(header.contains("namespace nv { namespace perf { namespace ga10b {"));
    assert!(header.contains("                \"mcc__dram_throughput_srcnode_gpu_op_read\",\n"));
    assert!(!header.contains("\"dram__cycles_elapsed\""));
    assert!(range_html.contains("function tbody_SocMemoryThroughput(tbody)"));
    assert!(!range_html.contains("function tbody_MainMemory(tbody)"));
}

#[test]
fn test_report_definitions_unknown_chip() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        chip: "nv50".to_string(),
        buildroot: String::new(),
        copyright: None,
        verbose: false,
    };
    let err = generate_report_definitions(&config, out_dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("Module \"report_nv50\" is not found"));
}
