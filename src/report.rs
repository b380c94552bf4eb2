use anyhow::{bail, Context};
use tinytemplate::TinyTemplate;

use std::collections::BTreeSet;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chips::provider_for;
use crate::depfile::Depfile;
use crate::embed::bytes_to_c_array;
use crate::tables::{RequiredMetricsTable, TableGenerator};
use crate::templates::*;
use crate::types::{data_tables, DataSection, DataTable, GenOutput, MetricKind, ReportContext, ReportDefinition};

pub struct ReportConfig {
    pub chip: String,
    pub buildroot: String,
    pub copyright: Option<PathBuf>,
    pub verbose: bool,
}

pub fn header_file_name(chip: &str) -> String {
    format!("NvPerfReportDefinition{}.h", chip.to_uppercase())
}

pub fn range_debug_file_name(chip: &str) -> String {
    format!("NvPerfReportDefinition{}_range_debug.html", chip.to_uppercase())
}

pub fn summary_debug_file_name(chip: &str) -> String {
    format!("NvPerfReportDefinition{}_summary_debug.html", chip.to_uppercase())
}

/// JS array literal of the sorted, de-duplicated metric names.
fn js_expected_list(metrics: &[String]) -> String {
    let sorted: BTreeSet<&String> = metrics.iter().collect();
    let quoted: Vec<String> = sorted.into_iter().map(|m| format!("'{}'", m)).collect();
    format!("[{}]", quoted.join(", "))
}

fn debug_tables(table_name: &str) -> [RequiredMetricsTable; 3] {
    MetricKind::ALL.map(|kind| RequiredMetricsTable::new(kind, table_name))
}

fn mismatch_message(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Counter => "mismatch!",
        MetricKind::Ratio | MetricKind::Throughput => "don't match the expectation!",
    }
}

/**
 * Body of `onBodyLoaded`: fills every table, and in debug mode compares
 * what each table actually read against the metrics it declared.
 *
 * The listings of all metrics read everything, so they get no check.
 */
pub fn on_body_loaded(tables: &[&DataTable]) -> String {
    let mut js = String::new();
    for table in tables {
        js.push_str(&format!(
            r##"
        if (g_debug) {{
          clearReferencedMetrics();
        }}
        {jscall}
"##,
            jscall = table.jscall
        ));
        if table.is_exhaustive_listing() {
            continue;
        }
        js.push_str("\n        if (g_debug) {");
        for (kind, debug) in MetricKind::ALL.into_iter().zip(debug_tables(&table.name)) {
            let var = kind.plural().to_lowercase();
            let expected = js_expected_list(table.required(kind));
            js.push_str(&format!(
                r##"
          {var} = {jscall}
          if (JSON.stringify({var}) != JSON.stringify({expected})) {{
            alert("{name}'s required {var} {message} Please paste the latest list to the generator.");
            console.log("{name}'s required {var} mismatch!");
            console.log("Actual: ", {var});
            console.log("Generator: {expected}");
          }}"##,
                jscall = debug.jscall(),
                name = table.name,
                message = mismatch_message(kind),
            ));
        }
        js.push_str("\n        }\n");
    }
    js.push_str(DEBUG_SECTIONS_HIDE);
    js
}

/// One `debug_section` body per checked table.
fn debug_sections(tables: &[&DataTable]) -> Vec<String> {
    tables
        .iter()
        .filter(|t| !t.is_exhaustive_listing())
        .map(|t| debug_tables(&t.name).iter().map(|d| d.html()).collect())
        .collect()
}

fn render(template_name: &'static str, template: &'static str, context: &ReportContext) -> anyhow::Result<String> {
    let mut tt = TinyTemplate::new();
    tt.add_formatter("format_unescaped", tinytemplate::format_unescaped);
    tt.add_template(template_name, template)?;
    Ok(tt.render(template_name, context)?)
}

pub fn render_range_html(sections: &[DataSection]) -> anyhow::Result<String> {
    let tables: Vec<&DataTable> = data_tables(sections).collect();
    let context = ReportContext {
        css: CSS,
        javascript: JAVASCRIPT,
        handlers: RANGE_HANDLERS,
        on_body_loaded: on_body_loaded(&tables),
        debug_sections: debug_sections(&tables),
        tables,
        title_area: RANGE_TITLE_AREA,
        sections,
        footer: FOOTER,
        globals: format!("{}{}", JSON_PLACEHOLDER, RANGE_GLOBALS),
    };
    render("range.html", TEMPLATE_RANGE_REPORT, &context)
}

pub fn render_summary_html(sections: &[DataSection]) -> anyhow::Result<String> {
    let tables: Vec<&DataTable> = data_tables(sections).collect();
    let context = ReportContext {
        css: CSS,
        javascript: JAVASCRIPT,
        handlers: "",
        on_body_loaded: on_body_loaded(&tables),
        debug_sections: debug_sections(&tables),
        tables,
        title_area: SUMMARY_TITLE_AREA,
        sections,
        footer: FOOTER,
        globals: format!("{}{}", JSON_PLACEHOLDER, SUMMARY_GLOBALS),
    };
    render("summary.html", TEMPLATE_SUMMARY_REPORT, &context)
}

/// The `namespace <report> { GetReportDefinition() }` block of the header.
pub fn report_definition_cpp(report: &ReportDefinition) -> anyhow::Result<String> {
    if report.html.is_empty() {
        bail!("Report {} has no HTML", report.name);
    }
    let mut out = String::new();
    write!(out, "\n    namespace {} {{\n", report.name)?;
    out.push_str("\n        inline ReportDefinition GetReportDefinition()\n        {");

    for kind in MetricKind::ALL {
        let metrics = report.required(kind);
        if metrics.is_empty() {
            continue;
        }
        write!(out, "\n            static const char* const Required{}[] = {{\n", kind.plural())?;
        for metric in metrics {
            writeln!(out, "                \"{}\",", metric)?;
        }
        out.push_str("            };\n");
    }

    out.push_str("\n            static const unsigned char ReportContents[] = {");
    out.push_str(&bytes_to_c_array(report.html.as_bytes(), 16));
    out.push_str("0x0\n            };\n");

    out.push_str("\n            ReportDefinition reportDefinition = {");
    for kind in MetricKind::ALL {
        if report.required(kind).is_empty() {
            out.push_str("\n                nullptr,\n                0,");
        } else {
            let name = format!("Required{}", kind.plural());
            write!(out, "\n                {name},\n                sizeof({name}) / sizeof({name}[0]),")?;
        }
    }
    out.push_str(
        r#"
                (const char*)ReportContents
            };
            return reportDefinition;
        }
"#,
    );
    write!(out, "\n    }} // namespace {}\n\n\n", report.name)?;
    Ok(out)
}

/// Produces both debug HTML documents, the C++ report header and its
/// depfile for `config.chip`.
///
/// `out_dir` is only used to name the depfile target; nothing is written.
pub fn generate_report_definitions(config: &ReportConfig, out_dir: &Path) -> anyhow::Result<GenOutput> {
    let provider = provider_for(&config.chip)?;
    if config.verbose {
        eprintln!("Generating report definitions for {}", provider.chip());
    }
    let per_range = provider.per_range_report()?;
    let summary = provider.summary_report()?;
    if config.verbose {
        for report in [&per_range, &summary] {
            eprintln!(
                "{}: {} counters, {} ratios, {} throughputs",
                report.name,
                report.required_counters.len(),
                report.required_ratios.len(),
                report.required_throughputs.len()
            );
        }
    }

    let mut header = String::new();
    if let Some(copyright) = &config.copyright {
        header.push_str(
            &fs::read_to_string(copyright)
                .with_context(|| format!("Failed to read copyright {}", copyright.display()))?,
        );
    }
    write!(
        header,
        "\n#pragma once\n\n#include \"NvPerfReportDefinition.h\"\n\nnamespace nv {{ namespace perf {{ namespace {} {{\n",
        config.chip
    )?;
    header.push_str(&report_definition_cpp(&per_range)?);
    header.push_str(&report_definition_cpp(&summary)?);
    header.push_str("\n} } }");

    let file_name = header_file_name(&config.chip);
    let depfile = Depfile::new(out_dir.join(&file_name))
        .generator_inputs(std::env::current_exe().ok())
        .generator_inputs(config.copyright.iter())
        .render(&config.buildroot);

    Ok(vec![
        (PathBuf::from(range_debug_file_name(&config.chip)), per_range.html),
        (PathBuf::from(summary_debug_file_name(&config.chip)), summary.html),
        (PathBuf::from(format!("{file_name}.d")), depfile),
        (PathBuf::from(file_name), header),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::decode_c_array;
    use crate::tables::{AllMetrics, CollectionInfo};
    use crate::types::strings;

    fn report(counters: &[&str], throughputs: &[&str]) -> ReportDefinition {
        ReportDefinition {
            name: "PerRangeReport".to_string(),
            html: "<html>ÿ</html>".to_string(),
            required_counters: strings(counters),
            required_ratios: Vec::new(),
            required_throughputs: strings(throughputs),
        }
    }

    #[test]
    fn test_expected_list_is_sorted_set() {
        assert_eq!(js_expected_list(&strings(&["b", "a", "b"])), "['a', 'b']");
        assert_eq!(js_expected_list(&[]), "[]");
    }

    #[test]
    fn test_on_body_loaded_skips_exhaustive_listings() {
        let info = CollectionInfo.make_data_table();
        let all = AllMetrics::new(MetricKind::Counter).make_data_table();
        let js = on_body_loaded(&[&info, &all]);
        assert_eq!(js.matches("clearReferencedMetrics();").count(), 2);
        assert!(js.contains("alert(\"CollectionInfo's required counters mismatch! Please paste"));
        assert!(js.contains("alert(\"CollectionInfo's required ratios don't match the expectation!"));
        assert!(js.contains("tbody_RequiredThroughputs(document.getElementById('tbody_required_throughputs_CollectionInfo'));"));
        assert!(!js.contains("AllCounters's"));
        assert!(js.ends_with(DEBUG_SECTIONS_HIDE));
        assert_eq!(debug_sections(&[&info, &all]).len(), 1);
    }

    #[test]
    fn test_cpp_block_layout() {
        let text = report_definition_cpp(&report(&["a__x", "b__y"], &[])).unwrap();
        assert!(text.starts_with("\n    namespace PerRangeReport {\n"));
        assert!(text.contains("static const char* const RequiredCounters[] = {\n                \"a__x\",\n                \"b__y\",\n            };\n"));
        assert!(!text.contains("RequiredRatios"));
        assert!(text.contains(
            "\n                RequiredCounters,\n                sizeof(RequiredCounters) / sizeof(RequiredCounters[0]),\n                nullptr,\n                0,\n                nullptr,\n                0,\n                (const char*)ReportContents"
        ));
        assert!(text.ends_with("\n    } // namespace PerRangeReport\n\n\n"));
    }

    #[test]
    fn test_cpp_contents_decode_to_html() {
        let def = report(&[], &["t__throughput"]);
        let text = report_definition_cpp(&def).unwrap();
        let start = text.find("ReportContents[] = {").unwrap();
        let end = text[start..].find("};").unwrap() + start;
        let bytes = decode_c_array(&text[start + "ReportContents[] = {".len()..end]);
        assert_eq!(&bytes[..def.html.len()], def.html.as_bytes());
        assert_eq!(bytes[def.html.len()..], [0x00]);
    }

    #[test]
    fn test_empty_html_is_rejected() {
        let mut def = report(&[], &[]);
        def.html.clear();
        assert!(report_definition_cpp(&def).is_err());
    }

    #[test]
    fn test_range_html_document() {
        let sections = vec![
            DataSection::new(vec![CollectionInfo.make_data_table()]).without_spacing(),
            DataSection::titled(vec![AllMetrics::new(MetricKind::Ratio).make_data_table()], "Exhaustive Listings Section"),
        ];
        let html = render_range_html(&sections).unwrap();
        assert!(html.starts_with("\n<html>\n"));
        assert!(html.contains("<div class=\"section_title\">Exhaustive Listings Section</div>"));
        assert!(html.contains("/***JSON_DATA_HERE***/"));
        assert!(html.contains("function onClick_MobileLayout()"));
        assert_eq!(html.matches("class=\"debug_section\"").count(), 1);
        assert_eq!(html.matches("<br name=\"table_spacing\">").count(), 1);
    }

    #[test]
    fn test_summary_html_document() {
        let sections = vec![DataSection::new(vec![CollectionInfo.make_data_table()])];
        let html = render_summary_html(&sections).unwrap();
        assert!(html.contains("<title>Summary</title>"));
        assert!(html.contains("g_ranges = g_json.ranges || [];"));
        assert!(!html.contains("onClick_ShowWorkflow"));
        assert!(!html.contains("table_spacing"));
        assert!(html.contains("          convertAllCellsInOneTableToCssTooltips(tableIdentifier);\n        });\n      }\n\n\n\n      function tbody_CollectionInfo(tbody) {"));
    }
}
