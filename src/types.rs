use core::hash::BuildHasherDefault;
use fxhash::FxHasher;
use indexmap::IndexMap;
use serde::Serialize;

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Files produced by a generator, relative to the output directory.
pub type GenOutput = Vec<(PathBuf, String)>;

pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// The three families of hardware metrics a report can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricKind {
    Counter,
    Ratio,
    Throughput,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Counter, MetricKind::Ratio, MetricKind::Throughput];

    /// Plural name used in generated identifiers, e.g. `RequiredCounters`.
    pub fn plural(&self) -> &'static str {
        match self {
            MetricKind::Counter => "Counters",
            MetricKind::Ratio => "Ratios",
            MetricKind::Throughput => "Throughputs",
        }
    }
}

/// Metrics a table reads. Duplicates are tolerated here and removed when a
/// report aggregates its tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredMetrics {
    pub counters: Vec<String>,
    pub ratios: Vec<String>,
    pub throughputs: Vec<String>,
}

impl RequiredMetrics {
    pub fn counters(counters: &[&str]) -> Self {
        RequiredMetrics {
            counters: strings(counters),
            ..Default::default()
        }
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DataTable {
    pub name: String,
    pub html: String,
    pub jsfunc: String,
    pub jscall: String,
    pub required_counters: Vec<String>,
    pub required_ratios: Vec<String>,
    pub required_throughputs: Vec<String>,
    pub workflow: String,
}

impl DataTable {
    pub fn required(&self, kind: MetricKind) -> &[String] {
        match kind {
            MetricKind::Counter => &self.required_counters,
            MetricKind::Ratio => &self.required_ratios,
            MetricKind::Throughput => &self.required_throughputs,
        }
    }

    /// The exhaustive listing tables render every metric in the payload, so
    /// they are excluded from the declared-vs-referenced debug check.
    pub fn is_exhaustive_listing(&self) -> bool {
        self.name.starts_with("All")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataSection {
    pub tables: Vec<DataTable>,
    pub inter_table_spacing: bool,
    pub title: Option<String>,
}

impl DataSection {
    pub fn new(tables: Vec<DataTable>) -> Self {
        DataSection {
            tables,
            inter_table_spacing: true,
            title: None,
        }
    }

    pub fn titled(tables: Vec<DataTable>, title: &str) -> Self {
        DataSection {
            title: Some(title.to_string()),
            ..DataSection::new(tables)
        }
    }

    pub fn without_spacing(mut self) -> Self {
        self.inter_table_spacing = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ReportDefinition {
    pub name: String,
    pub html: String,
    pub required_counters: Vec<String>,
    pub required_ratios: Vec<String>,
    pub required_throughputs: Vec<String>,
}

impl ReportDefinition {
    /// Aggregates the required metrics of every table in `sections`.
    pub fn new(name: &str, html: String, sections: &[DataSection]) -> Self {
        ReportDefinition {
            name: name.to_string(),
            html,
            required_counters: required_metrics(sections, MetricKind::Counter),
            required_ratios: required_metrics(sections, MetricKind::Ratio),
            required_throughputs: required_metrics(sections, MetricKind::Throughput),
        }
    }

    pub fn required(&self, kind: MetricKind) -> &[String] {
        match kind {
            MetricKind::Counter => &self.required_counters,
            MetricKind::Ratio => &self.required_ratios,
            MetricKind::Throughput => &self.required_throughputs,
        }
    }
}

/// Render context shared by the per-range and summary documents. The
/// summary template ignores `handlers`.
#[derive(Debug, Serialize)]
pub struct ReportContext<'a> {
    pub css: &'static str,
    pub javascript: &'static str,
    pub handlers: &'static str,
    pub tables: Vec<&'a DataTable>,
    pub on_body_loaded: String,
    pub title_area: &'static str,
    pub sections: &'a [DataSection],
    pub debug_sections: Vec<String>,
    pub footer: &'static str,
    pub globals: String,
}

pub fn data_tables(sections: &[DataSection]) -> impl Iterator<Item = &DataTable> {
    sections.iter().flat_map(|s| s.tables.iter())
}

/// Sorted, de-duplicated union of one metric kind over all tables.
pub fn required_metrics(sections: &[DataSection], kind: MetricKind) -> Vec<String> {
    let set: BTreeSet<&String> = data_tables(sections)
        .flat_map(|t| t.required(kind).iter())
        .collect();
    set.into_iter().cloned().collect()
}

pub fn required_counters(sections: &[DataSection]) -> Vec<String> {
    required_metrics(sections, MetricKind::Counter)
}

pub fn required_ratios(sections: &[DataSection]) -> Vec<String> {
    required_metrics(sections, MetricKind::Ratio)
}

pub fn required_throughputs(sections: &[DataSection]) -> Vec<String> {
    required_metrics(sections, MetricKind::Throughput)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, counters: &[&str], ratios: &[&str]) -> DataTable {
        DataTable {
            name: name.to_string(),
            html: String::new(),
            jsfunc: String::new(),
            jscall: String::new(),
            required_counters: strings(counters),
            required_ratios: strings(ratios),
            required_throughputs: Vec::new(),
            workflow: String::new(),
        }
    }

    #[test]
    fn test_required_metrics_sorted_union() {
        let sections = vec![
            DataSection::new(vec![table("A", &["z__x", "a__y"], &["r__1"])]),
            DataSection::titled(vec![table("B", &["a__y", "m__q", "m__q"], &[])], "Second"),
        ];
        assert_eq!(required_counters(&sections), vec!["a__y", "m__q", "z__x"]);
        assert_eq!(required_ratios(&sections), vec!["r__1"]);
        assert!(required_throughputs(&sections).is_empty());
    }

    #[test]
    fn test_report_definition_aggregates() {
        let sections = vec![DataSection::new(vec![
            table("A", &["b", "a"], &[]),
            table("AllCounters", &[], &[]),
        ])];
        let rd = ReportDefinition::new("PerRangeReport", "<html>".into(), &sections);
        assert_eq!(rd.required_counters, vec!["a", "b"]);
        assert!(data_tables(&sections).nth(1).map_or(false, |t| t.is_exhaustive_listing()));
    }
}
