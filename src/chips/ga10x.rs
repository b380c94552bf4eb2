//! Ampere desktop tables. No Ampere desktop report is registered; later
//! desktop generations build on these. They extend the SoC tables with the
//! discrete memory units.

use crate::chips::ga10b;
use crate::tables::*;

pub fn top_throughputs() -> TopThroughputs {
    let mut gen = ga10b::top_throughputs();
    gen.rows.splice(
        3..3,
        [
            ThroughputRow::new("Memory", r##"<a href="#Main-Memory-Throughput">DRAM</a>"##, "dram__throughput"),
            ThroughputRow::new("Memory", r##"<a href="#Main-Memory-Throughput">PCIe</a>"##, "pcie__throughput"),
        ],
    );
    gen
}

pub fn ranges_summary() -> RangesSummary {
    let mut gen = ga10b::ranges_summary();
    let after_l2 = gen.columns.iter().position(|c| c.desc == "L2%").map_or(gen.columns.len(), |i| i + 1);
    gen.columns.splice(
        after_l2..after_l2,
        [
            SummaryColumn::new("DRAM%", "getThroughputPct('dram__throughput')", "format_pct", "ra", "getThroughputPctStr('dram__throughput')"),
            SummaryColumn::new("PCIe%", "getThroughputPct('pcie__throughput')", "format_pct", "ra", "getThroughputPctStr('pcie__throughput')"),
        ],
    );
    gen.required.throughputs.extend(["dram__throughput".to_string(), "pcie__throughput".to_string()]);
    gen.required.throughputs.sort();
    gen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_rows_follow_l2() {
        let rows: Vec<&str> = top_throughputs().rows.iter().map(|r| r.throughput).collect();
        assert_eq!(rows.len(), 13);
        assert_eq!(&rows[2..5], ["lts__throughput", "dram__throughput", "pcie__throughput"]);
        assert_eq!(rows.last(), Some(&"rtcore__throughput"));
    }

    #[test]
    fn test_summary_columns_match_required() {
        let summary = ranges_summary();
        assert_eq!(summary.columns.len(), 19);
        let descs: Vec<&str> = summary.columns.iter().map(|c| c.desc).collect();
        assert_eq!(&descs[10..14], ["L2%", "DRAM%", "PCIe%", "PD%"]);
        assert_eq!(summary.required.throughputs[1], "dram__throughput");
        assert_eq!(summary.required.throughputs[4], "pcie__throughput");
        for counter in &summary.required.counters {
            assert!(summary.columns.iter().any(|c| c.value.contains(counter.as_str())), "{counter}");
        }
    }
}
