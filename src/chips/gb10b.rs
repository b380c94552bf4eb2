use crate::chips::{ga10b, gb20x, ReportDefinitionProvider};
use crate::tables::*;
use crate::types::DataSection;

/// Blackwell SoC parts: the Ampere SoC tables without raytracing, plus the
/// Blackwell counter renames.
pub struct Gb10b;

impl ReportDefinitionProvider for Gb10b {
    fn chip(&self) -> &'static str {
        "gb10b"
    }

    fn per_range_sections(&self) -> Vec<DataSection> {
        ga10b::mobile_sections(
            top_throughputs(),
            WarpIssueStalls::default().without("IMC Miss"),
            None,
            gb20x::additional_metrics(),
        )
    }

    fn summary_sections(&self) -> Vec<DataSection> {
        ga10b::mobile_summary_sections()
    }
}

fn top_throughputs() -> TopThroughputs {
    let mut gen = ga10b::top_throughputs();
    gen.rows.retain(|row| row.throughput != "rtcore__throughput");
    gen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{data_tables, required_counters, required_throughputs};

    #[test]
    fn test_section_layout() {
        let sections = Gb10b.per_range_sections();
        assert_eq!(sections.len(), 7);
        let names: Vec<String> = sections[4].tables.iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["PrimitiveDataflow", "RasterDataflow"]);
        assert_eq!(data_tables(&sections).count(), 24);
        assert_eq!(sections[2].tables[0].name, "SocMemoryThroughput");
    }

    #[test]
    fn test_no_raytracing_metrics() {
        let sections = Gb10b.per_range_sections();
        assert!(!required_throughputs(&sections).contains(&"rtcore__throughput".to_string()));
        assert!(required_counters(&sections).iter().all(|c| !c.starts_with("rtcore__")));
        assert_eq!(top_throughputs().rows.len(), 10);
    }

    #[test]
    fn test_blackwell_counter_changes() {
        let counters = required_counters(&Gb10b.per_range_sections());
        let has = |name: &str| counters.iter().any(|c| c == name);
        assert!(has("l1tex__data_pipe_lsu_wavefronts_mem_lgds"));
        assert!(!has("l1tex__data_pipe_lsu_wavefronts_mem_lg"));
        assert!(!has("smsp__warps_issue_stalled_imc_miss"));
        assert!(has("mcc__dram_throughput_srcnode_dbb_op_write"));
    }

    #[test]
    fn test_summary_matches_ampere_soc() {
        let summary = Gb10b.summary_sections();
        let ampere = ga10b::Ga10b.summary_sections();
        assert_eq!(summary[1].tables[0].jsfunc, ampere[1].tables[0].jsfunc);
        assert_eq!(summary[1].title.as_deref(), Some("Summary of Measured Ranges"));
    }
}
