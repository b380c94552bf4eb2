use crate::breakdown::Node;
use crate::chips::{ga10b, ga10x};
use crate::chips::ReportDefinitionProvider;
use crate::tables::*;
use crate::types::{DataSection, MetricKind};

/// Blackwell desktop parts. Only the video memory L2 is broken down; the
/// system memory L2 has no tables yet.
pub struct Gb20x;

impl ReportDefinitionProvider for Gb20x {
    fn chip(&self) -> &'static str {
        "gb20x"
    }

    fn per_range_sections(&self) -> Vec<DataSection> {
        vec![
            DataSection::new(vec![
                ga10b::device_properties().make_data_table(),
                Clocks::desktop().make_data_table(),
            ])
            .without_spacing(),
            DataSection::titled(
                vec![
                    TopLevelStats.make_data_table(),
                    ga10x::top_throughputs().make_data_table(),
                    CacheHitRates.make_data_table(),
                ],
                "Overview Section",
            ),
            DataSection::titled(
                vec![
                    MainMemory.make_data_table(),
                    vid_l2_traffic_by_memory_aperture_short(true).make_data_table(),
                    vid_l2_traffic_by_source(false).make_data_table(),
                    L1TexThroughputs.make_data_table(),
                    L1TexTrafficBreakdown::default().make_data_table(),
                ],
                "Memory Performance Section",
            ),
            DataSection::titled(
                vec![
                    ga10b::sm_throughputs().make_data_table(),
                    ga10b::sm_inst_executed().make_data_table(),
                    SmShaderExecution.make_data_table(),
                    ga10b::sm_resource_usage().make_data_table(),
                    SmWarpLaunchStalls.make_data_table(),
                    WarpIssueStalls::default().without("IMC Miss").make_data_table(),
                ],
                "Shader Performance Section",
            ),
            DataSection::titled(
                vec![
                    PrimitiveDataflow.make_data_table(),
                    RasterDataflow::with_prop2zrop_modes("prop__prop2zrop_pixels_realtime", "prop__prop2crop_pixels_realtime")
                        .make_data_table(),
                    RaytracingBreakdown.make_data_table(),
                ],
                "3D Pipeline Section",
            ),
            DataSection::titled(
                vec![
                    vid_l2_traffic_by_memory_aperture(false).make_data_table(),
                    vid_l2_traffic_by_operation(false).make_data_table(),
                ],
                "Additional L2 Traffic Breakdowns Section",
            ),
            DataSection::titled(
                vec![
                    additional_metrics().make_data_table(),
                    AllMetrics::new(MetricKind::Counter).make_data_table(),
                    AllMetrics::new(MetricKind::Ratio).make_data_table(),
                    AllMetrics::new(MetricKind::Throughput).make_data_table(),
                ],
                "Exhaustive Listings Section",
            ),
        ]
    }

    fn summary_sections(&self) -> Vec<DataSection> {
        vec![
            DataSection::new(vec![CollectionInfo.make_data_table()]),
            DataSection::titled(vec![ga10x::ranges_summary().make_data_table()], "Summary of Measured Ranges"),
        ]
    }
}

/// Blackwell renames the LSU local/global wavefront counter to `_mem_lgds`.
pub(super) fn additional_metrics() -> AdditionalMetrics {
    let mut gen = AdditionalMetrics::default();
    for counter in gen.required.counters.iter_mut() {
        if counter == "l1tex__data_pipe_lsu_wavefronts_mem_lg" {
            *counter = "l1tex__data_pipe_lsu_wavefronts_mem_lgds".to_string();
        }
    }
    gen
}

/// Video memory L2 traffic per destination and operation.
fn vid_l2_traffic_by_memory_aperture_short(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("DRAM", &[], vec![
            Node::leaf("Reads", "lts__average_t_sector_op_read"),
            Node::leaf("Writes", "lts__average_t_sector_op_write"),
            Node::leaf("Atomics", "lts__average_t_sector_op_atom"),
            Node::leaf("Reductions", "lts__average_t_sector_op_red"),
        ]),
    ];
    L2TrafficBreakdown::new(
        "VidL2SectorTrafficBreakdownByMemoryApertureShort",
        "VidL2-Sector-Traffic-By-Memory-Aperture-Short",
        &[("Memory Aperture", "To Memory"), ("Op", "Op")],
        nodes,
    )
    .l2_type("Vid")
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This table decomposes VidL2 bandwidth to each destination, per operation. A <a href="#VidL2-Sector-Traffic-By-Memory-Aperture">more detailed version of this table</a> can be found below."##)
}

fn vid_l2_traffic_by_source(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc"], vec![
            Node::new("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", &["lts__average_t_sector_srcunit_tex"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_op_write"),
                Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_op_atom"),
                Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_op_red"),
            ]),
            Node::new("L1.5 Constant Cache", &["lts__average_t_sector_srcunit_gcc"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_gcc"),
            ]),
            Node::new("Primitive Engine", &["lts__average_t_sector_srcunit_pe"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_op_write"),
            ]),
            Node::new("Raster", &["lts__average_t_sector_srcunit_raster"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_raster_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_raster_op_write"),
            ]),
            Node::new("ZROP", &["lts__average_t_sector_srcunit_zrop"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_op_write"),
            ]),
            Node::new("CROP", &["lts__average_t_sector_srcunit_crop"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_op_write"),
            ]),
        ]),
        Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp"], vec![
            Node::new("all FBP Units", &["lts__average_t_sector_srcnode_fbp"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcnode_fbp_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcnode_fbp_op_write"),
            ]),
        ]),
        Node::new("HUB Units", &[], vec![
            Node::new("all HUB Units", &[], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_op_write"),
            ]),
        ]),
    ];
    L2TrafficBreakdown::new(
        "VidL2SectorTrafficBreakdownBySource",
        "VidL2-Sector-Traffic-By-Source",
        &[("Source Breakdown", "From Source"), ("Unit Breakdown", "From Unit"), ("Op", "Op")],
        nodes,
    )
    .l2_type("Vid")
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This table decomposes VidL2 bandwidth from each source unit, to each destination, per operation. See also: these tables that prioritize <a href="#VidL2-Sector-Traffic-By-Memory-Aperture">destination Memory Aperture</a> and <a href="#VidL2-Sector-Traffic-By-Operation">Operation</a>."##)
}

fn vid_l2_traffic_by_memory_aperture(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc"], vec![
            Node::new("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", &["lts__average_t_sector_srcunit_tex"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_op_write"),
                Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_op_atom"),
                Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_op_red"),
            ]),
            Node::new("L1.5 Constant Cache", &["lts__average_t_sector_srcunit_gcc"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_gcc"),
            ]),
            Node::new("Primitive Engine", &["lts__average_t_sector_srcunit_pe"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_op_write"),
            ]),
            Node::new("Raster", &["lts__average_t_sector_srcunit_raster"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_raster_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_raster_op_write"),
            ]),
            Node::new("ZROP", &["lts__average_t_sector_srcunit_zrop"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_op_write"),
            ]),
            Node::new("CROP", &["lts__average_t_sector_srcunit_crop"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_op_write"),
            ]),
        ]),
        Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp"], vec![
            Node::new("all FBP Units", &["lts__average_t_sector_srcnode_fbp"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcnode_fbp_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcnode_fbp_op_write"),
            ]),
        ]),
        Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub"], vec![
            Node::new("all HUB Units", &["lts__average_t_sector_srcnode_hub"], vec![
                Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_op_write"),
            ]),
        ]),
    ];
    L2TrafficBreakdown::new(
        "VidL2SectorTrafficBreakdownByMemoryAperture",
        "VidL2-Sector-Traffic-By-Memory-Aperture",
        &[("Source Breakdown", "From Source"), ("Unit Breakdown", "From Unit"), ("Op", "Op")],
        nodes,
    )
    .l2_type("Vid")
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This is an extended breakdown of <a href="#VidL2-Sector-Traffic-By-Memory-Aperture-Short">VidL2 Traffic by destination</a>. It decomposes VidL2 bandwidth to each destination, from each source unit, per operation."##)
}

fn vid_l2_traffic_by_operation(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("Reads", &["lts__average_t_sector_op_read"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_op_read"], vec![
                Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_op_read"),
                Node::leaf("L1.5 Constant Cache", "lts__average_t_sector_srcunit_gcc"),
                Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_op_read"),
                Node::leaf("Raster", "lts__average_t_sector_srcunit_raster_op_read"),
                Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_op_read"),
                Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_op_read"),
            ]),
            Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_op_read"], vec![
                Node::leaf("all FBP Units", "lts__average_t_sector_srcnode_fbp_op_read"),
            ]),
            Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_op_read"], vec![
                Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_op_read"),
            ]),
        ]),
        Node::new("Writes", &["lts__average_t_sector_op_write"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_op_write"], vec![
                Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_op_write"),
                Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_op_write"),
                Node::leaf("Raster", "lts__average_t_sector_srcunit_raster_op_write"),
                Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_op_write"),
                Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_op_write"),
            ]),
            Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_op_write"], vec![
                Node::leaf("all FBP Units", "lts__average_t_sector_srcnode_fbp_op_write"),
            ]),
            Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_op_write"], vec![
                Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_op_write"),
            ]),
        ]),
        Node::new("Atomics", &["lts__average_t_sector_op_atom"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_op_atom"], vec![
                Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_op_atom"),
            ]),
        ]),
        Node::new("Reductions", &["lts__average_t_sector_op_red"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_op_red"], vec![
                Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_op_red"),
            ]),
        ]),
    ];
    L2TrafficBreakdown::new(
        "VidL2SectorTrafficBreakdownByOperation",
        "VidL2-Sector-Traffic-By-Operation",
        &[("Op", "Op"), ("Source Breakdown", "From Source"), ("Unit Breakdown", "From Unit")],
        nodes,
    )
    .l2_type("Vid")
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This table decomposes VidL2 bandwidth per operation, to each destination, from each source unit."##)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{data_tables, required_counters};

    #[test]
    fn test_section_layout() {
        let sections = Gb20x.per_range_sections();
        assert_eq!(sections.len(), 7);
        let names: Vec<String> = sections[4].tables.iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["PrimitiveDataflow", "RasterDataflow", "RaytracingBreakdown"]);
        assert_eq!(data_tables(&sections).count(), 25);
    }

    #[test]
    fn test_blackwell_counter_changes() {
        let counters = required_counters(&Gb20x.per_range_sections());
        let has = |name: &str| counters.iter().any(|c| c == name);
        assert!(has("l1tex__data_pipe_lsu_wavefronts_mem_lgds"));
        assert!(!has("l1tex__data_pipe_lsu_wavefronts_mem_lg"));
        assert!(!has("smsp__warps_issue_stalled_imc_miss"));
        assert!(has("prop__prop2zrop_samples_mode_latez_op_killed"));
        assert!(has("rtcore__rays"));
    }

    #[test]
    fn test_vid_l2_titles() {
        let table = vid_l2_traffic_by_memory_aperture_short(true).make_data_table();
        assert_eq!(table.name, "VidL2SectorTrafficBreakdownByMemoryApertureShort");
        assert!(table.html.contains("VidL2 Sector Traffic by Memory Aperture"));
        assert!(table.required_ratios.iter().all(|r| r.starts_with("lts__")));
    }
}
