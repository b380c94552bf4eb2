use crate::breakdown::Node;
use crate::chips::ReportDefinitionProvider;
use crate::tables::*;
use crate::types::{strings, DataSection, MetricKind, RequiredMetrics};

/// Turing desktop parts.
pub struct Tu10x;

impl ReportDefinitionProvider for Tu10x {
    fn chip(&self) -> &'static str {
        "tu10x"
    }

    fn per_range_sections(&self) -> Vec<DataSection> {
        vec![
            DataSection::new(vec![
                DeviceProperties::new(128).make_data_table(),
                Clocks::desktop().make_data_table(),
            ])
            .without_spacing(),
            DataSection::titled(
                vec![
                    TopLevelStats.make_data_table(),
                    top_throughputs().make_data_table(),
                    CacheHitRates.make_data_table(),
                ],
                "Overview Section",
            ),
            DataSection::titled(
                vec![
                    MainMemory.make_data_table(),
                    l2_traffic_by_memory_aperture_short(true).make_data_table(),
                    l2_traffic_by_source(false).make_data_table(),
                    L1TexThroughputs.make_data_table(),
                    L1TexTrafficBreakdown::default().make_data_table(),
                ],
                "Memory Performance Section",
            ),
            DataSection::titled(
                vec![
                    sm_throughputs().make_data_table(),
                    sm_inst_executed().make_data_table(),
                    SmShaderExecution.make_data_table(),
                    sm_resource_usage().make_data_table(),
                    SmWarpLaunchStalls.make_data_table(),
                    WarpIssueStalls::default().make_data_table(),
                ],
                "Shader Performance Section",
            ),
            DataSection::titled(
                vec![
                    PrimitiveDataflow.make_data_table(),
                    RasterDataflow::new("prop__prop2xbar_zrop_pixels_realtime", "prop__prop2xbar_crop_pixels_realtime")
                        .make_data_table(),
                ],
                "3D Pipeline Section",
            ),
            DataSection::titled(
                vec![
                    l2_traffic_by_memory_aperture(false).make_data_table(),
                    l2_traffic_by_operation(false).make_data_table(),
                ],
                "Additional L2 Traffic Breakdowns Section",
            ),
            DataSection::titled(
                vec![
                    AdditionalMetrics::default().make_data_table(),
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
            DataSection::titled(vec![ranges_summary().make_data_table()], "Summary of Measured Ranges"),
        ]
    }
}

fn top_throughputs() -> TopThroughputs {
    TopThroughputs::new(vec![
        ThroughputRow::new("Shader", r##"<a href="#SM-Instruction-Throughput">SM (Shader Cores)</a>"##, "sm__throughput"),
        ThroughputRow::new("Memory", r##"<a href="#L1TEX-Throughput">L1TEX Cache</a>"##, "l1tex__throughput"),
        ThroughputRow::new("Memory", r##"<a href="#L2-Sector-Traffic-By-Memory-Aperture-Short">L2 Cache</a>"##, "lts__throughput"),
        ThroughputRow::new("Memory", r##"<a href="#Main-Memory-Throughput">DRAM</a>"##, "dram__throughput"),
        ThroughputRow::new("Memory", r##"<a href="#Main-Memory-Throughput">PCIe</a>"##, "pcie__throughput"),
        ThroughputRow::new("World Pipe", r##"<a href="#Primitive-Data-Flow">PDA Index Fetch</a>"##, "pda__throughput"),
        ThroughputRow::new("World Pipe", r##"<a href="#Primitive-Data-Flow">Vertex Attr. Fetch</a>"##, "vaf__throughput"),
        ThroughputRow::new("World Pipe", r##"<a href="#Primitive-Data-Flow">Primitive Engine</a>"##, "pes__throughput"),
        ThroughputRow::new("Screen Pipe", r##"<a href="#Raster-Data-Flow">RASTER</a>"##, "raster__throughput"),
        ThroughputRow::new("Screen Pipe", r##"<a href="#Raster-Data-Flow">PROP (Pre-ROP)</a>"##, "prop__throughput"),
        ThroughputRow::new("Screen Pipe", r##"<a href="#Raster-Data-Flow">ZROP (Depth-Test)</a>"##, "zrop__throughput"),
        ThroughputRow::new("Screen Pipe", r##"<a href="#Raster-Data-Flow">CROP (Color Blend)</a>"##, "crop__throughput"),
    ])
}

fn sm_throughputs() -> SmThroughputs {
    SmThroughputs::new(vec![
        ThroughputPipe::new("adu", "Computed branches and indexed constants"),
        ThroughputPipe::new("alu", "INT32 except multiply; FP32 comparison"),
        ThroughputPipe::new("cbu", "Divergent branches and control flow"),
        ThroughputPipe::new("fma", "FP32 mul/add and INT32 multiply"),
        ThroughputPipe::new("fp16", "FP16 mul/add"),
        ThroughputPipe::new("fp64", "FP64 mul/add"),
        ThroughputPipe::new("ipa", "Pixel shader attribute interpolation"),
        ThroughputPipe::new("lsu", "Global, local, shared memory, and misc"),
        ThroughputPipe::activity_only("shared", "Shared Pipe Dispatch (FP16,Tensor)", "sm__pipe_shared_cycles_active"),
        ThroughputPipe::new("tensor", "Tensor matrix multiply (FP16, INT8/4/1)"),
        ThroughputPipe::new("tex", "Texture and surface memory"),
        ThroughputPipe::new("uniform", "Warp-level scalar operations"),
        ThroughputPipe::new("xu", "Transcendentals and float/int conversion"),
    ])
}

fn sm_inst_executed() -> SmInstExecuted {
    SmInstExecuted::new(vec![
        InstPipe::with_threads("total", "All instructions"),
        InstPipe::new("adu", "Computed branches and indexed constants"),
        InstPipe::with_threads("alu", "INT32 except multiply; FP32 comparison"),
        InstPipe::new("cbu", "Divergent branches and control flow"),
        InstPipe::with_threads("fma", "FP32 mul/add and INT32 multiply"),
        InstPipe::with_threads("fp16", "FP16 mul/add"),
        InstPipe::with_threads("fp64", "FP64 mul/add"),
        InstPipe::with_threads("ipa", "Pixel shader attribute interpolation"),
        InstPipe::with_threads("lsu", "Global, local, shared memory, and misc"),
        InstPipe::new("tensor", "Tensor matrix multiply (FP16, INT8/4/1)"),
        InstPipe::new("tex", "Texture and surface memory"),
        InstPipe::new("uniform", "Warp-level scalar operations"),
        InstPipe::with_threads("xu", "Transcendentals and float/int conversion"),
    ])
}

fn sm_resource_usage() -> SmResourceUsage {
    const NA: &str = "NotApplicable";
    SmResourceUsage::new(vec![
        ResourceRow::new(
            "Warps",
            "sm__warps_active",
            NA,
            "tpc__warps_active_shader_vtg_realtime",
            "tpc__warps_active_shader_ps_realtime",
            "tpc__warps_active_shader_cs_realtime",
        ),
        ResourceRow::new(
            "Registers",
            "tpc__sm_rf_registers_allocated",
            NA,
            "tpc__sm_rf_registers_allocated_shader_vtg",
            "tpc__sm_rf_registers_allocated_shader_ps",
            "tpc__sm_rf_registers_allocated_shader_cs",
        ),
        ResourceRow::new(
            "Attr/ShMem",
            NA,
            NA,
            "tpc__l1tex_sram_bytes_mem_untagged_data_shared_allocated_isbe",
            "tpc__l1tex_sram_bytes_mem_untagged_data_tram_allocated",
            "tpc__l1tex_sram_bytes_mem_untagged_data_shared_allocated_compute",
        ),
        ResourceRow::new("CTAs", NA, NA, NA, NA, "sm__ctas_active"),
    ])
}

fn ranges_summary() -> RangesSummary {
    let columns = vec![
        SummaryColumn::new("Duration ns", "getCounterValue('gpu__time_duration', 'avg')", "format_avg", "ra", "'gpu__time_duration.avg'"),
        SummaryColumn::new("GR Active%", "getCounterPct('gr__cycles_active', 'avg')", "format_pct", "ra", "'gr__cycles_active.avg.pct_of_peak_sustained_elapsed'"),
        SummaryColumn::new("3D?", "getCounterValue('fe__draw_count', 'sum') ? '&#x2713;' : ''", "", "ra", "'fe__draw_count.sum'"),
        SummaryColumn::new("Comp?", "getCounterValue('gr__dispatch_count', 'sum') ? '&#x2713;' : ''", "", "ra", "'gr__dispatch_count.sum'"),
        SummaryColumn::new("#WFI", "getCounterValue('fe__output_ops_type_bundle_cmd_go_idle', 'sum')", "format_sum", "ra", "'fe__output_ops_type_bundle_cmd_go_idle.sum'"),
        SummaryColumn::new("#Prims", "getCounterValue('pda__input_prims', 'sum')", "format_sum", "ra", "'pda__input_prims.sum'"),
        SummaryColumn::new("#Pixels-Z", "getCounterValue('prop__prop2xbar_zrop_pixels_realtime', 'sum')", "format_sum", "ra", "'prop__prop2xbar_zrop_pixels_realtime.sum'"),
        SummaryColumn::new("#Pixels-C", "getCounterValue('prop__prop2xbar_crop_pixels_realtime', 'sum')", "format_sum", "ra", "'prop__prop2xbar_crop_pixels_realtime.sum'"),
        SummaryColumn::new("SM%", "getThroughputPct('sm__throughput')", "format_pct", "ra", "getThroughputPctStr('sm__throughput')"),
        SummaryColumn::new("L1TEX%", "getThroughputPct('l1tex__throughput')", "format_pct", "ra", "getThroughputPctStr('l1tex__throughput')"),
        SummaryColumn::new("L2%", "getThroughputPct('lts__throughput')", "format_pct", "ra", "getThroughputPctStr('lts__throughput')"),
        SummaryColumn::new("DRAM%", "getThroughputPct('dram__throughput')", "format_pct", "ra", "getThroughputPctStr('dram__throughput')"),
        SummaryColumn::new("PCIe%", "getThroughputPct('pcie__throughput')", "format_pct", "ra", "getThroughputPctStr('pcie__throughput')"),
        SummaryColumn::new("PD%", "getThroughputPct('pda__throughput')", "format_pct", "ra", "getThroughputPctStr('pda__throughput')"),
        SummaryColumn::new(
            "PE%",
            "Math.max(getThroughputPct('vaf__throughput'), getThroughputPct('vpc__throughput'), getThroughputPct('pes__throughput'))",
            "format_pct",
            "ra",
            "'max(' + getThroughputPctStr('vaf__throughput') + ', ' + getThroughputPctStr('vpc__throughput') + ', ' + getThroughputPctStr('pes__throughput') + ')'",
        ),
        SummaryColumn::new("RSTR%", "getThroughputPct('raster__throughput')", "format_pct", "ra", "getThroughputPctStr('raster__throughput')"),
        SummaryColumn::new("PROP%", "getThroughputPct('prop__throughput')", "format_pct", "ra", "getThroughputPctStr('prop__throughput')"),
        SummaryColumn::new("ZROP%", "getThroughputPct('zrop__throughput')", "format_pct", "ra", "getThroughputPctStr('zrop__throughput')"),
        SummaryColumn::new("CROP%", "getThroughputPct('crop__throughput')", "format_pct", "ra", "getThroughputPctStr('crop__throughput')"),
    ];
    let required = RequiredMetrics {
        counters: strings(&[
            "fe__draw_count",
            "fe__output_ops_type_bundle_cmd_go_idle",
            "gpu__time_duration",
            "gr__cycles_active",
            "gr__dispatch_count",
            "pda__input_prims",
            "prop__prop2xbar_crop_pixels_realtime",
            "prop__prop2xbar_zrop_pixels_realtime",
        ]),
        ratios: Vec::new(),
        throughputs: strings(&[
            "crop__throughput",
            "dram__throughput",
            "l1tex__throughput",
            "lts__throughput",
            "pcie__throughput",
            "pda__throughput",
            "pes__throughput",
            "prop__throughput",
            "raster__throughput",
            "sm__throughput",
            "vaf__throughput",
            "vpc__throughput",
            "zrop__throughput",
        ]),
    };
    RangesSummary::new(columns, required)
}

/// L2 traffic per destination and operation.
fn l2_traffic_by_memory_aperture_short(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("DRAM", &["lts__average_t_sector_aperture_device"], vec![
            Node::leaf("Reads", "lts__average_t_sector_aperture_device_op_read"),
            Node::leaf("Writes", "lts__average_t_sector_aperture_device_op_write"),
            Node::leaf("Atomics", "lts__average_t_sector_aperture_device_op_atom"),
            Node::leaf("Reductions", "lts__average_t_sector_aperture_device_op_red"),
        ]),
        Node::new("System Memory", &["lts__average_t_sector_aperture_sysmem"], vec![
            Node::leaf("Reads", "lts__average_t_sector_aperture_sysmem_op_read"),
            Node::leaf("Writes", "lts__average_t_sector_aperture_sysmem_op_write"),
            Node::leaf("Atomics", "lts__average_t_sector_aperture_sysmem_op_atom"),
            Node::leaf("Reductions", "lts__average_t_sector_aperture_sysmem_op_red"),
        ]),
        Node::new("Peer Memory", &["lts__average_t_sector_aperture_peer"], vec![
            Node::leaf("Reads", "lts__average_t_sector_aperture_peer_op_read"),
            Node::leaf("Writes", "lts__average_t_sector_aperture_peer_op_write"),
            Node::leaf("Atomics", "lts__average_t_sector_aperture_peer_op_atom"),
            Node::leaf("Reductions", "lts__average_t_sector_aperture_peer_op_red"),
        ]),
    ];
    L2TrafficBreakdown::new(
        "L2SectorTrafficBreakdownByMemoryApertureShort",
        "L2-Sector-Traffic-By-Memory-Aperture-Short",
        &[("Memory Aperture", "To Memory"), ("Op", "Op")],
        nodes,
    )
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This table decomposes L2 bandwidth to each destination, per operation. A <a href="#L2-Sector-Traffic-By-Memory-Aperture">more detailed version of this table</a> can be found below."##)
}

fn l2_traffic_by_source(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc"], vec![
            Node::new("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", &["lts__average_t_sector_srcunit_tex"], vec![
                Node::new("DRAM", &["lts__average_t_sector_srcunit_tex_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_aperture_device_op_write"),
                    Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_aperture_device_op_atom"),
                    Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_aperture_device_op_red"),
                ]),
                Node::new("Peer Memory", &["lts__average_t_sector_srcunit_tex_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_aperture_peer_op_write"),
                    Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_aperture_peer_op_atom"),
                    Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_aperture_peer_op_red"),
                ]),
                Node::new("System Memory", &["lts__average_t_sector_srcunit_tex_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_write"),
                    Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_atom"),
                    Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_red"),
                ]),
            ]),
            Node::new("Primitive Engine", &["lts__average_t_sector_srcunit_pe"], vec![
                Node::new("DRAM", &["lts__average_t_sector_srcunit_pe_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_aperture_device_op_write"),
                ]),
                Node::new("Peer Memory", &["lts__average_t_sector_srcunit_pe_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_aperture_peer_op_write"),
                ]),
                Node::new("System Memory", &["lts__average_t_sector_srcunit_pe_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_aperture_sysmem_op_write"),
                ]),
            ]),
            Node::new("other GPC units", &["lts__average_t_sector_srcunit_gpcother"], vec![
                Node::new("DRAM", &["lts__average_t_sector_srcunit_gpcother_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_gpcother_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_gpcother_aperture_device_op_write"),
                ]),
                Node::new("Peer Memory", &["lts__average_t_sector_srcunit_gpcother_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_gpcother_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_gpcother_aperture_peer_op_write"),
                ]),
                Node::new("System Memory", &["lts__average_t_sector_srcunit_gpcother_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_gpcother_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_gpcother_aperture_sysmem_op_write"),
                ]),
            ]),
        ]),
        Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp"], vec![
            Node::new("ZROP", &["lts__average_t_sector_srcunit_zrop"], vec![
                Node::new("DRAM", &["lts__average_t_sector_srcunit_zrop_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_aperture_device_op_write"),
                ]),
                Node::new("Peer Memory", &["lts__average_t_sector_srcunit_zrop_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_aperture_peer_op_write"),
                ]),
                Node::new("System Memory", &["lts__average_t_sector_srcunit_zrop_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_aperture_sysmem_op_write"),
                ]),
            ]),
            Node::new("CROP", &["lts__average_t_sector_srcunit_crop"], vec![
                Node::new("DRAM", &["lts__average_t_sector_srcunit_crop_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_aperture_device_op_write"),
                ]),
                Node::new("Peer Memory", &["lts__average_t_sector_srcunit_crop_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_aperture_peer_op_write"),
                ]),
                Node::new("System Memory", &["lts__average_t_sector_srcunit_crop_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_aperture_sysmem_op_write"),
                ]),
            ]),
        ]),
        // The aggregate srcnode_hub counter is unreliable, so HUB totals sum their children
        Node::new("HUB Units", &[], vec![
            Node::new("all HUB Units", &[], vec![
                Node::new("DRAM", &["lts__average_t_sector_srcnode_hub_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_aperture_device_op_write"),
                ]),
                Node::new("Peer Memory", &["lts__average_t_sector_srcnode_hub_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_aperture_peer_op_write"),
                ]),
                Node::new("System Memory", &["lts__average_t_sector_srcnode_hub_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_aperture_sysmem_op_write"),
                ]),
            ]),
        ]),
    ];
    L2TrafficBreakdown::new(
        "L2SectorTrafficBreakdownBySource",
        "L2-Sector-Traffic-By-Source",
        &[("Source Breakdown", "From Source"), ("Unit Breakdown", "From Unit"), ("Memory Aperture", "To Memory"), ("Op", "Op")],
        nodes,
    )
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This table decomposes L2 bandwidth from each source unit, to each destination, per operation. See also: these tables that prioritize <a href="#L2-Sector-Traffic-By-Memory-Aperture">destination Memory Aperture</a> and <a href="#L2-Sector-Traffic-By-Operation">Operation</a>."##)
}

fn l2_traffic_by_memory_aperture(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("DRAM", &["lts__average_t_sector_aperture_device"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_device"], vec![
                Node::new("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", &["lts__average_t_sector_srcunit_tex_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_aperture_device_op_write"),
                    Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_aperture_device_op_atom"),
                    Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_aperture_device_op_red"),
                ]),
                Node::new("Primitive Engine", &["lts__average_t_sector_srcunit_pe_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_aperture_device_op_write"),
                ]),
                Node::new("other GPC units", &["lts__average_t_sector_srcunit_gpcother_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_gpcother_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_gpcother_aperture_device_op_write"),
                ]),
            ]),
            Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_device"], vec![
                Node::new("ZROP", &["lts__average_t_sector_srcunit_zrop_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_aperture_device_op_write"),
                ]),
                Node::new("CROP", &["lts__average_t_sector_srcunit_crop_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_aperture_device_op_write"),
                ]),
            ]),
            Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_device"], vec![
                Node::new("all HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_device"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_aperture_device_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_aperture_device_op_write"),
                ]),
            ]),
        ]),
        Node::new("Peer Memory", &["lts__average_t_sector_aperture_peer"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_peer"], vec![
                Node::new("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", &["lts__average_t_sector_srcunit_tex_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_aperture_peer_op_write"),
                    Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_aperture_peer_op_atom"),
                    Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_aperture_peer_op_red"),
                ]),
                Node::new("Primitive Engine", &["lts__average_t_sector_srcunit_pe_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_aperture_peer_op_write"),
                ]),
                Node::new("other GPC units", &["lts__average_t_sector_srcunit_gpcother_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_gpcother_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_gpcother_aperture_peer_op_write"),
                ]),
            ]),
            Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_peer"], vec![
                Node::new("ZROP", &["lts__average_t_sector_srcunit_zrop_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_aperture_peer_op_write"),
                ]),
                Node::new("CROP", &["lts__average_t_sector_srcunit_crop_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_aperture_peer_op_write"),
                ]),
            ]),
            Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_peer"], vec![
                Node::new("all HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_peer"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_aperture_peer_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_aperture_peer_op_write"),
                ]),
            ]),
        ]),
        Node::new("System Memory", &["lts__average_t_sector_aperture_sysmem"], vec![
            Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_sysmem"], vec![
                Node::new("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", &["lts__average_t_sector_srcunit_tex_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_write"),
                    Node::leaf("Atomics", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_atom"),
                    Node::leaf("Reductions", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_red"),
                ]),
                Node::new("Primitive Engine", &["lts__average_t_sector_srcunit_pe_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_pe_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_pe_aperture_sysmem_op_write"),
                ]),
                Node::new("other GPC units", &["lts__average_t_sector_srcunit_gpcother_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_gpcother_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_gpcother_aperture_sysmem_op_write"),
                ]),
            ]),
            Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_sysmem"], vec![
                Node::new("ZROP", &["lts__average_t_sector_srcunit_zrop_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_zrop_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_zrop_aperture_sysmem_op_write"),
                ]),
                Node::new("CROP", &["lts__average_t_sector_srcunit_crop_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcunit_crop_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcunit_crop_aperture_sysmem_op_write"),
                ]),
            ]),
            Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_sysmem"], vec![
                Node::new("all HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_sysmem"], vec![
                    Node::leaf("Reads", "lts__average_t_sector_srcnode_hub_aperture_sysmem_op_read"),
                    Node::leaf("Writes", "lts__average_t_sector_srcnode_hub_aperture_sysmem_op_write"),
                ]),
            ]),
        ]),
    ];
    L2TrafficBreakdown::new(
        "L2SectorTrafficBreakdownByMemoryAperture",
        "L2-Sector-Traffic-By-Memory-Aperture",
        &[("Memory Aperture", "To Memory"), ("Source Breakdown", "From Source"), ("Unit Breakdown", "From Unit"), ("Op", "Op")],
        nodes,
    )
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This is an extended breakdown of <a href="#L2-Sector-Traffic-By-Memory-Aperture-Short">L2 Traffic by destination</a>. It decomposes L2 bandwidth to each destination, from each source unit, per operation."##)
}

fn l2_traffic_by_operation(show_generic_workflow: bool) -> L2TrafficBreakdown {
    let nodes = vec![
        Node::new("Reads", &["lts__average_t_sector_op_read"], vec![
            Node::new("DRAM", &["lts__average_t_sector_aperture_device_op_read"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_device_op_read"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_device_op_read"),
                    Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_aperture_device_op_read"),
                    Node::leaf("other GPC units", "lts__average_t_sector_srcunit_gpcother_aperture_device_op_read"),
                ]),
                Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_device_op_read"], vec![
                    Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_aperture_device_op_read"),
                    Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_aperture_device_op_read"),
                ]),
                Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_device_op_read"], vec![
                    Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_aperture_device_op_read"),
                ]),
            ]),
            Node::new("Peer Memory", &["lts__average_t_sector_aperture_peer_op_read"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_peer_op_read"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_peer_op_read"),
                    Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_aperture_peer_op_read"),
                    Node::leaf("other GPC units", "lts__average_t_sector_srcunit_gpcother_aperture_peer_op_read"),
                ]),
                Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_peer_op_read"], vec![
                    Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_aperture_peer_op_read"),
                    Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_aperture_peer_op_read"),
                ]),
                Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_peer_op_read"], vec![
                    Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_aperture_peer_op_read"),
                ]),
            ]),
            Node::new("System Memory", &["lts__average_t_sector_aperture_sysmem_op_read"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_sysmem_op_read"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_read"),
                    Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_aperture_sysmem_op_read"),
                    Node::leaf("other GPC units", "lts__average_t_sector_srcunit_gpcother_aperture_sysmem_op_read"),
                ]),
                Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_sysmem_op_read"], vec![
                    Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_aperture_sysmem_op_read"),
                    Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_aperture_sysmem_op_read"),
                ]),
                Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_sysmem_op_read"], vec![
                    Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_aperture_sysmem_op_read"),
                ]),
            ]),
        ]),
        Node::new("Writes", &["lts__average_t_sector_op_write"], vec![
            Node::new("DRAM", &["lts__average_t_sector_aperture_device_op_write"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_device_op_write"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_device_op_write"),
                    Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_aperture_device_op_write"),
                    Node::leaf("other GPC units", "lts__average_t_sector_srcunit_gpcother_aperture_device_op_write"),
                ]),
                Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_device_op_write"], vec![
                    Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_aperture_device_op_write"),
                    Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_aperture_device_op_write"),
                ]),
                Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_device_op_write"], vec![
                    Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_aperture_device_op_write"),
                ]),
            ]),
            Node::new("Peer Memory", &["lts__average_t_sector_aperture_peer_op_write"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_peer_op_write"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_peer_op_write"),
                    Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_aperture_peer_op_write"),
                    Node::leaf("other GPC units", "lts__average_t_sector_srcunit_gpcother_aperture_peer_op_write"),
                ]),
                Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_peer_op_write"], vec![
                    Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_aperture_peer_op_write"),
                    Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_aperture_peer_op_write"),
                ]),
                Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_peer_op_write"], vec![
                    Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_aperture_peer_op_write"),
                ]),
            ]),
            Node::new("System Memory", &["lts__average_t_sector_aperture_sysmem_op_write"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_sysmem_op_write"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_write"),
                    Node::leaf("Primitive Engine", "lts__average_t_sector_srcunit_pe_aperture_sysmem_op_write"),
                    Node::leaf("other GPC units", "lts__average_t_sector_srcunit_gpcother_aperture_sysmem_op_write"),
                ]),
                Node::new("FBP Units", &["lts__average_t_sector_srcnode_fbp_aperture_sysmem_op_write"], vec![
                    Node::leaf("ZROP", "lts__average_t_sector_srcunit_zrop_aperture_sysmem_op_write"),
                    Node::leaf("CROP", "lts__average_t_sector_srcunit_crop_aperture_sysmem_op_write"),
                ]),
                Node::new("HUB Units", &["lts__average_t_sector_srcnode_hub_aperture_sysmem_op_write"], vec![
                    Node::leaf("all HUB Units", "lts__average_t_sector_srcnode_hub_aperture_sysmem_op_write"),
                ]),
            ]),
        ]),
        Node::new("Atomics", &["lts__average_t_sector_op_atom"], vec![
            Node::new("DRAM", &["lts__average_t_sector_aperture_device_op_atom"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_device_op_atom"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_device_op_atom"),
                ]),
            ]),
            Node::new("Peer Memory", &["lts__average_t_sector_aperture_peer_op_atom"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_peer_op_atom"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_peer_op_atom"),
                ]),
            ]),
            Node::new("System Memory", &["lts__average_t_sector_aperture_sysmem_op_atom"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_sysmem_op_atom"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_atom"),
                ]),
            ]),
        ]),
        Node::new("Reductions", &["lts__average_t_sector_op_red"], vec![
            Node::new("DRAM", &["lts__average_t_sector_aperture_device_op_red"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_device_op_red"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_device_op_red"),
                ]),
            ]),
            Node::new("Peer Memory", &["lts__average_t_sector_aperture_peer_op_red"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_peer_op_red"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_peer_op_red"),
                ]),
            ]),
            Node::new("System Memory", &["lts__average_t_sector_aperture_sysmem_op_red"], vec![
                Node::new("GPC Units", &["lts__average_t_sector_srcnode_gpc_aperture_sysmem_op_red"], vec![
                    Node::leaf("<a href=\"#L1TEX-Sector-Traffic\">L1TEX Cache</a>", "lts__average_t_sector_srcunit_tex_aperture_sysmem_op_red"),
                ]),
            ]),
        ]),
    ];
    L2TrafficBreakdown::new(
        "L2SectorTrafficBreakdownByOperation",
        "L2-Sector-Traffic-By-Operation",
        &[("Op", "Op"), ("Memory Aperture", "To Memory"), ("Source Breakdown", "From Source"), ("Unit Breakdown", "From Unit")],
        nodes,
    )
    .show_generic_workflow(show_generic_workflow)
    .extra_workflow(r##" This table decomposes L2 bandwidth per operation, to each destination, from each source unit."##)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{data_tables, required_throughputs};

    #[test]
    fn test_section_layout() {
        let sections = Tu10x.per_range_sections();
        let titles: Vec<Option<&str>> = sections.iter().map(|s| s.title.as_deref()).collect();
        assert_eq!(
            titles,
            vec![
                None,
                Some("Overview Section"),
                Some("Memory Performance Section"),
                Some("Shader Performance Section"),
                Some("3D Pipeline Section"),
                Some("Additional L2 Traffic Breakdowns Section"),
                Some("Exhaustive Listings Section"),
            ]
        );
        assert!(!sections[0].inter_table_spacing);
        assert_eq!(data_tables(&sections).count(), 24);
        // No raytracing units before Ampere
        assert!(data_tables(&sections).all(|t| t.name != "RaytracingBreakdown"));
    }

    #[test]
    fn test_hub_units_sum_their_apertures() {
        let table = l2_traffic_by_source(false);
        let hub = table.nodes.iter().find(|n| n.label == "HUB Units").unwrap();
        let expected = strings(&[
            "lts__average_t_sector_srcnode_hub_aperture_device",
            "lts__average_t_sector_srcnode_hub_aperture_peer",
            "lts__average_t_sector_srcnode_hub_aperture_sysmem",
        ]);
        assert_eq!(hub.addends, expected);
        assert_eq!(hub.children[0].addends, expected);
        assert!(table.workflow().starts_with(" This table decomposes L2 bandwidth from each source unit"));
    }

    #[test]
    fn test_top_throughputs_link_to_details() {
        let t = top_throughputs().make_data_table();
        assert!(t.jsfunc.contains(r##"'<a href="#Raster-Data-Flow">CROP (Color Blend)</a>'"##));
        assert!(t.jsfunc.contains(r##"'<a href="#Main-Memory-Throughput">PCIe</a>'"##));
    }

    #[test]
    fn test_only_first_l2_table_shows_generic_workflow() {
        let sections = Tu10x.per_range_sections();
        let l2: Vec<_> = data_tables(&sections)
            .filter(|t| t.name.starts_with("L2SectorTrafficBreakdown"))
            .collect();
        assert_eq!(l2.len(), 4);
        assert!(l2[0].workflow.len() > l2[1].workflow.len());
        assert!(l2[0].required_ratios.contains(&"lts__average_t_sector_aperture_device_op_read_lookup_hit".to_string()));
    }

    #[test]
    fn test_summary_reads_desktop_throughputs() {
        let sections = Tu10x.summary_sections();
        let throughputs = required_throughputs(&sections);
        assert!(throughputs.contains(&"dram__throughput".to_string()));
        assert!(throughputs.contains(&"pcie__throughput".to_string()));
        assert_eq!(data_tables(&sections).count(), 2);
    }
}
