use crate::breakdown::{self, Node, LOOKUP_HIT_SUFFIX};
use crate::tables::{js_function, quote, TableGenerator};
use crate::types::{strings, RequiredMetrics};

/// `(name, bytes counter, pct, pct tooltip)`; a bytes counter of
/// `NotAvailable` leaves the byte columns empty.
const MAIN_MEMORY_ROWS: &[(&str, &str, &str, &str)] = &[
    ("DRAM Total", "NotAvailable", "getThroughputPct('dram__throughput')", "getThroughputPctStr('dram__throughput')"),
    ("DRAM Reads", "NotAvailable", "getThroughputPct('dram__read_throughput')", "getThroughputPctStr('dram__read_throughput')"),
    ("DRAM Writes", "NotAvailable", "getThroughputPct('dram__write_throughput')", "getThroughputPctStr('dram__write_throughput')"),
    ("PCIe Reads", "pcie__read_bytes", "getCounterPct('pcie__read_bytes')", "getCounterPctStr('pcie__read_bytes')"),
    ("PCIe Writes", "pcie__write_bytes", "getCounterPct('pcie__write_bytes')", "getCounterPctStr('pcie__write_bytes')"),
];

/// DRAM and PCIe bandwidth of a discrete GPU.
#[derive(Debug, Clone, Default)]
pub struct MainMemory;

impl TableGenerator for MainMemory {
    fn name(&self) -> String {
        "MainMemory".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Main-Memory-Throughput">
          <thead>
            <tr>
              <th colspan="3" class="la tablename">Main Memory Throughput</th>
              <th colspan="2" class="ca">%-of-peak</th>
            </tr>
            <tr>
              <th class="la">Name</th>
              <th class="ra">Bytes</th>
              <th class="ra">MiBytes/Sec</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_main_memory">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = MAIN_MEMORY_ROWS.iter().map(|(name, bytes_counter, pct, pct_tooltip)| {
            format!(
                "        rows.push(new Row({:<30}, {:<30}, {:<50}, {:<70}));",
                quote(name),
                quote(bytes_counter),
                pct,
                pct_tooltip
            )
        });
        js_function(
            r##"
      function tbody_MainMemory(tbody) {
        class Row {
          constructor(name, counterName, pct, pctTooltip) {
            this.name = name;
            if (counterName == 'NotAvailable') {
              this.bytes = new NotAvailable;
              this.bytesTooltip = '';
              this.mibytesPerSec = new NotAvailable;
              this.mibytesPerSecTooltip = '';
            } else {
              this.bytes = getCounterValue(counterName, 'sum');
              this.bytesTooltip = counterName + '.sum';
              this.mibytesPerSec = getCounterValue(counterName, 'sum.per_second') / 1024 / 1024;
              this.mibytesPerSecTooltip = counterName + '.sum.per_second / 1024 / 1024';
            }
            this.pct = pct;
            this.pctTooltip = pctTooltip;
          }
        }
        let rows = [];
"##,
            rows,
            r##"
        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.name);
          addCellSimple(trow, "ra", format_sum(row.bytes), passThrough=false, formatMetricFormula(row.bytesTooltip));
          addCellSimple(trow, "ra", format_avg(row.mibytesPerSec), passThrough=false, formatMetricFormula(row.mibytesPerSecTooltip));
          addCellSimple(trow, "ra", format_pct(row.pct), passThrough=false, formatMetricFormula(row.pctTooltip));
          addCellSimple(trow, "la comp", toBarChart(row.pct, '█'), passThrough=false, formatMetricFormula(row.pctTooltip));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_MainMemory(document.getElementById('tbody_main_memory'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: strings(&["pcie__read_bytes", "pcie__write_bytes"]),
            ratios: Vec::new(),
            throughputs: strings(&["dram__read_throughput", "dram__throughput", "dram__write_throughput"]),
        }
    }

    fn workflow(&self) -> String {
        r##"Main Memory Throughput:
Observe the bandwidth utilization per main memory region.
"##.to_string()
    }
}

const SOC_MEMORY_COLUMNS: &[(&str, &str)] = &[("", "Source"), ("Op", "Op")];

/// DRAM bandwidth of an SoC, split by the client that issued it.
#[derive(Debug, Clone)]
pub struct SocMemoryTrafficBreakdown {
    pub nodes: Vec<Node>,
}

impl Default for SocMemoryTrafficBreakdown {
    fn default() -> Self {
        let source = |label, prefix: &str| {
            Node::new(label, &[], vec![
                Node::leaf("Read", &format!("{prefix}_op_read")),
                Node::leaf("Write", &format!("{prefix}_op_write")),
            ])
        };
        SocMemoryTrafficBreakdown {
            nodes: vec![
                source("CPU", "mcc__dram_throughput_srcnode_cpu"),
                source("GPU", "mcc__dram_throughput_srcnode_gpu"),
                source("Other IPs", "mcc__dram_throughput_srcnode_dbb"),
            ],
        }
    }
}

impl TableGenerator for SocMemoryTrafficBreakdown {
    fn name(&self) -> String {
        "SocMemoryThroughput".to_string()
    }

    fn html(&self) -> String {
        let mut html = String::from(
            "\n        <table style=\"display: inline-block; border: 1px solid;\" id=\"Soc-Memory-Throughput\">\n          <thead>\n            <tr>",
        );
        for (index, (group, _)) in SOC_MEMORY_COLUMNS.iter().enumerate() {
            if index == 0 {
                html.push_str("\n              <th colspan=\"1\" class=\"la tablename\">Soc Memory Throughput</th>\n              <th colspan=\"2\" class=\"ca\">%-of-Peak</th>");
            } else {
                html.push_str(&format!(
                    "\n              <th colspan=\"1\" class=\"ca\">{}</th>\n              <th colspan=\"2\" class=\"ca\">%-of-Peak</th>\n",
                    group
                ));
            }
        }
        html.push_str("\n            </tr>\n            <tr>");
        for (_, column) in SOC_MEMORY_COLUMNS {
            html.push_str(&format!(
                "\n              <th class=\"la\">{}</th>\n              <th class=\"ca\">%</th>\n              <th class=\"base\">││││▌││││▌││││▌││││▌</th>",
                column
            ));
        }
        html.push_str("\n            </tr>\n          </thead>\n          <tbody id=\"tbody_soc_memory_throughput\">\n          </tbody>\n        </table>\n");
        html
    }

    fn jsfunc(&self) -> String {
        let mut js = String::from(r##"
      function tbody_SocMemoryThroughput(tbody) {
        class Node {
          constructor(label, metrics, children) {
            this.label = label;
            this.metrics = metrics;
            this.children = children;
            this.bytePct = this.metrics.reduce((acc, metric) => acc + getCounterValue(metric, 'avg.pct_of_peak_sustained_elapsed'), 0);
            this.rowspan = Math.max(1, children.reduce((acc, child) => acc + child.rowspan, 0));
          }
        }
        let topLevelNodes = [
"##);
        js.push_str(&breakdown::to_javascript(&self.nodes, 5));
        js.push_str(r##"
        ];
        function generateTableRecursive(trow_init, nodes) {
          let trow = trow_init;
          for (let ii = 0; ii < nodes.length; ++ii) {
            if (ii > 0) {
              trow = document.createElement('tr');
              tbody.appendChild(trow);
            }
            let node = nodes[ii];
  
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"la subhdr"}, node.label, passThrough=true);
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"ra"}, format_pct(node.bytePct));
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"la comp"}, toBarChart(node.bytePct, '█'));

            generateTableRecursive(trow, node.children);
          }
        }
        let trowFirst = document.createElement('tr');
        tbody.appendChild(trowFirst);
        generateTableRecursive(trowFirst, topLevelNodes);
      }
"##);
        js
    }

    fn jscall(&self) -> String {
        "tbody_SocMemoryThroughput(document.getElementById('tbody_soc_memory_throughput'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: breakdown::required_metrics(&self.nodes, None),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"SoC Memory Throughput:
Observe the bandwidth utilization per SoC memory source and operation.
"##.to_string()
    }
}

/// `(stage, LSU bar alignment, LSU pct, LSU tooltip, TEX pct, TEX tooltip)`
const L1TEX_PIPE_STAGES: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("SM Instructions", "la", "getCounterPct('sm__inst_executed_pipe_lsu')", "getCounterPctStr('sm__inst_executed_pipe_lsu')", "getCounterPct('sm__inst_executed_pipe_tex')", "getCounterPctStr('sm__inst_executed_pipe_tex')"),
    ("MIO Parameter Queue", "ra", "getCounterPct('sm__mio_pq_read_cycles_active_pipe_lsu')", "getCounterPctStr('sm__mio_pq_read_cycles_active_pipe_lsu')", "getCounterPct('sm__mio_pq_read_cycles_active_pipe_tex')", "getCounterPctStr('sm__mio_pq_read_cycles_active_pipe_tex')"),
    ("Input Cycles", "la", "getCounterPct('l1tex__lsuin_requests')", "getCounterPctStr('l1tex__lsuin_requests')", "getCounterPct('l1tex__texin_sm2tex_req_cycles_active')", "getCounterPctStr('l1tex__texin_sm2tex_req_cycles_active')"),
    ("M-Stage to XBAR", "ra", "getThroughputPct('l1tex__m_l1tex2xbar_throughput_pipe_lsu')", "getThroughputPctStr('l1tex__m_l1tex2xbar_throughput_pipe_lsu')", "getThroughputPct('l1tex__m_l1tex2xbar_throughput_pipe_tex')", "getThroughputPctStr('l1tex__m_l1tex2xbar_throughput_pipe_tex')"),
    ("XBAR to M-Stage", "ra", "getThroughputPct('l1tex__m_xbar2l1tex_throughput_pipe_lsu')", "getThroughputPctStr('l1tex__m_xbar2l1tex_throughput_pipe_lsu')", "getThroughputPct('l1tex__m_xbar2l1tex_throughput_pipe_tex')", "getThroughputPctStr('l1tex__m_xbar2l1tex_throughput_pipe_tex')"),
    ("Data Cycles", "la", "getCounterPct('l1tex__data_pipe_lsu_wavefronts')", "getCounterPctStr('l1tex__data_pipe_lsu_wavefronts')", "getCounterPct('l1tex__data_pipe_tex_wavefronts')", "getCounterPctStr('l1tex__data_pipe_tex_wavefronts')"),
    ("TEX Filter Cycles", "la", "new NotApplicable", "''", "getCounterPct('l1tex__data_pipe_tex_wavefronts')", "getCounterPctStr('l1tex__data_pipe_tex_wavefronts')"),
    ("Writeback Cycles", "la", "getCounterPct('l1tex__lsu_writeback_active')", "getCounterPctStr('l1tex__lsu_writeback_active')", "getCounterPct('l1tex__tex_writeback_active')", "getCounterPctStr('l1tex__tex_writeback_active')"),
];

/// Utilization of each L1TEX pipeline stage, LSU and TEX side by side.
#[derive(Debug, Clone, Default)]
pub struct L1TexThroughputs;

impl TableGenerator for L1TexThroughputs {
    fn name(&self) -> String {
        "L1TexThroughputs".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="L1TEX-Throughput">
          <thead>
            <tr>
              <th class="la tablename" colspan="1">L1TEX Throughput</th>
              <th class="ca" colspan="2">LSU %-of-Peak</th>
              <th class="ca" colspan="2">TEX %-of-Peak</th>
            </tr>
            <tr>
              <th class="la">Pipe Stage</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">%</th>
            </tr>
          </thead>
          <tbody id="tbody_l1tex_throughput">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = L1TEX_PIPE_STAGES.iter().map(
            |(name, align, lsu_pct, lsu_tooltip, tex_pct, tex_tooltip)| {
                format!(
                    "        rows.push(new Row({:<30}, {:<10}, {:<60}, {:<80}, {:<60}, {:<60}));",
                    quote(name),
                    quote(align),
                    lsu_pct,
                    lsu_tooltip,
                    tex_pct,
                    tex_tooltip
                )
            },
        );
        js_function(
            r##"
      function tbody_L1TexThroughput(tbody) {
        class Row {
          constructor(name, lsuChartAlign, lsuPct, lsuPctTooltip, texPct, texPctTooltip) {
            this.name = name;
            this.lsuChartAlign = lsuChartAlign;
            this.lsuPct = lsuPct;
            this.lsuPctTooltip = lsuPctTooltip;
            this.texChartAlign = "la";
            this.texPct = texPct;
            this.texPctTooltip = texPctTooltip;
          }
        }
        let rows = [];
"##,
            rows,
            r##"
        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.name);
          addCellSimple(trow, "ra", format_pct(row.lsuPct), passThrough=false, formatMetricFormula(row.lsuPctTooltip));
          addCellSimple(trow, row.lsuChartAlign + " comp", toBarChart(row.lsuPct, '█'), passThrough=false, formatMetricFormula(row.lsuPctTooltip));
          addCellSimple(trow, row.texChartAlign + " comp", toBarChart(row.texPct, '█'), passThrough=false, formatMetricFormula(row.texPctTooltip));
          addCellSimple(trow, "ra", format_pct(row.texPct), passThrough=false, formatMetricFormula(row.texPctTooltip));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_L1TexThroughput(document.getElementById('tbody_l1tex_throughput'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: strings(&[
                "l1tex__data_pipe_lsu_wavefronts",
                "l1tex__data_pipe_tex_wavefronts",
                "l1tex__lsu_writeback_active",
                "l1tex__lsuin_requests",
                "l1tex__tex_writeback_active",
                "l1tex__texin_sm2tex_req_cycles_active",
                "sm__inst_executed_pipe_lsu",
                "sm__inst_executed_pipe_tex",
                "sm__mio_pq_read_cycles_active_pipe_lsu",
                "sm__mio_pq_read_cycles_active_pipe_tex",
            ]),
            ratios: Vec::new(),
            throughputs: strings(&[
                "l1tex__m_l1tex2xbar_throughput_pipe_lsu",
                "l1tex__m_l1tex2xbar_throughput_pipe_tex",
                "l1tex__m_xbar2l1tex_throughput_pipe_lsu",
                "l1tex__m_xbar2l1tex_throughput_pipe_tex",
            ]),
        }
    }

    fn workflow(&self) -> String {
        r##"L1TEX Throughput:
Determine which stage of the L1TEX Cache's pipeline is limiting performance.
The LSU and TEX pipes execute in parallel.  LSU handles local, global, surface stores, and shared memory; and miscellaneous instructions.  TEX handles texture and surface reads.
"##.to_string()
    }
}

/// L1TEX sector traffic by pipe, memory space and operation.
#[derive(Debug, Clone)]
pub struct L1TexTrafficBreakdown {
    pub nodes: Vec<Node>,
}

impl Default for L1TexTrafficBreakdown {
    fn default() -> Self {
        let leaf = Node::leaf;
        let nodes = vec![
            Node::new("LSU by Mem", &["l1tex__average_t_sector_pipe_lsu"], vec![
                Node::new("Global", &[], vec![
                    leaf("Global Load", "l1tex__average_t_sector_pipe_lsu_mem_global_op_ld"),
                    leaf("Global Store", "l1tex__average_t_sector_pipe_lsu_mem_global_op_st"),
                    leaf("Global Atom", "l1tex__average_t_sector_pipe_lsu_mem_global_op_atom"),
                    leaf("Global Red", "l1tex__average_t_sector_pipe_lsu_mem_global_op_red"),
                ]),
                Node::new("Local", &[], vec![
                    leaf("Local Load", "l1tex__average_t_sector_pipe_lsu_mem_local_op_ld"),
                    leaf("Local Store", "l1tex__average_t_sector_pipe_lsu_mem_local_op_st"),
                ]),
            ]),
            Node::new("TEX by Mem", &["l1tex__average_t_sector_pipe_tex"], vec![
                Node::new("Texture", &["l1tex__average_t_sector_pipe_tex_mem_texture"], vec![
                    leaf("Texture Fetch", "l1tex__average_t_sector_pipe_tex_mem_texture_op_tex"),
                    leaf("Texture Load", "l1tex__average_t_sector_pipe_tex_mem_texture_op_ld"),
                ]),
                Node::new("Surface", &["l1tex__average_t_sector_pipe_tex_mem_surface"], vec![
                    leaf("Surface Load", "l1tex__average_t_sector_pipe_tex_mem_surface_op_ld"),
                    leaf("Surface Store", "l1tex__average_t_sector_pipe_tex_mem_surface_op_st"),
                    leaf("Surface Atom", "l1tex__average_t_sector_pipe_tex_mem_surface_op_atom"),
                    leaf("Surface Red", "l1tex__average_t_sector_pipe_tex_mem_surface_op_red"),
                ]),
            ]),
            Node::new("TEX by Format", &["l1tex__average_t_sector_pipe_tex"], vec![
                leaf("1D Buffer", "l1tex__average_t_sector_pipe_tex_format_1d_buffer"),
                leaf("1D or 2D Tex/Surf", "l1tex__average_t_sector_pipe_tex_format_1d_2d"),
                leaf("2D Tex/Surf, no Mipmaps", "l1tex__average_t_sector_pipe_tex_format_2d_nomipmap"),
                leaf("3D Tex/Surf", "l1tex__average_t_sector_pipe_tex_format_3d"),
                leaf("Cubemap", "l1tex__average_t_sector_pipe_tex_format_cubemap"),
            ]),
        ];
        L1TexTrafficBreakdown { nodes }
    }
}

impl TableGenerator for L1TexTrafficBreakdown {
    fn name(&self) -> String {
        "L1TexTrafficBreakdown".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="L1TEX-Sector-Traffic">
          <thead>
            <tr>
              <th colspan="4" class="la tablename">L1TEX Sector Traffic</th>
              <th colspan="4" class="ca">Per-Memory Space %-of-Total</th>
              <th colspan="4" class="ca">Per-Op %-of-total</th>
            </tr>
            <tr>
              <th class="la">Pipe Breakdown</th>
              <th class="ra">Hit-Rate%</th>
              <th class="la">%-of-Sectors</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="la">Memory Space</th>
              <th class="ra">Hit-Rate%</th>
              <th class="la">%-of-Sectors</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="la">Op</th>
              <th class="ra">Hit-Rate%</th>
              <th class="la">%-of-Sectors</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_l1tex_traffic">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let mut js = String::from(r##"
      function tbody_L1TexTrafficBreakdown(tbody) {
        class Node {
          constructor(label, ratioAddends, children) {
            this.label = label;
            this.ratioAddends = ratioAddends;
            this.children = children;
            this.rowspan = Math.max(1, children.reduce((acc, child) => acc + child.rowspan, 0));
          }
        }
        let topLevelNodes = [
"##);
        js.push_str(&breakdown::to_javascript(&self.nodes, 5));
        js.push_str(r##"
        ];
        function generateTableRecursive(trow_init, nodes) {
          let trow = trow_init;
          for (let ii = 0; ii < nodes.length; ++ii) {
            if (ii > 0) {
              trow = document.createElement('tr');
              tbody.appendChild(trow);
            }
            let node = nodes[ii];
            let sectorPct            = node.ratioAddends.reduce((acc, ratioAddend) => acc + getRatioPct(ratioAddend), 0);
            let sectorPctTooltip     = node.ratioAddends.map(ratioAddend => ratioAddend + '.pct').join(' + ');
            let sectorHitPct         = node.ratioAddends.reduce((acc, ratioAddend) => acc + getRatioPct(ratioAddend + '_lookup_hit'), 0);
            let sectorHitPctTooltip  = node.ratioAddends.map(ratioAddend => ratioAddend + '_lookup_hit.pct').join(' + ');
            if (node.ratioAddends.length > 1) {{
              sectorPctTooltip = '(' + sectorPctTooltip + ')';
              sectorHitPctTooltip = '(' + sectorHitPctTooltip + ')';
            }}

            let hitRate = safeDiv(sectorHitPct, sectorPct) * 100;
            let hitRateTooltip = sectorHitPctTooltip + " / " + sectorPctTooltip + " * 100";

            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"la subhdr"}, node.label, passThrough=true);
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"ra", 'title':formatMetricFormula(hitRateTooltip)}, format_pct(hitRate));
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"ra", 'title':formatMetricFormula(sectorPctTooltip)}, format_pct(sectorPct));
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"la comp", 'title':formatMetricFormula(sectorPctTooltip)}, toBarChart(sectorPct, '█'));

            generateTableRecursive(trow, node.children);
          }
        }
        let trowFirst = document.createElement('tr');
        tbody.appendChild(trowFirst);
        generateTableRecursive(trowFirst, topLevelNodes);
      }
"##);
        js
    }

    fn jscall(&self) -> String {
        "tbody_L1TexTrafficBreakdown(document.getElementById('tbody_l1tex_traffic'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            ratios: breakdown::required_metrics(&self.nodes, Some(LOOKUP_HIT_SUFFIX)),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"L1TEX Sector Traffic:
Determine which shader memory spaces and operations are incurring the most L1TEX sector bandwidth.
Hit-rates are calculated per pipe/memory/op combination (both numerator and denominator are specific to the pipe/memory/op).  Low hit-rates are only a problem if the corresponding %-of-Sectors is high.
Texture traffic is decomposed in two ways: by memory, and by surface format.
All %-of-Sectors values are relative to the total sectors processed by the L1TEX cache.  The sum of "LSU by Mem" and "TEX by Mem" will add up to 100% in each column.
"##.to_string()
    }
}

const L2_GENERIC_WORKFLOW: &str = r##"L2 Sector Traffic:
Determine which units and operations are incurring the most L2 bandwidth, and which destinations are being addressed.
All %-of-Sectors values are relative to the total sectors processed by the L2 cache.
The term "sector" refers to a 32 byte portion of a cacheline.
"##;

/**
 * L2TrafficBreakdown
 * One L2 sector traffic table. Each chip supplies the tree and the column
 * headers; the first table of a report also carries the generic workflow.
 *
 * `l2_type` prefixes the table title (`Vid`, `Sys`) on chips with more
 * than one L2.
 */
#[derive(Debug, Clone)]
pub struct L2TrafficBreakdown {
    pub name: String,
    pub table_id: String,
    /// `(group header, column header)` per tree level.
    pub column_names: Vec<(String, String)>,
    pub nodes: Vec<Node>,
    pub l2_type: String,
    pub show_generic_workflow: bool,
    /// Appended to the workflow whether or not the generic part is shown.
    pub extra_workflow: String,
}

impl L2TrafficBreakdown {
    pub fn new(name: &str, table_id: &str, column_names: &[(&str, &str)], nodes: Vec<Node>) -> Self {
        L2TrafficBreakdown {
            name: name.to_string(),
            table_id: table_id.to_string(),
            column_names: column_names
                .iter()
                .map(|(group, column)| (group.to_string(), column.to_string()))
                .collect(),
            nodes,
            l2_type: String::new(),
            show_generic_workflow: false,
            extra_workflow: String::new(),
        }
    }

    pub fn l2_type(mut self, l2_type: &str) -> Self {
        self.l2_type = l2_type.to_string();
        self
    }

    pub fn show_generic_workflow(mut self, show: bool) -> Self {
        self.show_generic_workflow = show;
        self
    }

    pub fn extra_workflow(mut self, text: &str) -> Self {
        self.extra_workflow = text.to_string();
        self
    }

    fn tbody_id(&self) -> String {
        format!("tbody_{}", self.table_id.replace('-', "_").to_lowercase())
    }
}

impl TableGenerator for L2TrafficBreakdown {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn html(&self) -> String {
        let mut html = format!(
            "\n        <table style=\"display: inline-block; border: 1px solid;\" id=\"{}\">\n          <thead>\n            <tr>",
            self.table_id
        );
        for (index, (group, _)) in self.column_names.iter().enumerate() {
            if index == 0 {
                html.push_str(&format!(
                    "\n              <th colspan=\"2\" class=\"la tablename\">{}L2 Sector Traffic by {}</th>\n              <th colspan=\"2\" class=\"ca\">%-of-Sectors</th>",
                    self.l2_type, group
                ));
            } else {
                html.push_str(&format!(
                    "\n              <th colspan=\"2\" class=\"ca\">{}</th>\n              <th colspan=\"2\" class=\"ca\">%-of-Sectors</th>\n",
                    group
                ));
            }
        }
        html.push_str("\n            </tr>\n            <tr>");
        for (_, column) in &self.column_names {
            html.push_str(&format!(
                "\n              <th class=\"la\">{}</th>\n              <th class=\"ra\">Hit-Rate%</th>\n              <th class=\"ca\">%</th>\n              <th class=\"base\">││││▌││││▌││││▌││││▌</th>",
                column
            ));
        }
        html.push_str(&format!(
            "\n            </tr>\n          </thead>\n          <tbody id=\"{}\">\n          </tbody>\n        </table>\n",
            self.tbody_id()
        ));
        html
    }

    fn jsfunc(&self) -> String {
        let mut js = format!(r##"
      function tbody_{name}(tbody) {{
        class Node {{
          constructor(label, ratioAddends, children) {{
            this.label = label;
            this.ratioAddends = ratioAddends;
            this.children = children;
            this.sectorPct            = this.ratioAddends.reduce((acc, ratioAddend) => acc + getRatioPct(ratioAddend), 0);
            this.sectorPctTooltip     = this.ratioAddends.map(ratioAddend => ratioAddend + '.pct').join(' + ');
            this.sectorHitPct         = this.ratioAddends.reduce((acc, ratioAddend) => acc + getRatioPct(ratioAddend + '_lookup_hit'), 0);
            this.sectorHitPctTooltip  = this.ratioAddends.map(ratioAddend => ratioAddend + '_lookup_hit.pct').join(' + ');
            if (this.ratioAddends.length > 1) {{
              this.sectorPctTooltip = '(' + this.sectorPctTooltip + ')';
              this.sectorHitPctTooltip = '(' + this.sectorHitPctTooltip + ')';
            }}
            this.rowspan = Math.max(1, (this.sectorPct == 0.0 ? 1 : children.reduce((acc, child) => acc + child.rowspan, 0)));
            this.depth = children.reduce((acc, child) => Math.max(acc, child.depth), 0) + 1;
          }}
        }}
        let topLevelNodes = [
"##, name = self.name);
        js.push_str(&breakdown::to_javascript(&self.nodes, 5));
        js.push_str(r##"
        ];
        function generateTableRecursive(trow_init, nodes) {
          let trow = trow_init;
          for (let ii = 0; ii < nodes.length; ++ii) {
            if (ii > 0) {
              trow = document.createElement('tr');
              tbody.appendChild(trow);
            }
            let node = nodes[ii];
            let hitRate = safeDiv(node.sectorHitPct, node.sectorPct) * 100;
            let hitRateTooltip = node.sectorHitPctTooltip + " / " + node.sectorPctTooltip + " * 100";
  
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"la subhdr"}, node.label, passThrough=true);
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"ra", 'title':formatMetricFormula(hitRateTooltip)}, format_pct(hitRate));
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"ra", 'title':formatMetricFormula(node.sectorPctTooltip)}, format_pct(node.sectorPct));
            addCellAttr(trow, {'rowspan':node.rowspan, 'class':"la comp", 'title':formatMetricFormula(node.sectorPctTooltip)}, toBarChart(node.sectorPct, '█'));

            if (node.sectorPct > 0.0) {
              generateTableRecursive(trow, node.children);
            }
            else {
              for (let jj = 1; jj < node.depth; ++jj) {
                addCellAttr(trow, {'class':"la subhdr"}, '');
                addCellAttr(trow, {'class':"ra"}, '');
                addCellAttr(trow, {'class':"ra"}, '');
                addCellAttr(trow, {'class':"la comp"}, '');
              }
            }
          }
        }
        let trowFirst = document.createElement('tr');
        tbody.appendChild(trowFirst);
        generateTableRecursive(trowFirst, topLevelNodes);
      }
"##);
        js
    }

    fn jscall(&self) -> String {
        format!("tbody_{}(document.getElementById('{}'));", self.name, self.tbody_id())
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            ratios: breakdown::required_metrics(&self.nodes, Some(LOOKUP_HIT_SUFFIX)),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        let mut workflow = String::new();
        if self.show_generic_workflow {
            workflow.push_str(L2_GENERIC_WORKFLOW);
        }
        workflow.push_str(&self.extra_workflow);
        workflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_memory_placeholder_counter() {
        let t = MainMemory.make_data_table();
        assert!(t.jsfunc.contains(&format!("rows.push(new Row({:<30}, {:<30}, ", "'DRAM Total'", "'NotAvailable'")));
        assert_eq!(t.required_counters, vec!["pcie__read_bytes", "pcie__write_bytes"]);
        assert_eq!(t.required_throughputs.len(), 3);
    }

    #[test]
    fn test_l1tex_traffic_ratios_include_hits() {
        let t = L1TexTrafficBreakdown::default().make_data_table();
        assert_eq!(t.required_ratios[0], "l1tex__average_t_sector_pipe_lsu");
        assert_eq!(t.required_ratios[1], "l1tex__average_t_sector_pipe_lsu_lookup_hit");
        assert!(t.required_ratios.iter().any(|r| r == "l1tex__average_t_sector_pipe_tex_format_3d_lookup_hit"));
        assert!(t.jsfunc.contains("          new Node('LSU by Mem', ['l1tex__average_t_sector_pipe_lsu', ], [\n"));
        assert!(t.jsfunc.contains("function tbody_L1TexTrafficBreakdown(tbody) {"));
    }

    #[test]
    fn test_soc_memory_counters_have_no_hit_suffix() {
        let t = SocMemoryTrafficBreakdown::default().make_data_table();
        assert_eq!(
            t.required_counters,
            vec![
                "mcc__dram_throughput_srcnode_cpu_op_read",
                "mcc__dram_throughput_srcnode_cpu_op_write",
                "mcc__dram_throughput_srcnode_cpu_op_read",
                "mcc__dram_throughput_srcnode_cpu_op_write",
                "mcc__dram_throughput_srcnode_gpu_op_read",
                "mcc__dram_throughput_srcnode_gpu_op_write",
                "mcc__dram_throughput_srcnode_gpu_op_read",
                "mcc__dram_throughput_srcnode_gpu_op_write",
                "mcc__dram_throughput_srcnode_dbb_op_read",
                "mcc__dram_throughput_srcnode_dbb_op_write",
                "mcc__dram_throughput_srcnode_dbb_op_read",
                "mcc__dram_throughput_srcnode_dbb_op_write",
            ]
        );
        assert!(t.required_ratios.is_empty());
        assert!(t.required_throughputs.is_empty());
        assert!(t.workflow.starts_with("SoC Memory Throughput:\n"));
    }

    #[test]
    fn test_soc_memory_table_layout() {
        let t = SocMemoryTrafficBreakdown::default().make_data_table();
        assert_eq!(t.name, "SocMemoryThroughput");
        assert!(t.html.contains("id=\"Soc-Memory-Throughput\""));
        assert!(t.html.contains("<th colspan=\"1\" class=\"la tablename\">Soc Memory Throughput</th>"));
        assert!(t.html.contains("<th colspan=\"1\" class=\"ca\">Op</th>\n              <th colspan=\"2\" class=\"ca\">%-of-Peak</th>\n"));
        assert_eq!(t.html.matches("<th class=\"ca\">%</th>").count(), 2);
        assert!(t.jsfunc.contains(
            "        let topLevelNodes = [\n          new Node('CPU', ['mcc__dram_throughput_srcnode_cpu_op_read', 'mcc__dram_throughput_srcnode_cpu_op_write', ], [\n            new Node('Read', ['mcc__dram_throughput_srcnode_cpu_op_read', ], []),\n"
        ));
        assert!(t.jsfunc.contains("          new Node('Other IPs', ["));
        assert!(t.jsfunc.contains("            let node = nodes[ii];\n  \n"));
        assert_eq!(t.jscall, "tbody_SocMemoryThroughput(document.getElementById('tbody_soc_memory_throughput'));");
    }

    fn short_breakdown() -> L2TrafficBreakdown {
        L2TrafficBreakdown::new(
            "VidL2SectorTrafficBreakdownByMemoryApertureShort",
            "VidL2-Sector-Traffic-By-Memory-Aperture-Short",
            &[("Memory Aperture", "To Memory"), ("Op", "Op")],
            vec![Node::new("DRAM", &[], vec![
                Node::leaf("Reads", "lts__average_t_sector_op_read"),
                Node::leaf("Writes", "lts__average_t_sector_op_write"),
            ])],
        )
        .l2_type("Vid")
    }

    #[test]
    fn test_l2_breakdown_html_and_call() {
        let t = short_breakdown().make_data_table();
        assert!(t.html.contains("id=\"VidL2-Sector-Traffic-By-Memory-Aperture-Short\""));
        assert!(t.html.contains(">VidL2 Sector Traffic by Memory Aperture</th>"));
        assert!(t.html.contains("<th colspan=\"2\" class=\"ca\">Op</th>"));
        assert!(t.html.contains("<tbody id=\"tbody_vidl2_sector_traffic_by_memory_aperture_short\">"));
        assert_eq!(
            t.jscall,
            "tbody_VidL2SectorTrafficBreakdownByMemoryApertureShort(document.getElementById('tbody_vidl2_sector_traffic_by_memory_aperture_short'));"
        );
        assert!(t.jsfunc.contains("function tbody_VidL2SectorTrafficBreakdownByMemoryApertureShort(tbody) {\n"));
        assert!(t.jsfunc.contains("new Node('DRAM', ['lts__average_t_sector_op_read', 'lts__average_t_sector_op_write', ], ["));
    }

    #[test]
    fn test_l2_breakdown_workflow() {
        assert_eq!(short_breakdown().workflow(), "");
        let gen = short_breakdown().show_generic_workflow(true).extra_workflow(" More below.");
        let workflow = gen.workflow();
        assert!(workflow.starts_with("L2 Sector Traffic:\n"));
        assert!(workflow.ends_with(" More below."));
    }
}
