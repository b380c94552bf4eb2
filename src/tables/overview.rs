use crate::tables::{js_function, quote, TableGenerator};
use crate::types::{strings, RequiredMetrics};

const ROWS_HEAD: &str = "\n        let rows = [\n";

/// `(category, name, value, value tooltip, pct, pct tooltip, description)`
const TOP_LEVEL_STATS: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("3D+Compute", "GR Engine Active", "getCounterValue('gr__cycles_active', 'avg')", "gr__cycles_active.avg", "getCounterPct('gr__cycles_active')", "getCounterPctStr('gr__cycles_active')", "The GR Engine executes all 3D and Compute workloads."),
    ("3D", "Hardware Draw Calls", "getCounterValue('fe__draw_count', 'sum')", "fe__draw_count.sum", "new NotApplicable", "''", "HW draw count may exceed API draw calls, and may include clears."),
    ("Compute", "Hardware Compute Dispatches", "getCounterValue('gr__dispatch_count', 'sum')", "gr__dispatch_count.sum", "new NotApplicable", "''", "HW dispatch count may exceed API dispatches."),
    ("Stalls", "Wait For Idle Commands", "getCounterValue('fe__output_ops_type_bundle_cmd_go_idle', 'sum')", "fe__output_ops_type_bundle_cmd_go_idle.sum", "new NotApplicable", "''", "Wait-for-idle commands stall the GPU Front End between commands."),
    ("Stalls", "Pixel Shader Barriers", "getCounterValue('fe__pixel_shader_barriers', 'sum')", "fe__pixel_shader_barriers.sum", "new NotApplicable", "''", "Pixel shader barriers stall the PROP unit between draw calls."),
    ("Shader", "SM Active Cycles", "getCounterValue('sm__cycles_active', 'avg')", "sm__cycles_active.avg", "getCounterPct('sm__cycles_active')", "getCounterPctStr('sm__cycles_active')", "Indicates when shaders were running."),
    ("Shader", "SM Active Cycles - 3D", "getCounterValue('tpc__cycles_active_shader_3d', 'avg')", "tpc__cycles_active_shader_3d.avg", "getCounterPct('tpc__cycles_active_shader_3d')", "getCounterPctStr('tpc__cycles_active_shader_3d')", "Indicates when 3D shaders were running.  May overlap with compute."),
    ("Shader", "SM Active Cycles - Compute", "getCounterValue('sm__cycles_active_shader_cs', 'avg')", "sm__cycles_active_shader_cs.avg", "getCounterPct('sm__cycles_active_shader_cs')", "getCounterPctStr('sm__cycles_active_shader_cs')", "Indicates when compute shaders were running.  May overlap with 3D."),
    ("Shader", "SM Instruction Issue Cycles", "getCounterValue('sm__issue_active', 'avg')", "sm__issue_active.avg", "getCounterPct('sm__issue_active')", "getCounterPctStr('sm__issue_active')", "Indicates how often an SM issued instructions, on average."),
    ("Shader", "Warp Occupancy (per SM)", "getCounterValue('sm__warps_active', 'avg.per_cycle_elapsed')", "sm__warps_active.avg.per_cycle_elapsed", "getCounterPct('sm__warps_active')", "getCounterPctStr('sm__warps_active')", "Resident warps per SM, on average.  Low occupancy is only a problem when Issue Active% is low."),
];

/// Front-end and SM activity of the range.
#[derive(Debug, Clone, Default)]
pub struct TopLevelStats;

impl TableGenerator for TopLevelStats {
    fn name(&self) -> String {
        "TopLevelStats".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Top-Level-Stats">
          <thead>
            <tr>
              <th colspan="3" class="ca tablename">Top-Level Stats</th>
              <th colspan="2" class="ca">%-of-Peak</th>
              <th colspan="1" class="ca"></th>
            </tr>
            <tr>
              <th class="la">Category</th>
              <th class="la">Name</th>
              <th class="ra">Value</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="la">Description</th>
            </tr>
          </thead>
          <tbody id="tbody_top_level_stats">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let head = format!("{}{}", r##"
      function tbody_TopLevelStats(tbody) {
        class Row {
          constructor(category, name, value, valueTooltip, pct, pctTooltip, description) {
            this.category = category;
            this.name = name;
            this.value = value;
            this.valueTooltip = valueTooltip;
            this.pct = pct;
            this.pctTooltip = pctTooltip;
            this.description = description;
          }
        }
"##, ROWS_HEAD);
        let rows = TOP_LEVEL_STATS.iter().map(
            |(category, name, value, value_tooltip, pct, pct_tooltip, description)| {
                format!(
                    "          new Row({:<20}, {:<40}, {:<80}, {:<80}, {:<80}, {:<60}, \"{}\"),",
                    quote(category),
                    quote(name),
                    value,
                    quote(value_tooltip),
                    pct,
                    pct_tooltip,
                    description
                )
            },
        );
        js_function(&head, rows, r##"
        ];

        for (let rowIdx = 0; rowIdx < rows.length; ++rowIdx) {
          const row = rows[rowIdx];
          var trow = document.createElement('tr');
          const rowspan = calcRowSpan(rows, rowIdx, (row) => row.category);
          if (rowspan) {
            addCellAttr(trow, {'rowspan':rowspan, 'class':"la subhdr"}, row.category);
          }
          addCellSimple(trow, "la subhdr", row.name);
          addCellSimple(trow, "ra", format_avg(row.value), passThrough = false, formatMetricFormula(row.valueTooltip));
          addCellSimple(trow, "ra", format_pct(row.pct), passThrough = false, formatMetricFormula(row.pctTooltip));
          addCellSimple(trow, "la comp", toBarChart(row.pct, '█'), passThrough = false, formatMetricFormula(row.pctTooltip));
          addCellSimple(trow, "la subhdr", row.description, passThrough=true);
          tbody.appendChild(trow);
        }
      }
"##)
    }

    fn jscall(&self) -> String {
        "tbody_TopLevelStats(document.getElementById('tbody_top_level_stats'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::counters(&[
            "fe__draw_count",
            "fe__output_ops_type_bundle_cmd_go_idle",
            "fe__pixel_shader_barriers",
            "gr__cycles_active",
            "gr__dispatch_count",
            "sm__cycles_active",
            "sm__cycles_active_shader_cs",
            "sm__issue_active",
            "sm__warps_active",
            "tpc__cycles_active_shader_3d",
        ])
    }

    fn workflow(&self) -> String {
        r##"Top-Level Stats:
This table and Top Throughputs provide an overview of the type of workload executed.
If GR Engine Active% is not close to 100%, the range is likely starved by the CPU; use a trace tool to improve that, before returning to low-level GPU profiling.
"##.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ThroughputRow {
    pub category: &'static str,
    /// HTML; usually an anchor to the table with the unit's details.
    pub name: &'static str,
    pub throughput: &'static str,
}

impl ThroughputRow {
    pub const fn new(category: &'static str, name: &'static str, throughput: &'static str) -> Self {
        ThroughputRow { category, name, throughput }
    }
}

/// Unit throughputs, sorted by the client in descending order.
#[derive(Debug, Clone, Default)]
pub struct TopThroughputs {
    pub rows: Vec<ThroughputRow>,
}

impl TopThroughputs {
    pub fn new(rows: Vec<ThroughputRow>) -> Self {
        TopThroughputs { rows }
    }
}

impl TableGenerator for TopThroughputs {
    fn name(&self) -> String {
        "TopThroughputs".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Top-Throughputs">
          <thead>
            <tr>
              <th colspan="2" class="la tablename">Top Throughputs</th>
              <th colspan="2" class="ca">%-of-Peak</th>
            </tr>
            <tr>
              <th class="la">Category</th>
              <th class="la">Throughput Name</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_top_throughputs">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let head = format!(
            "{}{}",
            r##"
      function tbody_TopThroughputs(tbody) {
        class Row {
          constructor(category, name, value, tooltip) {
            this.category = category;
            this.name = name;
            this.value = value;
            this.tooltip = tooltip;
          }
        }
"##,
            "\n        let throughputs = [\n"
        );
        let rows = self.rows.iter().map(|row| {
            format!(
                "          new Row({:<20}, {:<80}, {:<50}, {:<50}),",
                quote(row.category),
                quote(row.name),
                format!("getThroughputPct('{}')", row.throughput),
                format!("getThroughputPctStr('{}')", row.throughput)
            )
        });
        js_function(&head, rows, r##"
        ];
        throughputs.sort((lhsrow, rhsrow) => compareNumbers(rhsrow.value, lhsrow.value)); // sort in descending order

        for (const row of throughputs) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.category);
          addCellSimple(trow, "la subhdr", row.name, passThrough=true, formatMetricFormula(row.tooltip));
          addCellSimple(trow, "ra", format_pct(row.value), passThrough=false, formatMetricFormula(row.tooltip));
          addCellSimple(trow, "la comp", toBarChart(row.value, '█'), passThrough=false, formatMetricFormula(row.tooltip));
          tbody.appendChild(trow);
        }
      }
"##)
    }

    fn jscall(&self) -> String {
        "tbody_TopThroughputs(document.getElementById('tbody_top_throughputs'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        let mut throughputs: Vec<&str> = self.rows.iter().map(|r| r.throughput).collect();
        throughputs.sort_unstable();
        throughputs.dedup();
        RequiredMetrics {
            throughputs: strings(&throughputs),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"Top Throughputs:
Observe the most utilized hardware units, and navigate to their corresponding sections for more details.  The rows are sorted; the first row always has the highest utilization.
If all unit throughputs are less than 60%, check whether the range is starvation-limited (low <a href="#Top-Level-Stats">GR Engine Active%</a>).
If not starvation-limited, conclude that the workload is latency-limited.  Investigate <a href="#L2-Sector-Traffic-By-Memory-Aperture-Short">L2 Sector Traffic</a> and <a href="#SM-Warp-Issue-Stall-Reasons">SM Warp Issue Stall Reasons</a> for additional clues.
"##.to_string()
    }
}

/// `(memory spaces, name, ratio)`
const CACHE_HIT_RATES: &[(&str, &str, &str)] = &[
    ("Indexed Constants", "IDC Cache Hit-Rate %", "idc__request_hit_rate"),
    ("Local, Global, Texture, Surface", "L1TEX Cache Hit-Rate %", "l1tex__t_sector_hit_rate"),
    ("All Cached Memory", "L2 Cache Hit-Rate %", "lts__t_sector_hit_rate"),
];

#[derive(Debug, Clone, Default)]
pub struct CacheHitRates;

impl TableGenerator for CacheHitRates {
    fn name(&self) -> String {
        "CacheHitRates".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Cache-Hit-Rates">
          <thead>
            <tr>
              <th colspan="2" class="ca tablename">Cache Hit-Rates</th>
              <th colspan="2" class="ca">Hit-Rates%</th>
            </tr>
            <tr>
              <th class="la">Memory Spaces</th>
              <th class="la">Name</th>
              <th class="ra">All Ops%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_cache_hit_rates">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let head = format!("{}{}", r##"
      function tbody_CacheHitRates(tbody) {
        class Row {
          constructor(category, name, hitRateTotal, tooltip) {
            this.category = category;
            this.name = name;
            this.hitRateTotal = hitRateTotal;
            this.tooltip = tooltip;
          }
        }
"##, ROWS_HEAD);
        let rows = CACHE_HIT_RATES.iter().map(|(category, name, ratio)| {
            format!(
                "          new Row({:<40}, {:<40}, {:<50}, {:<30}),",
                quote(category),
                quote(name),
                format!("getRatioPct('{ratio}')"),
                format!("getRatioPctStr('{ratio}')")
            )
        });
        js_function(&head, rows, r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.category);
          addCellSimple(trow, "la subhdr", row.name, passThrough=false, formatMetricFormula(row.tooltip));
          addCellSimple(trow, "ra", format_pct(row.hitRateTotal), passThrough=false, formatMetricFormula(row.tooltip));
          addCellSimple(trow, "la comp", toBarChart(row.hitRateTotal, '█'), passThrough=false, formatMetricFormula(row.tooltip));
          tbody.appendChild(trow);
        }
      }
"##)
    }

    fn jscall(&self) -> String {
        "tbody_CacheHitRates(document.getElementById('tbody_cache_hit_rates'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            ratios: CACHE_HIT_RATES.iter().map(|(_, _, r)| r.to_string()).collect(),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"Cache Hit-Rates:
Before considering cache hit-rates to be a problem, first determine if the corresponding unit throughput is high, or if the cache is a source of <a href="#SM-Warp-Issue-Stall-Reasons">warp stall cycles<a>.
"##.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_stats_rows() {
        let t = TopLevelStats.make_data_table();
        assert_eq!(t.jsfunc.matches("          new Row(").count(), TOP_LEVEL_STATS.len());
        assert!(t.jsfunc.contains("\"HW dispatch count may exceed API dispatches.\"),\n"));
        assert!(t.workflow.starts_with("Top-Level Stats:\n"));
        assert_eq!(t.required_counters.len(), 10);
    }

    #[test]
    fn test_top_throughputs_required_sorted_unique() {
        let gen = TopThroughputs::new(vec![
            ThroughputRow::new("Shader", "SM", "sm__throughput"),
            ThroughputRow::new("Memory", "L2", "lts__throughput"),
            ThroughputRow::new("Memory", "L2 again", "lts__throughput"),
        ]);
        let t = gen.make_data_table();
        assert_eq!(t.required_throughputs, vec!["lts__throughput", "sm__throughput"]);
        assert!(t.jsfunc.contains("getThroughputPctStr('sm__throughput')"));
        assert!(t.jsfunc.contains("let throughputs = ["));
    }

    #[test]
    fn test_cache_hit_rates_ratios() {
        let t = CacheHitRates.make_data_table();
        assert!(t.required_counters.is_empty());
        assert_eq!(t.required_ratios.len(), 3);
        assert!(t.html.contains("tbody_cache_hit_rates"));
    }
}
