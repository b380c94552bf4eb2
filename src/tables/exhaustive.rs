use crate::tables::TableGenerator;
use crate::types::{strings, MetricKind, RequiredMetrics};

/// Touches metrics no table displays so that they are still collected and
/// show up in the exhaustive listings.
#[derive(Debug, Clone)]
pub struct AdditionalMetrics {
    pub required: RequiredMetrics,
}

impl Default for AdditionalMetrics {
    fn default() -> Self {
        AdditionalMetrics {
            required: RequiredMetrics {
                counters: strings(&[
                    "idc__requests",
                    "idc__requests_lookup_hit",
                    "idc__requests_lookup_miss",
                    "l1tex__data_pipe_lsu_wavefronts_mem_lg",
                    "l1tex__data_pipe_lsu_wavefronts_mem_shared",
                    "l1tex__data_pipe_lsu_wavefronts_mem_surface",
                    "l1tex__data_pipe_tex_wavefronts_mem_surface",
                    "l1tex__data_pipe_tex_wavefronts_mem_texture",
                    "l1tex__lsu_writeback_active",
                    "l1tex__lsuin_requests",
                    "l1tex__tex_writeback_active",
                    "l1tex__texin_cycles_stalled_on_tsl1_miss",
                    "l1tex__texin_requests",
                    "l1tex__texin_sm2tex_req_cycles_active",
                    "sm__mio_pq_read_cycles_active",
                    "sm__mio_pq_write_cycles_active",
                    "sm__mio2rf_writeback_active",
                    "sm__ps_quads_launched",
                    "smsp__thread_inst_executed",
                    "smsp__thread_inst_executed_pred_off",
                    "smsp__thread_inst_executed_pred_on",
                    "smsp__warps_eligible",
                ]),
                ratios: strings(&["smsp__amortized_warp_latency"]),
                throughputs: strings(&[
                    "l1tex__m_l1tex2xbar_throughput",
                    "l1tex__m_xbar2l1tex_throughput",
                ]),
            },
        }
    }
}

impl TableGenerator for AdditionalMetrics {
    fn name(&self) -> String {
        "AdditionalMetrics".to_string()
    }

    fn html(&self) -> String {
        String::new()
    }

    fn jsfunc(&self) -> String {
        let mut js = String::from("\n      function AdditionalMetrics() {\n");
        for counter in &self.required.counters {
            js.push_str(&format!("        getCounterPct(\"{}\");\n", counter));
        }
        for ratio in &self.required.ratios {
            js.push_str(&format!("        getRatioPct(\"{}\");\n", ratio));
        }
        for throughput in &self.required.throughputs {
            js.push_str(&format!("        getThroughputPct(\"{}\");\n", throughput));
        }
        js.push_str("\n      }\n");
        js
    }

    fn jscall(&self) -> String {
        "AdditionalMetrics();".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        self.required.clone()
    }
}

/// Lists every metric of one kind present in the payload.
#[derive(Debug, Clone, Copy)]
pub struct AllMetrics {
    pub kind: MetricKind,
}

impl AllMetrics {
    pub fn new(kind: MetricKind) -> Self {
        AllMetrics { kind }
    }
}

impl TableGenerator for AllMetrics {
    fn name(&self) -> String {
        format!("All{}", self.kind.plural())
    }

    fn html(&self) -> String {
        match self.kind {
            MetricKind::Counter => ALL_COUNTERS_HTML,
            MetricKind::Ratio => ALL_RATIOS_HTML,
            MetricKind::Throughput => ALL_THROUGHPUTS_HTML,
        }
        .to_string()
    }

    fn jsfunc(&self) -> String {
        match self.kind {
            MetricKind::Counter => ALL_COUNTERS_JS,
            MetricKind::Ratio => ALL_RATIOS_JS,
            MetricKind::Throughput => ALL_THROUGHPUTS_JS,
        }
        .to_string()
    }

    fn jscall(&self) -> String {
        let plural = self.kind.plural();
        format!(
            "tbody_All{plural}(document.getElementById('tbody_all_{}'));",
            plural.to_lowercase()
        )
    }

    // Renders whatever was collected, so it declares nothing
    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::default()
    }
}

/// Debug table listing the metrics another table actually referenced.
#[derive(Debug, Clone)]
pub struct RequiredMetricsTable {
    pub kind: MetricKind,
    pub table_name: String,
}

impl RequiredMetricsTable {
    pub fn new(kind: MetricKind, table_name: &str) -> Self {
        RequiredMetricsTable {
            kind,
            table_name: table_name.to_string(),
        }
    }

    fn tbody_id(&self) -> String {
        format!("tbody_required_{}_{}", self.kind.plural().to_lowercase(), self.table_name)
    }
}

impl TableGenerator for RequiredMetricsTable {
    fn name(&self) -> String {
        format!("Required{}_{}", self.kind.plural(), self.table_name)
    }

    fn html(&self) -> String {
        format!(
            r##"
        <table style="display: inline-block; border: 1px solid;">
          <thead>
            <tr>
              <th class="la">{}: Required {}</th>
            </tr>
          </thead>
          <tbody id="{}">
          </tbody>
        </table>
"##,
            self.table_name,
            self.kind.plural(),
            self.tbody_id()
        )
    }

    fn jsfunc(&self) -> String {
        String::new()
    }

    fn jscall(&self) -> String {
        format!(
            "tbody_Required{}(document.getElementById('{}'));",
            self.kind.plural(),
            self.tbody_id()
        )
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::default()
    }
}

static ALL_COUNTERS_HTML: &str = r##"
        <table style="display: inline-block; border: 1px solid;" id="All-Counters">
          <thead>
            <tr>
              <th colspan="3" class="la tablename">All Counters</th>
              <th colspan="3" class="ca">Per Unit Instance (avg)</th>
              <th colspan="2" class="ca">Total (sum)</th>
              <th rowspan="2" class="ca"><a href="https://en.wikipedia.org/wiki/Dimensional_analysis" target="_blank">Dimensional Units</a></th>
            </tr>
            <tr>
              <th class="la">Counter Name</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">value</th>
              <th class="ra">per-cycle</th>
              <th class="ra">peak per-cycle</th>
              <th class="ra">value</th>
              <th class="ra">per-second</th>
            </tr>
          </thead>
          <tbody id="tbody_all_counters">
          </tbody>
        </table>
"##;

static ALL_COUNTERS_JS: &str = r##"
      function tbody_AllCounters(tbody) {
        let counterNames = [];
        for (const counter in g_counters) {
          counterNames.push(counter);
        }
        counterNames.sort();

        for (const counter of counterNames) {
          const sum = getCounterValue(counter, 'sum');
          const sumStr = counter + '.sum';
          const sps = getCounterValue(counter, 'sum.per_second');
          const spsStr = counter + '.sum.per_second';
          const avg = getCounterValue(counter, 'avg');
          const avgStr = counter + '.avg';
          const pct = getCounterValue(counter, 'avg.pct_of_peak_sustained_elapsed');
          const pctStr = counter + '.avg.pct_of_peak_sustained_elapsed';
          const apc = getCounterValue(counter, 'avg.per_cycle_elapsed');
          const apcStr = counter + '.avg.per_cycle_elapsed';
          const aps = getCounterValue(counter, 'avg.peak_sustained');
          const apsStr = counter + '.avg.peak_sustained';
          const dim_units = getCounterDimUnits(counter);

          const submetrics = g_counters[counter];
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", counter);
          addCellAttr(trow, { "class": "ra",      "id": pctStr, "title": formatMetricFormula(pctStr) }, format_pct(pct));
          addCellAttr(trow, { "class": "la comp", "id": pctStr, "title": formatMetricFormula(pctStr) }, toBarChart(pct, '█'));
          addCellAttr(trow, { "class": "ra",      "id": avgStr, "title": formatMetricFormula(avgStr) }, format_avg(avg));
          addCellAttr(trow, { "class": "ra",      "id": apcStr, "title": formatMetricFormula(apcStr) }, format_avg(apc, 2));
          addCellAttr(trow, { "class": "ra",      "id": apsStr, "title": formatMetricFormula(apsStr) }, format_avg(aps, 2));
          addCellAttr(trow, { "class": "ra",      "id": sumStr, "title": formatMetricFormula(sumStr) }, format_sum(sum));
          addCellAttr(trow, { "class": "ra",      "id": spsStr, "title": formatMetricFormula(spsStr) }, format_sum(sps));
          addCellSimple(trow, "ra", dim_units);
          tbody.appendChild(trow);
        }
      }
"##;

static ALL_RATIOS_HTML: &str = r##"
        <table style="display: inline-block; border: 1px solid;" id="All-Ratios">
          <thead>
            <tr>
              <th colspan="3" class="la tablename">All Ratio Metrics</th>
              <th colspan="2" class="ca">Data</th>
            </tr>
            <tr>
              <th class="la">Ratio Name</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">ratio</th>
              <th class="ra">Max Rate</th>
            </tr>
          </thead>
          <tbody id="tbody_all_ratios">
          </tbody>
        </table>
"##;

static ALL_RATIOS_JS: &str = r##"
      function tbody_AllRatios(tbody) {
        let ratioNames = [];
        for (const ratio in g_ratios) {
          ratioNames.push(ratio);
        }
        ratioNames.sort();

        for (const ratio of ratioNames) {
          const pct = getRatioValue(ratio, 'pct');
          const pctStr = ratio + '.pct';
          const rio = getRatioValue(ratio, 'ratio');
          const rioStr = ratio + '.ratio';
          const maxRate = getRatioValue(ratio, 'max_rate');
          const maxRateStr = ratio + '.max_rate';

          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", ratio);
          addCellAttr(trow, { "class": "ra",      "id": pctStr,     "title": formatMetricFormula(pctStr)     }, format_pct(pct, 2));
          addCellAttr(trow, { "class": "la comp", "id": pctStr,     "title": formatMetricFormula(pctStr)     }, toBarChart(pct, '█'));
          addCellAttr(trow, { "class": "ra",      "id": rioStr,     "title": formatMetricFormula(rioStr)     }, format_avg(rio));
          addCellAttr(trow, { "class": "ra",      "id": maxRateStr, "title": formatMetricFormula(maxRateStr) }, format_avg(maxRate, 4));
          tbody.appendChild(trow);
        }
      }
"##;

static ALL_THROUGHPUTS_HTML: &str = r##"
        <table style="display: inline-block; border: 1px solid;" id="All-Throughputs">
          <thead>
            <tr>
              <th colspan="3" class="la tablename">All Throughput Metrics</th>
            </tr>
            <tr>
              <th class="la">Throughput Name</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_all_throughputs">
          </tbody>
        </table>
"##;

static ALL_THROUGHPUTS_JS: &str = r##"
      function tbody_AllThroughputs(tbody) {
        let throughputNames = [];
        for (const throughput in g_throughputs) {
          throughputNames.push(throughput);
        }
        throughputNames.sort();

        for (const throughput of throughputNames) {
          const pct = getThroughputPct(throughput);
          const pctStr = getThroughputPctStr(throughput);

          const submetrics = g_throughputs[throughput];
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", throughput);
          addCellAttr(trow, { "class": "ra",      "id": pctStr, "title": formatMetricFormula(pctStr) }, format_pct(pct));
          addCellAttr(trow, { "class": "la comp", "id": pctStr, "title": formatMetricFormula(pctStr) }, toBarChart(pct, '█'));
          tbody.appendChild(trow);
        }
      }
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additional_metrics_touches_every_metric() {
        let table = AdditionalMetrics::default().make_data_table();
        assert_eq!(table.html, "");
        assert!(table.jsfunc.contains("        getCounterPct(\"idc__requests\");\n"));
        assert!(table.jsfunc.contains("        getRatioPct(\"smsp__amortized_warp_latency\");\n"));
        assert!(table.jsfunc.contains("        getThroughputPct(\"l1tex__m_xbar2l1tex_throughput\");\n"));
        assert_eq!(table.required_counters.len(), 22);
    }

    #[test]
    fn test_all_tables() {
        let t = AllMetrics::new(MetricKind::Throughput).make_data_table();
        assert_eq!(t.name, "AllThroughputs");
        assert!(t.is_exhaustive_listing());
        assert_eq!(t.jscall, "tbody_AllThroughputs(document.getElementById('tbody_all_throughputs'));");
        assert!(t.html.contains("id=\"tbody_all_throughputs\""));
        assert!(t.jsfunc.contains("function tbody_AllThroughputs(tbody)"));
    }

    #[test]
    fn test_required_table() {
        let t = RequiredMetricsTable::new(MetricKind::Ratio, "CacheHitRates").make_data_table();
        assert_eq!(t.name, "RequiredRatios_CacheHitRates");
        assert!(t.html.contains("<th class=\"la\">CacheHitRates: Required Ratios</th>"));
        assert!(t.html.contains("<tbody id=\"tbody_required_ratios_CacheHitRates\">"));
        assert_eq!(
            t.jscall,
            "tbody_RequiredRatios(document.getElementById('tbody_required_ratios_CacheHitRates'));"
        );
    }
}
