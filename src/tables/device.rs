use crate::tables::{dquote, js_function, quote, TableGenerator};
use crate::types::{strings, RequiredMetrics};

#[derive(Debug, Clone)]
pub struct DevicePropertyRow {
    pub name: &'static str,
    pub attr: &'static str,
    pub value: &'static str,
    pub tooltip: &'static str,
}

impl DevicePropertyRow {
    pub const fn new(name: &'static str, attr: &'static str, value: &'static str, tooltip: &'static str) -> Self {
        DevicePropertyRow { name, attr, value, tooltip }
    }
}

/// Identifies the GPU; the L2 size is derived from the LTS slice count.
#[derive(Debug, Clone)]
pub struct DeviceProperties {
    pub l2_cache_size_per_lts_kib: u32,
    pub rows: Vec<DevicePropertyRow>,
}

impl DeviceProperties {
    pub fn new(l2_cache_size_per_lts_kib: u32) -> Self {
        DeviceProperties {
            l2_cache_size_per_lts_kib,
            rows: vec![
                DevicePropertyRow::new("Date & Time", "ra", "timeToStr(g_time)", "\"\""),
                DevicePropertyRow::new("GPU Name", "ra", "g_device.gpuName", "\"\""),
                DevicePropertyRow::new("Chip Name", "ra", "g_device.chipName", "\"\""),
                DevicePropertyRow::new("Clock Locking Status", "ra", "g_device.clockLockingStatus", "\"\""),
                DevicePropertyRow::new("# SMs", "ra", "smCount", "smCountStr"),
                DevicePropertyRow::new("L2 Cache Size (KiB)", "ra", "l2cacheSizeKiB", "l2cacheSizeKiBStr"),
            ],
        }
    }

    fn jsfunc_logic(&self) -> String {
        let per_lts = self.l2_cache_size_per_lts_kib;
        format!(
            r##"
        const smCount = Math.round(safeDiv(getCounterValue('sm__cycles_elapsed', 'sum'), getCounterValue('sm__cycles_elapsed', 'avg')));
        const smCountStr = 'sm__cycles_elapsed.sum / sm__cycles_elapsed.avg';
        const ltsCount = Math.round(safeDiv(getCounterValue('lts__cycles_elapsed', 'sum'), getCounterValue('lts__cycles_elapsed', 'avg')));
        const l2cacheSizeKiB = ltsCount * {per_lts};
        const l2cacheSizeKiBStr = 'lts__cycles_elapsed.sum / lts__cycles_elapsed.avg * {per_lts}';
"##
        )
    }
}

impl TableGenerator for DeviceProperties {
    fn name(&self) -> String {
        "DeviceProperties".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Device-Properties">
          <thead>
            <tr>
              <th colspan="2" class="ca tablename">Device Properties</th>
            </tr>
            <tr>
              <th class="la">Name</th>
              <th class="la">Value</th>
            </tr>
          </thead>
          <tbody id="tbody_device_properties">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let head = format!(
            "{}{}{}",
            r##"
      function tbody_DeviceIds(tbody) {
        class Row {
          constructor(name, valueclass, value, tooltip) {
            this.name = name;
            this.valueclass = valueclass;
            this.value = value;
            this.tooltip = tooltip;
          }
        }

"##,
            self.jsfunc_logic(),
            "\n        let rows = [\n"
        );
        let rows = self.rows.iter().map(|row| {
            format!(
                "          new Row({:<40}, {:<10}, {:<30}, {:<30}),",
                quote(row.name),
                dquote(row.attr),
                row.value,
                row.tooltip
            )
        });
        js_function(&head, rows, r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.name, passThrough = false, formatMetricFormula(row.tooltip));
          addCellSimple(trow, row.valueclass, row.value, passThrough = false, formatMetricFormula(row.tooltip));
          tbody.appendChild(trow);
        }
      }
"##)
    }

    fn jscall(&self) -> String {
        "tbody_DeviceIds(document.getElementById('tbody_device_properties'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::counters(&["lts__cycles_elapsed", "sm__cycles_elapsed"])
    }
}

#[derive(Debug, Clone)]
pub struct ClockRow {
    pub name: &'static str,
    pub time: &'static str,
    pub time_units: &'static str,
    pub time_tooltip: &'static str,
    pub freq: &'static str,
    pub freq_units: &'static str,
    pub freq_tooltip: &'static str,
}

/// Elapsed time and average frequency of each clock domain.
#[derive(Debug, Clone)]
pub struct Clocks {
    pub rows: Vec<ClockRow>,
    pub required_counters: Vec<String>,
}

impl Default for Clocks {
    fn default() -> Self {
        let row = |name, time, time_units, time_tooltip, freq, freq_units, freq_tooltip| ClockRow {
            name,
            time,
            time_units,
            time_tooltip,
            freq,
            freq_units,
            freq_tooltip,
        };
        Clocks {
            rows: vec![
                row("Time Duration", "getCounterValue('gpu__time_duration', 'sum')", "ns", "gpu__time_duration.sum", "new NotApplicable", "", ""),
                row("SYS Clock", "getCounterValue('sys__cycles_elapsed', 'avg')", "sys_clks", "sys__cycles_elapsed.avg", "getCounterValue('sys__cycles_elapsed', 'avg.per_second') * 1e-6", "MHz", "sys__cycles_elapsed.avg.per_second / 1000000"),
                row("GPC Clock", "getCounterValue('gpc__cycles_elapsed', 'avg')", "gpc_clks", "gpc__cycles_elapsed.avg", "getCounterValue('gpc__cycles_elapsed', 'avg.per_second') * 1e-6", "MHz", "gpc__cycles_elapsed.avg.per_second / 1000000"),
                row("L2 Clock", "getCounterValue('lts__cycles_elapsed', 'avg')", "lts_clks", "lts__cycles_elapsed.avg", "getCounterValue('lts__cycles_elapsed', 'avg.per_second') * 1e-6", "MHz", "lts__cycles_elapsed.avg.per_second / 1000000"),
            ],
            required_counters: strings(&[
                "gpc__cycles_elapsed",
                "gpu__time_duration",
                "lts__cycles_elapsed",
                "sys__cycles_elapsed",
            ]),
        }
    }
}

impl Clocks {
    /// SoC parts have no dedicated DRAM clock domain to report.
    pub fn mobile() -> Self {
        Clocks::default()
    }

    /// Discrete GPUs also report the DRAM clock, as a transfer rate.
    pub fn desktop() -> Self {
        let mut clocks = Clocks::default();
        clocks.rows.push(ClockRow {
            name: "Memory Clock",
            time: "getCounterValue('dram__cycles_elapsed', 'avg')",
            time_units: "dram_clks",
            time_tooltip: "dram__cycles_elapsed.avg",
            freq: "getCounterValue('dram__cycles_elapsed', 'avg.per_second') * 2 * 1e-6",
            freq_units: "MT/s",
            freq_tooltip: "dram__cycles_elapsed.avg.per_second * 2 / 1000000",
        });
        clocks.required_counters.insert(0, "dram__cycles_elapsed".to_string());
        clocks
    }
}

impl TableGenerator for Clocks {
    fn name(&self) -> String {
        "Clocks".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Device-Clocks">
          <thead>
            <tr>
              <th colspan="5" class="ca tablename">Device Clocks Measured</th>
            </tr>
            <tr>
              <th class="la">Name</th>
              <th class="ra">Elapsed Time</th>
              <th class="ra">Time Units</th>
              <th class="ra">Avg. Frequency</th>
              <th class="ra">Freq Units</th>
            </tr>
          </thead>
          <tbody id="tbody_device_clocks">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let head = format!(
            "{}{}",
            r##"
      function tbody_DeviceClocks(tbody) {
        class Row {
          constructor(name, time, timeUnits, timeTooltip, freq, freqUnits, freqTooltip) {
            this.name = name;
            this.time = time;
            this.timeUnits = timeUnits;
            this.timeTooltip = timeTooltip;
            this.freq = freq;
            this.freqUnits = freqUnits;
            this.freqTooltip = freqTooltip;
          }
        }

"##,
            "\n        let rows = [\n"
        );
        let rows = self.rows.iter().map(|row| {
            format!(
                "          new Row({:<20}, {:<70}, {:<13}, {:<30}, {:<70}, {:<13}, {:<30}),",
                quote(row.name),
                row.time,
                quote(row.time_units),
                quote(row.time_tooltip),
                row.freq,
                quote(row.freq_units),
                quote(row.freq_tooltip)
            )
        });
        js_function(&head, rows, r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.name);
          addCellSimple(trow, "ra", format_sum(row.time), passThrough = false, formatMetricFormula(row.timeTooltip));
          addCellSimple(trow, "ra", row.timeUnits);
          addCellSimple(trow, "ra", format_sum(row.freq), passThrough = false, formatMetricFormula(row.freqTooltip));
          addCellSimple(trow, "ra", row.freqUnits);
          tbody.appendChild(trow);
        }
      }
"##)
    }

    fn jscall(&self) -> String {
        "tbody_DeviceClocks(document.getElementById('tbody_device_clocks'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: self.required_counters.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_properties_l2_size() {
        let t = DeviceProperties::new(128).make_data_table();
        assert!(t.jsfunc.contains("const l2cacheSizeKiB = ltsCount * 128;"));
        assert!(t.jsfunc.contains("'lts__cycles_elapsed.sum / lts__cycles_elapsed.avg * 128'"));
        assert!(t.jsfunc.contains(&format!("          new Row({:<40}, {:<10}, ", "'# SMs'", "\"ra\"")));
        assert_eq!(t.required_counters, vec!["lts__cycles_elapsed", "sm__cycles_elapsed"]);
    }

    #[test]
    fn test_desktop_clocks_add_memory_clock() {
        let base = Clocks::default();
        let desktop = Clocks::desktop();
        assert_eq!(desktop.rows.len(), base.rows.len() + 1);
        assert_eq!(desktop.required_counters[0], "dram__cycles_elapsed");
        let t = desktop.make_data_table();
        assert!(t.jsfunc.contains("'Memory Clock'"));
        assert!(t.jsfunc.contains("'MT/s'"));
        assert!(t.html.contains("id=\"tbody_device_clocks\""));
    }

    #[test]
    fn test_mobile_clocks_have_no_memory_clock() {
        let t = Clocks::mobile().make_data_table();
        assert!(!t.jsfunc.contains("'Memory Clock'"));
        assert_eq!(t.required_counters, vec!["gpc__cycles_elapsed", "gpu__time_duration", "lts__cycles_elapsed", "sys__cycles_elapsed"]);
    }
}
