use crate::tables::{dquote, js_function, quote, TableGenerator};
use crate::types::RequiredMetrics;

/// Leading `#` and `Full Name` columns of the summary table.
const RANGE_NAME_COLUMNS: usize = 2;

/// One statistic column of [`RangesSummary`].
#[derive(Debug, Clone)]
pub struct SummaryColumn {
    pub desc: &'static str,
    /// JS expression evaluated against the range's metrics.
    pub value: &'static str,
    /// Client-side formatting function; empty shows the value as is.
    pub format: &'static str,
    pub align: &'static str,
    /// JS expression producing the tooltip formula.
    pub tooltip: &'static str,
}

impl SummaryColumn {
    pub const fn new(
        desc: &'static str,
        value: &'static str,
        format: &'static str,
        align: &'static str,
        tooltip: &'static str,
    ) -> Self {
        SummaryColumn { desc, value, format, align, tooltip }
    }
}

/**
 * RangesSummary
 * One sortable row per measured range, linking to its per-range report.
 *
 * The columns are chip specific, so the chip also states which metrics the
 * column expressions read.
 */
#[derive(Debug, Clone)]
pub struct RangesSummary {
    pub columns: Vec<SummaryColumn>,
    pub required: RequiredMetrics,
}

impl RangesSummary {
    pub fn new(columns: Vec<SummaryColumn>, required: RequiredMetrics) -> Self {
        RangesSummary { columns, required }
    }
}

impl TableGenerator for RangesSummary {
    fn name(&self) -> String {
        "RangesSummary".to_string()
    }

    fn html(&self) -> String {
        let mut html = String::from(r##"
        <table style="border: 1px solid; table-layout: fixed;" id="table_summary">
"##);
        html.push_str(r##"
          <thead>
            <tr>
              <th class="ra" onclick="summary_sortTable(0, parseInt, (lhs, rhs) => lhs - rhs)" style="cursor:pointer;" title="Click to sort by range index">#</th>
              <th class="la" onclick="summary_sortTable(1, s => s, (lhs, rhs) => lhs.localeCompare(rhs))" style="cursor:pointer;" title="Click to sort by full name">Full Name</th>
"##);
        for (index, column) in self.columns.iter().enumerate() {
            html.push_str(&format!(
                "              <th class=\"{} ww\" onclick=\"summary_sortTable({}, s => parseFloat(s.replaceAll(',', '')), compareNumbers)\" style=\"cursor:pointer;\" title=\"Click to sort by {}\">{}</th>\n",
                column.align,
                RANGE_NAME_COLUMNS + index,
                column.desc,
                column.desc
            ));
        }
        html.push_str(r##"
            </tr>
          </thead>
          <tbody id="tbody_summary">
          </tbody>
        </table>
"##);
        html
    }

    fn jsfunc(&self) -> String {
        // The sort-order arrays are sized by the statistic columns alone.
        let n = self.columns.len();
        let mut js = String::from("\n");
        js.push_str("    const IS_COLUMN_ASCENDING_BY_DEFAULT = [true, true");
        js.push_str(&", false".repeat(n.saturating_sub(2)));
        js.push_str("];\n");
        js.push_str("    const isColumnAscending = [true");
        js.push_str(&", null".repeat(n.saturating_sub(1)));
        js.push_str("];\n");
        js.push_str("    let sortedColumnIndex = 0;\n");
        js.push_str(r##"
    function summary_sortTable(selectedColumnIndex, extractValue, compare) {
      var table = document.getElementById("table_summary");
      var rows = table.rows;
      const numHeaderRows = 1;
      if (rows.length < numHeaderRows + 2) {
        return;
      }

      // determine the order that we want to sort
      if (isColumnAscending[selectedColumnIndex] == null) {
        isColumnAscending[selectedColumnIndex] = IS_COLUMN_ASCENDING_BY_DEFAULT[selectedColumnIndex];
      } else if (selectedColumnIndex == sortedColumnIndex) {
        isColumnAscending[selectedColumnIndex] = !isColumnAscending[selectedColumnIndex];
      } else {
        // keep the previous order
      }

      sortedColumnIndex = selectedColumnIndex;

      var store = [];
      for (var ii = numHeaderRows; ii < rows.length; ii++) {
        var row = rows[ii];
        var value = extractValue(row.getElementsByTagName("TD")[selectedColumnIndex].innerText);
        store.push([value, row]);
      }
      store.sort(function(lhs_pair, rhs_pair) {
        const ret = compare(lhs_pair[0], rhs_pair[0]);
        if (isColumnAscending[selectedColumnIndex]) {
          return ret;
        } else {
          return -ret;
        }
      });
      // note nodes are moved: https://stackoverflow.com/questions/12146888/why-does-appendchild-moves-a-node
      for (var ii = 0; ii < store.length; ii++) {
        table.appendChild(store[ii][1]);
      }
    }

    function tbody_Summary(tbody) {
      let addRow = function(rangeIndex, rangeName, perRangeReportLink) {
        let fullName = rangeName;
        let hierarchy = rangeName.split('/');
        let leafName = hierarchy[hierarchy.length - 1];
        var trow = document.createElement('tr');
        addCellSimple(trow, 'ra', rangeIndex, passthrough=true);
        addCellSimple(trow, 'la ww full_name', escapeHtml(fullName).link(perRangeReportLink), true);
"##);
        for column in &self.columns {
            js.push_str(&format!(
                "        addCellSimple(trow, {}, {}({}), passthrough=true, formatMetricFormula({}));\n",
                quote(column.align),
                column.format,
                column.value,
                column.tooltip
            ));
        }
        js.push_str(r##"
        tbody.appendChild(trow);
      };

      g_ranges.forEach(function (rangeName, rangeIndex) {
        g_counters = g_ranges_counters[rangeName] || {};
        g_ratios = g_ranges_ratios[rangeName] || {};
        g_throughputs = g_ranges_throughputs[rangeName] || {};
        perRangeReportLink = g_range_file_names[rangeIndex];
        addRow(rangeIndex, rangeName, perRangeReportLink);
      });
    }
"##);
        js
    }

    fn jscall(&self) -> String {
        "tbody_Summary(document.getElementById('tbody_summary'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        self.required.clone()
    }

    fn workflow(&self) -> String {
        r##"
To find the biggest time consumers, sort by duration by clicking on the column header.<br>
To find cold spots, sort by GR Active%.<br>
To find regions with excessive synchronization, sort by #WFI (the number of Wait-for-Idle commands).<br>
Then follow the links to per-range reports in the Full Name column for more detail.
"##.to_string()
    }
}

/// `(name, value class, value)`
const COLLECTION_INFO_ROWS: &[(&str, &str, &str)] = &[
    ("Collection Time", "ra", "timeToStr(g_time)"),
    ("GPU Name", "ra", "g_device.gpuName"),
    ("Chip Name", "ra", "g_device.chipName"),
    ("#Ranges", "ra", "g_ranges.length.toString()"),
];

/// When and where the ranges were collected. Reads no metrics.
#[derive(Debug, Clone, Default)]
pub struct CollectionInfo;

impl TableGenerator for CollectionInfo {
    fn name(&self) -> String {
        "CollectionInfo".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;">
          <thead>
            <tr>
              <th colspan="2" class="ca tablename">Collection Information</th>
            </tr>
            <tr>
              <th class="la">Name</th>
              <th class="la">Value</th>
            </tr>
          </thead>
          <tbody id="tbody_collection_info">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = COLLECTION_INFO_ROWS.iter().map(|(name, attr, value)| {
            format!("          new Row({:<40}, {:<10}, {:<60}),", quote(name), dquote(attr), value)
        });
        js_function(
            r##"
      function tbody_CollectionInfo(tbody) {
        class Row {
          constructor(name, valueclass, value) {
            this.name = name;
            this.valueclass = valueclass;
            this.value = value;
          }
        }

        let rows = [
"##,
            rows,
            r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.name);
          addCellSimple(trow, row.valueclass, row.value);
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_CollectionInfo(document.getElementById('tbody_collection_info'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::strings;

    fn summary() -> RangesSummary {
        RangesSummary::new(
            vec![
                SummaryColumn::new("Duration ns", "getCounterValue('gpu__time_duration', 'avg')", "format_avg", "ra", "'gpu__time_duration.avg'"),
                SummaryColumn::new("3D?", "getCounterValue('fe__draw_count', 'sum') ? '&#x2713;' : ''", "", "ra", "'fe__draw_count.sum'"),
                SummaryColumn::new("SM%", "getThroughputPct('sm__throughput')", "format_pct", "ra", "getThroughputPctStr('sm__throughput')"),
            ],
            RequiredMetrics {
                counters: strings(&["fe__draw_count", "gpu__time_duration"]),
                ratios: Vec::new(),
                throughputs: strings(&["sm__throughput"]),
            },
        )
    }

    #[test]
    fn test_summary_header_indices_follow_name_columns() {
        let html = summary().html();
        assert!(html.contains("<th class=\"ra ww\" onclick=\"summary_sortTable(2, "));
        assert!(html.contains("summary_sortTable(4, s => parseFloat(s.replaceAll(',', '')), compareNumbers)\" style=\"cursor:pointer;\" title=\"Click to sort by SM%\">SM%</th>\n"));
        assert!(html.ends_with("</table>\n"));
    }

    #[test]
    fn test_summary_sort_arrays_and_cells() {
        let js = summary().jsfunc();
        assert!(js.starts_with("\n    const IS_COLUMN_ASCENDING_BY_DEFAULT = [true, true, false];\n"));
        assert!(js.contains("    const isColumnAscending = [true, null, null];\n"));
        // an empty format shows the raw value
        assert!(js.contains("addCellSimple(trow, 'ra', (getCounterValue('fe__draw_count', 'sum') ? '&#x2713;' : ''), passthrough=true, formatMetricFormula('fe__draw_count.sum'));\n"));
        assert!(js.contains("function tbody_Summary(tbody) {"));
    }

    #[test]
    fn test_collection_info_reads_nothing() {
        let t = CollectionInfo.make_data_table();
        assert!(t.required_counters.is_empty() && t.required_ratios.is_empty() && t.required_throughputs.is_empty());
        assert!(t.jsfunc.contains("g_ranges.length.toString()"));
        assert_eq!(t.workflow, "");
    }
}
