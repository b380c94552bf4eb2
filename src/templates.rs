/// Stylesheet shared by every generated report.
pub static CSS: &str = r##"
      table {
        font-size: 14px;
        margin: 2 auto;
        border-collapse: collapse;
        border: 1px solid ;
      }

      table th {
        margin: 0 auto;
        border-collapse: collapse;
        border: 1px solid ;
        background: #F8F8F8;
      }

      table td {
        margin: 0 auto;
        border-collapse: collapse;
        border: 1px solid ;
      }

      table tbody tr td {
        margin: 0 auto;
        border-collapse: collapse;
        border: 1px solid ;
      }

      .tablename {
        color: DarkGreen;
        border-color: Black;
        background: #F8F8F8;
        font-weight: bold;
      }

      .subhdr {
        background: #F8F8F8;
      }

      .ca {
        text-align: center;
      }

      .la {
        text-align: left;
      }

      .ra {
        text-align: right;
      }

      .ww {
        word-wrap: break-word;
      }

      .full_name {
        min-width: 150px;
        width: 33vw;
        max-width: calc(92vw - 920px);
      }

      .base {
        font-size: 8px;
        color: #606060;
        border-color: Black;
      }

      .comp {
        font-size: 8px;
        color: steelblue;
        border-color: Black;
      }

      .not_applicable {
        color: #CCCCCC;
      }

      .not_available {
        color: #888888;
      }

      .titlearea {
        display: flex;
        align-items: center;
        color: white;
        font-family: verdana;
      }

      .titlebar {
        margin-left: 0;
        margin-right: auto;
      }

      .global_settings {
        margin-left: auto;
        margin-right: 0;
      }

      .title {
        font-size: 28px;
        margin-left: 10px;
      }

      .section {
        border-radius: 15px;
        padding: 10px;
        background: #FFFFFF;
        margin: 10px;
        min-width: calc(100% - 40px);
        width: max-content;
      }

      .section_title {
        font-family: verdana;
        font-weight: bold;
        color: black;
      }

      .workflow {
        width: 960px;
        max-width: 90vw;
      }

      .debug_section {
        border-radius: 15px;
        padding: 10px;
        background: #DDDDDD;
        margin: 10px;
        min-width: calc(100% - 40px);
        width: max-content;
      }

      /* Tooltip container */
      .tooltip {
        position: relative;
      }

      /* Tooltip text */
      .tooltip .tooltiptext {
        visibility: hidden; /* The tooltip text is not visible by default */
        min-width: 100px; /* Minimum width of the tooltip container */
        max-width: 600px; /* Maximum width of the tooltip container */
        background-color: rgba(50, 50, 50, 0.9); /* The background color of the tooltip container */
        color: #F8F8FF; /* The color of the text within the tooltip */
        font-size: 14px;
        text-align: center; /* Centers the text within the tooltip */
        border-radius: 6px; /* Rounds the corners of the tooltip's border */
        padding: 5px 5px; /* Padding, the former is for top/bottom, the latter is for left/right */

        /* Position the tooltip */
        position: absolute; /* The tooltip text is positioned absolutely relative to its parent cell */
        z-index: 1; /* Stacks the tooltip above other elements which may be at the same position */
        bottom: 50%; /* Positions of the tooltip relative to the bottom of its parent cell*/
        left: 50%; /* Positions of the tooltip relative to the left of its parent cell*/
      }

      /* Show the tooltip text when your mouse over the tooltip container */
      .tooltip:hover .tooltiptext {
        visibility: visible; /* Makes the tooltip text visible when the tooltip container is hovered over */
        transition: visibility 0s linear 0.1s, opacity 0.1s linear; /* Adds a transition effect for both visibility and opacity when the tooltip container is hovered over */
      }

      #footer {
        position: fixed;
        left: 0;
        bottom: 0;
        width: 100%;
        background: rgba(225, 225, 225, 0.5);
        color: darkred;
        text-align: center;
        height: 20px;
        line-height: 20px;
        font-weight: 700;
      }
"##;

/// Client-side runtime shared by every generated report: metric lookup,
/// formatting, sorting and tooltip helpers.
pub static JAVASCRIPT: &str = r##"
      class NotApplicable {
        valueOf() {
          return undefined;
        }
        toString() {
          return 'NotApplicable';
        }
      }
      class NotAvailable {
        valueOf() {
          return undefined;
        }
        toString() {
          return 'NotAvailable';
        }
      }

      function timeToStr(secondsSinceEpoch) {
        var date = new Date(secondsSinceEpoch * 1000); // convert to milliseconds
        var year = date.getFullYear();
        var Months = ['Jan', 'Feb', 'Mar', 'Apr', 'May', 'Jun', 'Jul', 'Aug', 'Sep', 'Oct', 'Nov', 'Dec'];
        var month = Months[date.getMonth()];
        var day = date.getDate();
        var hours = date.getHours();
        var minutes = "0" + date.getMinutes();
        var seconds = "0" + date.getSeconds();
        var formattedTime = month + ' ' + day + ', ' + year + ' ' + hours + ':' + minutes.substr(-2) + ':' + seconds.substr(-2);
        return formattedTime;
      }

      function escapeHtml(input) {
        if (typeof input == 'string' || input instanceof String) {
          return input
            .replace(/&/g, "&amp;") // make it first
            .replace(/ /g, "&nbsp;")
            .replace(/</g, "&lt;")
            .replace(/>/g, "&gt;")
            .replace(/"/g, "&quot;")
            .replace(/'/g, "&apos;");
        }
        return input;
      }

      function safeDiv(dividend, divisor) {
        if (divisor === 0) {
          return isNaN(dividend) ? NaN : 0.0;
        } else {
          return dividend / divisor;
        }
      }

      // NaN < -Infinity < Infinity < finite numbers
      function compareNumbers(lhs, rhs) {
        if (isFinite(lhs) && isFinite(rhs)) {
          return lhs - rhs;
        } else if (isFinite(lhs)) {
          return 1;
        } else if (isFinite(rhs)) {
          return -1;
        } else {
          if (isNaN(lhs) && isNaN(rhs)) {
            return 0;
          } else if (isNaN(lhs)) {
            return -1;
          } else if (isNaN(rhs)) {
            return 1;
          } else {
            return (lhs == rhs) ? 0 : ((lhs > rhs) ? 1 : -1);
          }
        }
      }

      function getCounterValue(base, submetric) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        console.assert(typeof base == 'string' || base instanceof String);
        console.assert(typeof submetric == 'string' || submetric instanceof String);

        if (g_debug) {
          g_counters_referenced.add(base);
        }

        counter = g_counters[base];
        if (counter === undefined) {
          counter = {};
          g_counters[base] = counter;
        }
        value = counter[submetric];
        if (value === undefined) {
          if (g_populateDummyValues) {
            value = Math.random() * 100;
          } else {
            value = NaN;
          }
          counter[submetric] = value;
        }
        return value;
      }

      function getCounterPct(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        return getCounterValue(base, 'avg.pct_of_peak_sustained_elapsed');
      }

      function getCounterPctStr(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable || !base) {
          return '';
        }
        return base + '.avg.pct_of_peak_sustained_elapsed';
      }

      function getCounterDimUnits(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        console.assert(typeof base == 'string' || base instanceof String);

        if (g_debug) {
          g_counters_referenced.add(base);
        }

        counter = g_counters[base];
        if (counter === undefined) {
          counter = {};
          g_counters[base] = counter;
        }
        dim_units = counter['dim_units'];
        if (dim_units === undefined) {
          dim_units = '';
          counter['dim_units'] = dim_units;
        }
        return dim_units;
      }

      function getRatioValue(base, submetric) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        if (!base) {
          return NaN;
        }
        console.assert(typeof base == 'string' || base instanceof String);
        console.assert(typeof submetric == 'string' || submetric instanceof String);

        if (g_debug) {
          g_ratios_referenced.add(base);
        }

        ratio = g_ratios[base];
        if (ratio === undefined) {
          ratio = {};
          g_ratios[base] = ratio;
        }
        value = ratio[submetric];
        if (value === undefined) {
          if (g_populateDummyValues) {
            value = Math.random() * 100;
          } else {
            value = NaN;
          }
          ratio[submetric] = value;
        }
        return value;
      }

      function getRatioPct(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        return getRatioValue(base, 'pct');
      }

       function getRatioPctStr(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable || !base) {
          return '';
        }
        return base + '.pct';
      }

      function getThroughputValue(base, submetric) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        if (!base) {
          return NaN;
        }
        console.assert(typeof base == 'string' || base instanceof String);
        console.assert(typeof submetric == 'string' || submetric instanceof String);

        if (g_debug) {
          g_throughputs_referenced.add(base);
        }

        throughput = g_throughputs[base];
        if (throughput === undefined) {
          throughput = {};
          g_throughputs[base] = throughput;
        }
        value = throughput[submetric];
        if (value === undefined) {
          if (g_populateDummyValues) {
            value = Math.random() * 100;
          } else {
            value = NaN;
          }
          throughput[submetric] = value;
        }
        return value;
      }

      function getThroughputPct(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable) {
          return base;
        }
        return getThroughputValue(base, 'avg.pct_of_peak_sustained_elapsed');
      }

      function getThroughputPctStr(base) {
        if (base instanceof NotApplicable || base instanceof NotAvailable || !base) {
          return '';
        }
        return base + '.avg.pct_of_peak_sustained_elapsed';
      }

      function toBarChart(pct, ch) {
        if (pct instanceof NotApplicable || pct instanceof NotAvailable) {
          return '';
        }
        const clampedPct = Math.min(Math.max(pct, 0), 100); // clamp to range
        const width = 20;
        const barwidth = Math.ceil((clampedPct / 100) * width);
        bar = '';
        for (let ii = 1; ii <= barwidth; ii++) {
          bar += ch;
        }
        return bar;
      }

      function roundUp(num, precision) {
        precision = Math.pow(10, precision);
        return Math.ceil(num * precision) / precision;
      }

      function format_pct(pct, precision=1) {
        if (pct instanceof NotApplicable || pct instanceof NotAvailable) {
          return pct;
        }
        if (isNaN(pct)) {
          return '⚠';
        }
        if (!isFinite(pct)) {
          return (Math.sign(pct) == 1) ? '∞' : '-∞';
        }
        return roundUp(pct, precision).toLocaleString(undefined, { minimumFractionDigits: precision, maximumFractionDigits: precision });
      }

      function format_avg(avg, precision=1) {
        if (avg instanceof NotApplicable || avg instanceof NotAvailable) {
          return avg;
        }
        if (isNaN(avg)) {
          return '⚠';
        }
        if (!isFinite(avg)) {
          return (Math.sign(avg) == 1) ? '∞' : '-∞';
        }
        return avg.toLocaleString(undefined, { minimumFractionDigits: precision, maximumFractionDigits: precision });
      }

      function format_sum(sum, precision=1) {
        if (sum instanceof NotApplicable || sum instanceof NotAvailable) {
          return sum;
        }
        if (isNaN(sum)) {
          return '⚠';
        }
        if (!isFinite(sum)) {
          return (Math.sign(sum) == 1) ? '∞' : '-∞';
        }
        return sum.toLocaleString(undefined, { minimumFractionDigits: precision, maximumFractionDigits: precision });
      }

      function addCellAttr(trow, attributes, text, passThrough = false) {
        let td = document.createElement('td');
        for (const attr in attributes) {
          td.setAttribute(attr, attributes[attr]);
        }
        if (text instanceof NotApplicable) {
          let span = document.createElement('span');
          span.setAttribute("class", "not_applicable");
          span.innerHTML = '-';
          td.appendChild(span);
        } else if (text instanceof NotAvailable) {
          let span = document.createElement('span');
          span.setAttribute("class", "not_available");
          span.innerHTML = '-';
          td.appendChild(span);
        } else {
          if (passThrough) {
            td.innerHTML = text;
          } else {
            td.innerHTML = escapeHtml(text);
          }
        }
        trow.appendChild(td);
      }

      function addCellSimple(trow, classes, text, passThrough = false, tooltip = "") {
        addCellAttr(trow, { "class": classes, "title": tooltip }, text, passThrough);
      }

      // for debugging utility
      function clearReferencedMetrics() {
        g_counters_referenced.clear();
        g_ratios_referenced.clear();
        g_throughputs_referenced.clear();
      }

      function tbody_RequiredCounters(tbody) {
        let metricNames = [];
        for(const counter of g_counters_referenced) {
          metricNames.push(counter);
        }
        metricNames.sort();

        for (const metricName of metricNames) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la", "'" + metricName + "',");
          tbody.appendChild(trow);
        }
        return metricNames;
      }

      function tbody_RequiredRatios(tbody) {
        let metricNames = [];
        for(const ratio of g_ratios_referenced) {
          metricNames.push(ratio);
        }
        metricNames.sort();

        for (const metricName of metricNames) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la", "'" + metricName + "',");
          tbody.appendChild(trow);
        }
        return metricNames;
      }

      function tbody_RequiredThroughputs(tbody) {
        let metricNames = [];
        for(const throughput of g_throughputs_referenced) {
          metricNames.push(throughput);
        }
        metricNames.sort();

        for (const metricName of metricNames) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la", "'" + metricName + "',");
          tbody.appendChild(trow);
        }
        return metricNames;
      }

      // calculate the row span based on grouping rows that have the same attribute retrieved via getRowAttribute(),
      // return 0 if the current row has the same attribute as its previous row
      function calcRowSpan(rows, rowIdx, getRowAttribute) {
        let rowspan = 0;
        if (!rowIdx || getRowAttribute(rows[rowIdx]) != getRowAttribute(rows[rowIdx - 1])) {
          for (let ii = rowIdx; ii < rows.length; ++ii) {
            if (getRowAttribute(rows[rowIdx]) != getRowAttribute(rows[ii])) {
              break;
            }
            ++rowspan;
          }
        }
        return rowspan;
      }

      function formatMetricFormula(formula) {
        if (!formula) {
          return '';
        }
        return formula;
      }

      // The idea is to tokenize the input text, then by comparing each token against a global metric name set,
      // we will be able to recognize each metric, say 'm1', 'm2' out of formula 'm1/m2'.
      // Then we can apply custom style and add custom link to those metrics.
      function convertTooltip(tooltipText) {
        var tokens = tooltipText.split(/([a-zA-Z0-9._]+)/);
        var convertedText = tokens.map(function(token) {
          if (g_allMetricNames.has(token)) {
            // If the anchor point exist on the page, make it hyper-linked + colored; otherwise just color it.
            if (document.getElementById(token)) {
              return '<a href="#' + token + '" style="color: #FFD700;">' + token + '</a>';
            } else {
              return '<span style="color: #FFD700;">' + token + '</span>';
            }
          } else {
            return token;
          }
        }).join('');
        return convertedText;
      }

      // This processes one table at a time by converting all its cells' tooltips from the built-in 'title' style 
      // to the custom CSS style.
      function convertAllCellsInOneTableToCssTooltips(tableIdentifier) {
        var selector = '#' + tableIdentifier;
        var cells = document.querySelectorAll(selector + ' th[title], ' + selector + ' td[title]');
        cells.forEach(function(cell) {
          var tooltipText = cell.getAttribute('title');
          if (!tooltipText) {
            return;
          }
          var convertedTooltipText = convertTooltip(tooltipText);
          var tooltipSpan = document.createElement('span');
          tooltipSpan.classList.add('tooltiptext');
          tooltipSpan.innerHTML = convertedTooltipText;
          cell.appendChild(tooltipSpan);
          cell.classList.add('tooltip');
          cell.removeAttribute('title');
        });
      }

      function addTableIdentifierIfNotExist(table) {
        if (!table.id) {
          var uniqueId;
          do {
            uniqueId = 'table-' + Math.random().toString(36).substr(2, 9);
          } while (document.getElementById(uniqueId)); // Loop until an unused ID is found
          table.id = uniqueId;
        }
      }

      function convertAllTablesToCssTooltips() {
        var tables = document.querySelectorAll('table');
        tables.forEach(function(table) {
          addTableIdentifierIfNotExist(table);
          var tableIdentifier = table.id;
          convertAllCellsInOneTableToCssTooltips(tableIdentifier);
        });
      }
"##;

pub static RANGE_HANDLERS: &str = r##"
      function onClick_ShowWorkflow() {
        let showWorkflowCheckboxElement = document.getElementById('show-workflow');
        let checkboxValue = showWorkflowCheckboxElement.checked;
        let instructionElements = document.getElementsByClassName("workflow");
        for (let elem of instructionElements) {
          elem.hidden = !checkboxValue;
        }
      }

      function onClick_MobileLayout() {
        let mobileLayoutCheckboxElement = document.getElementById('mobile-layout');
        let checkboxValue = mobileLayoutCheckboxElement.checked;
        let tableSpacingElements = document.getElementsByName("table_spacing");
        for (let elem of tableSpacingElements) {
          elem.hidden = !checkboxValue;
        }
      }
"##;

pub static RANGE_TITLE_AREA: &str = r##"
    <div>
      <div class="titlearea">
        <div class="titlebar">
          <img src="https://developer.nvidia.com/sites/all/themes/devzone_new/nvidia_logo.png"/>
          <span class="title" id="titlebar_text">Nsight Perf SDK Profiler Report</span>
        </div>
        <div class="global_settings">
          <span style="background-color: #555555;">
            <label for="show-workflow">Show Workflow:</label>
            <input id="show-workflow" type="checkbox" checked onclick="onClick_ShowWorkflow()"/>
          </span>
          <span style="background-color: #333333;">
            <label for="mobile-layout">Mobile Layout:</label>
            <input id="mobile-layout" type="checkbox" checked onclick="onClick_MobileLayout()"/>
          </span>
        </div>
      </div>
"##;

pub static SUMMARY_TITLE_AREA: &str = r##"
    <div>
    <div class="titlearea">
        <div class="titlebar">
          <img src="https://developer.nvidia.com/sites/all/themes/devzone_new/nvidia_logo.png"/>
          <span class="title" id="titlebar_text">Nsight Perf SDK Profiler Report</span>
        </div>
    </div>
"##;

pub static FOOTER: &str = r##"
    </div>

    <div id="footer">
      <span>This report is not licensed for benchmarking, nor comparison between GPU parts(<a href="readme.html#unintended_use">learn more</a>).</span>
    </div>
"##;

// The reporting tool replaces the marker with the collected metric values.
pub static JSON_PLACEHOLDER: &str = r##"
    <script>
      g_json = {
        /***JSON_DATA_HERE***/
      };
"##;

pub static RANGE_GLOBALS: &str = r##"
      g_time = g_json.secondsSinceEpoch || 0;
      g_rangeName = g_json.rangeName || 'Perf Marker Name';
      g_device = g_json.device || {};
      g_device.gpuName = g_device.gpuName || 'Unknown GPU';
      g_device.chipName = g_device.chipName || 'Unknown Chip';
      g_device.clockLockingStatus = g_device.clockLockingStatus || 'Unknown';

      g_counters = g_json.counters || {};
      g_ratios = g_json.ratios || {};
      g_throughputs = g_json.throughputs || {};

      g_allMetricNames = new Set();
      [g_counters, g_ratios, g_throughputs].forEach(function(metricDict) {
        for (const [base, submetrics] of Object.entries(metricDict)) {
          for (const [submetric, value] of Object.entries(submetrics)) {
            var metricName = base + '.' + submetric;
            g_allMetricNames.add(metricName);
          }
        }
      });

      // for debugging
      g_debug = (g_json.debug == undefined) ? true : g_json.debug;
      g_populateDummyValues = (g_json.populateDummyValues == undefined) ? true : g_json.populateDummyValues;
      g_counters_referenced = new Set();
      g_ratios_referenced = new Set();
      g_throughputs_referenced = new Set();
    </script>
"##;

pub static SUMMARY_GLOBALS: &str = r##"
      g_time = g_json.secondsSinceEpoch || 0;
      g_device = g_json.device || {};
      g_device.gpuName = g_device.gpuName || 'Unknown GPU';
      g_device.chipName = g_device.chipName || 'Unknown Chip';

      g_ranges = g_json.ranges || [];
      g_range_file_names = g_json.range_file_names || [];
      g_ranges_counters = g_json.rangesCounters || {};
      g_ranges_ratios = g_json.rangesRatios || {};
      g_ranges_throughputs = g_json.rangesThroughputs || {};

      g_counters = {};
      g_ratios = {};
      g_throughputs = {};

      g_allMetricNames = new Set();
      if (g_ranges.length) {
        // Each range has identical metrics, so we will just use the first range as a representative.
        var firstRangeName = g_ranges[0];
        counters = g_ranges_counters[firstRangeName] || {};
        ratios = g_ranges_ratios[firstRangeName] || {};
        throughputs = g_ranges_throughputs[firstRangeName] || {};
        [counters, ratios, throughputs].forEach(function(metricDict) {
          for (const [base, submetrics] of Object.entries(metricDict)) {
            for (const [submetric, value] of Object.entries(submetrics)) {
              var metricName = base + '.' + submetric;
              g_allMetricNames.add(metricName);
            }
          }
        });
      }

      // for debugging
      g_debug = (g_json.debug == undefined) ? true : g_json.debug;
      g_populateDummyValues = (g_json.populateDummyValues == undefined) ? true : g_json.populateDummyValues;
      if (g_populateDummyValues) {
        g_ranges.push('Q0 / FRAME');
        g_range_file_names.push('00000_FRAME.html');
        g_ranges.push('Q0 / LEFT_EYE');
        g_range_file_names.push('00001_LEFT_EYE.html');
        g_ranges.push('Q0 / LEFT_EYE / SCENE');
        g_range_file_names.push('00002_SCENE.html');
        g_ranges.push('Q0 / LEFT_EYE / SCENE / GPU_PARTICLES');
        g_range_file_names.push('00003_GPU_PARTICLES.html');
        g_ranges.push('Q0 / LEFT_EYE / SCENE / VOLUMETRIC_CLOUDS_SHADOWGEN');
        g_range_file_names.push('00004_VOLUMETRIC_CLOUDS_SHADOWGEN.html');
        g_ranges.push('Q0 / LEFT_EYE / SCENE / ' + 'I_AM_A_LONG' + 'G'.repeat(50) + '_STRING');
        g_range_file_names.push('00005_I_AM_A_LONG_STRING.html');
      }
      g_counters_referenced = new Set();
      g_ratios_referenced = new Set();
      g_throughputs_referenced = new Set();
    </script>
"##;

pub static DEBUG_SECTIONS_HIDE: &str = r##"
        if (!g_debug) {
          var debugSections = document.getElementsByClassName('debug_section');
          for(debugSection of debugSections) {
            debugSection.style.display = "none";
          }
        }

        convertAllTablesToCssTooltips();
"##;

pub static TEMPLATE_RANGE_REPORT: &str = r##"
<html>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>

  <head>
    <title>MyRangeName</title>

    <style id="ReportStyle">
{css | format_unescaped}
    </style>


    <script type="text/JavaScript">
{javascript | format_unescaped}
{handlers | format_unescaped}{{ for table in tables }}{table.jsfunc | format_unescaped}{{ endfor }}
      function onBodyLoaded() \{
        document.title = g_rangeName;
        document.getElementById('titlebar_text').innerHTML = g_rangeName;

        // Call the onClick handlers to react to the initial checked state.  This allows controlling of the input elements' default "checked" state in the HTML.
        onClick_ShowWorkflow();
        onClick_MobileLayout();

{on_body_loaded | format_unescaped}
      }
    </script>

  </head>

  <body onload="onBodyLoaded()" style="background-color:#202020;">
    <noscript>
      <p>Enable javascript to see report contents</span>
    </noscript>
{title_area | format_unescaped}{{ for section in sections }}
      <div class="section">
{{ if section.title }}
        <div class="section_title">{section.title}</div>
{{ endif }}{{ for table in section.tables }}{{ if table.workflow }}
        <div class="workflow">{table.workflow | format_unescaped}</div>
{{ endif }}{table.html | format_unescaped}{{ if section.inter_table_spacing }}
        <br name="table_spacing">
{{ endif }}{{ endfor }}
      </div>
{{ endfor }}{{ for debug in debug_sections }}
      <div class="debug_section">
{debug | format_unescaped}
      </div>
{{ endfor }}{footer | format_unescaped}{globals | format_unescaped}
  </body>
</html>
"##;

pub static TEMPLATE_SUMMARY_REPORT: &str = r##"
<html>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>

  <head>
    <title>Summary</title>

    <style id="ReportStyle">
{css | format_unescaped}
    </style>


    <script type="text/JavaScript">
{javascript | format_unescaped}

{{ for table in tables }}{table.jsfunc | format_unescaped}{{ endfor }}
      function onBodyLoaded() \{
{on_body_loaded | format_unescaped}
      }
    </script>

  </head>

  <body onload="onBodyLoaded()" style="background-color:#202020;">
    <noscript>
      <p>Enable javascript to see report contents</span>
    </noscript>
{title_area | format_unescaped}{{ for section in sections }}
      <div class="section">
{{ if section.title }}
        <div class="section_title">{section.title}</div>
{{ endif }}{{ for table in section.tables }}{{ if table.workflow }}
        <div class="workflow">{table.workflow | format_unescaped}</div>
{{ endif }}{table.html | format_unescaped}{{ endfor }}
      </div>
{{ endfor }}{{ for debug in debug_sections }}
      <div class="debug_section">
{debug | format_unescaped}
      </div>
{{ endfor }}{footer | format_unescaped}{globals | format_unescaped}
  </body>
</html>
"##;
