use crate::tables::{cell_counters, js_function, metric_cell, quote, TableGenerator};
use crate::types::{strings, RequiredMetrics};

#[derive(Debug, Clone)]
pub struct ThroughputPipe {
    pub name: &'static str,
    pub description: &'static str,
    /// Counter whose %-of-peak stands for the pipe; empty means the
    /// instruction counter is used.
    pub activity: &'static str,
    pub has_inst_executed: bool,
}

impl ThroughputPipe {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        ThroughputPipe {
            name,
            description,
            activity: "",
            has_inst_executed: true,
        }
    }

    /// A pipe measured only by its activity counter.
    pub const fn activity_only(name: &'static str, description: &'static str, activity: &'static str) -> Self {
        ThroughputPipe {
            name,
            description,
            activity,
            has_inst_executed: false,
        }
    }

    pub fn inst_executed(&self) -> String {
        if self.has_inst_executed {
            format!("sm__inst_executed_pipe_{}", self.name)
        } else {
            String::new()
        }
    }

    fn counters(&self) -> Vec<String> {
        let mut counters = Vec::new();
        if self.has_inst_executed {
            counters.push(self.inst_executed());
        }
        if !self.activity.is_empty() {
            counters.push(self.activity.to_string());
        }
        counters
    }
}

/// Instruction rate and utilization of each SM pipeline.
#[derive(Debug, Clone, Default)]
pub struct SmThroughputs {
    pub pipes: Vec<ThroughputPipe>,
}

impl SmThroughputs {
    pub fn new(pipes: Vec<ThroughputPipe>) -> Self {
        SmThroughputs { pipes }
    }
}

impl TableGenerator for SmThroughputs {
    fn name(&self) -> String {
        "SmThroughputs".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="SM-Instruction-Throughput">
          <thead>
            <tr>
              <th colspan="2" class="la tablename">SM Instruction Throughput</th>
              <th colspan="1" class="ca">GPU Total</th>
              <th colspan="2" class="ca">per-SM</th>
              <th colspan="2" class="ca">%-of-Peak</th>
            </tr>
            <tr>
              <th class="la">Description</th>
              <th class="la">Pipeline</th>
              <th class="la">Warp Inst</th>
              <th class="ra">IPC</th>
              <th class="ra">&#x25C2;Peak</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_sm_throughput">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = self.pipes.iter().map(|pipe| {
            format!(
                "          new Row({:<20}, {:<30}, {:<30}, {:<60}),",
                quote(pipe.name),
                quote(&pipe.inst_executed()),
                quote(pipe.activity),
                quote(pipe.description)
            )
        });
        js_function(
            r##"
      function tbody_SmThroughput(tbody) {
        class Row {
          constructor(name, instExecuted, activity, description) {
            this.name = name;
            this.instExecuted = instExecuted;
            this.activity = activity;
            this.description = description;
          }
        }

        let pipes = [
"##,
            rows,
            r##"
        ];

        for (const pipe of pipes) {
          const instExecuted  = pipe.instExecuted;
          const sum     = instExecuted ? getCounterValue(instExecuted, 'sum') : new NotAvailable;
          const sumStr  = instExecuted ? instExecuted + '.sum' : '';
          const ipc     = instExecuted ? getCounterValue(instExecuted, 'avg.per_cycle_elapsed') : new NotAvailable;
          const ipcStr  = instExecuted ? instExecuted + '.avg.per_cycle_elapsed' : '';
          const ppc     = instExecuted ? getCounterValue(instExecuted, 'avg.peak_sustained') : new NotAvailable;
          const ppcStr  = instExecuted ? instExecuted + '.avg.peak_sustained' : '';
          const pct     = pipe.activity ? getCounterPct(pipe.activity) : getCounterPct(instExecuted);
          const pctStr  = pipe.activity ? getCounterPctStr(pipe.activity) : getCounterPctStr(instExecuted);

          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", pipe.description);
          addCellSimple(trow, "la subhdr", pipe.name);
          addCellSimple(trow, "ra", format_sum(sum), passThrough=false, formatMetricFormula(sumStr));
          addCellSimple(trow, "ra", format_avg(ipc, 2), passThrough=false, formatMetricFormula(ipcStr));
          addCellSimple(trow, "ra", format_avg(ppc, 2), passThrough=false, formatMetricFormula(ppcStr));
          addCellSimple(trow, "ra", format_pct(pct), passThrough=false, formatMetricFormula(pctStr));
          addCellSimple(trow, "la comp", toBarChart(pct, '█'), passThrough=false, formatMetricFormula(pctStr));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_SmThroughput(document.getElementById('tbody_sm_throughput'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: self.pipes.iter().flat_map(ThroughputPipe::counters).collect(),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"SM Instruction Throughput:
Determine which shader pipelines are limiting performance, and their corresponding shader instructions.
Since all pipelines execute in parallel, it is possible for multiple pipelines to reach 100% simultaneously.
"##.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct InstPipe {
    pub name: &'static str,
    pub description: &'static str,
    pub has_thread_inst_executed: bool,
}

impl InstPipe {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        InstPipe {
            name,
            description,
            has_thread_inst_executed: false,
        }
    }

    /// A pipe that also reports predicated-on thread instructions.
    pub const fn with_threads(name: &'static str, description: &'static str) -> Self {
        InstPipe {
            name,
            description,
            has_thread_inst_executed: true,
        }
    }

    fn is_total(&self) -> bool {
        self.name == "total"
    }

    pub fn inst_executed(&self) -> String {
        if self.is_total() {
            "sm__inst_executed".to_string()
        } else {
            format!("sm__inst_executed_pipe_{}", self.name)
        }
    }

    pub fn thread_inst_executed(&self) -> String {
        if self.is_total() {
            "smsp__thread_inst_executed_pred_on".to_string()
        } else if self.has_thread_inst_executed {
            format!("sm__thread_inst_executed_pipe_{}_pred_on", self.name)
        } else {
            String::new()
        }
    }

    fn counters(&self) -> Vec<String> {
        let thread = self.thread_inst_executed();
        let mut counters = vec![self.inst_executed()];
        if !thread.is_empty() {
            counters.push(thread);
        }
        counters
    }
}

/// Warp and thread instruction counts per pipeline.
#[derive(Debug, Clone, Default)]
pub struct SmInstExecuted {
    pub pipes: Vec<InstPipe>,
}

impl SmInstExecuted {
    pub fn new(pipes: Vec<InstPipe>) -> Self {
        SmInstExecuted { pipes }
    }
}

impl TableGenerator for SmInstExecuted {
    fn name(&self) -> String {
        "SmInstExecuted".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="SM-Instruction-Execution">
          <thead>
            <tr>
              <th colspan="2" class="la tablename">SM Instruction Execution</th>
              <th colspan="2" class="ca">GPU Total</th>
              <th colspan="2" class="ca">Threads Per Warp (Max 32)</th>
              <th colspan="2" class="ca">Avg Executed Per Warp</th>
            </tr>
            <tr>
              <th class="la">Description</th>
              <th class="la">Pipeline</th>
              <th class="la">Warp Inst</th>
              <th class="la">Thread Inst</th>
              <th class="la">Avg Active Threads</th>
              <th class="la">Active Thread%</th>
              <th class="la">Warp Inst</th>
              <th class="la">Thread Inst</th>
            </tr>
          </thead>
          <tbody id="tbody_sm_inst_executed">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = self.pipes.iter().map(|pipe| {
            format!(
                "          new Pipe({:<20}, {:<60}, {:<40}, {:<50}),",
                quote(pipe.name),
                quote(pipe.description),
                quote(&pipe.inst_executed()),
                quote(&pipe.thread_inst_executed())
            )
        });
        js_function(
            r##"
      function tbody_SmInstExecuted(tbody) {
        class Pipe {
          constructor(name, description, instExecuted, threadInstExecuted) {
            this.name = name;
            this.description = description;
            this.instExecuted = instExecuted
            this.threadInstExecuted = threadInstExecuted
          }
        }

        let pipes = [
"##,
            rows,
            r##"
        ];

        const warpsLaunched = getCounterValue('sm__warps_launched', 'sum');
        const warpsLaunchedStr = 'sm__warps_launched.sum';

        for (const pipe of pipes) {
          const warpCounter   = pipe.instExecuted;
          const threadCounter = pipe.threadInstExecuted;

          const warpInst = getCounterValue(warpCounter, 'sum');
          const warpInstStr = warpCounter + '.sum';
          const warpInstPerWarpLaunched = safeDiv(warpInst, warpsLaunched);
          const warpInstPerWarpLaunchedStr = warpInstStr + ' / ' + warpsLaunchedStr;
          threadInst = new NotAvailable;
          threadInstStr = '';
          threadsPerWarp = new NotAvailable;
          threadsPerWarpStr = '';
          threadsPerWarpPct = new NotAvailable;
          threadsPerWarpPctStr = '';
          threadInstPerWarpLaunched = new NotAvailable;
          threadInstPerWarpLaunchedStr = '';
          if (threadCounter != '') {
            threadInst = getCounterValue(threadCounter, 'sum');
            threadInstStr = threadCounter + '.sum';
            threadsPerWarp = safeDiv(threadInst, warpInst);
            threadsPerWarpStr = threadInstStr + ' / ' + warpInstStr;
            threadsPerWarpPct = 100 * threadsPerWarp / 32;
            threadsPerWarpPctStr = threadsPerWarpStr + '/ 32 * 100'
            threadInstPerWarpLaunched = safeDiv(threadInst, warpsLaunched);
            threadInstPerWarpLaunchedStr = threadInstStr + ' / ' + warpsLaunchedStr;
          }

          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", pipe.description);
          addCellSimple(trow, "la subhdr", pipe.name);
          addCellSimple(trow, "ra", format_sum(warpInst), passThroughput = false, formatMetricFormula(warpInstStr));
          addCellSimple(trow, "ra", format_sum(threadInst), passThroughput = false, formatMetricFormula(threadInstStr));
          addCellSimple(trow, "ra", format_avg(threadsPerWarp), passThroughput = false, formatMetricFormula(threadsPerWarpStr));
          addCellSimple(trow, "ra", format_pct(threadsPerWarpPct), passThroughput = false, formatMetricFormula(threadsPerWarpPctStr));
          addCellSimple(trow, "ra", format_avg(warpInstPerWarpLaunched), passThroughput = false, formatMetricFormula(warpInstPerWarpLaunchedStr));
          addCellSimple(trow, "ra", format_avg(threadInstPerWarpLaunched), passThroughput = false, formatMetricFormula(threadInstPerWarpLaunchedStr));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_SmInstExecuted(document.getElementById('tbody_sm_inst_executed'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        let mut counters = strings(&["sm__warps_launched"]);
        counters.extend(self.pipes.iter().flat_map(InstPipe::counters));
        RequiredMetrics {
            counters,
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"SM Instruction Execution:
This table displays shader instruction counts (total and per-pipeline).  Low Active Thread% implies either heavy branch divergence (threads taking separate if/else code paths), or low numbers of launched threads per warp.
Cross-check thread launch statistics in the <a href="#SM-Shader-Execution">SM Shader Execution</a> table.
"##.to_string()
    }
}

/// `(description, name, counter)`
const WARP_ISSUE_STALL_REASONS: &[(&str, &str, &str)] = &[
    ("All; sum of all other reasons (waiting + issuing)", "Total", "smsp__warps_active"),
    ("Waiting for a synchronization barrier", "Barrier", "smsp__warps_issue_stalled_barrier"),
    ("Waiting for dynamic branch target computation and warp PC update", "Branch Resolving", "smsp__warps_issue_stalled_branch_resolving"),
    ("Waiting for a busy pipeline at the dispatch stage; wasted scheduler cycle", "Dispatch Stall", "smsp__warps_issue_stalled_dispatch_stall"),
    ("Waiting for memory instructions or pixout to complete after warp EXIT", "Drain after Exit", "smsp__warps_issue_stalled_drain"),
    ("Waiting for IMC (immediate constant cache) - for static constant addresses", "IMC Miss", "smsp__warps_issue_stalled_imc_miss"),
    ("Waiting for free space in the LG Input FIFO: local/global instruction issue to LSU", "LG Throttle", "smsp__warps_issue_stalled_lg_throttle"),
    ("Waiting on variable latency dependency: LSU (local/global), TEX (texture, surface)", "Long Scoreboard", "smsp__warps_issue_stalled_long_scoreboard"),
    ("Waiting for a math pipe to become available", "Math Pipe Throttle", "smsp__warps_issue_stalled_math_pipe_throttle"),
    ("Waiting for a memory barrier", "Memory Barrier", "smsp__warps_issue_stalled_membar"),
    ("Waiting for free space in the MIO Input FIFO: ADU, CBU, FP64, LSU (not local/global), IPA", "MIO Throttle", "smsp__warps_issue_stalled_mio_throttle"),
    ("Waiting for a miscellaneous reason (should be rare)", "Misc", "smsp__warps_issue_stalled_misc"),
    ("Waiting for instruction fetch, or instruction cache miss", "No Instruction", "smsp__warps_issue_stalled_no_instruction"),
    ("Waiting for a scheduler cycle, from an otherwise ready-to-issue warp", "Not Selected", "smsp__warps_issue_stalled_not_selected"),
    ("Issuing an instruction", "Selected", "smsp__warps_issue_stalled_selected"),
    ("Waiting on variable latency dependency: XU, FP64, LSU (not local/global), ADU, CBU, LDC/IDC", "Short Scoreboard", "smsp__warps_issue_stalled_short_scoreboard"),
    ("Waiting for a nanosleep timer to expire", "Sleeping", "smsp__warps_issue_stalled_sleeping"),
    ("Waiting for free space in the TEX Input FIFO: TEX pipe texture or surface instructions", "TEX Throttle", "smsp__warps_issue_stalled_tex_throttle"),
    ("Waiting on a fixed latency dependency", "Wait", "smsp__warps_issue_stalled_wait"),
];

/// Where warps spend their cycles, sorted by the client.
#[derive(Debug, Clone)]
pub struct WarpIssueStalls {
    pub reasons: Vec<(&'static str, &'static str, &'static str)>,
}

impl Default for WarpIssueStalls {
    fn default() -> Self {
        WarpIssueStalls {
            reasons: WARP_ISSUE_STALL_REASONS.to_vec(),
        }
    }
}

impl WarpIssueStalls {
    /// Drops the reason named `name`, for chips that do not count it.
    pub fn without(mut self, name: &str) -> Self {
        self.reasons.retain(|(_, n, _)| *n != name);
        self
    }
}

impl TableGenerator for WarpIssueStalls {
    fn name(&self) -> String {
        "WarpIssueStalls".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="SM-Warp-Issue-Stall-Reasons">
          <thead>
            <tr>
              <th colspan="2" class="la tablename">SM Warp Issue Stall Reasons</th>
              <th colspan="3" class="ca">Avg Warp Latency</th>
              <th colspan="1" class="ca">Avg Inst Latency</th>
            </tr>
            <tr>
              <th class="la">Latency Reason</th>
              <th class="la">Name</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">Cycles</th>
              <th class="ra">Cycles</th>
            </tr>
          </thead>
          <tbody id="tbody_warp_issue_stalls">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = self.reasons.iter().map(|(desc, name, counter)| {
            format!(
                "        rows.push(new Row({:<80}, {:<30}, {:<50}));",
                quote(desc),
                quote(name),
                quote(counter)
            )
        });
        js_function(
            r##"
      function tbody_WarpIssueStalls(tbody) {
        const activeWarps = getCounterValue('smsp__warps_active', 'avg');
        const activeWarpsStr = 'smsp__warps_active.avg';
        const warpsLaunched = getCounterValue('smsp__warps_launched', 'avg');
        const warpsLaunchedStr = 'smsp__warps_launched.avg';
        const instExecuted = getCounterValue('smsp__inst_executed', 'avg');
        const instExecutedStr = 'smsp__inst_executed.avg';

        class Row {
          constructor(desc, name, counterName) {
            const counterValue = getCounterValue(counterName, 'avg');
            const counterStr = counterName + '.avg';
            this.desc = desc;
            this.name = name;
            this.pct = 100 * safeDiv(counterValue, activeWarps);
            this.pctStr = counterStr + ' / ' + activeWarpsStr + ' * 100';
            this.warpLatency = safeDiv(counterValue, warpsLaunched);
            this.warpLatencyStr = counterStr + ' / ' + warpsLaunchedStr;
            this.instLatency = safeDiv(counterValue, instExecuted);
            this.instLatencyStr = counterStr + ' / ' + instExecutedStr;
          }
        }

        let rows = [];
"##,
            rows,
            r##"
        rows.sort((lhsrow, rhsrow) => compareNumbers(rhsrow.pct, lhsrow.pct)); // sort in descending order

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.desc, passThrough=true);
          addCellSimple(trow, "la subhdr", row.name, passThrough=true);
          addCellSimple(trow, "ra", format_pct(row.pct), passThrough=false, formatMetricFormula(row.pctStr));
          addCellSimple(trow, "la comp", toBarChart(row.pct, '█'), passThrough=false, formatMetricFormula(row.pctStr));
          addCellSimple(trow, "ra", format_avg(row.warpLatency), passThrough=false, formatMetricFormula(row.warpLatencyStr));
          addCellSimple(trow, "ra", format_avg(row.instLatency), passThrough=false, formatMetricFormula(row.instLatencyStr));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_WarpIssueStalls(document.getElementById('tbody_warp_issue_stalls'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        let mut counters = strings(&["smsp__inst_executed", "smsp__warps_launched"]);
        counters.extend(self.reasons.iter().map(|(_, _, counter)| counter.to_string()));
        RequiredMetrics {
            counters,
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"SM Warp Issue Stall Reasons:
This table shows which types of instructions contribute most to shader warp execution time.
For large workloads where the <a href="#SM-Shader-Execution">total number of warps launched</a> can fill every SM's warp slots, reducing the average warp latency will usually improve wall clock time.
The table is sorted; the first row always has the highest contribution.
"##.to_string()
    }
}

/// `(stage name, counter suffix)`; the empty suffix is the total.
const SHADER_STAGES: &[(&str, &str)] = &[
    ("Total", ""),
    ("Vertex Shader", "_shader_vs"),
    ("Tess Control Shader", "_shader_tcs"),
    ("Tess Eval Shader", "_shader_tes"),
    ("Geometry Shader", "_shader_gs"),
    ("Pixel Shader", "_shader_ps"),
    ("Compute Shader", "_shader_cs"),
];

/// Launch and instruction statistics per shader stage.
#[derive(Debug, Clone, Default)]
pub struct SmShaderExecution;

impl TableGenerator for SmShaderExecution {
    fn name(&self) -> String {
        "SmShaderExecution".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="SM-Shader-Execution">
          <thead>
            <tr>
              <th colspan="1" class="la tablename">SM Shader Execution</th>
              <th colspan="3" class="ca">Shader Launch (GPU Total)</th>
              <th colspan="2" class="ca">Warp Instructions (GPU Total)</th>
              <th colspan="2" class="ca">%-of-Total-Warp-Inst</th>
            </tr>
            <tr>
              <th class="la">Shader Stage</th>
              <th class="la">Warps Launched</th>
              <th class="la">Threads Launched</th>
              <th class="la">Threads/Warp</th>
              <th class="ra">Warp Inst Executed</th>
              <th class="ra">Inst/Warp</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_sm_shader_execution">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = SHADER_STAGES.iter().map(|(stage, suffix)| {
            format!("        rows.push(new Row({:<30}, {:<20}));", quote(stage), quote(suffix))
        });
        js_function(
            r##"
      function tbody_SmShaderExecution(tbody) {
        const warpsLaunched = getCounterValue('sm__warps_launched', 'sum');
        const warpInstExecuted = getCounterValue('sm__inst_executed', 'sum');
        const warpInstExecutedStr = 'sm__inst_executed.sum';

        class Row {
          constructor(stageName, counterSuffix) {
            this.stageName = stageName;
            this.launchedWarps = getCounterValue('sm__warps_launched' + counterSuffix, 'sum');
            this.launchedWarpsStr = 'sm__warps_launched' + counterSuffix + '.sum';
            this.launchedThreads = getCounterValue('sm__threads_launched' + counterSuffix, 'sum');
            this.launchedThreadsStr = 'sm__threads_launched' + counterSuffix + '.sum';
            this.launchedThreadsPerWarp = safeDiv(this.launchedThreads, this.launchedWarps);
            this.launchedThreadsPerWarpStr = this.launchedThreadsStr + ' / ' + this.launchedWarpsStr;
            this.instWarp = getCounterValue('smsp__inst_executed' + counterSuffix, 'sum');
            this.instWarpStr = 'smsp__inst_executed' + counterSuffix + '.sum';
            this.instPerWarp = safeDiv(this.instWarp, this.launchedWarps);
            this.instPerWarpStr = this.instWarpStr + ' / ' + this.launchedWarpsStr;
            this.pct = safeDiv(this.instWarp, warpInstExecuted) * 100;
            this.pctStr = this.instWarpStr + ' / ' + warpInstExecutedStr + ' * 100';
          }
        }

        let rows = [];
"##,
            rows,
            r##"
        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.stageName);
          addCellSimple(trow, "ra", format_sum(row.launchedWarps), passThroughput = false, formatMetricFormula(row.launchedWarpsStr));
          addCellSimple(trow, "ra", format_sum(row.launchedThreads), passThroughput = false, formatMetricFormula(row.launchedThreadsStr));
          addCellSimple(trow, "ra", format_avg(row.launchedThreadsPerWarp), passThroughput = false, formatMetricFormula(row.launchedThreadsPerWarpStr));
          addCellSimple(trow, "ra", format_sum(row.instWarp), passThroughput = false, formatMetricFormula(row.instWarpStr));
          addCellSimple(trow, "ra", format_avg(row.instPerWarp), passThroughput = false, formatMetricFormula(row.instPerWarpStr));
          addCellSimple(trow, "ra", format_pct(row.pct), passThroughput = false, formatMetricFormula(row.pctStr));
          addCellSimple(trow, "la comp", toBarChart(row.pct, '█'), passThroughput = false, formatMetricFormula(row.pctStr));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_SmShaderExecution(document.getElementById('tbody_sm_shader_execution'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        let mut counters = Vec::new();
        for (_, suffix) in SHADER_STAGES {
            counters.push(format!("smsp__inst_executed{suffix}"));
            counters.push(format!("sm__threads_launched{suffix}"));
            counters.push(format!("sm__warps_launched{suffix}"));
        }
        counters.push("sm__inst_executed".to_string());
        RequiredMetrics {
            counters,
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"SM Shader Execution:
Determine which shader stages executed the most instructions, and the launched thread efficiency (Threads/Warp).
Threads Launched values are equivalent to "shader invocations" in the D3D/GL/Vulkan specifications, except for Pixel Shaders where helper threads are also counted.
All values are presented as GPU totals.
"##.to_string()
    }
}

const NA: &str = "NotApplicable";

/// `(stage, any reason, warp alloc, register alloc, attr/shmem alloc,
/// other reason name, other reason counter)`
const WARP_LAUNCH_STALLS: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("Vertex Shader", "tpc__warp_launch_cycles_stalled_shader_vs", NA, NA, NA, NA, NA),
    ("Tess Control Shader", "tpc__warp_launch_cycles_stalled_shader_tcs", NA, NA, NA, NA, NA),
    ("Tess Eval Shader", "tpc__warp_launch_cycles_stalled_shader_tes", NA, NA, NA, NA, NA),
    ("Geometry Shader", "tpc__warp_launch_cycles_stalled_shader_gs", NA, NA, NA, NA, NA),
    // the VTG warp and register allocation reasons are not counted
    ("VTG Shader", "tpc__warp_launch_cycles_stalled_shader_vtg", NA, NA, "tpc__pe2sm_vtg_isbe_allocation_cycles_stalled", NA, NA),
    (
        "Pixel Shader",
        "tpc__warp_launch_cycles_stalled_shader_ps",
        "tpc__warp_launch_cycles_stalled_shader_ps_reason_warp_allocation",
        "tpc__warp_launch_cycles_stalled_shader_ps_reason_register_allocation",
        "tpc__pe2sm_ps_tram_allocation_cycles_stalled",
        "Out-of-Order Exit",
        "tpc__warp_launch_cycles_stalled_shader_ps_reason_ooo_warp_completion",
    ),
    (
        "Compute Shader",
        NA,
        "tpc__warp_launch_cycles_stalled_shader_cs_reason_warp_allocation",
        "tpc__warp_launch_cycles_stalled_shader_cs_reason_register_allocation",
        "tpc__warp_launch_cycles_stalled_shader_cs_reason_shmem_allocation",
        "CTA Alloc",
        "tpc__warp_launch_cycles_stalled_shader_cs_reason_cta_allocation",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct SmWarpLaunchStalls;

impl TableGenerator for SmWarpLaunchStalls {
    fn name(&self) -> String {
        "SmWarpLaunchStalls".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="SM-Warp-Cant-Launch">
          <thead>
            <tr>
              <th colspan="1" class="la tablename">SM Warp Can't Launch Reasons</th>
              <th colspan="2" class="ca">Any Reason</th>
              <th colspan="2" class="ca">Warp Alloc</th>
              <th colspan="2" class="ca">Register Alloc</th>
              <th colspan="2" class="ca">Attr/ShMem Alloc</th>
              <th colspan="3" class="ca">Other</th>
            </tr>
            <tr>
              <th class="la">Stage</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">Reason</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_warp_launch_stalls">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = WARP_LAUNCH_STALLS.iter().map(|(stage, any, warp, reg, shm, other_name, other_metric)| {
            format!(
                "        rows.push(new Row({:<30}, {:<60}, {:<80}, {:<80}, {:<80}, {:<80}, {:<80}));",
                quote(stage),
                metric_cell(any),
                metric_cell(warp),
                metric_cell(reg),
                metric_cell(shm),
                metric_cell(other_name),
                metric_cell(other_metric)
            )
        });
        js_function(
            r##"
      function tbody_SmWarpLaunchStalls(tbody) {
        class Row {
          constructor(stageName, any, warp, reg, shm, otherName, otherMetric) {
            this.stageName = stageName;
            this.warpPct = getCounterPct(warp);
            this.warpPctStr = getCounterPctStr(warp);
            this.regPct = getCounterPct(reg);
            this.regPctStr = getCounterPctStr(reg);
            this.shmPct = getCounterPct(shm);
            this.shmPctStr = getCounterPctStr(shm);
            this.otherName = otherName;
            this.otherPct = getCounterPct(otherMetric);
            this.otherPctStr = getCounterPctStr(otherMetric);
            this.anyPct = any ? getCounterPct(any) : Math.max(this.warpPct, this.regPct, this.shmPct, this.otherPct);
            this.anyPctStr = any ? getCounterPctStr(any) : 'max(' + this.warpPctStr + ', ' + this.regPctStr + ', ' + this.shmPctStr + ', ' + this.otherPctStr + ')';
          }
        }

        let rows = [];
"##,
            rows,
            r##"
        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.stageName);
          addCellSimple(trow, "ra", format_pct(row.anyPct), passThroughput = false, formatMetricFormula(row.anyPctStr));
          addCellSimple(trow, "la comp", toBarChart(row.anyPct, '█'), passThroughput = false, formatMetricFormula(row.anyPctStr));
          addCellSimple(trow, "ra", format_pct(row.warpPct), passThroughput = false, formatMetricFormula(row.warpPctStr));
          addCellSimple(trow, "la comp", toBarChart(row.warpPct, '█'), passThroughput = false, formatMetricFormula(row.warpPctStr));
          addCellSimple(trow, "ra", format_pct(row.regPct), passThroughput = false, formatMetricFormula(row.regPctStr));
          addCellSimple(trow, "la comp", toBarChart(row.regPct, '█'), passThroughput = false, formatMetricFormula(row.regPctStr));
          addCellSimple(trow, "ra", format_pct(row.shmPct), passThroughput = false, formatMetricFormula(row.shmPctStr));
          addCellSimple(trow, "la comp", toBarChart(row.shmPct, '█'), passThroughput = false, formatMetricFormula(row.shmPctStr));
          addCellSimple(trow, "la", row.otherName);
          addCellSimple(trow, "ra", format_pct(row.otherPct), passThroughput = false, formatMetricFormula(row.otherPctStr));
          addCellSimple(trow, "la comp", toBarChart(row.otherPct, '█'), passThroughput = false, formatMetricFormula(row.otherPctStr));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_SmWarpLaunchStalls(document.getElementById('tbody_warp_launch_stalls'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::counters(&[
            "tpc__pe2sm_ps_tram_allocation_cycles_stalled",
            "tpc__pe2sm_vtg_isbe_allocation_cycles_stalled",
            "tpc__warp_launch_cycles_stalled_shader_cs_reason_cta_allocation",
            "tpc__warp_launch_cycles_stalled_shader_cs_reason_register_allocation",
            "tpc__warp_launch_cycles_stalled_shader_cs_reason_shmem_allocation",
            "tpc__warp_launch_cycles_stalled_shader_cs_reason_warp_allocation",
            "tpc__warp_launch_cycles_stalled_shader_gs",
            "tpc__warp_launch_cycles_stalled_shader_ps",
            "tpc__warp_launch_cycles_stalled_shader_ps_reason_ooo_warp_completion",
            "tpc__warp_launch_cycles_stalled_shader_ps_reason_register_allocation",
            "tpc__warp_launch_cycles_stalled_shader_ps_reason_warp_allocation",
            "tpc__warp_launch_cycles_stalled_shader_tcs",
            "tpc__warp_launch_cycles_stalled_shader_tes",
            "tpc__warp_launch_cycles_stalled_shader_vs",
            "tpc__warp_launch_cycles_stalled_shader_vtg",
        ])
    }

    fn workflow(&self) -> String {
        r##"SM Warp Can't Launch Reasons:
This table reveals the most heavily used shader resource, and can help to explain low warp occupancy.
If all values are zero, the workload is too small to fill every hardware warp slot, which is a form of starvation.
"##.to_string()
    }
}

/// One resource of [`SmResourceUsage`]. Cells hold a counter name or one of
/// the `NotApplicable`/`NotAvailable` placeholders.
#[derive(Debug, Clone)]
pub struct ResourceRow {
    pub resource: &'static str,
    pub total: &'static str,
    pub gfx: &'static str,
    pub vtg: &'static str,
    pub ps: &'static str,
    pub cs: &'static str,
}

impl ResourceRow {
    pub const fn new(
        resource: &'static str,
        total: &'static str,
        gfx: &'static str,
        vtg: &'static str,
        ps: &'static str,
        cs: &'static str,
    ) -> Self {
        ResourceRow { resource, total, gfx, vtg, ps, cs }
    }

    fn cells(&self) -> [&'static str; 5] {
        [self.total, self.gfx, self.vtg, self.ps, self.cs]
    }
}

/// Per-SM occupancy of warps, registers and shared storage by shader type.
#[derive(Debug, Clone, Default)]
pub struct SmResourceUsage {
    pub rows: Vec<ResourceRow>,
}

impl SmResourceUsage {
    pub fn new(rows: Vec<ResourceRow>) -> Self {
        SmResourceUsage { rows }
    }
}

impl TableGenerator for SmResourceUsage {
    fn name(&self) -> String {
        "SmResourceUsage".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="SM-Resource-Usage">
          <thead>
            <tr>
              <th colspan="1" class="la tablename">SM Resource Usage</th>
              <th colspan="3" class="ca">SM Total</th>
              <th colspan="3" class="ca">VTG Shader</th>
              <th colspan="3" class="ca">Pixel Shader</th>
              <th colspan="3" class="ca">Compute Shader</th>
            </tr>
            <tr>
              <th class="la">Stage</th>
              <th class="ra">per-cycle</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">per-cycle</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">per-cycle</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
              <th class="ra">per-cycle</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_sm_resource_usage">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = self.rows.iter().map(|row| {
            format!(
                "        new Row({:<20}, {:<60}, {:<60}, {:<60}, {:<60}, {:<60}),",
                quote(row.resource),
                metric_cell(row.total),
                metric_cell(row.gfx),
                metric_cell(row.vtg),
                metric_cell(row.ps),
                metric_cell(row.cs)
            )
        });
        js_function(
            r##"
      function tbody_SmResourceUsage(tbody) {
        let isValid = function(attr) {
          return !(attr instanceof NotApplicable || attr instanceof NotAvailable);
        };
        class Row {
          constructor(resource, tot, gfx, vtg, ps, cs) {
            this.resource = resource;
            this.tot = tot;
            this.gfx = gfx;
            this.vtg = vtg;
            this.ps = ps;
            this.cs = cs;

            if (isValid(tot)) {
              const totSmFactor = tot.includes('tpc__') ? 0.5 : 1;
              this.totValue = getCounterValue(tot, 'avg.per_cycle_elapsed') * totSmFactor;
              this.totValueStr = tot + '.avg.per_cycle_elapsed * ' + totSmFactor.toString();
              this.totPct = getCounterPct(tot);
              this.totPctStr = getCounterPctStr(tot);
            }

            if (isValid(gfx)) {
              const gfxSmFactor = gfx.includes('tpc__') ? 0.5 : 1;
              this.gfxValue = getCounterValue(gfx, 'avg.per_cycle_elapsed') * gfxSmFactor;
              this.gfxValueStr = gfx + '.avg.per_cycle_elapsed * ' + gfxSmFactor.toString();
              this.gfxPct = getCounterPct(gfx);
              this.gfxPctStr = getCounterPctStr(gfx);
            } else if (isValid(vtg) && isValid(ps)) {
              const vtgSmFactor = vtg.includes('tpc__') ? 0.5 : 1;
              this.vtgValue = getCounterValue(vtg, 'avg.per_cycle_elapsed') * vtgSmFactor;
              this.vtgValueStr = vtg + '.avg.per_cycle_elapsed * ' + vtgSmFactor.toString();
              this.vtgPct = getCounterPct(vtg);
              this.vtgPctStr = getCounterPctStr(vtg);
              const psSmFactor = vtg.includes('tpc__') ? 0.5 : 1;
              this.psValue = getCounterValue(ps, 'avg.per_cycle_elapsed') * psSmFactor;
              this.psValueStr = ps + '.avg.per_cycle_elapsed * ' + psSmFactor.toString();
              this.psPct = getCounterPct(ps);
              this.psPctStr = getCounterPctStr(ps);
            }

            if (isValid(cs)) {
              const csSmFactor = cs.includes('tpc__') ? 0.5 : 1;
              this.csValue = getCounterValue(cs, 'avg.per_cycle_elapsed') * csSmFactor;
              this.csValueTooltip = cs + '.avg.per_cycle_elapsed * ' + csSmFactor.toString();
              this.csPct = getCounterPct(cs);
              this.csPctTooltip = cs + '.avg.pct_of_peak_sustained_elapsed';
            }
          }
        }

        let rows = [
"##,
            rows,
            r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, 'la', row.resource);

          if (isValid(row.tot)) {
            addCellSimple(trow, "ra", format_avg(row.totValue), passThroughput = false, formatMetricFormula(row.totValueStr));
            addCellSimple(trow, "ra", format_pct(row.totPct), passThroughput = false, formatMetricFormula(row.totPctStr));
            addCellSimple(trow, "la comp", toBarChart(row.totPct, '█'), passThroughput = false, formatMetricFormula(row.totPctStr));
          } else {
            addCellAttr(trow, {'colspan':3, 'class':"ra"}, row.tot);
          }

          if (isValid(row.gfx)) {
            addCellAttr(trow, { colspan:3, class:"ra"}, '<em>VTG+PS Combined</em> ⮕', true);
            addCellSimple(trow, "ra", format_avg(row.gfxValue), passThroughput = false, formatMetricFormula(row.gfxValueStr));
            addCellSimple(trow, "ra", format_pct(row.gfxPct), passThroughput = false, formatMetricFormula(row.gfxPctStr));
            addCellSimple(trow, "la comp", toBarChart(row.gfxPct, '█'), passThroughput = false, formatMetricFormula(row.gfxPctStr));
          } else if (isValid(row.vtg) && isValid(row.ps)) {
            addCellSimple(trow, "ra", format_avg(row.vtgValue), passThroughput = false, formatMetricFormula(row.vtgValueStr));
            addCellSimple(trow, "ra", format_pct(row.vtgPct), passThroughput = false, formatMetricFormula(row.vtgPctStr));
            addCellSimple(trow, "la comp", toBarChart(row.vtgPct, '█'), passThroughput = false, formatMetricFormula(row.vtgPctStr));
            addCellSimple(trow, "ra", format_avg(row.psValue), passThroughput = false, formatMetricFormula(row.psValueStr));
            addCellSimple(trow, "ra", format_pct(row.psPct), passThroughput = false, formatMetricFormula(row.psPctStr));
            addCellSimple(trow, "la comp", toBarChart(row.psPct, '█'), passThroughput = false, formatMetricFormula(row.psPctStr));
          } else {
            if (row.gfx instanceof NotAvailable) {
              addCellAttr(trow, {'colspan':6, 'class':"ra"}, row.gfx);
            } else if (row.vtg instanceof NotAvailable && row.ps instanceof NotAvailable) {
              addCellAttr(trow, {'colspan':3, 'class':"ra"}, row.vtg);
              addCellAttr(trow, {'colspan':3, 'class':"ra"}, row.ps);
            } else {
              addCellAttr(trow, {'colspan':6, 'class':"ra"}, new NotApplicable);
            }
          }

          if (isValid(row.cs)) {
            addCellSimple(trow, "ra", format_avg(row.csValue), passThroughput = false, formatMetricFormula(row.csValueTooltip));
            addCellSimple(trow, "ra", format_pct(row.csPct), passThroughput = false, formatMetricFormula(row.csPctTooltip));
            addCellSimple(trow, "la comp", toBarChart(row.csPct, '█'), passThroughput = false, formatMetricFormula(row.csPctTooltip));
          } else {
            addCellAttr(trow, {'colspan':3, 'class':"ra"}, row.cs);
          }
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_SmResourceUsage(document.getElementById('tbody_sm_resource_usage'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: cell_counters(self.rows.iter().flat_map(ResourceRow::cells)),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"SM Resource Usage:
This table reveals the quantity of each shader resource used on average, and can help to explain low warp occupancy.  All values are presented per-SM.
"##.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput_pipe_counters() {
        let gen = SmThroughputs::new(vec![
            ThroughputPipe::new("alu", "INT32 except multiply; FP32 comparison"),
            ThroughputPipe::activity_only("shared", "Shared Pipe Dispatch (FP16,Tensor)", "sm__pipe_shared_cycles_active"),
        ]);
        let t = gen.make_data_table();
        assert_eq!(t.required_counters, vec!["sm__inst_executed_pipe_alu", "sm__pipe_shared_cycles_active"]);
        assert!(t.jsfunc.contains(&format!("new Row({:<20}, {:<30}, ", "'shared'", "''")));
    }

    #[test]
    fn test_inst_pipe_total_and_threads() {
        let total = InstPipe::new("total", "All instructions");
        assert_eq!(total.inst_executed(), "sm__inst_executed");
        assert_eq!(total.thread_inst_executed(), "smsp__thread_inst_executed_pred_on");
        assert_eq!(InstPipe::new("tex", "Texture").thread_inst_executed(), "");
        assert_eq!(
            InstPipe::with_threads("fma", "FP32").thread_inst_executed(),
            "sm__thread_inst_executed_pipe_fma_pred_on"
        );
        let t = SmInstExecuted::new(vec![total, InstPipe::new("tex", "Texture")]).make_data_table();
        assert_eq!(
            t.required_counters,
            vec!["sm__warps_launched", "sm__inst_executed", "smsp__thread_inst_executed_pred_on", "sm__inst_executed_pipe_tex"]
        );
    }

    #[test]
    fn test_warp_issue_stalls_without_reason() {
        let full = WarpIssueStalls::default().make_data_table();
        let trimmed = WarpIssueStalls::default().without("IMC Miss").make_data_table();
        assert_eq!(full.required_counters.len(), 21);
        assert_eq!(trimmed.required_counters.len(), 20);
        assert!(!trimmed.jsfunc.contains("imc_miss"));
        assert_eq!(&trimmed.required_counters[..3], &["smsp__inst_executed", "smsp__warps_launched", "smsp__warps_active"]);
    }

    #[test]
    fn test_shader_execution_counters() {
        let t = SmShaderExecution.make_data_table();
        assert_eq!(t.required_counters.len(), 22);
        assert_eq!(t.required_counters[0], "smsp__inst_executed");
        assert_eq!(t.required_counters.last().map(String::as_str), Some("sm__inst_executed"));
    }

    #[test]
    fn test_warp_launch_stalls_placeholders() {
        let t = SmWarpLaunchStalls.make_data_table();
        assert!(t.jsfunc.contains(&format!("rows.push(new Row({:<30}, {:<60}, ", "'Compute Shader'", "new NotApplicable")));
        assert!(t.jsfunc.contains("'CTA Alloc'"));
    }

    #[test]
    fn test_resource_usage_skips_placeholders() {
        let gen = SmResourceUsage::new(vec![
            ResourceRow::new("Warps", "sm__warps_active", NA, "tpc__warps_active_shader_vtg", "tpc__warps_active_shader_ps", "tpc__warps_active_shader_cs"),
            ResourceRow::new("CTAs", NA, NA, NA, NA, "sm__ctas_active"),
        ]);
        let t = gen.make_data_table();
        assert_eq!(t.required_counters.len(), 5);
        assert!(t.jsfunc.contains(&format!("new Row({:<20}, {:<60}, ", "'CTAs'", "new NotApplicable")));
    }
}
