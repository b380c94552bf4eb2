use crate::tables::{cell_counters, js_function, quote, TableGenerator};
use crate::types::RequiredMetrics;

const NA: &str = "NotApplicable";
const NV: &str = "NotAvailable";

/// `[stage, input prims, input verts, input attrs, culled prims,
/// output prims, output verts, output attrs]`
const PRIMITIVE_STAGES: &[[&str; 8]] = &[
    ["Primitive Distributor", "pda__input_prims", "pda__input_verts", NA, NA, "pda__input_prims", NV, NA],
    // the distributor's prim count stays constant through the vertex shader
    ["Vertex Shader", "pda__input_prims", "sm__threads_launched_shader_vs", NV, NA, "pda__input_prims", "sm__threads_launched_shader_vs", NV],
    ["Tess. Control Shader", NA, "sm__threads_launched_shader_tcs", NV, NA, NV, NV, NV],
    ["Tess. Eval Shader", NV, "sm__threads_launched_shader_tes", NV, NA, NV, NV, NV],
    ["Geometry Shader", NV, "sm__threads_launched_shader_gs", NV, NA, NV, NV, NV],
    ["Stream (Transform Feedback)", NA, NA, NA, NA, "pes__stream_output_prims", "pes__stream_output_verts", "pes__stream_output_attrs"],
    ["Primitive Assembly Clip", "vpc__clip_input_prims", NV, NV, "vpc__clip_input_prims_op_clipped", "vpc__clip_output_prims", NA, NA],
    ["Primitive Assembly Cull", "vpc__cull_input_prims", NV, NV, "vpc__cull_input_prims_op_culled", "vpc__cull_input_prims_op_passed", NA, NA],
    ["Primitive Assembly (All Stages)", "vpc__input_prims", NA, NA, NA, "vpc__output_prims", NA, "vpc__output_attrs"],
];

/// Geometry counts through the world-space pipeline.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveDataflow;

impl TableGenerator for PrimitiveDataflow {
    fn name(&self) -> String {
        "PrimitiveDataflow".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Primitive-Data-Flow">
          <thead>
            <tr>
              <th colspan="10" class="ca tablename">Primitive Data Flow</th>
            </tr>
            <tr>
              <th class="la">Pipeline Stage</th>
              <th class="ra">Input Primitives</th>
              <th class="ra">Input Vertices</th>
              <th class="ra">Input Attributes</th>
              <th class="ra">Culled Primitives</th>
              <th class="ra">Output Primitives</th>
              <th class="ra">Output Vertices</th>
              <th class="ra">Output Attributes</th>
            </tr>
          </thead>
          <tbody id="tbody_primitive_data_flow">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let rows = PRIMITIVE_STAGES.iter().map(|r| {
            format!(
                "          new Row({:<40}, {:<30}, {:<40}, {:<30}, {:<40}, {:<40}, {:<30}, {:<30}),",
                quote(r[0]),
                quote(r[1]),
                quote(r[2]),
                quote(r[3]),
                quote(r[4]),
                quote(r[5]),
                quote(r[6]),
                quote(r[7])
            )
        });
        js_function(
            r##"
      function tbody_PrimitiveDataflow(tbody) {
        class Row {
          constructor(stage, inputPrims, inputVerts, inputAttrs, culledPrims, outputPrims, outputVerts, outputAttrs) {
            let getCounterValueIfDefined = function(counterName){
              if (counterName == 'NotApplicable') {
                return new NotApplicable;
              } else if (counterName == 'NotAvailable') {
                return new NotAvailable;
              } else {
                return getCounterValue(counterName, 'sum');
              }
            };
            let getCounterStringIfDefined = function(counterName){
              if (counterName == 'NotApplicable' || counterName == 'NotAvailable') {
                return '';
              }
              return counterName + '.sum';
            };
            this.stage = stage;
            this.inputPrims         = getCounterValueIfDefined(inputPrims);
            this.inputPrimsTooltip  = getCounterStringIfDefined(inputPrims);
            this.inputVerts         = getCounterValueIfDefined(inputVerts);
            this.inputVertsTooltip  = getCounterStringIfDefined(inputVerts);
            this.inputAttrs         = getCounterValueIfDefined(inputAttrs);
            this.inputAttrsTooltip  = getCounterStringIfDefined(inputAttrs);
            this.culledPrims        = getCounterValueIfDefined(culledPrims);
            this.culledPrimsTooltip = getCounterStringIfDefined(culledPrims);
            this.outputPrims        = getCounterValueIfDefined(outputPrims);
            this.outputPrimsTooltip = getCounterStringIfDefined(outputPrims);
            this.outputVerts        = getCounterValueIfDefined(outputVerts);
            this.outputVertsTooltip = getCounterStringIfDefined(outputVerts);
            this.outputAttrs        = getCounterValueIfDefined(outputAttrs);
            this.outputAttrsTooltip = getCounterStringIfDefined(outputAttrs);
          }
        }
        let rows = [
"##,
            rows,
            r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.stage);
          addCellSimple(trow, "ra", format_sum(row.inputPrims), passThrough = false, formatMetricFormula(row.inputPrimsTooltip));
          addCellSimple(trow, "ra", format_sum(row.inputVerts), passThrough = false, formatMetricFormula(row.inputVertsTooltip));
          addCellSimple(trow, "ra", format_sum(row.inputAttrs), passThrough = false, formatMetricFormula(row.inputAttrsTooltip));
          addCellSimple(trow, "ra", format_sum(row.culledPrims), passThrough = false, formatMetricFormula(row.culledPrimsTooltip));
          addCellSimple(trow, "ra", format_sum(row.outputPrims), passThrough = false, formatMetricFormula(row.outputPrimsTooltip));
          addCellSimple(trow, "ra", format_sum(row.outputVerts), passThrough = false, formatMetricFormula(row.outputVertsTooltip));
          addCellSimple(trow, "ra", format_sum(row.outputAttrs), passThrough = false, formatMetricFormula(row.outputAttrsTooltip));
          tbody.appendChild(trow);
        }
      }
"##,
        )
    }

    fn jscall(&self) -> String {
        "tbody_PrimitiveDataflow(document.getElementById('tbody_primitive_data_flow'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        let mut counters = cell_counters(PRIMITIVE_STAGES.iter().flat_map(|r| r[1..].iter().copied()));
        counters.sort();
        RequiredMetrics {
            counters,
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"Primitive Data Flow:
This table shows the creation, destruction, and processing of geometry data through the 3D graphics pipeline, before reaching the rasterizer.
"##.to_string()
    }
}

/// `[stage, pixels in, pixels killed, pixels out, samples in,
/// samples killed, samples out]`
pub type RasterStage = [String; 7];

fn raster_stage(cells: [&str; 7]) -> RasterStage {
    cells.map(str::to_string)
}

/// Pixel and sample counts from ZCULL to CROP.
///
/// The ZROP and CROP input counters differ between chips, as does the
/// PROP depth-test breakdown.
#[derive(Debug, Clone)]
pub struct RasterDataflow {
    pub stages: Vec<RasterStage>,
}

impl RasterDataflow {
    pub fn new(zrop_pixels_input: &str, crop_pixels_input: &str) -> Self {
        let stages = vec![
            raster_stage(["ZCULL", "raster__zcull_input_samples", "raster__zcull_input_samples_op_rejected", "raster__zcull_input_samples_op_accepted", NA, NA, NA]),
            raster_stage(["PROP Input", "prop__input_pixels_type_3d_realtime", NA, NA, NV, NA, NA]),
            raster_stage(["PROP EarlyZ", NV, "prop__earlyz_killed_pixels_realtime", NV, "prop__earlyz_input_samples", "prop__earlyz_killed_samples", "prop__earlyz_output_samples"]),
            raster_stage(["Pixel Shader(EarlyZ + LateZ)", "sm__threads_launched_shader_ps_killmask_off", NV, NV, NA, NA, NA]),
            raster_stage(["PROP LateZ", NV, NV, NV, NV, "prop__latez_killed_samples", "prop__latez_output_samples"]),
            raster_stage(["ZROP", zrop_pixels_input, NA, NA, NV, NV, NV]),
            raster_stage(["PROP Color", NV, NV, NV, NV, NV, NV]),
            raster_stage(["CROP", crop_pixels_input, NV, NV, NV, NV, NV]),
        ];
        RasterDataflow { stages }
    }

    /// Chips whose PROP reports early and late depth tests per PROP-to-ZROP
    /// pixel and sample.
    pub fn with_prop2zrop_modes(zrop_pixels_input: &str, crop_pixels_input: &str) -> Self {
        let mut gen = RasterDataflow::new(zrop_pixels_input, crop_pixels_input);
        gen.stages[2] = raster_stage([
            "PROP EarlyZ",
            "prop__prop2zrop_pixels_mode_earlyz_realtime",
            "prop__prop2zrop_pixels_mode_earlyz_op_killed_realtime",
            "prop__prop2zrop_pixels_mode_earlyz_op_passed_realtime",
            "prop__prop2zrop_samples_mode_earlyz",
            "prop__prop2zrop_samples_mode_earlyz_op_killed",
            "prop__prop2zrop_samples_mode_earlyz_op_passed",
        ]);
        gen.stages[4] = raster_stage([
            "PROP LateZ",
            "prop__prop2zrop_pixels_mode_latez_realtime",
            "prop__prop2zrop_pixels_mode_latez_op_killed_realtime",
            "prop__prop2zrop_pixels_mode_latez_op_passed_realtime",
            "prop__prop2zrop_samples_mode_latez",
            "prop__prop2zrop_samples_mode_latez_op_killed",
            "prop__prop2zrop_samples_mode_latez_op_passed",
        ]);
        gen
    }
}

impl TableGenerator for RasterDataflow {
    fn name(&self) -> String {
        "RasterDataflow".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Raster-Data-Flow">
          <thead>
            <tr>
              <th colspan="1" class="ca tablename">Raster Data Flow</th>
              <th colspan="3" class="ca">Pixels</th>
              <th colspan="3" class="ca">Samples</th>
            </tr>
            <tr>
              <th class="la">Pipeline Stage</th>
              <th class="ra">Pixels In</th>
              <th class="ra">Pixels Killed</th>
              <th class="ra">Pixels Out</th>
              <th class="ra">Samples In</th>
              <th class="ra">Samples Killed</th>
              <th class="ra">Samples Out</th>
            </tr>
          </thead>
          <tbody id="tbody_raster_data_flow">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        let head = format!(
            "{}{}",
            r##"
      function tbody_RasterDataflow(tbody) {
        class Row {
          constructor(stage, pixelsInput, pixelsKilled, pixelsOutput, samplesInput, samplesKilled, samplesOutput) {
            let getCounterValueIfDefined = function(counterName){
              if (counterName == 'NotApplicable') {
                return new NotApplicable;
              } else if (counterName == 'NotAvailable') {
                return new NotAvailable;
              } else {
                return getCounterValue(counterName, 'sum');
              }
            };
            let getCounterStringIfDefined = function(counterName){
              if (counterName == 'NotApplicable' || counterName == 'NotAvailable') {
                return '';
              }
              return counterName + '.sum';
            };
            this.stage = stage;
            this.pixelsInput          = getCounterValueIfDefined(pixelsInput);
            this.pixelsInputTooltip   = getCounterStringIfDefined(pixelsInput);
            this.pixelsKilled         = getCounterValueIfDefined(pixelsKilled);
            this.pixelsKilledTooltip  = getCounterStringIfDefined(pixelsKilled);
            this.pixelsOutput         = getCounterValueIfDefined(pixelsOutput);
            this.pixelsOutputTooltip  = getCounterStringIfDefined(pixelsOutput);
            this.samplesInput         = getCounterValueIfDefined(samplesInput);
            this.samplesInputTooltip  = getCounterStringIfDefined(samplesInput);
            this.samplesKilled        = getCounterValueIfDefined(samplesKilled);
            this.samplesKilledTooltip = getCounterStringIfDefined(samplesKilled);
            this.samplesOutput        = getCounterValueIfDefined(samplesOutput);
            this.samplesOutputTooltip = getCounterStringIfDefined(samplesOutput);
          }
        }
"##,
            r##"
        let rows = [
"##
        );
        let rows = self.stages.iter().map(|s| {
            format!(
                "          new Row({:<30}, {:<50}, {:<50}, {:<50}, {:<50}, {:<50}, {:<50},),",
                quote(&s[0]),
                quote(&s[1]),
                quote(&s[2]),
                quote(&s[3]),
                quote(&s[4]),
                quote(&s[5]),
                quote(&s[6])
            )
        });
        js_function(&head, rows, r##"
        ];

        for (const row of rows) {
          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", row.stage);
          addCellSimple(trow, "ra", format_sum(row.pixelsInput), passThrough = false, formatMetricFormula(row.pixelsInputTooltip));
          addCellSimple(trow, "ra", format_sum(row.pixelsKilled), passThrough = false, formatMetricFormula(row.pixelsKilledTooltip));
          addCellSimple(trow, "ra", format_sum(row.pixelsOutput), passThrough = false, formatMetricFormula(row.pixelsOutputTooltip));
          addCellSimple(trow, "ra", format_sum(row.samplesInput), passThrough = false, formatMetricFormula(row.samplesInputTooltip));
          addCellSimple(trow, "ra", format_sum(row.samplesKilled), passThrough = false, formatMetricFormula(row.samplesKilledTooltip));
          addCellSimple(trow, "ra", format_sum(row.samplesOutput), passThrough = false, formatMetricFormula(row.samplesOutputTooltip));
          tbody.appendChild(trow);
        }
      }
"##)
    }

    fn jscall(&self) -> String {
        "tbody_RasterDataflow(document.getElementById('tbody_raster_data_flow'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics {
            counters: cell_counters(self.stages.iter().flat_map(|s| s[1..].iter().map(String::as_str))),
            ..Default::default()
        }
    }

    fn workflow(&self) -> String {
        r##"Raster Data Flow:
This table shows the creation, destruction, and processing of pixels and samples (MSAA) through the 3D graphics pipeline.
"##.to_string()
    }
}

/// RTCore utilization and ray counts.
#[derive(Debug, Clone, Default)]
pub struct RaytracingBreakdown;

impl TableGenerator for RaytracingBreakdown {
    fn name(&self) -> String {
        "RaytracingBreakdown".to_string()
    }

    fn html(&self) -> String {
        r##"
        <table style="display: inline-block; border: 1px solid;" id="Raytracing-Breakdown">
          <thead>
            <tr>
              <th colspan="1" class="ca tablename">Ray Tracing Breakdown</th>
              <th colspan="3" class="ca">Per Unit Instance (avg)</th>
              <th colspan="2" class="ca">Total (sum)</th>
              <th colspan="2" class="ca">%-of-Peak</th>
            </tr>
            <tr>
              <th class="la">Name</th>
              <th class="ra">value</th>
              <th class="ra">per-cycle</th>
              <th class="ra">peak per-cycle</th>
              <th class="ra">value</th>
              <th class="ra">per-second</th>
              <th class="ra">%</th>
              <th class="base">││││▌││││▌││││▌││││▌</th>
            </tr>
          </thead>
          <tbody id="tbody_raytracing_breakdown">
          </tbody>
        </table>
"##.to_string()
    }

    fn jsfunc(&self) -> String {
        r##"
      function tbody_Raytracing_Breakdown(tbody) {
        let descriptions = [
            'Executed Cycles',
            'Total Rays',
            'Initial Rays',
            'Recast Rays',
        ];

        let counterNames = [
            'rtcore__cycles_executed',
            'rtcore__rays',
            'rtcore__rays_cast_api',
            'rtcore__rays_cast_proceed',
        ];

        for (let i = 0; i < descriptions.length; i++) {
          let counter = counterNames[i];
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

          var trow = document.createElement('tr');
          addCellSimple(trow, "la subhdr", descriptions[i]);
          addCellSimple(trow, "ra", format_avg(avg), passThrough = false, formatMetricFormula(avgStr));
          addCellSimple(trow, "ra", format_avg(apc, 2), passThrough = false, formatMetricFormula(apcStr));
          addCellSimple(trow, "ra", format_avg(aps, 2), passThrough = false, formatMetricFormula(apsStr));
          addCellSimple(trow, "ra", format_sum(sum), passThrough = false, formatMetricFormula(sumStr));
          addCellSimple(trow, "ra", format_sum(sps), passThrough = false, formatMetricFormula(spsStr));
          addCellSimple(trow, "ra", format_pct(pct), passThrough = false, formatMetricFormula(pctStr));
          addCellSimple(trow, "la comp", toBarChart(pct, '█'), passThrough = false, formatMetricFormula(pctStr));
          tbody.appendChild(trow);
        }
      }
"##.to_string()
    }

    fn jscall(&self) -> String {
        "tbody_Raytracing_Breakdown(document.getElementById('tbody_raytracing_breakdown'));".to_string()
    }

    fn required(&self) -> RequiredMetrics {
        RequiredMetrics::counters(&[
            "rtcore__cycles_executed",
            "rtcore__rays",
            "rtcore__rays_cast_api",
            "rtcore__rays_cast_proceed",
        ])
    }

    fn workflow(&self) -> String {
        r##"Ray Tracing Breakdown:
This table shows RTCore utilization, and the number of hardware rays cast.  A single call to HLSL TraceRay() / GLSL traceRayEXT() can require rays to be recast multiple times, while searching for an intersection.  The table shows the decomposition of initial rays and recast rays.
"##.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_dataflow_required() {
        let t = PrimitiveDataflow.make_data_table();
        assert_eq!(t.required_counters.len(), 18);
        assert_eq!(t.required_counters[0], "pda__input_prims");
        assert!(t.jsfunc.contains(&format!("new Row({:<40}, {:<30}, ", "'Tess. Eval Shader'", "'NotAvailable'")));
    }

    #[test]
    fn test_raster_dataflow_chip_inputs() {
        let t = RasterDataflow::new("prop__prop2xbar_zrop_pixels_realtime", "prop__prop2xbar_crop_pixels_realtime").make_data_table();
        assert_eq!(t.required_counters.len(), 13);
        assert!(t.required_counters.iter().any(|c| c == "prop__prop2xbar_crop_pixels_realtime"));
        assert!(t.jsfunc.contains(&format!("{:<50},),\n", "'NotAvailable'")));
    }

    #[test]
    fn test_raster_dataflow_prop2zrop_modes() {
        let t = RasterDataflow::with_prop2zrop_modes("prop__prop2zrop_pixels_realtime", "prop__prop2crop_pixels_realtime")
            .make_data_table();
        assert_eq!(t.required_counters.len(), 19);
        assert!(!t.required_counters.iter().any(|c| c.starts_with("prop__earlyz")));
    }

    #[test]
    fn test_raytracing_static_function() {
        let t = RaytracingBreakdown.make_data_table();
        assert!(t.jsfunc.contains("function tbody_Raytracing_Breakdown(tbody) {"));
        assert_eq!(t.required_counters.len(), 4);
    }
}
