use crate::types::{DataTable, RequiredMetrics};

mod device;
mod exhaustive;
mod memory;
mod overview;
mod pipeline;
mod sm;
mod summary;

pub use device::*;
pub use exhaustive::*;
pub use memory::*;
pub use overview::*;
pub use pipeline::*;
pub use sm::*;
pub use summary::*;

/**
 * TableGenerator
 * Produces one table of a report: the HTML skeleton, the client-side
 * function that fills it in, the call that invokes that function, and the
 * metrics it reads.
 *
 * Implement this trait to add a table, then place it in a chip's report.
 */
pub trait TableGenerator {
    fn name(&self) -> String;

    fn html(&self) -> String;

    fn jsfunc(&self) -> String;

    fn jscall(&self) -> String;

    fn required(&self) -> RequiredMetrics;

    // Shown above the table when the "Show Workflow" box is checked
    fn workflow(&self) -> String {
        String::new()
    }

    fn make_data_table(&self) -> DataTable {
        let RequiredMetrics {
            counters,
            ratios,
            throughputs,
        } = self.required();
        DataTable {
            name: self.name(),
            html: self.html(),
            jsfunc: self.jsfunc(),
            jscall: self.jscall(),
            required_counters: counters,
            required_ratios: ratios,
            required_throughputs: throughputs,
            workflow: self.workflow(),
        }
    }
}

/// Joins a function head, one source line per row and the function tail.
pub(crate) fn js_function<I>(head: &str, rows: I, tail: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut js = String::from(head);
    for row in rows {
        js.push_str(&row);
        js.push('\n');
    }
    js.push_str(tail);
    js
}

/// Single-quoted JS string literal.
pub(crate) fn quote(s: &str) -> String {
    format!("'{}'", s)
}

/// Double-quoted JS string literal.
pub(crate) fn dquote(s: &str) -> String {
    format!("\"{}\"", s)
}

pub(crate) fn is_placeholder(cell: &str) -> bool {
    cell == "NotApplicable" || cell == "NotAvailable"
}

/// Counters named by metric cells, placeholders skipped, first occurrence
/// kept.
pub(crate) fn cell_counters<'a, I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counters: Vec<String> = Vec::new();
    for cell in cells {
        if !is_placeholder(cell) && !counters.iter().any(|c| c == cell) {
            counters.push(cell.to_string());
        }
    }
    counters
}

/// JS expression for a cell that names a metric. The two placeholder names
/// become instances of the runtime's placeholder classes.
pub(crate) fn metric_cell(s: &str) -> String {
    match s {
        "NotApplicable" => "new NotApplicable".to_string(),
        "NotAvailable" => "new NotAvailable".to_string(),
        _ => quote(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_cell() {
        assert_eq!(metric_cell("NotApplicable"), "new NotApplicable");
        assert_eq!(metric_cell("NotAvailable"), "new NotAvailable");
        assert_eq!(metric_cell("sm__warps_active"), "'sm__warps_active'");
        assert_eq!(dquote("ra"), "\"ra\"");
        assert_eq!(
            cell_counters(["a", "NotAvailable", "b", "a", "NotApplicable"]),
            vec!["a", "b"]
        );
    }
}
