use anyhow::anyhow;
use once_cell::sync::Lazy;

use crate::report::{render_range_html, render_summary_html};
use crate::types::{DataSection, FxIndexMap, ReportDefinition};

mod ga10b;
mod ga10x;
mod gb10b;
mod gb20x;
mod tu10x;

pub use ga10b::Ga10b;
pub use gb10b::Gb10b;
pub use gb20x::Gb20x;
pub use tu10x::Tu10x;

/**
 * ReportDefinitionProvider
 * Everything a GPU family contributes to report generation: the ordered
 * sections of its per-range report and of its summary report.
 *
 * The provided methods render the HTML and aggregate the required metrics,
 * so a chip only lists its tables.
 */
pub trait ReportDefinitionProvider: Send + Sync {
    fn chip(&self) -> &'static str;

    fn per_range_sections(&self) -> Vec<DataSection>;

    fn summary_sections(&self) -> Vec<DataSection>;

    fn per_range_report(&self) -> anyhow::Result<ReportDefinition> {
        let sections = self.per_range_sections();
        let html = render_range_html(&sections)?;
        Ok(ReportDefinition::new("PerRangeReport", html, &sections))
    }

    fn summary_report(&self) -> anyhow::Result<ReportDefinition> {
        let sections = self.summary_sections();
        let html = render_summary_html(&sections)?;
        Ok(ReportDefinition::new("SummaryReport", html, &sections))
    }
}

type Registry = FxIndexMap<&'static str, Box<dyn ReportDefinitionProvider>>;

static PROVIDERS: Lazy<Registry> = Lazy::new(|| {
    let providers: Vec<Box<dyn ReportDefinitionProvider>> = vec![Box::new(Tu10x), Box::new(Ga10b), Box::new(Gb20x), Box::new(Gb10b)];
    providers.into_iter().map(|p| (p.chip(), p)).collect()
});

/// Chip names in registration order.
pub fn known_chips() -> impl Iterator<Item = &'static str> {
    PROVIDERS.keys().copied()
}

pub fn provider_for(chip: &str) -> anyhow::Result<&'static dyn ReportDefinitionProvider> {
    PROVIDERS.get(chip).map(|p| p.as_ref()).ok_or_else(|| {
        anyhow!(
            "Module \"report_{}\" is not found, this could happen due to invalid chip name or insufficient --pypath.",
            chip
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        assert_eq!(known_chips().collect::<Vec<_>>(), vec!["tu10x", "ga10b", "gb20x", "gb10b"]);
        assert_eq!(provider_for("gb20x").unwrap().chip(), "gb20x");
        assert_eq!(provider_for("gb10b").unwrap().chip(), "gb10b");
    }

    #[test]
    fn test_unknown_chip() {
        let err = provider_for("nv50").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Module \"report_nv50\" is not found, this could happen due to invalid chip name or insufficient --pypath."
        );
    }
}
