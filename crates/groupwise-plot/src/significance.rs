//! −log10(p) per completed analysis

use crate::chart::{styled_axis, zero_line_series};
use crate::traits::{Plot, PlotArtifact, PlotInput};
use charming::component::{Legend, Title};
use charming::element::{AxisType, LineStyle, LineStyleType, Symbol, Tooltip, Trigger};
use charming::series::{Bar, Line};
use charming::Chart;
use groupwise_core::{Error, Result};

/// Smallest p-value drawn, so that p = 0 still has a finite bar
const P_FLOOR: f64 = 1e-300;

/// Bar chart of analysis p-values on a −log10 scale with the alpha line
#[derive(Debug, Clone, Copy, Default)]
pub struct SignificancePlot;

impl SignificancePlot {
    /// Registered name
    pub const NAME: &'static str = "SignificancePlot";
}

fn neg_log10(p: f64) -> f64 {
    -p.max(P_FLOOR).log10()
}

impl Plot for SignificancePlot {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, input: &PlotInput<'_>) -> Result<PlotArtifact> {
        let bars: Vec<(String, f64)> = input
            .analyses
            .iter()
            .filter_map(|r| {
                r.completed()
                    .map(|c| (r.name.clone(), neg_log10(c.comparison.payload.p_value())))
            })
            .collect();
        if bars.is_empty() {
            return Err(Error::InvalidInput(
                "no completed analyses to plot".to_string(),
            ));
        }

        let names: Vec<String> = bars.iter().map(|(n, _)| n.clone()).collect();
        let heights: Vec<f64> = bars.iter().map(|(_, h)| *h).collect();
        let alpha_line = neg_log10(input.significance_level);

        let title = "Significance of analyses".to_string();
        let axis = &input.style.axis;
        let mut chart = Chart::new()
            .title(Title::new().text(title.as_str()))
            .tooltip(Tooltip::new().trigger(Trigger::Axis))
            .legend(Legend::new())
            .x_axis(styled_axis(AxisType::Category, "Analysis", axis).data(names.clone()))
            .y_axis(styled_axis(AxisType::Value, "-log10(p)", axis))
            .series(Bar::new().name("-log10(p)").data(heights))
            .series(
                Line::new()
                    .name(format!("alpha = {}", input.significance_level))
                    .symbol(Symbol::None)
                    .line_style(LineStyle::new().type_(LineStyleType::Dashed))
                    .data(vec![alpha_line; names.len()]),
            );

        if let Some(zero) = zero_line_series(axis, false) {
            chart = chart.series(zero);
        }

        Ok(PlotArtifact {
            name: Self::NAME.to_string(),
            title,
            width: input.output.width,
            height: input.output.height,
            chart,
        })
    }
}
