//! One box per group

use crate::chart::{dashed_series, reference_lines, require_values, styled_axis, zero_line_series};
use crate::traits::{Plot, PlotArtifact, PlotInput};
use charming::component::{Legend, Title};
use charming::element::{AxisType, Tooltip, Trigger};
use charming::series::Boxplot;
use charming::Chart;
use groupwise_core::Result;
use groupwise_stats::FiveNumberSummary;

/// Box plot of the value column across groups, with dashed limit lines
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxPlot;

impl BoxPlot {
    /// Registered name
    pub const NAME: &'static str = "BoxPlot";
}

impl Plot for BoxPlot {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, input: &PlotInput<'_>) -> Result<PlotArtifact> {
        let data = input.data;
        require_values(data)?;

        let keys: Vec<String> = data.keys().map(str::to_string).collect();
        let boxes = data
            .groups()
            .iter()
            .map(|g| FiveNumberSummary::from_sample(&g.values).map(|s| s.to_vec()))
            .collect::<Result<Vec<_>>>()?;

        let title = format!("Boxplot of {}", data.value_column());
        let axis = &input.style.axis;
        let mut chart = Chart::new()
            .title(Title::new().text(title.as_str()))
            .tooltip(Tooltip::new().trigger(Trigger::Item))
            .legend(Legend::new())
            .x_axis(styled_axis(AxisType::Category, "Group", axis).data(keys.clone()))
            .y_axis(styled_axis(AxisType::Value, data.value_column(), axis))
            .series(Boxplot::new().name(data.value_column()).data(boxes));

        if let Some(zero) = zero_line_series(axis, false) {
            chart = chart.series(zero);
        }

        // Horizontal: the same value at every category
        for line in reference_lines(&data.reference_limits(), &input.style.limits_style) {
            let points = (0..keys.len()).map(|i| vec![i as f64, line.value]).collect();
            chart = chart.series(dashed_series(&line, points));
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
