//! Empirical cumulative frequency per group

use crate::chart::{dashed_series, reference_lines, require_values, styled_axis, zero_line_series};
use crate::traits::{Plot, PlotArtifact, PlotInput};
use charming::component::{Legend, Title};
use charming::element::{AxisType, Symbol, Tooltip, Trigger};
use charming::series::Line;
use charming::Chart;
use groupwise_core::{Group, Result};

/// Step curve of the empirical CDF for every group, with vertical limit lines
#[derive(Debug, Clone, Copy, Default)]
pub struct CumulativeFrequencyPlot;

impl CumulativeFrequencyPlot {
    /// Registered name
    pub const NAME: &'static str = "CumulativeFrequencyPlot";
}

/// `(x, F(x))` corners of the step function of one group
///
/// Each sorted value contributes the level before and after its jump.
pub fn step_points(group: &Group) -> Vec<Vec<f64>> {
    let sorted = group.sorted_values();
    let n = sorted.len() as f64;
    let mut points = Vec::with_capacity(sorted.len() * 2);
    for (i, x) in sorted.iter().enumerate() {
        points.push(vec![*x, i as f64 / n]);
        points.push(vec![*x, (i + 1) as f64 / n]);
    }
    points
}

impl Plot for CumulativeFrequencyPlot {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, input: &PlotInput<'_>) -> Result<PlotArtifact> {
        let data = input.data;
        require_values(data)?;

        let title = format!("Cumulative frequency of {}", data.value_column());
        let axis = &input.style.axis;
        let mut chart = Chart::new()
            .title(Title::new().text(title.as_str()))
            .tooltip(Tooltip::new().trigger(Trigger::Axis))
            .legend(Legend::new())
            .x_axis(styled_axis(AxisType::Value, data.value_column(), axis))
            .y_axis(styled_axis(AxisType::Value, "Cumulative frequency", axis));

        if let Some(zero) = zero_line_series(axis, true) {
            chart = chart.series(zero);
        }

        for group in data.groups() {
            chart = chart.series(
                Line::new()
                    .name(group.key.as_str())
                    .symbol(Symbol::None)
                    .data(step_points(group)),
            );
        }

        for line in reference_lines(&data.reference_limits(), &input.style.limits_style) {
            let points = vec![vec![line.value, 0.0], vec![line.value, 1.0]];
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
