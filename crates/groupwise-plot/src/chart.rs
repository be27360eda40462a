//! Chart pieces shared by the built-in plots

use crate::style::{AxisStyle, LimitKind, LimitsStyle};
use charming::component::Axis;
use charming::element::{
    AxisLabel, AxisType, LineStyle, LineStyleType, MarkLine, MarkLineData, MarkLineVariant,
    SplitLine, Symbol, TextStyle,
};
use charming::series::Line;
use groupwise_core::{Error, GroupLimits, GroupedDataset, Result};

/// A limit to draw, with its label and colour resolved from the style
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub kind: LimitKind,
    pub value: f64,
    pub label: String,
    pub color: String,
}

/// Reference lines for the known limits, in LSL, USL, T order
pub fn reference_lines(limits: &GroupLimits, style: &LimitsStyle) -> Vec<ReferenceLine> {
    [
        (LimitKind::Lsl, limits.lower),
        (LimitKind::Usl, limits.upper),
        (LimitKind::Target, limits.target),
    ]
    .into_iter()
    .filter_map(|(kind, value)| {
        value.map(|value| ReferenceLine {
            kind,
            value,
            label: style.label(kind).to_string(),
            color: style.get(kind).line_color.clone(),
        })
    })
    .collect()
}

/// Dashed line series through the given points
pub fn dashed_series(line: &ReferenceLine, points: Vec<Vec<f64>>) -> Line {
    Line::new()
        .name(line.label.as_str())
        .symbol(Symbol::None)
        .line_style(
            LineStyle::new()
                .type_(LineStyleType::Dashed)
                .color(line.color.as_str()),
        )
        .data(points)
}

/// Solid lines at zero on the value axes, when the style asks for them
///
/// ECharts has no per-axis zero-line colour, so the lines are drawn as a
/// silent mark line on an otherwise empty series.
pub fn zero_line_series(style: &AxisStyle, x_is_value: bool) -> Option<Line> {
    if !style.zero_line {
        return None;
    }
    let mut marks = vec![MarkLineVariant::Simple(MarkLineData::new().y_axis(0.0))];
    if x_is_value {
        marks.push(MarkLineVariant::Simple(MarkLineData::new().x_axis(0.0)));
    }
    Some(
        Line::new().symbol(Symbol::None).mark_line(
            MarkLine::new()
                .silent(true)
                .symbol(vec![Symbol::None, Symbol::None])
                .line_style(
                    LineStyle::new()
                        .type_(LineStyleType::Solid)
                        .color(style.zero_line_color.as_str()),
                )
                .data(marks),
        ),
    )
}

/// Axis with the configured fonts and grid
pub fn styled_axis(kind: AxisType, title: &str, style: &AxisStyle) -> Axis {
    Axis::new()
        .type_(kind)
        .name(title)
        .name_text_style(
            TextStyle::new()
                .font_size(style.title_font_size)
                .color(style.title_font_color.as_str()),
        )
        .axis_label(
            AxisLabel::new()
                .font_size(style.font_size)
                .color(style.font_color.as_str()),
        )
        .split_line(
            SplitLine::new()
                .show(style.show_grid)
                .line_style(LineStyle::new().color(style.grid_color.as_str())),
        )
}

/// Reject datasets with an empty group before drawing anything
pub fn require_values(data: &GroupedDataset) -> Result<()> {
    if data.is_empty() {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    if let Some(group) = data.groups().iter().find(|g| g.is_empty()) {
        return Err(Error::InvalidInput(format!(
            "group '{}' has no values to plot",
            group.key
        )));
    }
    Ok(())
}
