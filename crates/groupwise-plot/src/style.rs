//! Chart style rules shared by every plot in a run
//!
//! Parsed once from the mandatory style document and passed by reference to
//! each plot; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

/// The three reference lines a plot may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    /// Lower specification limit
    Lsl,
    /// Upper specification limit
    Usl,
    /// Target
    Target,
}

impl LimitKind {
    /// Key used in the style document
    pub fn key(&self) -> &'static str {
        match self {
            Self::Lsl => "LSL",
            Self::Usl => "USL",
            Self::Target => "T",
        }
    }
}

fn default_line_color() -> String {
    "red".to_string()
}

fn default_horizontal_position() -> String {
    "right".to_string()
}

fn default_vertical_position() -> String {
    "top".to_string()
}

/// Appearance of one reference line and its label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitStyle {
    /// Label drawn next to the line; the limit key when empty
    #[serde(default)]
    pub annotation_text: String,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_horizontal_position")]
    pub annotation_position_horizontal: String,
    #[serde(default)]
    pub annotation_xshift_horizontal: i32,
    #[serde(default = "default_vertical_position")]
    pub annotation_position_vertical: String,
    #[serde(default)]
    pub annotation_yshift_vertical: i32,
}

impl LimitStyle {
    fn labelled(text: &str, color: &str) -> Self {
        Self {
            annotation_text: text.to_string(),
            line_color: color.to_string(),
            annotation_position_horizontal: default_horizontal_position(),
            annotation_xshift_horizontal: 0,
            annotation_position_vertical: default_vertical_position(),
            annotation_yshift_vertical: 0,
        }
    }
}

fn default_lsl() -> LimitStyle {
    LimitStyle::labelled("LSL", "red")
}

fn default_usl() -> LimitStyle {
    LimitStyle::labelled("USL", "red")
}

fn default_target() -> LimitStyle {
    LimitStyle::labelled("T", "green")
}

/// Styles keyed by limit kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsStyle {
    #[serde(rename = "LSL", default = "default_lsl")]
    pub lsl: LimitStyle,
    #[serde(rename = "USL", default = "default_usl")]
    pub usl: LimitStyle,
    #[serde(rename = "T", default = "default_target")]
    pub target: LimitStyle,
}

impl Default for LimitsStyle {
    fn default() -> Self {
        Self {
            lsl: default_lsl(),
            usl: default_usl(),
            target: default_target(),
        }
    }
}

impl LimitsStyle {
    /// Style for one limit kind
    pub fn get(&self, kind: LimitKind) -> &LimitStyle {
        match kind {
            LimitKind::Lsl => &self.lsl,
            LimitKind::Usl => &self.usl,
            LimitKind::Target => &self.target,
        }
    }

    /// Label for one limit kind, falling back to its key
    pub fn label(&self, kind: LimitKind) -> &str {
        let text = self.get(kind).annotation_text.as_str();
        if text.is_empty() {
            kind.key()
        } else {
            text
        }
    }
}

fn default_font_size() -> u32 {
    12
}

fn default_title_font_size() -> u32 {
    14
}

fn default_font_color() -> String {
    "#333333".to_string()
}

fn default_grid_color() -> String {
    "#e0e0e0".to_string()
}

fn default_zero_line_color() -> String {
    "#999999".to_string()
}

fn default_true() -> bool {
    true
}

/// Axis appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisStyle {
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,
    #[serde(default = "default_font_color")]
    pub title_font_color: String,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default)]
    pub zero_line: bool,
    #[serde(default = "default_zero_line_color")]
    pub zero_line_color: String,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            font_color: default_font_color(),
            title_font_size: default_title_font_size(),
            title_font_color: default_font_color(),
            show_grid: true,
            grid_color: default_grid_color(),
            zero_line: false,
            zero_line_color: default_zero_line_color(),
        }
    }
}

/// The style document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default)]
    pub limits_style: LimitsStyle,
    #[serde(default)]
    pub axis: AxisStyle,
}
