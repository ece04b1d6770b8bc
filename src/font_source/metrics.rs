//! Font metrics
//!
//! The vertical metrics the anchor alignment helpers snap to, plus the
//! family/style names used in log output.

use norad::Font;

/// Font information
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontInfo {
    pub family_name: String,
    pub style_name: String,
    pub x_height: Option<f64>,
    pub cap_height: Option<f64>,
}

/// Vertical positions anchors can be snapped to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricLine {
    Baseline,
    XHeight,
    CapHeight,
}

impl MetricLine {
    pub fn name(&self) -> &'static str {
        match self {
            MetricLine::Baseline => "baseline",
            MetricLine::XHeight => "x-height",
            MetricLine::CapHeight => "cap height",
        }
    }
}

impl FontInfo {
    /// Extract font info from norad Font
    pub fn from_norad_font(font: &Font) -> Self {
        let info = &font.font_info;
        Self {
            family_name: Self::extract_string_field(info, |info| &info.family_name, "Untitled"),
            style_name: Self::extract_string_field(info, |info| &info.style_name, "Regular"),
            x_height: info.x_height,
            cap_height: info.cap_height,
        }
    }

    /// Helper to extract string fields with defaults
    fn extract_string_field<F>(font_info: &norad::FontInfo, getter: F, default: &str) -> String
    where
        F: Fn(&norad::FontInfo) -> &Option<String>,
    {
        getter(font_info)
            .as_ref()
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Get a display name combining family and style names
    pub fn get_display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Y coordinate of a metric line, if the font defines it
    pub fn metric(&self, line: MetricLine) -> Option<f64> {
        match line {
            MetricLine::Baseline => Some(0.0),
            MetricLine::XHeight => self.x_height,
            MetricLine::CapHeight => self.cap_height,
        }
    }
}
