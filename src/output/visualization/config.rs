//! Plot configuration shared by all charts
//!
//! A [`PlotConfig`] only carries styling. The data, axis labels and default
//! title come from the [`ChartSpec`](super::chart::ChartSpec) being rendered.

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Title override, `None` keeps the chart's own title
/// - `line_color`: Color of the data curve
/// - `annotation_colors`: Optional colors for annotations (one per annotation)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `marker_size`: Radius of data point markers in pixels
/// - `show_markers`: Draw a marker on every data point
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use chemlab_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::titration_curve("Run 2");
/// config.width = 1920;
/// config.height = 1080;
/// config.annotation_colors = Some(vec![MAGENTA, CYAN]);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1000)
    pub width: u32,

    /// Image height in pixels (default: 600)
    pub height: u32,

    /// Title override (default: None)
    pub title: Option<String>,

    /// Curve color (default: BLUE)
    pub line_color: RGBColor,

    /// Optional annotation colors
    ///
    /// If None, uses default palette: [RED, GREEN, MAGENTA, ...]
    pub annotation_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Marker radius in pixels (default: 4)
    pub marker_size: u32,

    /// Draw point markers (default: true)
    pub show_markers: bool,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: None,
            line_color: BLUE,
            annotation_colors: None,
            background: WHITE,
            line_width: 2,
            marker_size: 4,
            show_markers: true,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (the chart's default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::phase_diagram(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Phase diagram style: blue curve with markers, CST in red
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::phase_diagram("Group B");
    /// let config = PlotConfig::phase_diagram(NO_TITLE);
    /// ```
    pub fn phase_diagram(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title(),
            annotation_colors: Some(vec![RED]),
            ..Self::default()
        }
    }

    /// Titration curve style: blue curve with markers, HCl endpoint in red,
    /// CH₃COOH endpoint in green
    pub fn titration_curve(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title(),
            annotation_colors: Some(vec![RED, GREEN]),
            ..Self::default()
        }
    }

    /// Get color for annotation at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_annotation_color(&self, index: usize) -> RGBColor {
        if let Some(ref colors) = self.annotation_colors {
            if index < colors.len() {
                return colors[index];
            }
        }

        let default_colors = [
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),  // Orange
            RGBColor(128, 0, 128),  // Purple
        ];

        default_colors[index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 600);
        assert!(config.title.is_none());
        assert!(config.show_grid);
    }

    #[test]
    fn test_phase_diagram_config_default_title() {
        let config = PlotConfig::phase_diagram(NO_TITLE);
        assert!(config.title.is_none());
        assert_eq!(config.get_annotation_color(0), RED);
    }

    #[test]
    fn test_titration_config_with_str() {
        let config = PlotConfig::titration_curve("Run 2");
        assert_eq!(config.title.as_deref(), Some("Run 2"));
        assert_eq!(config.get_annotation_color(1), GREEN);
    }

    #[test]
    fn test_titration_config_with_string() {
        let config = PlotConfig::titration_curve(format!("Bench {}", 3));
        assert_eq!(config.title.as_deref(), Some("Bench 3"));
    }

    #[test]
    fn test_get_annotation_color_default_palette() {
        let config = PlotConfig::default();
        assert_eq!(config.get_annotation_color(0), RED);
        assert_eq!(config.get_annotation_color(1), GREEN);
        assert_eq!(config.get_annotation_color(7), RED); // Wraparound
    }

    #[test]
    fn test_get_annotation_color_falls_back_past_custom() {
        let config = PlotConfig::phase_diagram(NO_TITLE);
        // Only one custom color: index 1 comes from the default palette
        assert_eq!(config.get_annotation_color(1), GREEN);
    }
}
