use crate::config::StyleConfig;
use once_cell::sync::OnceCell;
use plotters::style::{IntoFont, RGBColor, TextStyle};
use tracing::{debug, warn};

pub const DARK_RED: RGBColor = RGBColor(139, 0, 0);
pub const DARK_GREEN: RGBColor = RGBColor(0, 100, 0);
pub const DARK_BLUE: RGBColor = RGBColor(0, 0, 139);
pub const DIM_GRAY: RGBColor = RGBColor(105, 105, 105);
pub const GRAY: RGBColor = RGBColor(128, 128, 128);
pub const DARK_GRAY: RGBColor = RGBColor(169, 169, 169);
pub const LIGHT_GRAY: RGBColor = RGBColor(211, 211, 211);

/// process wide chart settings, fixed before the first chart is drawn
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub font: String,
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&StyleConfig> for ChartStyle {
    fn from(config: &StyleConfig) -> Self {
        Self {
            font: config.font.clone(),
            font_size: config.font_size,
            width: config.width,
            height: config.height,
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from(&StyleConfig::default())
    }
}

impl ChartStyle {
    pub fn text(&self) -> TextStyle<'_> {
        TextStyle::from((self.font.as_str(), self.font_size).into_font())
    }

    /// slightly smaller text for bar annotations and legends
    pub fn small_text(&self) -> TextStyle<'_> {
        let size = (self.font_size * 3 / 4).max(1);

        TextStyle::from((self.font.as_str(), size).into_font())
    }
}

static STYLE: OnceCell<ChartStyle> = OnceCell::new();

/// fix the chart style for the rest of the process, later calls keep the first style
pub fn prepare_style(config: &StyleConfig) {
    let style = ChartStyle::from(config);

    debug!(style = ?style, "Preparing chart style");

    if STYLE.set(style).is_err() {
        warn!("Chart style was already prepared, keeping the existing one");
    }
}

pub fn style() -> &'static ChartStyle {
    STYLE.get_or_init(ChartStyle::default)
}
