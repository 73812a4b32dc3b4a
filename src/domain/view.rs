use crate::domain::command::Icon;
use crate::domain::matcher::{longest_span, QueryChars};

pub const DEFAULT_MAX_ROWS: usize = 8;
pub const DEFAULT_WINDOW_WIDTH: f32 = 400.0;
pub const DEFAULT_HEADER_HEIGHT: f32 = 30.0;
pub const DEFAULT_ROW_HEIGHT: f32 = 32.0;
pub const DEFAULT_SUBTITLE_SOFT_LENGTH: usize = 35;
pub const DEFAULT_SUBTITLE_TITLE_ADDITIVE_LENGTH: usize = 15;

pub const DARK_SKIN_DIM_COLOR: &str = "#8e8e8e";
pub const LIGHT_SKIN_DIM_COLOR: &str = "#383838";

/// Layout and presentation knobs for one palette window.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSettings {
    pub max_rows: usize,
    pub window_width: f32,
    pub header_height: f32,
    pub row_height: f32,
    pub subtitle_soft_length: usize,
    pub subtitle_title_additive_length: usize,
    pub dim_color: String,
    pub debug_scores: bool,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            window_width: DEFAULT_WINDOW_WIDTH,
            header_height: DEFAULT_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            subtitle_soft_length: DEFAULT_SUBTITLE_SOFT_LENGTH,
            subtitle_title_additive_length: DEFAULT_SUBTITLE_TITLE_ADDITIVE_LENGTH,
            dim_color: DARK_SKIN_DIM_COLOR.to_string(),
            debug_scores: false,
        }
    }
}

impl PaletteSettings {
    pub fn geometry(&self, displayed_rows: usize) -> WindowGeometry {
        WindowGeometry {
            x: 0.0,
            y: 0.0,
            width: self.window_width,
            height: self.header_height + displayed_rows as f32 * self.row_height,
        }
    }

    pub fn row_rect(&self, index: usize) -> RowRect {
        RowRect {
            x: 0.0,
            y: self.header_height + self.row_height * index as f32,
            width: self.window_width,
            height: self.row_height,
        }
    }

    pub fn truncate_subtitle(&self, subtitle: &str, title_len: usize) -> String {
        truncate_subtitle(
            subtitle,
            title_len,
            self.subtitle_soft_length,
            self.subtitle_title_additive_length,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RowRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Keeps the tail of long subtitles, which for asset paths is the part
/// that tells entries apart.
pub fn truncate_subtitle(
    subtitle: &str,
    title_len: usize,
    soft_length: usize,
    title_additive_length: usize,
) -> String {
    let max_len = (soft_length + title_len).min(soft_length + title_additive_length);
    let len = subtitle.chars().count();
    if len <= max_len + 2 {
        return subtitle.to_string();
    }

    let tail: String = subtitle.chars().skip(len - max_len).collect();
    format!("..{tail}")
}

/// A title split around its longest matched run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedTitle {
    pub before: String,
    pub highlighted: String,
    pub after: String,
}

impl HighlightedTitle {
    pub fn new(title: &str, chars: &QueryChars) -> Self {
        match longest_span(title, chars) {
            Some(span) => Self {
                before: title[..span.start].to_string(),
                highlighted: title[span.clone()].to_string(),
                after: title[span.end..].to_string(),
            },
            None => Self {
                before: title.to_string(),
                highlighted: String::new(),
                after: String::new(),
            },
        }
    }

    pub fn plain(&self) -> String {
        format!("{}{}{}", self.before, self.highlighted, self.after)
    }

    /// Rich-text markup: the title is dimmed except for the highlighted run.
    pub fn to_markup(&self, dim_color: &str) -> String {
        if self.highlighted.is_empty() {
            return format!("<color={dim_color}>{}</color>", self.before);
        }
        format!(
            "<color={dim_color}>{}</color>{}<color={dim_color}>{}</color>",
            self.before, self.highlighted, self.after
        )
    }
}

/// Draw instructions for one palette row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub title: HighlightedTitle,
    pub subtitle: String,
    pub icon: Option<Icon>,
    pub selected: bool,
    pub rect: RowRect,
}

pub fn debug_score_suffix(score: f64) -> String {
    format!(" (score: {score:.2})")
}
