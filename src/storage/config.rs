use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::domain::view::{
    PaletteSettings, DARK_SKIN_DIM_COLOR, DEFAULT_HEADER_HEIGHT, DEFAULT_MAX_ROWS,
    DEFAULT_ROW_HEIGHT, DEFAULT_SUBTITLE_SOFT_LENGTH, DEFAULT_SUBTITLE_TITLE_ADDITIVE_LENGTH,
    DEFAULT_WINDOW_WIDTH, LIGHT_SKIN_DIM_COLOR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    #[default]
    Dark,
    Light,
}

impl Skin {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "pro" => Ok(Self::Dark),
            "light" | "personal" => Ok(Self::Light),
            _ => Err(anyhow!("invalid skin '{value}' (expected dark or light)")),
        }
    }

    pub fn dim_color(self) -> &'static str {
        match self {
            Self::Dark => DARK_SKIN_DIM_COLOR,
            Self::Light => LIGHT_SKIN_DIM_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    pub max_rows: usize,
    pub debug_scores: bool,
    pub skin: Skin,
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub header_height: u32,
    pub row_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleConfig {
    pub soft_length: usize,
    pub title_additive_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub palette: PaletteConfig,
    pub window: WindowConfig,
    pub subtitle: SubtitleConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            palette: PaletteConfig {
                max_rows: DEFAULT_MAX_ROWS,
                debug_scores: false,
                skin: Skin::default(),
                manifest: None,
            },
            window: WindowConfig {
                width: DEFAULT_WINDOW_WIDTH as u32,
                header_height: DEFAULT_HEADER_HEIGHT as u32,
                row_height: DEFAULT_ROW_HEIGHT as u32,
            },
            subtitle: SubtitleConfig {
                soft_length: DEFAULT_SUBTITLE_SOFT_LENGTH,
                title_additive_length: DEFAULT_SUBTITLE_TITLE_ADDITIVE_LENGTH,
            },
        }
    }
}

impl RuntimeConfig {
    pub fn default_path() -> PathBuf {
        env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".config/cmdpal/config.toml")
    }

    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        config.merge_env()?;
        Ok(config)
    }

    pub fn settings(&self) -> PaletteSettings {
        PaletteSettings {
            max_rows: self.palette.max_rows,
            window_width: self.window.width as f32,
            header_height: self.window.header_height as f32,
            row_height: self.window.row_height as f32,
            subtitle_soft_length: self.subtitle.soft_length,
            subtitle_title_additive_length: self.subtitle.title_additive_length,
            dim_color: self.palette.skin.dim_color().to_string(),
            debug_scores: self.palette.debug_scores,
        }
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config file: {}", path.display()))?;
        self.merge_toml_text(&content)
            .with_context(|| format!("failed parsing config TOML: {}", path.display()))
    }

    fn merge_toml_text(&mut self, content: &str) -> Result<()> {
        let mut section = String::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(anyhow!("line {}: invalid section syntax", idx + 1));
                }
                section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let (key, value_raw) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("line {}: expected key=value", idx + 1))?;
            let key = key.trim();
            let value = parse_value(value_raw.trim())
                .with_context(|| format!("line {}: invalid value", idx + 1))?;

            self.apply_file_value(&section, key, value)
                .with_context(|| format!("line {}: invalid {section}.{key}", idx + 1))?;
        }

        Ok(())
    }

    fn apply_file_value(&mut self, section: &str, key: &str, value: TomlValue) -> Result<()> {
        match (section, key) {
            ("palette", "max_rows") => {
                self.palette.max_rows = parse_max_rows(value.as_usize()?)?;
            }
            ("palette", "debug_scores") => {
                self.palette.debug_scores = value.as_bool()?;
            }
            ("palette", "skin") => {
                self.palette.skin = Skin::parse(value.as_str()?)?;
            }
            ("palette", "manifest") => {
                self.palette.manifest = non_empty(value.into_string()?).map(PathBuf::from);
            }
            ("window", "width") => {
                self.window.width = value.as_u32()?;
            }
            ("window", "header_height") => {
                self.window.header_height = value.as_u32()?;
            }
            ("window", "row_height") => {
                self.window.row_height = value.as_u32()?;
            }
            ("subtitle", "soft_length") => {
                self.subtitle.soft_length = value.as_usize()?;
            }
            ("subtitle", "title_additive_length") => {
                self.subtitle.title_additive_length = value.as_usize()?;
            }
            _ => {}
        }

        Ok(())
    }

    fn merge_env(&mut self) -> Result<()> {
        if let Ok(value) = env::var("CMDPAL_MAX_ROWS") {
            let rows = value
                .parse::<usize>()
                .with_context(|| "invalid CMDPAL_MAX_ROWS".to_string())?;
            self.palette.max_rows =
                parse_max_rows(rows).with_context(|| "invalid CMDPAL_MAX_ROWS".to_string())?;
        }
        if let Ok(value) = env::var("CMDPAL_DEBUG") {
            self.palette.debug_scores =
                parse_bool(&value).with_context(|| "invalid CMDPAL_DEBUG".to_string())?;
        }
        if let Ok(value) = env::var("CMDPAL_SKIN") {
            self.palette.skin =
                Skin::parse(&value).with_context(|| "invalid CMDPAL_SKIN".to_string())?;
        }
        if let Ok(value) = env::var("CMDPAL_MANIFEST") {
            self.palette.manifest = non_empty(value).map(PathBuf::from);
        }

        Ok(())
    }
}

fn parse_max_rows(value: usize) -> Result<usize> {
    if value == 0 {
        return Err(anyhow!("max_rows must be at least 1"));
    }
    Ok(value)
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("invalid boolean '{value}'")),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..idx],
            _ => {}
        }
    }
    line
}

#[derive(Debug, Clone)]
enum TomlValue {
    String(String),
    Integer(u64),
    Boolean(bool),
}

impl TomlValue {
    fn as_str(&self) -> Result<&str> {
        match self {
            Self::String(value) => Ok(value.as_str()),
            _ => Err(anyhow!("expected string value")),
        }
    }

    fn into_string(self) -> Result<String> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(anyhow!("expected string value")),
        }
    }

    fn as_u64(&self) -> Result<u64> {
        match self {
            Self::Integer(value) => Ok(*value),
            _ => Err(anyhow!("expected integer value")),
        }
    }

    fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Boolean(value) => Ok(*value),
            _ => Err(anyhow!("expected boolean value")),
        }
    }

    fn as_u32(&self) -> Result<u32> {
        let value = self.as_u64()?;
        u32::try_from(value).map_err(|_| anyhow!("integer value is out of range for u32"))
    }

    fn as_usize(&self) -> Result<usize> {
        let value = self.as_u64()?;
        usize::try_from(value).map_err(|_| anyhow!("integer value is out of range for usize"))
    }
}

fn parse_value(value: &str) -> Result<TomlValue> {
    let trimmed = value.trim();
    if trimmed.starts_with('"') {
        if !trimmed.ends_with('"') || trimmed.len() < 2 {
            return Err(anyhow!("unterminated string"));
        }
        return Ok(TomlValue::String(trimmed[1..trimmed.len() - 1].to_string()));
    }

    match trimmed {
        "true" => return Ok(TomlValue::Boolean(true)),
        "false" => return Ok(TomlValue::Boolean(false)),
        _ => {}
    }

    if let Ok(number) = trimmed.parse::<u64>() {
        return Ok(TomlValue::Integer(number));
    }

    Ok(TomlValue::String(trimmed.to_string()))
}
