use serde::{Deserialize, Serialize};

use crate::layout::{chars_truncated, normalize_multi_line, normalize_single_line};
use crate::style::{AnimationStyle, StaticStyle};
use crate::{
    Color, Error, OutputMode, Result, TextMode, DEFAULT_BASE_FONT_SIZE, DEFAULT_GIF_DITHER,
    DEFAULT_GIF_QUALITY, DEFAULT_GIF_SPEED, DEFAULT_GIF_WORKERS, DEFAULT_PNG_OPT_LEVEL,
    DEFAULT_PREVIEW_INTERVAL_MS, MAX_FONT_SIZE, MAX_LINE_CHARS, MAX_SINGLE_LINE_CHARS,
    MIN_FONT_SIZE,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub emoji: GeneratorConfig,
    pub font: Font,
    pub png: PngOptions,
    pub gif: GifOptions,
    pub preview: PreviewOptions,
}

/// The user-editable Studio parameters.
///
/// Every mutation goes through a setter so that the cross-field rules hold at
/// all times: text respects the limits of the active [`TextMode`], the base
/// size stays within its slider range, and animated output never carries a
/// transparent background (GIF frames have no reliable alpha).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeneratorConfigFile")]
pub struct GeneratorConfig {
    text: String,
    text_mode: TextMode,
    output_mode: OutputMode,
    animation_style: AnimationStyle,
    static_style: StaticStyle,
    base_font_size: f32,
    text_color: Color,
    use_gradient: bool,
    background_color: Color,
    use_transparent_background: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let mut config = Self {
            text: String::new(),
            text_mode: TextMode::Single,
            output_mode: OutputMode::Static,
            animation_style: AnimationStyle::Bounce,
            static_style: StaticStyle::Plain,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            text_color: Color::rgb(0x4A, 0x15, 0x4B),
            use_gradient: false,
            background_color: Color::WHITE,
            use_transparent_background: true,
        };
        config.set_output_mode(OutputMode::Animated);
        config
    }
}

impl GeneratorConfig {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mode(&self) -> TextMode {
        self.text_mode
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn animation_style(&self) -> AnimationStyle {
        self.animation_style
    }

    pub fn static_style(&self) -> StaticStyle {
        self.static_style
    }

    pub fn base_font_size(&self) -> f32 {
        self.base_font_size
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn use_gradient(&self) -> bool {
        self.use_gradient
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn use_transparent_background(&self) -> bool {
        self.use_transparent_background
    }

    /// Id of whichever style the output mode selects.
    pub fn style_id(&self) -> &'static str {
        match self.output_mode {
            OutputMode::Animated => self.animation_style.id(),
            OutputMode::Static => self.static_style.id(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = match self.text_mode {
            TextMode::Single => normalize_single_line(text),
            TextMode::Multi => normalize_multi_line(text),
        };
    }

    /// Switches the entry widget, reflowing the current text to the new limits.
    pub fn set_text_mode(&mut self, mode: TextMode) {
        if mode == self.text_mode {
            return;
        }
        self.text = match mode {
            TextMode::Single => {
                let joined = self
                    .text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                chars_truncated(&joined, MAX_SINGLE_LINE_CHARS)
            }
            TextMode::Multi => {
                let single = self.text.trim();
                if single.chars().count() > MAX_LINE_CHARS && !single.contains('\n') {
                    let chars: Vec<char> = single.chars().collect();
                    let wrapped = chars
                        .chunks(MAX_LINE_CHARS)
                        .map(|chunk| chunk.iter().collect::<String>())
                        .collect::<Vec<_>>()
                        .join("\n");
                    normalize_multi_line(&wrapped)
                } else {
                    normalize_multi_line(single)
                }
            }
        };
        self.text_mode = mode;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
        if mode == OutputMode::Animated {
            self.use_transparent_background = false;
        }
    }

    pub fn set_animation_style(&mut self, style: AnimationStyle) {
        self.animation_style = style;
    }

    pub fn set_static_style(&mut self, style: StaticStyle) {
        self.static_style = style;
    }

    pub fn set_base_font_size(&mut self, size: f32) {
        self.base_font_size = if size.is_finite() {
            size.round().clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        } else {
            DEFAULT_BASE_FONT_SIZE
        };
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn set_use_gradient(&mut self, enabled: bool) {
        self.use_gradient = enabled;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Ignored while the output mode is animated.
    pub fn set_use_transparent_background(&mut self, enabled: bool) {
        self.use_transparent_background = enabled && self.output_mode == OutputMode::Static;
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct GeneratorConfigFile {
    text: String,
    text_mode: TextMode,
    output_mode: OutputMode,
    animation_style: String,
    static_style: String,
    base_font_size: f32,
    text_color: Color,
    use_gradient: bool,
    background_color: Color,
    use_transparent_background: bool,
}

impl Default for GeneratorConfigFile {
    fn default() -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            text: String::new(),
            text_mode: defaults.text_mode,
            output_mode: defaults.output_mode,
            animation_style: defaults.animation_style.id().to_string(),
            static_style: defaults.static_style.id().to_string(),
            base_font_size: defaults.base_font_size,
            text_color: defaults.text_color,
            use_gradient: defaults.use_gradient,
            background_color: defaults.background_color,
            use_transparent_background: true,
        }
    }
}

impl TryFrom<GeneratorConfigFile> for GeneratorConfig {
    type Error = Error;

    fn try_from(file: GeneratorConfigFile) -> Result<Self> {
        let animation_style = AnimationStyle::from_id(&file.animation_style).ok_or_else(|| {
            Error::InvalidInput(format!("unknown animation style {}", file.animation_style))
        })?;
        let static_style = StaticStyle::from_id(&file.static_style).ok_or_else(|| {
            Error::InvalidInput(format!("unknown static style {}", file.static_style))
        })?;

        let mut config = GeneratorConfig::default();
        config.set_output_mode(OutputMode::Static);
        config.set_use_transparent_background(file.use_transparent_background);
        config.set_output_mode(file.output_mode);
        config.set_text_mode(file.text_mode);
        config.set_text(&file.text);
        config.set_animation_style(animation_style);
        config.set_static_style(static_style);
        config.set_base_font_size(file.base_font_size);
        config.set_text_color(file.text_color);
        config.set_use_gradient(file.use_gradient);
        config.set_background_color(file.background_color);
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Leading family of every text run.
    pub family: String,
    /// A font file loaded on top of the directories below.
    pub file: Option<String>,
    pub fallbacks: Vec<String>,
    pub bold: bool,
    pub system_fallback: FontSystemFallback,
    /// Which CJK family set to prefer for Han text.
    pub cjk_region: CjkRegion,
    /// Extra font directories; `~` expands to the home directory.
    pub dirs: Vec<String>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            file: None,
            fallbacks: vec!["sans-serif".to_string()],
            bold: true,
            system_fallback: FontSystemFallback::default(),
            cjk_region: CjkRegion::default(),
            dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontSystemFallback {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CjkRegion {
    #[default]
    Auto,
    Sc,
    Tc,
    Hk,
    Jp,
    Kr,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PngStrip {
    None,
    #[default]
    Safe,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PngOptions {
    /// Run the lossless optimizer after encoding.
    pub optimize: bool,
    /// Optimizer preset, clamped to 0..=6.
    pub level: u8,
    pub strip: PngStrip,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            level: DEFAULT_PNG_OPT_LEVEL,
            strip: PngStrip::Safe,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GifOptions {
    pub workers: usize,
    pub quality: u8,
    pub speed: u8,
    pub dither: f32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_GIF_WORKERS,
            quality: DEFAULT_GIF_QUALITY,
            speed: DEFAULT_GIF_SPEED,
            dither: DEFAULT_GIF_DITHER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    pub frame_interval_ms: u64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_PREVIEW_INTERVAL_MS,
        }
    }
}
