use clap::{Parser, ValueEnum};
use emoji_studio_core::{CjkRegion, FontSystemFallback, OutputMode, PngStrip, TextMode};

#[derive(Parser, Debug)]
#[command(
    name = "emoji-studio",
    about = "Turn short text into 128x128 emoji images (animated GIF or still PNG).",
    version
)]
pub(crate) struct Args {
    /// Emoji text. Use "-" to read from stdin.
    pub(crate) text: Option<String>,

    /// Output file path or directory.
    /// If omitted, writes to stdout (or {text}_{style}.{ext} when stdout is a TTY).
    #[arg(short, long)]
    pub(crate) output: Option<std::path::PathBuf>,

    /// JSON config file path (default/base/full/user or custom file).
    #[arg(short, long)]
    pub(crate) config: Option<String>,

    /// Use interactive mode to configure settings.
    #[arg(short, long)]
    pub(crate) interactive: bool,

    /// Print every style id with its name and exit.
    #[arg(long)]
    pub(crate) list_styles: bool,

    /// Show a live terminal preview for this many seconds before exporting.
    #[arg(long, value_name = "SECONDS")]
    pub(crate) preview: Option<f32>,

    /// Output mode (animated GIF or static PNG).
    #[arg(short = 'm', long, value_enum)]
    pub(crate) mode: Option<OutputModeArg>,

    /// Style id. Animated ids select animated output, static ids static output
    /// (unless --mode says otherwise).
    #[arg(short = 's', long)]
    pub(crate) style: Option<String>,

    /// Text entry mode.
    #[arg(long = "text-mode", value_enum)]
    pub(crate) text_mode: Option<TextModeArg>,

    /// Shorthand for --text-mode multi.
    #[arg(long, conflicts_with = "text_mode")]
    pub(crate) multi: bool,

    /// Base font size (16-120).
    #[arg(long)]
    pub(crate) size: Option<f32>,

    /// Text color (#RGB, #RRGGBB, #RRGGBBAA or a preset name).
    #[arg(long)]
    pub(crate) color: Option<String>,

    /// Fill text with a gradient from the text color to gold.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub(crate) gradient: Option<bool>,

    /// Background color.
    #[arg(short = 'b', long)]
    pub(crate) background: Option<String>,

    /// Transparent background (static output only).
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub(crate) transparent: Option<bool>,

    /// Font family.
    #[arg(long = "font.family")]
    pub(crate) font_family: Option<String>,

    /// Font file path.
    #[arg(long = "font.file")]
    pub(crate) font_file: Option<String>,

    /// Font fallback families (comma-separated).
    #[arg(long = "font.fallbacks")]
    pub(crate) font_fallbacks: Option<String>,

    /// Bold text.
    #[arg(
        long = "font.bold",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub(crate) font_bold: Option<bool>,

    /// System font fallback (auto, always, never).
    #[arg(long = "font.system-fallback", value_enum)]
    pub(crate) font_system_fallback: Option<FontSystemFallbackArg>,

    /// CJK region preference (auto, sc, tc, hk, jp, kr).
    #[arg(long = "font.cjk-region", value_enum)]
    pub(crate) font_cjk_region: Option<FontCjkRegionArg>,

    /// Font directories to scan (comma-separated).
    #[arg(long = "font.dirs")]
    pub(crate) font_dirs: Option<String>,

    /// Optimize PNG output losslessly.
    #[arg(
        long = "png.opt",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub(crate) png_opt: Option<bool>,

    /// PNG optimization level (0-6).
    #[arg(long = "png.opt-level")]
    pub(crate) png_opt_level: Option<u8>,

    /// PNG metadata stripping (none, safe, all).
    #[arg(long = "png.strip", value_enum)]
    pub(crate) png_strip: Option<PngStripArg>,

    /// Threads used to quantize GIF frames.
    #[arg(long = "gif.workers")]
    pub(crate) gif_workers: Option<usize>,

    /// GIF palette quality (0-100).
    #[arg(long = "gif.quality")]
    pub(crate) gif_quality: Option<u8>,

    /// GIF quantization speed (1-10, higher is faster).
    #[arg(long = "gif.speed")]
    pub(crate) gif_speed: Option<u8>,

    /// GIF dithering level (0.0-1.0).
    #[arg(long = "gif.dither")]
    pub(crate) gif_dither: Option<f32>,

    /// Preview frame interval in milliseconds.
    #[arg(long = "preview.interval")]
    pub(crate) preview_interval: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum OutputModeArg {
    Animated,
    Static,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum TextModeArg {
    Single,
    Multi,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum PngStripArg {
    None,
    Safe,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum FontSystemFallbackArg {
    Auto,
    Always,
    Never,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum FontCjkRegionArg {
    Auto,
    Sc,
    Tc,
    Hk,
    Jp,
    Kr,
}

impl From<OutputModeArg> for OutputMode {
    fn from(value: OutputModeArg) -> Self {
        match value {
            OutputModeArg::Animated => OutputMode::Animated,
            OutputModeArg::Static => OutputMode::Static,
        }
    }
}

impl From<TextModeArg> for TextMode {
    fn from(value: TextModeArg) -> Self {
        match value {
            TextModeArg::Single => TextMode::Single,
            TextModeArg::Multi => TextMode::Multi,
        }
    }
}

impl From<PngStripArg> for PngStrip {
    fn from(value: PngStripArg) -> Self {
        match value {
            PngStripArg::None => PngStrip::None,
            PngStripArg::Safe => PngStrip::Safe,
            PngStripArg::All => PngStrip::All,
        }
    }
}

impl From<FontSystemFallbackArg> for FontSystemFallback {
    fn from(value: FontSystemFallbackArg) -> Self {
        match value {
            FontSystemFallbackArg::Auto => FontSystemFallback::Auto,
            FontSystemFallbackArg::Always => FontSystemFallback::Always,
            FontSystemFallbackArg::Never => FontSystemFallback::Never,
        }
    }
}

impl From<FontCjkRegionArg> for CjkRegion {
    fn from(value: FontCjkRegionArg) -> Self {
        match value {
            FontCjkRegionArg::Auto => CjkRegion::Auto,
            FontCjkRegionArg::Sc => CjkRegion::Sc,
            FontCjkRegionArg::Tc => CjkRegion::Tc,
            FontCjkRegionArg::Hk => CjkRegion::Hk,
            FontCjkRegionArg::Jp => CjkRegion::Jp,
            FontCjkRegionArg::Kr => CjkRegion::Kr,
        }
    }
}
