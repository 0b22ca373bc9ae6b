const CANVAS_SIZE: u32 = 128;
const CANVAS_CENTER: f32 = 64.0;
const MIN_FONT_SIZE: f32 = 16.0;
const MAX_FONT_SIZE: f32 = 120.0;
const FIT_AVAILABLE_HEIGHT: f32 = 118.0;
const FIT_LINE_GAP: f32 = 4.0;
const MAX_LINE_SPACING: f32 = 8.0;
const LINE_SPACING_RATIO: f32 = 0.2;
const MAX_SINGLE_LINE_CHARS: usize = 8;
const MAX_LINES: usize = 3;
const MAX_LINE_CHARS: usize = 6;
const EXPORT_FRAME_COUNT: u64 = 20;
const EXPORT_FRAME_DELAY_MS: u32 = 100;
const DEFAULT_PREVIEW_INTERVAL_MS: u64 = 16;
const DEFAULT_BASE_FONT_SIZE: f32 = 32.0;
const DEFAULT_GIF_WORKERS: usize = 2;
const DEFAULT_GIF_QUALITY: u8 = 90;
const DEFAULT_GIF_SPEED: u8 = 4;
const DEFAULT_GIF_DITHER: f32 = 1.0;
const DEFAULT_PNG_OPT_LEVEL: u8 = 2;
const MAX_PNG_OPT_LEVEL: u8 = 6;
const GRADIENT_END_COLOR: Color = Color::rgb(0xFF, 0xD7, 0x00);

mod canvas;
mod color;
mod config;
mod driver;
mod encode;
mod fonts;
mod layout;
mod render;
mod studio;
mod style;
mod surface;
mod types;

pub use canvas::{Canvas, Paint};
pub use color::{Color, PRESET_COLORS};
pub use config::{
    CjkRegion, Config, Font, FontSystemFallback, GeneratorConfig, GifOptions, PngOptions,
    PngStrip, PreviewOptions,
};
pub use driver::{export_frames, PreviewLoop};
pub use encode::{encode_gif, encode_png, ExportJob};
pub use layout::{fit_text, line_centers, line_spacing, LayoutResult};
pub use render::{paint_frame, render_artifact, suggested_file_name};
pub use studio::{FrameSink, GenerateStatus, Studio, GENERATION_FAILED};
pub use style::{
    animation_renderer, static_renderer, AnimationRenderer, AnimationStyle, Regime, Scene, Speed,
    StaticRenderer, StaticStyle, StyleInfo,
};
pub use surface::FrameBuffer;
pub use types::{ArtifactFormat, Error, ExportArtifact, OutputMode, Result, TextMode};

/// Width and height of the emoji surface in pixels.
pub const SURFACE_SIZE: u32 = CANVAS_SIZE;
/// Number of frames in an exported animation.
pub const ANIMATION_FRAMES: u64 = EXPORT_FRAME_COUNT;
/// Display delay of every exported animation frame.
pub const ANIMATION_FRAME_DELAY_MS: u32 = EXPORT_FRAME_DELAY_MS;

#[cfg(test)]
mod tests;
