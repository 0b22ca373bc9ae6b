use serde::{Deserialize, Serialize};

use crate::layout::line_offsets;
use crate::{Canvas, Color, LayoutResult, Paint, CANVAS_SIZE, GRADIENT_END_COLOR};

mod animated;
mod still;

/// Which timeline a frame belongs to. Export runs faster so that the short
/// fixed-length sequence still covers a full cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Preview,
    Export,
}

/// Per-frame phase increments of one animation style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    pub preview: f64,
    pub export: f64,
}

impl Speed {
    pub const fn new(preview: f64, export: f64) -> Self {
        Self { preview, export }
    }

    pub fn for_regime(self, regime: Regime) -> f64 {
        match regime {
            Regime::Preview => self.preview,
            Regime::Export => self.export,
        }
    }

    /// Phase of `frame`; the only animation state there is.
    pub fn phase(self, frame: u64, regime: Regime) -> f64 {
        frame as f64 * self.for_regime(regime)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStyle {
    Bounce,
    Spin,
    Rainbow,
    Shake,
    Fade,
    Zoom,
    Pulse,
    Glitch,
    Wave,
    Glow,
    Flip,
}

impl AnimationStyle {
    pub const ALL: [AnimationStyle; 11] = [
        AnimationStyle::Bounce,
        AnimationStyle::Spin,
        AnimationStyle::Rainbow,
        AnimationStyle::Shake,
        AnimationStyle::Fade,
        AnimationStyle::Zoom,
        AnimationStyle::Pulse,
        AnimationStyle::Glitch,
        AnimationStyle::Wave,
        AnimationStyle::Glow,
        AnimationStyle::Flip,
    ];

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.id().eq_ignore_ascii_case(id))
    }

    pub fn info(self) -> StyleInfo {
        let (id, name, icon) = match self {
            AnimationStyle::Bounce => ("bounce", "Bounce", "🏀"),
            AnimationStyle::Spin => ("spin", "Spin", "🔄"),
            AnimationStyle::Rainbow => ("rainbow", "Rainbow", "🌈"),
            AnimationStyle::Shake => ("shake", "Shake", "〰️"),
            AnimationStyle::Fade => ("fade", "Fade", "👻"),
            AnimationStyle::Zoom => ("zoom", "Zoom", "🔍"),
            AnimationStyle::Pulse => ("pulse", "Pulse", "💗"),
            AnimationStyle::Glitch => ("glitch", "Glitch", "📺"),
            AnimationStyle::Wave => ("wave", "Wave", "🌊"),
            AnimationStyle::Glow => ("glow", "Glow", "✨"),
            AnimationStyle::Flip => ("flip", "Flip", "🔃"),
        };
        StyleInfo { id, name, icon }
    }

    /// Whether the same frame always paints the same pixels.
    pub fn is_deterministic(self, regime: Regime) -> bool {
        !(self == AnimationStyle::Glitch && regime == Regime::Preview)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticStyle {
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "shadow")]
    Shadow,
    #[serde(rename = "outline")]
    Outline,
    #[serde(rename = "gradient")]
    Gradient,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "neon")]
    Neon,
}

impl StaticStyle {
    pub const ALL: [StaticStyle; 6] = [
        StaticStyle::Plain,
        StaticStyle::Shadow,
        StaticStyle::Outline,
        StaticStyle::Gradient,
        StaticStyle::ThreeD,
        StaticStyle::Neon,
    ];

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.id().eq_ignore_ascii_case(id))
    }

    pub fn info(self) -> StyleInfo {
        let (id, name, icon) = match self {
            StaticStyle::Plain => ("plain", "Plain", "📝"),
            StaticStyle::Shadow => ("shadow", "Shadow", "🌑"),
            StaticStyle::Outline => ("outline", "Outline", "⭕"),
            StaticStyle::Gradient => ("gradient", "Gradient", "🎨"),
            StaticStyle::ThreeD => ("3d", "3D", "📦"),
            StaticStyle::Neon => ("neon", "Neon", "💡"),
        };
        StyleInfo { id, name, icon }
    }
}

/// What every renderer draws: the fitted lines and the user's text paint.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub layout: &'a LayoutResult,
    pub text_color: Color,
    pub use_gradient: bool,
}

impl<'a> Scene<'a> {
    pub fn new(layout: &'a LayoutResult, text_color: Color, use_gradient: bool) -> Self {
        Self {
            layout,
            text_color,
            use_gradient,
        }
    }

    /// Flat text color, or the corner-to-corner gradient starting from it.
    pub fn text_paint(&self) -> Paint {
        if self.use_gradient {
            Paint::corner_gradient(
                CANVAS_SIZE as f32,
                &[(0.0, self.text_color), (1.0, GRADIENT_END_COLOR)],
            )
        } else {
            Paint::Solid(self.text_color)
        }
    }

    /// Fills every line with the block centered on `(x, y)`.
    pub fn fill_lines(&self, canvas: &mut Canvas, x: f32, y: f32) {
        for (line, offset) in self.layout.lines.iter().zip(line_offsets(self.layout)) {
            canvas.fill_text(line, x, y + offset);
        }
    }

    pub fn stroke_lines(&self, canvas: &mut Canvas, x: f32, y: f32) {
        for (line, offset) in self.layout.lines.iter().zip(line_offsets(self.layout)) {
            canvas.stroke_text(line, x, y + offset);
        }
    }
}

/// Paints one frame of an animation. Implementations keep no state; the
/// phase comes from `frame` alone.
pub trait AnimationRenderer: Send + Sync {
    fn style(&self) -> AnimationStyle;

    fn speed(&self) -> Speed;

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime);
}

/// Paints a fixed composition.
pub trait StaticRenderer: Send + Sync {
    fn style(&self) -> StaticStyle;

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>);
}

pub fn animation_renderer(style: AnimationStyle) -> &'static dyn AnimationRenderer {
    match style {
        AnimationStyle::Bounce => &animated::Bounce,
        AnimationStyle::Spin => &animated::Spin,
        AnimationStyle::Rainbow => &animated::Rainbow,
        AnimationStyle::Shake => &animated::Shake,
        AnimationStyle::Fade => &animated::Fade,
        AnimationStyle::Zoom => &animated::Zoom,
        AnimationStyle::Pulse => &animated::Pulse,
        AnimationStyle::Glitch => &animated::Glitch,
        AnimationStyle::Wave => &animated::Wave,
        AnimationStyle::Glow => &animated::Glow,
        AnimationStyle::Flip => &animated::Flip,
    }
}

pub fn static_renderer(style: StaticStyle) -> &'static dyn StaticRenderer {
    match style {
        StaticStyle::Plain => &still::Plain,
        StaticStyle::Shadow => &still::Shadow,
        StaticStyle::Outline => &still::Outline,
        StaticStyle::Gradient => &still::Gradient,
        StaticStyle::ThreeD => &still::ThreeD,
        StaticStyle::Neon => &still::Neon,
    }
}
