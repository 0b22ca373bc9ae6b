use super::{Scene, StaticRenderer, StaticStyle};
use crate::{Canvas, Color, Paint, CANVAS_CENTER, CANVAS_SIZE};

const SHADOW_COLOR: Color = Color::rgba(0, 0, 0, 128);
const SHADOW_BLUR: f32 = 8.0;
const SHADOW_OFFSET: f32 = 3.0;
const OUTLINE_WIDTH: f32 = 3.0;
const GRADIENT_STOPS: [(f32, Color); 3] = [
    (0.0, Color::rgb(0xFF, 0x6B, 0x6B)),
    (0.5, Color::rgb(0x4E, 0xCD, 0xC4)),
    (1.0, Color::rgb(0x45, 0xB7, 0xD1)),
];
/// Back-to-front extrusion copies: `(offset, color, opacity)`.
const EXTRUSION: [(f32, Color, f32); 2] = [
    (2.0, Color::rgb(0x88, 0x88, 0x88), 0.4),
    (1.0, Color::rgb(0x66, 0x66, 0x66), 0.7),
];
const NEON_COLOR: Color = Color::rgb(0xFF, 0x00, 0xFF);
const NEON_BLUR: f32 = 20.0;
const NEON_STROKE: f32 = 2.0;

pub(super) struct Plain;

impl StaticRenderer for Plain {
    fn style(&self) -> StaticStyle {
        StaticStyle::Plain
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>) {
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
    }
}

pub(super) struct Shadow;

impl StaticRenderer for Shadow {
    fn style(&self) -> StaticStyle {
        StaticStyle::Shadow
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>) {
        canvas.save();
        canvas.set_shadow(SHADOW_COLOR, SHADOW_BLUR, SHADOW_OFFSET, SHADOW_OFFSET);
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
        canvas.restore();
    }
}

/// Stroke in the text color, filled with black or white for contrast.
pub(super) struct Outline;

impl StaticRenderer for Outline {
    fn style(&self) -> StaticStyle {
        StaticStyle::Outline
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>) {
        canvas.set_stroke(scene.text_paint(), OUTLINE_WIDTH);
        scene.stroke_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
        canvas.set_fill(Paint::Solid(scene.text_color.contrasting()));
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
    }
}

pub(super) struct Gradient;

impl StaticRenderer for Gradient {
    fn style(&self) -> StaticStyle {
        StaticStyle::Gradient
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>) {
        canvas.set_fill(Paint::corner_gradient(CANVAS_SIZE as f32, &GRADIENT_STOPS));
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
    }
}

pub(super) struct ThreeD;

impl StaticRenderer for ThreeD {
    fn style(&self) -> StaticStyle {
        StaticStyle::ThreeD
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>) {
        for (offset, color, opacity) in EXTRUSION {
            canvas.save();
            canvas.set_global_alpha(opacity);
            canvas.set_fill(Paint::Solid(color));
            scene.fill_lines(canvas, CANVAS_CENTER + offset, CANVAS_CENTER + offset);
            canvas.restore();
        }
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
    }
}

pub(super) struct Neon;

impl StaticRenderer for Neon {
    fn style(&self) -> StaticStyle {
        StaticStyle::Neon
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>) {
        canvas.save();
        canvas.set_shadow(NEON_COLOR, NEON_BLUR, 0.0, 0.0);
        canvas.set_stroke(Paint::Solid(NEON_COLOR), NEON_STROKE);
        scene.stroke_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
        canvas.set_fill(Paint::Solid(Color::WHITE));
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
        canvas.restore();
    }
}
