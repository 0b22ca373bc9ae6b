use rand::Rng;
use std::f64::consts::TAU;

use super::{AnimationRenderer, AnimationStyle, Regime, Scene, Speed};
use crate::{Canvas, Color, Paint, CANVAS_CENTER};

const BOUNCE_SPEED: Speed = Speed::new(0.15, 0.3);
const BOUNCE_AMPLITUDE: f64 = 20.0;
const SPIN_SPEED: Speed = Speed::new(0.1, 0.3);
/// Hue degrees per frame.
const RAINBOW_SPEED: Speed = Speed::new(5.0, 18.0);
const SHAKE_SPEED: Speed = Speed::new(0.5, 1.5);
const SHAKE_AMPLITUDE: f64 = 5.0;
const FADE_SPEED: Speed = Speed::new(0.1, 0.3);
const ZOOM_SPEED: Speed = Speed::new(0.1, 0.3);
const ZOOM_AMPLITUDE: f64 = 0.3;
const PULSE_SPEED: Speed = Speed::new(0.2, 0.4);
const PULSE_AMPLITUDE: f64 = 0.2;
/// Export alternates the glitch offsets every `1 / speed` frames.
const GLITCH_SPEED: Speed = Speed::new(0.2, 0.2);
const GLITCH_SHIFT: f32 = 2.0;
const GLITCH_LIFT: f32 = 1.0;
const GLITCH_GHOST_ALPHA: f32 = 0.5;
const GLITCH_CYAN: Color = Color::rgb(0x00, 0xFF, 0xFF);
const GLITCH_MAGENTA: Color = Color::rgb(0xFF, 0x00, 0xFF);
const WAVE_SPEED: Speed = Speed::new(0.1, 0.3);
const WAVE_AMPLITUDE: f64 = 10.0;
const GLOW_SPEED: Speed = Speed::new(0.1, 0.3);
const GLOW_MAX_BLUR: f64 = 10.0;
const GLOW_COLOR: Color = Color::rgb(0xFF, 0xD7, 0x00);
const FLIP_SPEED: Speed = Speed::new(0.1, 0.3);

const CENTER: f64 = CANVAS_CENTER as f64;

pub(super) struct Bounce;

impl AnimationRenderer for Bounce {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Bounce
    }

    fn speed(&self) -> Speed {
        BOUNCE_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        let y = CENTER + t.sin() * BOUNCE_AMPLITUDE;
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, y as f32);
    }
}

pub(super) struct Spin;

impl AnimationRenderer for Spin {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Spin
    }

    fn speed(&self) -> Speed {
        SPIN_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime) % TAU;
        canvas.save();
        canvas.translate(CANVAS_CENTER, CANVAS_CENTER);
        canvas.rotate(t as f32);
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, 0.0, 0.0);
        canvas.restore();
    }
}

pub(super) struct Rainbow;

impl AnimationRenderer for Rainbow {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Rainbow
    }

    fn speed(&self) -> Speed {
        RAINBOW_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let hue = self.speed().phase(frame, regime) % 360.0;
        canvas.set_fill(Paint::Solid(Color::from_hsl(hue as f32, 1.0, 0.5)));
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
    }
}

pub(super) struct Shake;

impl AnimationRenderer for Shake {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Shake
    }

    fn speed(&self) -> Speed {
        SHAKE_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        let x = CENTER + t.sin() * SHAKE_AMPLITUDE;
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, x as f32, CANVAS_CENTER);
    }
}

pub(super) struct Fade;

impl AnimationRenderer for Fade {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Fade
    }

    fn speed(&self) -> Speed {
        FADE_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        canvas.save();
        canvas.set_global_alpha(((t.sin() + 1.0) / 2.0) as f32);
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
        canvas.restore();
    }
}

fn draw_scaled(canvas: &mut Canvas, scene: &Scene<'_>, sx: f64, sy: f64) {
    canvas.save();
    canvas.translate(CANVAS_CENTER, CANVAS_CENTER);
    canvas.scale(sx as f32, sy as f32);
    canvas.set_fill(scene.text_paint());
    scene.fill_lines(canvas, 0.0, 0.0);
    canvas.restore();
}

pub(super) struct Zoom;

impl AnimationRenderer for Zoom {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Zoom
    }

    fn speed(&self) -> Speed {
        ZOOM_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        let scale = 1.0 + t.sin() * ZOOM_AMPLITUDE;
        draw_scaled(canvas, scene, scale, scale);
    }
}

pub(super) struct Pulse;

impl AnimationRenderer for Pulse {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Pulse
    }

    fn speed(&self) -> Speed {
        PULSE_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        let scale = 1.0 + t.sin() * PULSE_AMPLITUDE;
        draw_scaled(canvas, scene, scale, scale);
    }
}

/// Random jitter while previewing, a fixed square wave when exporting.
pub(super) struct Glitch;

impl Glitch {
    /// `(cyan dx, magenta dx, magenta dy)` for one frame.
    fn offsets(&self, frame: u64, regime: Regime) -> (f32, f32, f32) {
        match regime {
            Regime::Preview => {
                let mut rng = rand::thread_rng();
                (
                    rng.gen_range(-GLITCH_SHIFT..GLITCH_SHIFT),
                    rng.gen_range(-GLITCH_SHIFT..GLITCH_SHIFT),
                    rng.gen_range(-GLITCH_LIFT..GLITCH_LIFT),
                )
            }
            Regime::Export => {
                let half = self.speed().phase(frame, regime).floor() as u64 % 2 == 0;
                let shift = if half { GLITCH_SHIFT } else { -GLITCH_SHIFT };
                (shift, -shift, GLITCH_LIFT)
            }
        }
    }
}

impl AnimationRenderer for Glitch {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Glitch
    }

    fn speed(&self) -> Speed {
        GLITCH_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let (cyan_dx, magenta_dx, magenta_dy) = self.offsets(frame, regime);
        canvas.set_fill(Paint::Solid(GLITCH_CYAN));
        scene.fill_lines(canvas, CANVAS_CENTER + cyan_dx, CANVAS_CENTER);
        canvas.save();
        canvas.set_global_alpha(GLITCH_GHOST_ALPHA);
        canvas.set_fill(Paint::Solid(GLITCH_MAGENTA));
        scene.fill_lines(
            canvas,
            CANVAS_CENTER + magenta_dx,
            CANVAS_CENTER + magenta_dy,
        );
        canvas.restore();
    }
}

pub(super) struct Wave;

impl AnimationRenderer for Wave {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Wave
    }

    fn speed(&self) -> Speed {
        WAVE_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        let y = CENTER + t.sin() * WAVE_AMPLITUDE * (t / 2.0).cos();
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, y as f32);
    }
}

pub(super) struct Glow;

impl AnimationRenderer for Glow {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Glow
    }

    fn speed(&self) -> Speed {
        GLOW_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        let blur = (t.sin() + 1.0) * GLOW_MAX_BLUR;
        canvas.save();
        canvas.set_shadow(GLOW_COLOR, blur as f32, 0.0, 0.0);
        canvas.set_fill(scene.text_paint());
        scene.fill_lines(canvas, CANVAS_CENTER, CANVAS_CENTER);
        canvas.restore();
    }
}

pub(super) struct Flip;

impl AnimationRenderer for Flip {
    fn style(&self) -> AnimationStyle {
        AnimationStyle::Flip
    }

    fn speed(&self) -> Speed {
        FLIP_SPEED
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, frame: u64, regime: Regime) {
        let t = self.speed().phase(frame, regime);
        draw_scaled(canvas, scene, t.cos(), 1.0);
    }
}
