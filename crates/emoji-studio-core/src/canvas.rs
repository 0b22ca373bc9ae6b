use std::fmt::Write as _;
use tiny_skia::Transform;

use crate::fonts::{script_runs, FontFamilies};
use crate::Color;

/// Transforms whose linear part has a smaller determinant draw nothing.
const MIN_DETERMINANT: f32 = 1e-5;

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient in the current user space, stops as `(offset, color)`.
    Linear {
        start: (f32, f32),
        end: (f32, f32),
        stops: Vec<(f32, Color)>,
    },
}

impl Paint {
    pub fn corner_gradient(size: f32, stops: &[(f32, Color)]) -> Self {
        Paint::Linear {
            start: (0.0, 0.0),
            end: (size, size),
            stops: stops.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shadow {
    color: Color,
    blur: f32,
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone)]
struct DrawState {
    transform: Transform,
    fill: Paint,
    stroke: Paint,
    line_width: f32,
    alpha: f32,
    shadow: Option<Shadow>,
    font_size: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill: Paint::Solid(Color::BLACK),
            stroke: Paint::Solid(Color::BLACK),
            line_width: 1.0,
            alpha: 1.0,
            shadow: None,
            font_size: 10.0,
        }
    }
}

/// Immediate-mode 2D context that records one frame as an SVG scene.
///
/// Text is always centered on its anchor point with a middle baseline. The
/// transform in effect at each drawing call is baked into the recorded
/// element, so `save`/`restore` behave like the browser canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: u32,
    families: FontFamilies,
    bold: bool,
    state: DrawState,
    stack: Vec<DrawState>,
    defs: String,
    body: String,
    next_id: usize,
}

impl Canvas {
    pub fn new(size: u32) -> Self {
        Self::with_families(size, FontFamilies::default(), true)
    }

    pub(crate) fn with_families(size: u32, families: FontFamilies, bold: bool) -> Self {
        Self {
            size,
            families,
            bold,
            state: DrawState::default(),
            stack: Vec::new(),
            defs: String::new(),
            body: String::new(),
            next_id: 0,
        }
    }

    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    /// Rotates by `radians` around the current origin.
    pub fn rotate(&mut self, radians: f32) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(Transform::from_rotate(radians.to_degrees()));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform.pre_scale(sx, sy);
    }

    pub fn set_fill(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    pub fn set_stroke(&mut self, paint: Paint, width: f32) {
        self.state.stroke = paint;
        self.state.line_width = width.max(0.0);
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    pub fn set_shadow(&mut self, color: Color, blur: f32, dx: f32, dy: f32) {
        self.state.shadow = Some(Shadow {
            color,
            blur: blur.max(0.0),
            dx,
            dy,
        });
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.state.font_size = size;
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some(common) = self.common_attrs() else {
            return;
        };
        let fill = self.paint_attrs("fill", &self.state.fill.clone());
        let _ = write!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}{} />"#,
            x, y, width, height, fill, common
        );
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let fill = self.paint_attrs("fill", &self.state.fill.clone());
        self.push_text(text, x, y, fill);
    }

    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        if self.state.line_width <= 0.0 {
            return;
        }
        let stroke = self.paint_attrs("stroke", &self.state.stroke.clone());
        let attrs = format!(
            r#" fill="none"{} stroke-width="{:.2}""#,
            stroke, self.state.line_width
        );
        self.push_text(text, x, y, attrs);
    }

    /// Serializes the recorded scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
            self.size
        );
        if !self.defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&self.defs);
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    fn push_text(&mut self, text: &str, x: f32, y: f32, paint_attrs: String) {
        if text.is_empty() {
            return;
        }
        let Some(common) = self.common_attrs() else {
            return;
        };
        let weight = if self.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}px"{} text-anchor="middle" dominant-baseline="central" xml:space="preserve"{}{}>"#,
            x,
            y,
            escape_attr(&self.families.default),
            self.state.font_size,
            weight,
            paint_attrs,
            common
        );
        for (group, run) in script_runs(text) {
            match self.families.for_group(group) {
                Some(family) => {
                    let _ = write!(
                        self.body,
                        r#"<tspan font-family="{}">{}</tspan>"#,
                        escape_attr(family),
                        escape_text(run)
                    );
                }
                None => self.body.push_str(&escape_text(run)),
            }
        }
        self.body.push_str("</text>");
    }

    /// Transform, opacity and shadow attributes; `None` when nothing would be visible.
    fn common_attrs(&mut self) -> Option<String> {
        let transform = self.state.transform;
        let [sx, ky, kx, sy] =
            [transform.sx, transform.ky, transform.kx, transform.sy].map(round_matrix_entry);
        let det = sx * sy - kx * ky;
        if !det.is_finite() || det.abs() < MIN_DETERMINANT || self.state.alpha <= 0.0 {
            return None;
        }
        let mut attrs = String::new();
        if !transform.is_identity() {
            let _ = write!(
                attrs,
                r#" transform="matrix({:.5} {:.5} {:.5} {:.5} {:.4} {:.4})""#,
                sx, ky, kx, sy, transform.tx, transform.ty
            );
        }
        if self.state.alpha < 1.0 {
            let _ = write!(attrs, r#" opacity="{:.4}""#, self.state.alpha);
        }
        if let Some(shadow) = self.state.shadow {
            if shadow.blur > 0.0 || shadow.dx != 0.0 || shadow.dy != 0.0 {
                let id = self.next_id("shadow");
                let _ = write!(
                    self.defs,
                    r#"<filter id="{}" x="-1" y="-1" width="3" height="3"><feDropShadow dx="{:.2}" dy="{:.2}" stdDeviation="{:.2}" flood-color="{}" flood-opacity="{:.3}"/></filter>"#,
                    id,
                    shadow.dx,
                    shadow.dy,
                    shadow.blur / 2.0,
                    shadow.color.hex(),
                    shadow.color.opacity()
                );
                let _ = write!(attrs, r#" filter="url(#{id})""#);
            }
        }
        Some(attrs)
    }

    fn paint_attrs(&mut self, name: &str, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => {
                if color.is_opaque() {
                    format!(r#" {}="{}""#, name, color.hex())
                } else {
                    format!(
                        r#" {0}="{1}" {0}-opacity="{2:.3}""#,
                        name,
                        color.hex(),
                        color.opacity()
                    )
                }
            }
            Paint::Linear { start, end, stops } => {
                let id = self.next_id("paint");
                let _ = write!(
                    self.defs,
                    r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}">"#,
                    id, start.0, start.1, end.0, end.1
                );
                for (offset, color) in stops {
                    let _ = write!(
                        self.defs,
                        r#"<stop offset="{:.3}" stop-color="{}" stop-opacity="{:.3}"/>"#,
                        offset.clamp(0.0, 1.0),
                        color.hex(),
                        color.opacity()
                    );
                }
                self.defs.push_str("</linearGradient>");
                format!(r#" {name}="url(#{id})""#)
            }
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }
}

fn escape_text(text: &str) -> String {
    text.replace(is_xml_illegal, "")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Matches the precision the matrix is written with.
fn round_matrix_entry(value: f32) -> f32 {
    (value * 1e5).round() / 1e5
}

fn is_xml_illegal(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
