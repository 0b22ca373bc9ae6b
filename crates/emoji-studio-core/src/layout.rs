use crate::{
    CANVAS_CENTER, FIT_AVAILABLE_HEIGHT, FIT_LINE_GAP, LINE_SPACING_RATIO, MAX_FONT_SIZE,
    MAX_LINES, MAX_LINE_CHARS, MAX_LINE_SPACING, MAX_SINGLE_LINE_CHARS, MIN_FONT_SIZE,
};

/// Effective font size and cleaned lines for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub font_size: f32,
    pub lines: Vec<String>,
}

/// Fits `text` into the square surface starting from the requested `base_size`.
///
/// Lines are split on line breaks, trimmed, and dropped when empty. Returns
/// `None` when nothing is left to draw. The result depends only on the inputs.
pub fn fit_text(text: &str, base_size: f32) -> Option<LayoutResult> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if lines.is_empty() {
        return None;
    }

    let font_size = if lines.len() == 1 {
        let len = lines[0].chars().count();
        if len == 1 {
            (base_size * 2.2).min(110.0)
        } else {
            width_budget(len, base_size)
        }
    } else {
        let count = lines.len() as f32;
        let height_budget = FIT_AVAILABLE_HEIGHT / count - FIT_LINE_GAP * (count - 1.0);
        let longest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(1);
        let width = if longest == 1 {
            (base_size * 2.2).min(110.0)
        } else {
            width_budget(longest, base_size)
        };
        height_budget.min(width).min(base_size * 1.2)
    };

    Some(LayoutResult {
        font_size: font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        lines,
    })
}

fn width_budget(len: usize, base_size: f32) -> f32 {
    match len {
        0..=2 => (base_size * 1.5).min(90.0),
        3 => (base_size * 1.2).min(70.0),
        4 => base_size.min(60.0),
        _ => (base_size * 4.0 / len as f32).min(50.0),
    }
}

pub fn line_spacing(font_size: f32) -> f32 {
    (font_size * LINE_SPACING_RATIO).min(MAX_LINE_SPACING)
}

/// Vertical center of every line when the block is centered on `center_y`.
pub fn line_centers(layout: &LayoutResult, center_y: f32) -> Vec<f32> {
    let count = layout.lines.len() as f32;
    let spacing = line_spacing(layout.font_size);
    let block = count * layout.font_size + (count - 1.0).max(0.0) * spacing;
    let first = center_y - block / 2.0 + layout.font_size / 2.0;
    (0..layout.lines.len())
        .map(|idx| first + idx as f32 * (layout.font_size + spacing))
        .collect()
}

/// Line offsets relative to the canvas center, for drawing under a transform.
pub(crate) fn line_offsets(layout: &LayoutResult) -> Vec<f32> {
    line_centers(layout, CANVAS_CENTER)
        .into_iter()
        .map(|y| y - CANVAS_CENTER)
        .collect()
}

pub(crate) fn chars_truncated(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Drops control characters XML cannot carry; line breaks survive.
fn strip_controls(text: &str) -> String {
    text.chars()
        .filter(|&ch| !ch.is_control() || matches!(ch, '\n' | '\r'))
        .collect()
}

pub(crate) fn normalize_single_line(text: &str) -> String {
    let flat = strip_controls(text)
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ");
    chars_truncated(&flat, MAX_SINGLE_LINE_CHARS)
}

pub(crate) fn normalize_multi_line(text: &str) -> String {
    strip_controls(text)
        .replace("\r\n", "\n")
        .split('\n')
        .take(MAX_LINES)
        .map(|line| chars_truncated(line, MAX_LINE_CHARS))
        .collect::<Vec<_>>()
        .join("\n")
}
