use emoji_studio_core::{AnimationStyle, Color, OutputMode, StaticStyle};
use std::error::Error;

/// A style id resolved against both registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StyleChoice {
    Animated(AnimationStyle),
    Static(StaticStyle),
}

impl StyleChoice {
    pub(crate) fn output_mode(self) -> OutputMode {
        match self {
            StyleChoice::Animated(_) => OutputMode::Animated,
            StyleChoice::Static(_) => OutputMode::Static,
        }
    }
}

/// Resolves a style id. With `mode` set only that registry is searched;
/// otherwise animated ids win over static ones.
pub(crate) fn parse_style(
    input: &str,
    mode: Option<OutputMode>,
) -> Result<StyleChoice, Box<dyn Error>> {
    let id = input.trim();
    let animated = AnimationStyle::from_id(id).map(StyleChoice::Animated);
    let still = StaticStyle::from_id(id).map(StyleChoice::Static);
    let found = match mode {
        Some(OutputMode::Animated) => animated,
        Some(OutputMode::Static) => still,
        None => animated.or(still),
    };
    found.ok_or_else(|| format!("unknown style: {id} (see --list-styles)").into())
}

pub(crate) fn parse_color(input: &str) -> Result<Color, Box<dyn Error>> {
    Ok(Color::parse(input)?)
}

pub(crate) fn parse_list(input: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(trimmed
        .split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect())
}

pub(crate) fn parse_preview_seconds(seconds: f32) -> Result<std::time::Duration, Box<dyn Error>> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("invalid preview duration: {seconds}").into());
    }
    Ok(std::time::Duration::from_secs_f32(seconds))
}
