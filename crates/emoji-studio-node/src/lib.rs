use emoji_studio_core::{
    render_artifact, AnimationStyle, Color, Config, Error as StudioError, OutputMode,
    StaticStyle, TextMode,
};
use napi::bindgen_prelude::*;
use napi_derive::napi;

#[napi(object)]
pub struct GenerateOptions {
    pub text: String,
    /// "single" or "multi".
    pub text_mode: Option<String>,
    /// "animated" or "static". Inferred from `style` when omitted.
    pub output_mode: Option<String>,
    pub style: Option<String>,
    pub base_font_size: Option<f64>,
    pub text_color: Option<String>,
    pub use_gradient: Option<bool>,
    pub background_color: Option<String>,
    pub use_transparent_background: Option<bool>,
    /// Full JSON config used as the starting point.
    pub config_json: Option<String>,
}

#[napi(object)]
pub struct FitResult {
    pub font_size: f64,
    pub lines: Vec<String>,
}

#[napi(object)]
pub struct StyleEntry {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub animated: bool,
}

/// Renders one emoji and returns the encoded GIF or PNG bytes.
#[napi]
pub fn generate(options: GenerateOptions) -> Result<Buffer> {
    let config = build_config(options)?;
    let artifact = render_artifact(&config).map_err(to_napi)?;
    Ok(Buffer::from(artifact.bytes))
}

#[napi]
pub fn fit_text(text: String, base_size: f64) -> Option<FitResult> {
    emoji_studio_core::fit_text(&text, base_size as f32).map(|layout| FitResult {
        font_size: layout.font_size as f64,
        lines: layout.lines,
    })
}

#[napi]
pub fn styles() -> Vec<StyleEntry> {
    let animated = AnimationStyle::ALL.iter().map(|s| (s.info(), true));
    let still = StaticStyle::ALL.iter().map(|s| (s.info(), false));
    animated
        .chain(still)
        .map(|(info, animated)| StyleEntry {
            id: info.id.to_string(),
            name: info.name.to_string(),
            icon: info.icon.to_string(),
            animated,
        })
        .collect()
}

#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn build_config(options: GenerateOptions) -> Result<Config> {
    let mut config = match options.config_json.as_deref() {
        Some(json) => serde_json::from_str::<Config>(json).map_err(invalid_arg)?,
        None => Config::default(),
    };
    let emoji = &mut config.emoji;

    let output_mode = match options.output_mode.as_deref() {
        Some("animated") => Some(OutputMode::Animated),
        Some("static") => Some(OutputMode::Static),
        Some(other) => return Err(invalid_arg(format!("unknown output mode {other}"))),
        None => None,
    };
    if let Some(mode) = output_mode {
        emoji.set_output_mode(mode);
    }
    if let Some(id) = options.style.as_deref() {
        let animated =
            AnimationStyle::from_id(id).filter(|_| output_mode != Some(OutputMode::Static));
        let still =
            StaticStyle::from_id(id).filter(|_| output_mode != Some(OutputMode::Animated));
        match (animated, still) {
            (Some(style), _) => {
                emoji.set_output_mode(OutputMode::Animated);
                emoji.set_animation_style(style);
            }
            (None, Some(style)) => {
                emoji.set_output_mode(OutputMode::Static);
                emoji.set_static_style(style);
            }
            (None, None) => return Err(invalid_arg(format!("unknown style {id}"))),
        }
    }

    match options.text_mode.as_deref() {
        Some("single") => emoji.set_text_mode(TextMode::Single),
        Some("multi") => emoji.set_text_mode(TextMode::Multi),
        Some(other) => return Err(invalid_arg(format!("unknown text mode {other}"))),
        None if options.text.contains('\n') => emoji.set_text_mode(TextMode::Multi),
        None => {}
    }
    emoji.set_text(&options.text);

    if let Some(size) = options.base_font_size {
        emoji.set_base_font_size(size as f32);
    }
    if let Some(color) = options.text_color.as_deref() {
        emoji.set_text_color(Color::parse(color).map_err(to_napi)?);
    }
    if let Some(enabled) = options.use_gradient {
        emoji.set_use_gradient(enabled);
    }
    if let Some(color) = options.background_color.as_deref() {
        emoji.set_background_color(Color::parse(color).map_err(to_napi)?);
    }
    if let Some(enabled) = options.use_transparent_background {
        emoji.set_use_transparent_background(enabled);
    }
    Ok(config)
}

fn invalid_arg(err: impl std::fmt::Display) -> Error {
    Error::new(Status::InvalidArg, err.to_string())
}

fn to_napi(err: StudioError) -> Error {
    match err {
        StudioError::InvalidInput(_) => invalid_arg(err),
        other => Error::new(Status::GenericFailure, other.to_string()),
    }
}
