use crate::parse::parse_color;
use dialoguer::{Confirm, Input, Select};
use emoji_studio_core::{
    AnimationStyle, Color, Config, OutputMode, StaticStyle, StyleInfo, TextMode, PRESET_COLORS,
};
use std::error::Error;

/// Separates lines when multi-line text is typed on one prompt line.
const LINE_SEPARATOR: char = '|';

pub(crate) fn run_interactive(config: &mut Config) -> Result<(), Box<dyn Error>> {
    let prompter = DialoguerPrompter;
    run_interactive_with(&prompter, config)
}

pub(crate) trait Prompter {
    fn select(&self, prompt: &str, items: &[&str], default: usize)
        -> Result<usize, Box<dyn Error>>;
    fn input_string(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<String, Box<dyn Error>>;
    fn input_f32(&self, prompt: &str, default: f32) -> Result<f32, Box<dyn Error>>;
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, Box<dyn Error>>;
}

struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(
        &self,
        prompt: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, Box<dyn Error>> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn input_string(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<String, Box<dyn Error>> {
        let mut input = Input::new().with_prompt(prompt).allow_empty(allow_empty);
        if let Some(value) = default {
            input = input.default(value.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn input_f32(&self, prompt: &str, default: f32) -> Result<f32, Box<dyn Error>> {
        Ok(Input::new()
            .with_prompt(prompt)
            .default(default)
            .interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, Box<dyn Error>> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

/// Walks the five steps of the studio: text, style, size, colors, background.
pub(crate) fn run_interactive_with(
    prompter: &dyn Prompter,
    config: &mut Config,
) -> Result<(), Box<dyn Error>> {
    let emoji = &mut config.emoji;

    // 1. text
    let text_mode = match emoji.text_mode() {
        TextMode::Single => 0,
        TextMode::Multi => 1,
    };
    let text_mode = prompter.select(
        "Text mode",
        &["single line (up to 8 characters)", "multi-line (3 lines of 6)"],
        text_mode,
    )?;
    let text_mode = if text_mode == 1 {
        TextMode::Multi
    } else {
        TextMode::Single
    };
    emoji.set_text_mode(text_mode);
    let text = match text_mode {
        TextMode::Single => prompter.input_string("Text", Some(emoji.text()), false)?,
        TextMode::Multi => {
            let current = emoji.text().replace('\n', &LINE_SEPARATOR.to_string());
            prompter
                .input_string("Text (separate lines with |)", Some(&current), false)?
                .replace(LINE_SEPARATOR, "\n")
        }
    };
    emoji.set_text(&text);

    // 2. style
    let mode = match emoji.output_mode() {
        OutputMode::Animated => 0,
        OutputMode::Static => 1,
    };
    let mode = prompter.select("Output", &["animated (GIF)", "static (PNG)"], mode)?;
    if mode == 1 {
        emoji.set_output_mode(OutputMode::Static);
        let infos: Vec<StyleInfo> = StaticStyle::ALL.iter().map(|s| s.info()).collect();
        let current = StaticStyle::ALL
            .iter()
            .position(|s| *s == emoji.static_style())
            .unwrap_or(0);
        let picked = pick_style(prompter, &infos, current)?;
        emoji.set_static_style(StaticStyle::ALL[picked]);
    } else {
        emoji.set_output_mode(OutputMode::Animated);
        let infos: Vec<StyleInfo> = AnimationStyle::ALL.iter().map(|s| s.info()).collect();
        let current = AnimationStyle::ALL
            .iter()
            .position(|s| *s == emoji.animation_style())
            .unwrap_or(0);
        let picked = pick_style(prompter, &infos, current)?;
        emoji.set_animation_style(AnimationStyle::ALL[picked]);
    }

    // 3. size
    let size = prompter.input_f32("Base font size (16-120)", emoji.base_font_size())?;
    emoji.set_base_font_size(size);

    // 4. colors
    let text_color = pick_color(prompter, "Text color", emoji.text_color())?;
    emoji.set_text_color(text_color);
    let gradient = prompter.confirm("Gradient text?", emoji.use_gradient())?;
    emoji.set_use_gradient(gradient);

    // 5. background
    if emoji.output_mode() == OutputMode::Static {
        let transparent =
            prompter.confirm("Transparent background?", emoji.use_transparent_background())?;
        emoji.set_use_transparent_background(transparent);
    }
    if !emoji.use_transparent_background() {
        let background = pick_color(prompter, "Background color", emoji.background_color())?;
        emoji.set_background_color(background);
    }
    Ok(())
}

fn pick_style(
    prompter: &dyn Prompter,
    infos: &[StyleInfo],
    current: usize,
) -> Result<usize, Box<dyn Error>> {
    let labels: Vec<String> = infos
        .iter()
        .map(|info| format!("{} {}", info.icon, info.name))
        .collect();
    let items: Vec<&str> = labels.iter().map(String::as_str).collect();
    let picked = prompter.select("Style", &items, current)?;
    if picked >= infos.len() {
        return Err(format!("invalid style choice: {picked}").into());
    }
    Ok(picked)
}

/// Preset swatches first, then a free-form entry.
fn pick_color(
    prompter: &dyn Prompter,
    prompt: &str,
    current: Color,
) -> Result<Color, Box<dyn Error>> {
    let labels: Vec<String> = PRESET_COLORS
        .iter()
        .map(|(name, hex)| format!("{name} {hex}"))
        .chain(std::iter::once("custom...".to_string()))
        .collect();
    let items: Vec<&str> = labels.iter().map(String::as_str).collect();
    let current_hex = current.hex();
    let default = PRESET_COLORS
        .iter()
        .position(|(_, hex)| hex.eq_ignore_ascii_case(&current_hex))
        .unwrap_or(PRESET_COLORS.len());
    let picked = prompter.select(prompt, &items, default)?;
    match PRESET_COLORS.get(picked) {
        Some((_, hex)) => parse_color(hex),
        None => parse_color(&prompter.input_string(prompt, Some(&current_hex), false)?),
    }
}
