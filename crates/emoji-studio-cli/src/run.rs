use crate::args::Args;
use crate::config::{load_config, save_user_config};
use crate::interactive::run_interactive;
use crate::io::{read_stdin_with, write_output_with_tty};
use crate::parse::{parse_color, parse_list, parse_preview_seconds, parse_style, StyleChoice};
use crate::preview::{terminal_sink, CLEAR_SCREEN, RESTORE_SCREEN};
use clap::Parser;
use emoji_studio_core::{
    render_artifact, AnimationStyle, Config, ExportArtifact, GenerateStatus, OutputMode,
    StaticStyle, Studio, TextMode, GENERATION_FAILED,
};
use std::error::Error;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

pub(crate) fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    run_with(
        args,
        atty::is(atty::Stream::Stdin),
        atty::is(atty::Stream::Stdout),
        None,
    )
}

pub(crate) fn run_with(
    args: Args,
    stdin_is_tty: bool,
    stdout_is_tty: bool,
    stdin_override: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    if args.list_styles {
        print!("{}", style_listing());
        return Ok(());
    }

    let (mut config, is_default_config) = load_config(args.config.as_deref())?;
    apply_args(&mut config, &args)?;

    let text = match args.text.as_deref() {
        Some("-") => Some(read_stdin_with(stdin_override)?),
        Some(text) => Some(text.to_string()),
        None if !stdin_is_tty && !args.interactive => Some(read_stdin_with(stdin_override)?),
        None => None,
    };
    if let Some(text) = text {
        apply_text(&mut config, &args, &text);
    }

    if args.interactive {
        if !stdin_is_tty {
            return Err("interactive mode requires a terminal on stdin".into());
        }
        run_interactive(&mut config)?;
        if is_default_config {
            let path = save_user_config(&config)?;
            log::info!("saved settings to {}", path.display());
        }
    }

    if config.emoji.text().trim().is_empty() {
        return Err("no text to render (pass TEXT, \"-\" for stdin, or -i)".into());
    }

    let artifact = match args.preview {
        Some(seconds) => preview_and_export(&config, parse_preview_seconds(seconds)?)?,
        None => render_artifact(&config)?,
    };
    write_output_with_tty(&artifact, args.output.as_ref(), stdout_is_tty)
}

/// Applies every flag except the text itself.
pub(crate) fn apply_args(config: &mut Config, args: &Args) -> Result<(), Box<dyn Error>> {
    let emoji = &mut config.emoji;
    let mode: Option<OutputMode> = args.mode.map(Into::into);
    if let Some(mode) = mode {
        emoji.set_output_mode(mode);
    }
    if let Some(style) = args.style.as_deref() {
        let choice = parse_style(style, mode)?;
        if mode.is_none() {
            emoji.set_output_mode(choice.output_mode());
        }
        match choice {
            StyleChoice::Animated(style) => emoji.set_animation_style(style),
            StyleChoice::Static(style) => emoji.set_static_style(style),
        }
    }
    if let Some(text_mode) = requested_text_mode(args) {
        emoji.set_text_mode(text_mode);
    }
    if let Some(size) = args.size {
        emoji.set_base_font_size(size);
    }
    if let Some(color) = args.color.as_deref() {
        emoji.set_text_color(parse_color(color)?);
    }
    if let Some(gradient) = args.gradient {
        emoji.set_use_gradient(gradient);
    }
    if let Some(background) = args.background.as_deref() {
        emoji.set_background_color(parse_color(background)?);
    }
    if let Some(transparent) = args.transparent {
        if transparent && emoji.output_mode() == OutputMode::Animated {
            log::warn!("animated output cannot be transparent; keeping the background");
        }
        emoji.set_use_transparent_background(transparent);
    }

    if let Some(family) = args.font_family.as_ref() {
        config.font.family = family.clone();
    }
    if let Some(file) = args.font_file.as_ref() {
        config.font.file = Some(file.clone());
    }
    if let Some(fallbacks) = args.font_fallbacks.as_deref() {
        config.font.fallbacks = parse_list(fallbacks)?;
    }
    if let Some(bold) = args.font_bold {
        config.font.bold = bold;
    }
    if let Some(value) = args.font_system_fallback {
        config.font.system_fallback = value.into();
    }
    if let Some(value) = args.font_cjk_region {
        config.font.cjk_region = value.into();
    }
    if let Some(dirs) = args.font_dirs.as_deref() {
        config.font.dirs = parse_list(dirs)?;
    }

    if let Some(value) = args.png_opt {
        config.png.optimize = value;
    }
    if let Some(level) = args.png_opt_level {
        config.png.level = level;
    }
    if let Some(strip) = args.png_strip {
        config.png.strip = strip.into();
    }

    if let Some(workers) = args.gif_workers {
        config.gif.workers = workers;
    }
    if let Some(quality) = args.gif_quality {
        config.gif.quality = quality;
    }
    if let Some(speed) = args.gif_speed {
        config.gif.speed = speed;
    }
    if let Some(dither) = args.gif_dither {
        config.gif.dither = dither;
    }
    if let Some(interval) = args.preview_interval {
        config.preview.frame_interval_ms = interval;
    }
    Ok(())
}

/// Text with line breaks switches to multi-line unless a mode was given.
pub(crate) fn apply_text(config: &mut Config, args: &Args, text: &str) {
    let text = text.trim_end_matches(['\r', '\n']);
    if requested_text_mode(args).is_none() && text.contains('\n') {
        config.emoji.set_text_mode(TextMode::Multi);
    }
    config.emoji.set_text(text);
}

fn requested_text_mode(args: &Args) -> Option<TextMode> {
    if args.multi {
        return Some(TextMode::Multi);
    }
    args.text_mode.map(Into::into)
}

/// Runs the live studio preview on stderr, then exports through it.
fn preview_and_export(config: &Config, duration: Duration) -> Result<ExportArtifact, Box<dyn Error>> {
    let mut stderr = io::stderr();
    write!(stderr, "{CLEAR_SCREEN}")?;
    let result = Studio::new(config.clone(), terminal_sink(io::stderr())).map(|mut studio| {
        thread::sleep(duration);
        let artifact = match studio.generate() {
            GenerateStatus::Ready | GenerateStatus::Started => studio.wait().cloned(),
            status => {
                log::debug!("export not produced: {status:?}");
                None
            }
        };
        studio.shutdown();
        artifact.ok_or(studio.failure().unwrap_or(GENERATION_FAILED))
    });
    writeln!(stderr, "{RESTORE_SCREEN}")?;
    Ok(result??)
}

pub(crate) fn style_listing() -> String {
    let mut out = String::from("animated (gif):\n");
    for style in AnimationStyle::ALL {
        let info = style.info();
        let _ = writeln!(out, "  {:<9} {} {}", info.id, info.icon, info.name);
    }
    out.push_str("static (png):\n");
    for style in StaticStyle::ALL {
        let info = style.info();
        let _ = writeln!(out, "  {:<9} {} {}", info.id, info.icon, info.name);
    }
    out
}
