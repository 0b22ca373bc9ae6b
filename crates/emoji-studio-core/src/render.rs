use crate::driver::export_frames;
use crate::encode::{encode_gif, encode_png};
use crate::fonts::{resolve_cjk_region, FontFamilies};
use crate::style::{animation_renderer, static_renderer, Regime, Scene};
use crate::{
    fit_text, ArtifactFormat, Canvas, Config, Error, ExportArtifact, FrameBuffer,
    GeneratorConfig, OutputMode, Paint, Result, CANVAS_SIZE,
};

/// Draws frame `frame` of the configured composition onto `surface`.
///
/// Layout is fitted again on every call. With no visible text only the
/// background (if any) is painted.
pub fn paint_frame(
    surface: &mut FrameBuffer,
    config: &Config,
    frame: u64,
    regime: Regime,
) -> Result<()> {
    let svg = frame_svg(config, frame, regime);
    surface.draw(&svg)
}

pub(crate) fn frame_svg(config: &Config, frame: u64, regime: Regime) -> String {
    let emoji = &config.emoji;
    let region = resolve_cjk_region(config.font.cjk_region, emoji.text());
    let families = FontFamilies::new(&config.font, region);
    let mut canvas = Canvas::with_families(CANVAS_SIZE, families, config.font.bold);

    if !emoji.use_transparent_background() {
        let mut background = emoji.background_color();
        if emoji.output_mode() == OutputMode::Animated {
            // GIF frames carry no alpha
            background.a = 255;
        }
        canvas.set_fill(Paint::Solid(background));
        canvas.fill_rect(0.0, 0.0, CANVAS_SIZE as f32, CANVAS_SIZE as f32);
    }

    let Some(layout) = fit_text(emoji.text(), emoji.base_font_size()) else {
        return canvas.to_svg();
    };
    canvas.set_font_size(layout.font_size);
    let scene = Scene::new(&layout, emoji.text_color(), emoji.use_gradient());
    match emoji.output_mode() {
        OutputMode::Animated => {
            animation_renderer(emoji.animation_style()).draw(&mut canvas, &scene, frame, regime)
        }
        OutputMode::Static => static_renderer(emoji.static_style()).draw(&mut canvas, &scene),
    }
    canvas.to_svg()
}

/// Renders and encodes one artifact synchronously, without a preview.
pub fn render_artifact(config: &Config) -> Result<ExportArtifact> {
    if config.emoji.text().trim().is_empty() {
        return Err(Error::InvalidInput("text is empty".to_string()));
    }
    let mut surface = FrameBuffer::new(&config.font)?;
    let frames = export_frames(&mut surface, config)?;
    let (width, height) = (surface.width(), surface.height());
    let format = config.emoji.output_mode().format();
    let bytes = match format {
        ArtifactFormat::Png => {
            let rgba = frames
                .first()
                .ok_or(Error::Unavailable("no frame was drawn"))?;
            encode_png(
                rgba,
                width,
                height,
                config.emoji.use_transparent_background(),
                &config.png,
            )?
        }
        ArtifactFormat::Gif => encode_gif(frames, width, height, &config.gif).wait()?,
    };
    Ok(ExportArtifact {
        format,
        file_name: suggested_file_name(&config.emoji),
        bytes,
    })
}

/// `{text}_{style}.{ext}` with every whitespace run collapsed into `_`.
pub fn suggested_file_name(config: &GeneratorConfig) -> String {
    let mut stem = String::new();
    let mut in_space = false;
    for ch in config.text().chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        stem.push(if matches!(ch, '/' | '\\') { '_' } else { ch });
    }
    format!(
        "{}_{}.{}",
        stem,
        config.style_id(),
        config.output_mode().format().extension()
    )
}
