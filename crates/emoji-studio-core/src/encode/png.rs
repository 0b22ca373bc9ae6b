use crate::{Error, PngOptions, PngStrip, Result, MAX_PNG_OPT_LEVEL};

/// Encodes one straight-alpha RGBA snapshot as PNG.
///
/// The alpha channel is kept when `keep_alpha` is set or when some pixel is
/// not fully opaque; otherwise the file is written as RGB.
pub fn encode_png(
    rgba: &[u8],
    width: u32,
    height: u32,
    keep_alpha: bool,
    options: &PngOptions,
) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(Error::Encode("png encode: invalid rgba buffer".to_string()));
    }
    let has_alpha = keep_alpha || rgba.chunks_exact(4).any(|px| px[3] != 255);
    let (color, data) = if has_alpha {
        (png::ColorType::Rgba, rgba.to_vec())
    } else {
        (png::ColorType::Rgb, rgba_to_rgb(rgba))
    };

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|err| Error::Encode(format!("png encode: {err}")))?;
        writer
            .write_image_data(&data)
            .map_err(|err| Error::Encode(format!("png encode: {err}")))?;
    }
    optimize_png(out, options)
}

fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgba.len() / 4 * 3);
    for chunk in rgba.chunks_exact(4) {
        out.extend_from_slice(&chunk[..3]);
    }
    out
}

pub(crate) fn optimize_png(png: Vec<u8>, options: &PngOptions) -> Result<Vec<u8>> {
    if !options.optimize {
        return Ok(png);
    }
    let level = options.level.min(MAX_PNG_OPT_LEVEL);
    let mut opts = oxipng::Options::from_preset(level);
    opts.strip = match options.strip {
        PngStrip::None => oxipng::StripChunks::None,
        PngStrip::Safe => oxipng::StripChunks::Safe,
        PngStrip::All => oxipng::StripChunks::All,
    };
    oxipng::optimize_from_memory(&png, &opts)
        .map_err(|err| Error::Encode(format!("png optimize: {err}")))
}
