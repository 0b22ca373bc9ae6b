use rayon::prelude::*;
use std::borrow::Cow;

use super::ExportJob;
use crate::{Error, GifOptions, Result, EXPORT_FRAME_DELAY_MS};

struct IndexedFrame {
    palette: Vec<u8>,
    indices: Vec<u8>,
}

/// Starts encoding `frames` (straight RGBA, in display order) as a looping GIF.
///
/// Frames are quantized in parallel on `options.workers` threads and written
/// in the order they were given.
pub fn encode_gif(frames: Vec<Vec<u8>>, width: u32, height: u32, options: &GifOptions) -> ExportJob {
    let options = options.clone();
    ExportJob::spawn("emoji-gif", move || {
        encode_gif_blocking(&frames, width, height, &options)
    })
}

fn encode_gif_blocking(
    frames: &[Vec<u8>],
    width: u32,
    height: u32,
    options: &GifOptions,
) -> Result<Vec<u8>> {
    if frames.is_empty() {
        return Err(Error::Encode("gif encode: no frames".to_string()));
    }
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(Error::Encode(format!("gif encode: {width}x{height} too large"))),
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.max(1))
        .thread_name(|idx| format!("emoji-gif-{idx}"))
        .build()
        .map_err(|err| Error::Encode(format!("gif worker pool: {err}")))?;
    let indexed = pool.install(|| {
        frames
            .par_iter()
            .map(|rgba| quantize_frame(rgba, width, height, options))
            .collect::<Result<Vec<_>>>()
    })?;
    log::debug!(
        "quantized {} frames on {} workers",
        indexed.len(),
        pool.current_num_threads()
    );

    let delay = (EXPORT_FRAME_DELAY_MS / 10) as u16;
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, w, h, &[])
            .map_err(|err| Error::Encode(format!("gif encode: {err}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|err| Error::Encode(format!("gif encode: {err}")))?;
        for frame in &indexed {
            let frame = gif::Frame {
                width: w,
                height: h,
                delay,
                palette: Some(frame.palette.clone()),
                buffer: Cow::Borrowed(&frame.indices),
                ..gif::Frame::default()
            };
            encoder
                .write_frame(&frame)
                .map_err(|err| Error::Encode(format!("gif encode: {err}")))?;
        }
    }
    Ok(out)
}

fn quantize_frame(rgba: &[u8], width: u32, height: u32, options: &GifOptions) -> Result<IndexedFrame> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(Error::Encode("gif quantize: invalid rgba buffer".to_string()));
    }
    let pixels: Vec<imagequant::RGBA> = rgba
        .chunks_exact(4)
        .map(|px| imagequant::RGBA::new(px[0], px[1], px[2], 255))
        .collect();

    let mut attr = imagequant::new();
    attr.set_quality(0, options.quality.min(100))
        .map_err(|err| Error::Encode(format!("gif quantize quality: {err:?}")))?;
    attr.set_speed(options.speed.clamp(1, 10) as i32)
        .map_err(|err| Error::Encode(format!("gif quantize speed: {err:?}")))?;
    let mut image = attr
        .new_image(pixels, width as usize, height as usize, 0.0)
        .map_err(|err| Error::Encode(format!("gif quantize image: {err:?}")))?;
    let mut result = attr
        .quantize(&mut image)
        .map_err(|err| Error::Encode(format!("gif quantize: {err:?}")))?;
    result
        .set_dithering_level(options.dither.clamp(0.0, 1.0))
        .map_err(|err| Error::Encode(format!("gif quantize dither: {err:?}")))?;
    let (palette, indices) = result
        .remapped(&mut image)
        .map_err(|err| Error::Encode(format!("gif quantize remap: {err:?}")))?;

    let mut palette_bytes = Vec::with_capacity(palette.len() * 3);
    for color in &palette {
        palette_bytes.extend_from_slice(&[color.r, color.g, color.b]);
    }
    Ok(IndexedFrame {
        palette: palette_bytes,
        indices,
    })
}
