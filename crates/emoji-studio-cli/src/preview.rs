use emoji_studio_core::{FrameBuffer, FrameSink};
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Columns (and pixel rows) of the terminal preview; two pixel rows per line.
pub(crate) const PREVIEW_CELLS: u32 = 64;
const CHECKER_SIZE: u32 = 4;
const CHECKER_LIGHT: [u8; 3] = [0xCC, 0xCC, 0xCC];
const CHECKER_DARK: [u8; 3] = [0x99, 0x99, 0x99];

pub(crate) const CLEAR_SCREEN: &str = "\x1b[2J\x1b[?25l";
pub(crate) const RESTORE_SCREEN: &str = "\x1b[0m\x1b[?25h";
const CURSOR_HOME: &str = "\x1b[H";

/// A sink that redraws every preview frame in place on `out`.
pub(crate) fn terminal_sink<W>(out: W) -> FrameSink
where
    W: Write + Send + 'static,
{
    let out = Mutex::new(out);
    Arc::new(move |frame: u64, surface: &FrameBuffer| {
        let art = render_half_blocks(
            &surface.snapshot_rgba(),
            surface.width(),
            surface.height(),
            PREVIEW_CELLS,
        );
        let Ok(mut out) = out.lock() else {
            return;
        };
        let written = out
            .write_all(CURSOR_HOME.as_bytes())
            .and_then(|_| out.write_all(art.as_bytes()))
            .and_then(|_| out.flush());
        if let Err(err) = written {
            log::debug!("preview frame {frame} not shown: {err}");
        }
    })
}

/// Renders straight-alpha RGBA as ANSI true-color half blocks, `cells`
/// columns wide. Transparent pixels show a checkerboard.
pub(crate) fn render_half_blocks(rgba: &[u8], width: u32, height: u32, cells: u32) -> String {
    let mut out = String::new();
    if width == 0 || height == 0 || cells == 0 {
        return out;
    }
    for row in (0..cells).step_by(2) {
        for col in 0..cells {
            let [tr, tg, tb] = sample(rgba, width, height, cells, col, row);
            let [br, bg, bb] = sample(rgba, width, height, cells, col, row + 1);
            let _ = write!(out, "\x1b[38;2;{tr};{tg};{tb}m\x1b[48;2;{br};{bg};{bb}m\u{2580}");
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

fn sample(rgba: &[u8], width: u32, height: u32, cells: u32, col: u32, row: u32) -> [u8; 3] {
    let checker = if ((col / CHECKER_SIZE) + (row / CHECKER_SIZE)) % 2 == 0 {
        CHECKER_LIGHT
    } else {
        CHECKER_DARK
    };
    let x = (col * width / cells).min(width - 1);
    let y = (row * height / cells).min(height - 1);
    let idx = ((y * width + x) * 4) as usize;
    let Some(px) = rgba.get(idx..idx + 4) else {
        return checker;
    };
    let alpha = px[3] as u32;
    let mut out = [0u8; 3];
    for channel in 0..3 {
        let blended = px[channel] as u32 * alpha + checker[channel] as u32 * (255 - alpha);
        out[channel] = ((blended + 127) / 255) as u8;
    }
    out
}
