use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::style::Regime;
use crate::{paint_frame, Config, Error, FrameBuffer, FrameSink, OutputMode, Result};
use crate::EXPORT_FRAME_COUNT;

/// Draws the export timeline and returns one straight-alpha RGBA snapshot per
/// frame: 20 for animated output, one for a still.
pub fn export_frames(surface: &mut FrameBuffer, config: &Config) -> Result<Vec<Vec<u8>>> {
    let count = match config.emoji.output_mode() {
        OutputMode::Animated => EXPORT_FRAME_COUNT,
        OutputMode::Static => 1,
    };
    let mut frames = Vec::with_capacity(count as usize);
    for frame in 0..count {
        paint_frame(surface, config, frame, Regime::Export)?;
        frames.push(surface.snapshot_rgba());
    }
    log::debug!("drew {} export frames", frames.len());
    Ok(frames)
}

/// A cancellable preview timeline running on its own thread.
///
/// The loop owns the surface while it runs; [`PreviewLoop::stop`] hands it
/// back, so nothing else can draw on it in the meantime.
pub struct PreviewLoop {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<FrameBuffer>>,
}

impl PreviewLoop {
    /// Starts drawing `config` onto `surface`. Animated output advances one
    /// frame per `preview.frame_interval_ms`; a still is drawn once.
    pub fn start(surface: FrameBuffer, config: Config, sink: FrameSink) -> Result<Self> {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::Builder::new()
            .name("emoji-preview".to_string())
            .spawn(move || run_preview(surface, &config, &sink, &flag))?;
        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the pending frame and returns the surface once the loop exits.
    pub fn stop(mut self) -> Result<FrameBuffer> {
        self.join()
            .ok_or(Error::Unavailable("preview thread panicked"))
    }

    fn join(&mut self) -> Option<FrameBuffer> {
        let handle = self.handle.take()?;
        self.cancel.store(true, Ordering::SeqCst);
        handle.thread().unpark();
        handle.join().ok()
    }
}

impl Drop for PreviewLoop {
    fn drop(&mut self) {
        let _ = self.join();
    }
}

fn run_preview(
    mut surface: FrameBuffer,
    config: &Config,
    sink: &FrameSink,
    cancel: &AtomicBool,
) -> FrameBuffer {
    let interval = Duration::from_millis(config.preview.frame_interval_ms.max(1));
    let animated = config.emoji.output_mode() == OutputMode::Animated;
    let mut frame = 0u64;
    while !cancel.load(Ordering::SeqCst) {
        if let Err(err) = paint_frame(&mut surface, config, frame, Regime::Preview) {
            log::warn!("preview stopped: {err}");
            break;
        }
        sink(frame, &surface);
        if !animated {
            break;
        }
        frame = frame.wrapping_add(1);
        thread::park_timeout(interval);
    }
    log::debug!("preview stopped after {} frames", frame);
    surface
}
