use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::driver::{export_frames, PreviewLoop};
use crate::encode::{encode_gif, encode_png, ExportJob};
use crate::style::{AnimationStyle, StaticStyle};
use crate::{
    suggested_file_name, ArtifactFormat, Color, Config, Error, ExportArtifact, FrameBuffer,
    GeneratorConfig, OutputMode, Result, TextMode,
};

/// The one message shown to the user when an export does not produce a file.
pub const GENERATION_FAILED: &str = "generation failed";

/// Receives every preview frame after it has been drawn.
pub type FrameSink = Arc<dyn Fn(u64, &FrameBuffer) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    /// An animated encode is running in the background; see [`Studio::poll`].
    Started,
    /// A still was encoded synchronously and is available.
    Ready,
    /// Encoding failed; [`Studio::failure`] carries the notification.
    Failed,
    /// Nothing to draw, so nothing was exported.
    SkippedEmptyText,
    /// An export is still in flight; the request was ignored.
    SkippedBusy,
}

struct PendingExport {
    job: ExportJob,
    format: ArtifactFormat,
    file_name: String,
}

/// Session controller: owns the configuration, the surface, the live
/// preview and the latest export.
pub struct Studio {
    config: Config,
    sink: FrameSink,
    surface: Option<FrameBuffer>,
    preview: Option<PreviewLoop>,
    pending: Option<PendingExport>,
    artifact: Option<ExportArtifact>,
    failure: Option<&'static str>,
}

impl Studio {
    pub fn new(config: Config, sink: FrameSink) -> Result<Self> {
        let surface = FrameBuffer::new(&config.font)?;
        let mut studio = Self {
            config,
            sink,
            surface: Some(surface),
            preview: None,
            pending: None,
            artifact: None,
            failure: None,
        };
        studio.restart_preview();
        Ok(studio)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config.emoji
    }

    pub fn set_text(&mut self, text: &str) {
        self.update(|config| config.set_text(text));
    }

    pub fn set_text_mode(&mut self, mode: TextMode) {
        self.update(|config| config.set_text_mode(mode));
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.update(|config| config.set_output_mode(mode));
    }

    pub fn set_animation_style(&mut self, style: AnimationStyle) {
        self.update(|config| config.set_animation_style(style));
    }

    pub fn set_static_style(&mut self, style: StaticStyle) {
        self.update(|config| config.set_static_style(style));
    }

    pub fn set_base_font_size(&mut self, size: f32) {
        self.update(|config| config.set_base_font_size(size));
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.update(|config| config.set_text_color(color));
    }

    pub fn set_use_gradient(&mut self, enabled: bool) {
        self.update(|config| config.set_use_gradient(enabled));
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.update(|config| config.set_background_color(color));
    }

    pub fn set_use_transparent_background(&mut self, enabled: bool) {
        self.update(|config| config.set_use_transparent_background(enabled));
    }

    pub fn is_previewing(&self) -> bool {
        self.preview.as_ref().is_some_and(PreviewLoop::is_running)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Exports the current configuration.
    ///
    /// A still is encoded before this returns. An animation is drawn here and
    /// encoded in the background; completion is observed with [`Studio::poll`]
    /// or [`Studio::wait`]. A request while an encode is running is ignored.
    pub fn generate(&mut self) -> GenerateStatus {
        if self.config.emoji.text().trim().is_empty() {
            return GenerateStatus::SkippedEmptyText;
        }
        self.poll();
        if self.pending.is_some() {
            log::debug!("export already running; request ignored");
            return GenerateStatus::SkippedBusy;
        }
        self.failure = None;
        self.release_artifact();

        let format = self.config.emoji.output_mode().format();
        let file_name = suggested_file_name(&self.config.emoji);
        let frames = self.draw_export_frames();
        let (width, height) = self
            .surface
            .as_ref()
            .map_or((0, 0), |surface| (surface.width(), surface.height()));
        // the preview resumes whether or not the export frames were drawn
        self.restart_preview();
        let frames = match frames {
            Ok(frames) => frames,
            Err(err) => return self.fail(err),
        };

        match format {
            ArtifactFormat::Png => {
                let encoded = frames
                    .first()
                    .ok_or(Error::Unavailable("no frame was drawn"))
                    .and_then(|rgba| {
                        encode_png(
                            rgba,
                            width,
                            height,
                            self.config.emoji.use_transparent_background(),
                            &self.config.png,
                        )
                    });
                match encoded {
                    Ok(bytes) => {
                        self.store(format, file_name, bytes);
                        GenerateStatus::Ready
                    }
                    Err(err) => self.fail(err),
                }
            }
            ArtifactFormat::Gif => {
                let job = encode_gif(frames, width, height, &self.config.gif);
                self.pending = Some(PendingExport {
                    job,
                    format,
                    file_name,
                });
                GenerateStatus::Started
            }
        }
    }

    /// Collects a finished background encode. Returns `true` when no export
    /// is in flight any more.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return true;
        };
        let Some(result) = pending.job.try_wait() else {
            return false;
        };
        self.finish(result);
        true
    }

    /// Blocks until the running export (if any) settles.
    pub fn wait(&mut self) -> Option<&ExportArtifact> {
        if let Some(pending) = self.pending.take() {
            let PendingExport {
                job,
                format,
                file_name,
            } = pending;
            match job.wait() {
                Ok(bytes) => self.store(format, file_name, bytes),
                Err(err) => {
                    self.fail(err);
                }
            }
        }
        self.artifact.as_ref()
    }

    pub fn artifact(&self) -> Option<&ExportArtifact> {
        self.artifact.as_ref()
    }

    pub fn failure(&self) -> Option<&'static str> {
        self.failure
    }

    /// Saves the latest artifact under its suggested name inside `dir`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        let artifact = self
            .artifact
            .as_ref()
            .ok_or(Error::Unavailable("no artifact to download"))?;
        fs::create_dir_all(dir)?;
        let path = dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes)?;
        log::debug!("saved {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(path)
    }

    /// Cancels the preview. The studio stays usable; the next configuration
    /// change starts it again.
    pub fn shutdown(&mut self) {
        self.stop_preview();
    }

    fn update<F>(&mut self, apply: F)
    where
        F: FnOnce(&mut GeneratorConfig),
    {
        apply(&mut self.config.emoji);
        self.restart_preview();
    }

    fn finish(&mut self, result: Result<Vec<u8>>) {
        if let Some(pending) = self.pending.take() {
            match result {
                Ok(bytes) => self.store(pending.format, pending.file_name, bytes),
                Err(err) => {
                    self.fail(err);
                }
            }
        }
    }

    fn store(&mut self, format: ArtifactFormat, file_name: String, bytes: Vec<u8>) {
        self.release_artifact();
        log::debug!("export ready: {} ({} bytes)", file_name, bytes.len());
        self.artifact = Some(ExportArtifact {
            format,
            file_name,
            bytes,
        });
    }

    fn fail(&mut self, err: Error) -> GenerateStatus {
        log::warn!("{GENERATION_FAILED}: {err}");
        self.failure = Some(GENERATION_FAILED);
        GenerateStatus::Failed
    }

    fn release_artifact(&mut self) {
        if let Some(old) = self.artifact.take() {
            log::debug!("released {}", old.file_name);
        }
    }

    fn draw_export_frames(&mut self) -> Result<Vec<Vec<u8>>> {
        self.stop_preview();
        let surface = self
            .surface
            .as_mut()
            .ok_or(Error::Unavailable("drawing surface is not available"))?;
        export_frames(surface, &self.config)
    }

    fn stop_preview(&mut self) {
        let Some(preview) = self.preview.take() else {
            return;
        };
        match preview.stop() {
            Ok(surface) => self.surface = Some(surface),
            Err(err) => {
                log::warn!("{err}; recreating surface");
                self.surface = FrameBuffer::new(&self.config.font)
                    .map_err(|err| log::warn!("surface unavailable: {err}"))
                    .ok();
            }
        }
    }

    fn restart_preview(&mut self) {
        self.stop_preview();
        let Some(surface) = self.surface.take() else {
            return;
        };
        match PreviewLoop::start(surface, self.config.clone(), Arc::clone(&self.sink)) {
            Ok(preview) => self.preview = Some(preview),
            Err(err) => log::warn!("preview unavailable: {err}"),
        }
    }
}

impl Drop for Studio {
    fn drop(&mut self) {
        self.shutdown();
    }
}
