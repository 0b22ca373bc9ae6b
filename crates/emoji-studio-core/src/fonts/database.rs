use crate::{Error, Font, FontSystemFallback, Result};
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

static SYSTEM_FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    log::debug!("loaded {} system font faces", fontdb.len());
    Arc::new(fontdb)
});

pub(crate) fn needs_system_fonts(font: &Font) -> bool {
    match font.system_fallback {
        FontSystemFallback::Never => false,
        FontSystemFallback::Always => true,
        FontSystemFallback::Auto => font.file.is_none(),
    }
}

/// `EMOJI_STUDIO_FONT_DIRS` (comma-separated), else `font.dirs`, else
/// `<app dir>/fonts`.
pub(crate) fn resolve_font_dirs(font: &Font) -> Result<Vec<PathBuf>> {
    if let Ok(raw) = env::var("EMOJI_STUDIO_FONT_DIRS") {
        return Ok(raw.split(',').filter_map(expand_home).collect());
    }
    if !font.dirs.is_empty() {
        return Ok(font.dirs.iter().filter_map(|dir| expand_home(dir)).collect());
    }
    let app_dir = match env::var_os("EMOJI_STUDIO_HOME") {
        Some(path) => PathBuf::from(path),
        None => home_dir()
            .ok_or(Error::Unavailable("home directory"))?
            .join(".emoji-studio"),
    };
    Ok(vec![app_dir.join("fonts")])
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

fn expand_home(raw: &str) -> Option<PathBuf> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            let home = home_dir()?;
            Some(if rest.is_empty() { home } else { home.join(rest) })
        }
        _ => Some(PathBuf::from(value)),
    }
}

/// Assembles the font database for one surface. System fonts are scanned once
/// per process and shared.
pub(crate) fn build_fontdb(font: &Font) -> Result<Arc<usvg::fontdb::Database>> {
    let dirs: Vec<_> = resolve_font_dirs(font)?
        .into_iter()
        .filter(|dir| dir.is_dir())
        .collect();
    let system = needs_system_fonts(font);
    if font.file.is_none() && dirs.is_empty() && system {
        return Ok(Arc::clone(&SYSTEM_FONTS));
    }

    let mut fontdb = if system {
        (**SYSTEM_FONTS).clone()
    } else {
        usvg::fontdb::Database::new()
    };
    if let Some(font_file) = &font.file {
        fontdb.load_font_data(std::fs::read(font_file)?);
    }
    for dir in dirs {
        fontdb.load_fonts_dir(dir);
    }
    if fontdb.is_empty() {
        log::warn!("no fonts available; text will not be drawn");
    }
    Ok(Arc::new(fontdb))
}
