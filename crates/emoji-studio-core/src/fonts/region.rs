use crate::CjkRegion;
use std::env;
use unicode_script::{Script, UnicodeScript};

/// Reads a POSIX or BCP 47 style locale (`zh_TW.UTF-8`, `zh-Hant-HK`).
pub(crate) fn parse_cjk_region_from_locale(value: &str) -> Option<CjkRegion> {
    let tag = value.trim().split(['.', '@']).next()?.to_ascii_lowercase();
    let mut parts = tag.split(['_', '-']).filter(|part| !part.is_empty());
    let language = parts.next()?;
    let qualifiers: Vec<&str> = parts.collect();
    let has = |wanted: &[&str]| qualifiers.iter().any(|part| wanted.contains(part));
    match language {
        "ja" => Some(CjkRegion::Jp),
        "ko" => Some(CjkRegion::Kr),
        "zh" if has(&["hk", "mo"]) => Some(CjkRegion::Hk),
        "zh" if has(&["tw", "hant"]) => Some(CjkRegion::Tc),
        "zh" => Some(CjkRegion::Sc),
        _ => None,
    }
}

fn locale_cjk_region() -> Option<CjkRegion> {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find_map(|value| parse_cjk_region_from_locale(&value))
}

/// Kana or hangul in the text decide the region outright; otherwise the
/// configured region, then the locale, then simplified Chinese.
pub(crate) fn resolve_cjk_region(configured: CjkRegion, text: &str) -> CjkRegion {
    let from_text = text.chars().find_map(|ch| match ch.script() {
        Script::Hiragana | Script::Katakana => Some(CjkRegion::Jp),
        Script::Hangul => Some(CjkRegion::Kr),
        _ => None,
    });
    if let Some(region) = from_text {
        return region;
    }
    match configured {
        CjkRegion::Auto => locale_cjk_region().unwrap_or(CjkRegion::Sc),
        other => other,
    }
}
