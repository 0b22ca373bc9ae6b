extern crate gif as gif_crate;
extern crate png as png_crate;

use super::*;
use crate::fonts::*;
use crate::layout::*;
use crate::render::frame_svg;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn quiet_font(dir: &Path) -> Font {
    Font {
        system_fallback: FontSystemFallback::Never,
        dirs: vec![dir.join("missing").to_string_lossy().to_string()],
        ..Font::default()
    }
}

fn config_with(text: &str, mode: OutputMode, dir: &Path) -> Config {
    let mut config = Config {
        font: quiet_font(dir),
        ..Config::default()
    };
    config.emoji.set_output_mode(mode);
    config.emoji.set_text(text);
    config
}

fn unoptimized(mut config: Config) -> Config {
    config.png.optimize = false;
    config
}

fn no_sink() -> FrameSink {
    Arc::new(|_: u64, _: &FrameBuffer| {})
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn expected_single_line(len: usize, base: f32) -> f32 {
    let size = match len {
        1 => (base * 2.2).min(110.0),
        2 => (base * 1.5).min(90.0),
        3 => (base * 1.2).min(70.0),
        4 => base.min(60.0),
        n => (base * 4.0 / n as f32).min(50.0),
    };
    size.clamp(16.0, 120.0)
}

#[test]
fn fit_single_line_follows_length_bands() {
    for base in [16.0, 24.0, 32.0, 48.0, 64.0, 96.0, 120.0] {
        for len in 1..=8 {
            let text = "W".repeat(len);
            let layout = fit_text(&text, base).expect("layout");
            assert_eq!(layout.lines, vec![text.clone()]);
            assert!(
                approx(layout.font_size, expected_single_line(len, base)),
                "len={len} base={base} size={}",
                layout.font_size
            );
            assert!((16.0..=120.0).contains(&layout.font_size));
        }
    }
}

#[test]
fn fit_single_character_scenario() {
    let layout = fit_text("A", 48.0).expect("layout");
    assert!(approx(layout.font_size, 105.6));
    assert_eq!(layout.lines, vec!["A".to_string()]);

    let capped = fit_text("A", 120.0).expect("layout");
    assert!(approx(capped.font_size, 110.0));
}

#[test]
fn fit_long_line_is_clamped_to_minimum() {
    let layout = fit_text("ABCDEFGH", 16.0).expect("layout");
    assert!(approx(layout.font_size, 16.0));
}

#[test]
fn fit_multi_line_fits_vertical_budget() {
    let samples = ["A", "AB", "ABC", "ABCD", "ABCDE", "ABCDEF"];
    for count in 2..=3usize {
        for first in samples {
            for second in samples {
                let mut lines = vec![first, second];
                if count == 3 {
                    lines.push("XY");
                }
                let text = lines.join("\n");
                for base in (16..=120).step_by(8) {
                    let layout = fit_text(&text, base as f32).expect("layout");
                    assert_eq!(layout.lines.len(), count);
                    let n = count as f32;
                    let used = layout.font_size * n + line_spacing(layout.font_size) * (n - 1.0);
                    assert!(used <= 118.0 + 1e-3, "{text:?} base={base} used={used}");
                    assert!((16.0..=120.0).contains(&layout.font_size));
                    assert!(layout.font_size <= base as f32 * 1.2 + 1e-3);
                }
            }
        }
    }
}

#[test]
fn fit_drops_blank_lines_and_trims() {
    let layout = fit_text("  HI \n\n   \n YO", 32.0).expect("layout");
    assert_eq!(layout.lines, vec!["HI".to_string(), "YO".to_string()]);
    assert!(fit_text("", 32.0).is_none());
    assert!(fit_text(" \n \n", 32.0).is_none());
}

#[test]
fn fit_is_idempotent() {
    for text in ["A", "HELLO", "HELLO\nWORLD", "ok\n🎉\n가나다"] {
        assert_eq!(fit_text(text, 40.0), fit_text(text, 40.0));
    }
}

#[test]
fn fit_counts_characters_not_bytes() {
    let ascii = fit_text("AB", 32.0).expect("layout");
    let hangul = fit_text("가나", 32.0).expect("layout");
    assert_eq!(ascii.font_size, hangul.font_size);
}

#[test]
fn line_spacing_is_capped() {
    assert!(approx(line_spacing(20.0), 4.0));
    assert!(approx(line_spacing(100.0), 8.0));
}

#[test]
fn two_lines_are_centered_as_a_block() {
    let layout = fit_text("HELLO\nWORLD", 32.0).expect("layout");
    assert_eq!(layout.lines, vec!["HELLO".to_string(), "WORLD".to_string()]);
    let centers = line_centers(&layout, 64.0);
    assert_eq!(centers.len(), 2);
    assert!(approx((centers[0] + centers[1]) / 2.0, 64.0));
    assert!(approx(
        centers[1] - centers[0],
        layout.font_size + line_spacing(layout.font_size)
    ));
}

#[test]
fn single_line_text_is_flattened_and_truncated() {
    let mut config = GeneratorConfig::default();
    config.set_text("HELLO\nWORLD");
    assert_eq!(config.text(), "HELLO WO");
    config.set_text("가나다라마바사아자");
    assert_eq!(config.text().chars().count(), 8);
}

#[test]
fn multi_line_text_is_limited() {
    let mut config = GeneratorConfig::default();
    config.set_text_mode(TextMode::Multi);
    config.set_text("ABCDEFGH\nIJ\nKL\nMN");
    assert_eq!(config.text(), "ABCDEF\nIJ\nKL");
}

#[test]
fn switching_text_mode_reflows() {
    let mut config = GeneratorConfig::default();
    config.set_text("ABCDEFGH");
    config.set_text_mode(TextMode::Multi);
    assert_eq!(config.text(), "ABCDEF\nGH");

    config.set_text("HI\n\nTHERE\nYOU");
    assert_eq!(config.text(), "HI\n\nTHERE");
    config.set_text_mode(TextMode::Single);
    assert_eq!(config.text(), "HI THERE");
}

#[test]
fn animated_mode_forces_opaque_background() {
    let mut config = GeneratorConfig::default();
    assert_eq!(config.output_mode(), OutputMode::Animated);
    assert!(!config.use_transparent_background());

    config.set_use_transparent_background(true);
    assert!(!config.use_transparent_background());

    config.set_output_mode(OutputMode::Static);
    config.set_use_transparent_background(true);
    assert!(config.use_transparent_background());

    config.set_output_mode(OutputMode::Animated);
    assert!(!config.use_transparent_background());
}

#[test]
fn base_font_size_is_clamped() {
    let mut config = GeneratorConfig::default();
    config.set_base_font_size(4.0);
    assert_eq!(config.base_font_size(), 16.0);
    config.set_base_font_size(500.0);
    assert_eq!(config.base_font_size(), 120.0);
    config.set_base_font_size(f32::NAN);
    assert_eq!(config.base_font_size(), 32.0);
    config.set_base_font_size(47.6);
    assert_eq!(config.base_font_size(), 48.0);
}

#[test]
fn style_id_follows_output_mode() {
    let mut config = GeneratorConfig::default();
    config.set_animation_style(AnimationStyle::Glitch);
    config.set_static_style(StaticStyle::ThreeD);
    assert_eq!(config.style_id(), "glitch");
    config.set_output_mode(OutputMode::Static);
    assert_eq!(config.style_id(), "3d");
}

#[test]
fn deserialize_generator_config_normalizes() {
    let cfg: Config = serde_json::from_str(
        r##"{"emoji":{"text":"HELLO WORLD","output_mode":"static","static_style":"3d",
        "use_transparent_background":true,"base_font_size":300,"text_color":"#E01E5A"}}"##,
    )
    .expect("parse config");
    assert_eq!(cfg.emoji.text(), "HELLO WO");
    assert_eq!(cfg.emoji.output_mode(), OutputMode::Static);
    assert_eq!(cfg.emoji.static_style(), StaticStyle::ThreeD);
    assert!(cfg.emoji.use_transparent_background());
    assert_eq!(cfg.emoji.base_font_size(), 120.0);
    assert_eq!(cfg.emoji.text_color(), Color::rgb(0xE0, 0x1E, 0x5A));
}

#[test]
fn deserialize_animated_config_drops_transparency() {
    let cfg: Config = serde_json::from_str(
        r#"{"emoji":{"text":"HI","output_mode":"animated","use_transparent_background":true}}"#,
    )
    .expect("parse config");
    assert!(!cfg.emoji.use_transparent_background());
}

#[test]
fn deserialize_rejects_unknown_style() {
    let err = serde_json::from_str::<Config>(r#"{"emoji":{"animation_style":"wobble"}}"#);
    assert!(err.is_err());
    let err = serde_json::from_str::<Config>(r#"{"emoji":{"text_color":"teal"}}"#);
    assert!(err.is_err());
}

#[test]
fn config_round_trips_through_json() {
    let mut cfg = Config::default();
    cfg.emoji.set_text("PARTY");
    cfg.emoji.set_animation_style(AnimationStyle::Rainbow);
    let json = serde_json::to_string(&cfg).expect("serialize");
    assert!(json.contains(r#""animation_style":"rainbow""#));
    let back: Config = serde_json::from_str(&json).expect("parse");
    assert_eq!(back.emoji, cfg.emoji);
}

#[test]
fn color_parsing() {
    assert_eq!(Color::parse("#fff").expect("short"), Color::WHITE);
    assert_eq!(
        Color::parse("#4A154B").expect("long"),
        Color::rgb(0x4A, 0x15, 0x4B)
    );
    assert_eq!(
        Color::parse("#11223344").expect("alpha"),
        Color::rgba(0x11, 0x22, 0x33, 0x44)
    );
    assert_eq!(
        Color::parse("Purple").expect("preset"),
        Color::rgb(0x4A, 0x15, 0x4B)
    );
    assert!(Color::parse("4A154B").is_err());
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#GGGGGG").is_err());
    assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
}

#[test]
fn hsl_conversion() {
    assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(255, 0, 0));
    assert_eq!(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
    assert_eq!(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
    assert_eq!(Color::from_hsl(360.0, 1.0, 0.5), Color::rgb(255, 0, 0));
}

#[test]
fn contrasting_color() {
    assert_eq!(Color::rgb(0x4A, 0x15, 0x4B).contrasting(), Color::WHITE);
    assert_eq!(Color::rgb(0xFF, 0xD7, 0x00).contrasting(), Color::BLACK);
}

#[test]
fn style_registry_covers_every_style() {
    let mut ids = std::collections::HashSet::new();
    for style in AnimationStyle::ALL {
        let renderer = animation_renderer(style);
        assert_eq!(renderer.style(), style);
        assert_eq!(AnimationStyle::from_id(style.id()), Some(style));
        assert!(ids.insert(style.id()));
        if style != AnimationStyle::Glitch {
            let speed = renderer.speed();
            assert!(speed.export > speed.preview, "{}", style.id());
        }
    }
    for style in StaticStyle::ALL {
        assert_eq!(static_renderer(style).style(), style);
        assert_eq!(StaticStyle::from_id(style.id()), Some(style));
        assert!(ids.insert(style.id()));
    }
    assert_eq!(ids.len(), 17);
    assert_eq!(StaticStyle::from_id("3D"), Some(StaticStyle::ThreeD));
    assert_eq!(AnimationStyle::Bounce.info().icon, "🏀");
}

#[test]
fn canvas_bakes_transform_and_restores() {
    let mut canvas = Canvas::new(128);
    canvas.set_font_size(20.0);
    canvas.save();
    canvas.translate(64.0, 64.0);
    canvas.scale(2.0, 2.0);
    canvas.fill_text("A", 0.0, 0.0);
    canvas.restore();
    canvas.fill_text("B", 10.0, 10.0);
    let svg = canvas.to_svg();
    assert!(svg.contains(r#"transform="matrix(2.00000 0.00000 0.00000 2.00000 64.0000 64.0000)""#));
    let second = svg.rfind("<text").expect("second text");
    assert!(!svg[second..].contains("transform="));
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r#"dominant-baseline="central""#));
}

#[test]
fn canvas_skips_degenerate_transform() {
    let mut canvas = Canvas::new(128);
    canvas.scale(0.0, 1.0);
    canvas.fill_text("A", 0.0, 0.0);
    assert!(!canvas.to_svg().contains("<text"));

    let mut canvas = Canvas::new(128);
    canvas.translate(64.0, 64.0);
    canvas.scale(1e-7, 1.0);
    canvas.fill_text("A", 0.0, 0.0);
    assert!(!canvas.to_svg().contains("<text"));

    let mut canvas = Canvas::new(128);
    canvas.rotate(0.5);
    canvas.scale(1.0, 0.0);
    canvas.stroke_text("A", 0.0, 0.0);
    assert!(!canvas.to_svg().contains("<text"));

    let mut canvas = Canvas::new(128);
    canvas.scale(-0.5, 1.0);
    canvas.fill_text("A", 0.0, 0.0);
    let svg = canvas.to_svg();
    assert!(svg.contains("matrix(-0.50000 0.00000 0.00000 1.00000"));
}

#[test]
fn control_characters_never_reach_the_scene() {
    let mut canvas = Canvas::new(128);
    canvas.fill_text("A\u{1}B\u{1f}", 64.0, 64.0);
    let svg = canvas.to_svg();
    assert!(svg.contains(">AB</text>"));
    assert!(!svg.contains('\u{1}'));

    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("A\u{1}B", OutputMode::Static, temp.path());
    assert_eq!(config.emoji.text(), "AB");
    let artifact = render_artifact(&unoptimized(config.clone())).expect("artifact");
    assert_eq!(artifact.file_name, "AB_plain.png");

    let mut multi = config_with("", OutputMode::Static, temp.path());
    multi.emoji.set_text_mode(TextMode::Multi);
    multi.emoji.set_text("HI\u{0}\r\nYO\u{b}\tX");
    assert_eq!(multi.emoji.text(), "HI\nYOX");

    let mut studio = Studio::new(config, no_sink()).expect("studio");
    studio.set_text("Z\u{8}Z");
    assert_eq!(studio.config().text(), "ZZ");
    assert_eq!(studio.generate(), GenerateStatus::Ready);
    assert!(studio.failure().is_none());
}

#[test]
fn canvas_escapes_text() {
    let mut canvas = Canvas::new(128);
    canvas.fill_text("<&>", 64.0, 64.0);
    assert!(canvas.to_svg().contains("&lt;&amp;&gt;"));
}

#[test]
fn canvas_splits_font_groups() {
    let mut canvas = Canvas::new(128);
    canvas.fill_text("A😀中", 64.0, 64.0);
    let svg = canvas.to_svg();
    assert!(svg.contains(r#"<tspan font-family="Apple Color Emoji"#));
    assert!(svg.contains(r#"<tspan font-family="Noto Sans CJK"#));
}

#[test]
fn script_runs_keep_neutral_characters_in_place() {
    assert_eq!(
        script_runs("OK 👍\u{FE0F}!"),
        vec![(FontGroup::Default, "OK "), (FontGroup::Emoji, "👍\u{FE0F}!")]
    );
    assert_eq!(
        script_runs("1日本ー"),
        vec![(FontGroup::Default, "1"), (FontGroup::Cjk, "日本ー")]
    );
    assert_eq!(script_runs("é"), vec![(FontGroup::Unicode, "é")]);
    assert!(script_runs("").is_empty());
}

#[test]
fn canvas_shadow_becomes_filter() {
    let mut canvas = Canvas::new(128);
    canvas.set_shadow(Color::rgba(0, 0, 0, 128), 8.0, 3.0, 3.0);
    canvas.fill_text("A", 64.0, 64.0);
    let svg = canvas.to_svg();
    assert!(svg.contains("<feDropShadow"));
    assert!(svg.contains(r#"stdDeviation="4.00""#));
    assert!(svg.contains(r#"filter="url(#shadow0)""#));
}

#[test]
fn static_plain_scenario() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("A", OutputMode::Static, temp.path());
    config.emoji.set_base_font_size(48.0);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert_eq!(svg.matches("<text").count(), 1);
    assert!(svg.contains(r#"font-size="105.60px""#));
    assert!(svg.contains(r##"fill="#4A154B""##));
    assert!(svg.contains(r#"x="64.00" y="64.00""#));
}

#[test]
fn static_two_lines_scenario() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("", OutputMode::Static, temp.path());
    config.emoji.set_text_mode(TextMode::Multi);
    config.emoji.set_text("HELLO\nWORLD");
    let svg = frame_svg(&config, 0, Regime::Export);
    assert_eq!(svg.matches("<text").count(), 2);
    assert_eq!(svg.matches(r#"<text x="64.00""#).count(), 2);
}

#[test]
fn gradient_option_uses_two_stops() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Static, temp.path());
    config.emoji.set_use_gradient(true);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert!(svg.contains("<linearGradient"));
    assert!(svg.contains(r#"x2="128.00" y2="128.00""#));
    assert!(svg.contains(r##"<stop offset="0.000" stop-color="#4A154B""##));
    assert!(svg.contains(r##"<stop offset="1.000" stop-color="#FFD700""##));
}

#[test]
fn static_styles_compose_as_expected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Static, temp.path());

    config.emoji.set_static_style(StaticStyle::Outline);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert!(svg.contains(r##"stroke="#4A154B" stroke-width="3.00""##));
    assert!(svg.contains(r##"fill="#FFFFFF""##));

    config.emoji.set_static_style(StaticStyle::ThreeD);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert_eq!(svg.matches("<text").count(), 3);
    assert!(svg.contains(r#"opacity="0.4000""#));
    assert!(svg.contains(r#"opacity="0.7000""#));

    config.emoji.set_static_style(StaticStyle::Neon);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert!(svg.contains(r##"stroke="#FF00FF""##));
    assert!(svg.contains(r#"stdDeviation="10.00""#));

    config.emoji.set_static_style(StaticStyle::Gradient);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert!(svg.contains(r##"stop-color="#4ECDC4""##));
}

#[test]
fn background_is_skipped_when_transparent() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Static, temp.path());
    assert!(frame_svg(&config, 0, Regime::Export).contains("<rect"));
    config.emoji.set_use_transparent_background(true);
    assert!(!frame_svg(&config, 0, Regime::Export).contains("<rect"));
}

#[test]
fn bounce_starts_centered_and_moves() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("HI", OutputMode::Animated, temp.path());
    let first = frame_svg(&config, 0, Regime::Export);
    assert!(first.contains(r#"y="64.00""#));
    let later = frame_svg(&config, 5, Regime::Export);
    let expected = 64.0 + (5.0f64 * 0.3).sin() * 20.0;
    assert!(later.contains(&format!(r#"y="{expected:.2}""#)));
}

#[test]
fn export_and_preview_speeds_differ() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("HI", OutputMode::Animated, temp.path());
    assert_ne!(
        frame_svg(&config, 3, Regime::Preview),
        frame_svg(&config, 3, Regime::Export)
    );
}

#[test]
fn glitch_export_is_a_square_wave() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Animated, temp.path());
    config.emoji.set_animation_style(AnimationStyle::Glitch);
    for frame in 0..20u64 {
        let svg = frame_svg(&config, frame, Regime::Export);
        let right = svg.find(r#"x="66.00""#).expect("right copy");
        let left = svg.find(r#"x="62.00""#).expect("left copy");
        if frame % 10 < 5 {
            assert!(right < left, "frame {frame}");
        } else {
            assert!(left < right, "frame {frame}");
        }
        assert!(svg.contains(r#"y="65.00""#));
        assert_eq!(svg, frame_svg(&config, frame, Regime::Export));
    }
}

#[test]
fn rainbow_rotates_hue() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Animated, temp.path());
    config.emoji.set_animation_style(AnimationStyle::Rainbow);
    assert!(frame_svg(&config, 0, Regime::Export).contains(r##"fill="#FF0000""##));
    // 18 degrees per frame: frame 20 wraps around to red again.
    assert!(frame_svg(&config, 20, Regime::Export).contains(r##"fill="#FF0000""##));
    assert!(frame_svg(&config, 24, Regime::Preview).contains(r##"fill="#00FF00""##));
}

#[test]
fn spin_and_flip_use_transforms() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Animated, temp.path());
    config.emoji.set_animation_style(AnimationStyle::Spin);
    let svg = frame_svg(&config, 2, Regime::Export);
    let (sin, cos) = 0.6f32.sin_cos();
    assert!(svg.contains(&format!("matrix({cos:.5} {sin:.5} {:.5} {cos:.5}", -sin)));

    config.emoji.set_animation_style(AnimationStyle::Flip);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert!(svg.contains("matrix(1.00000 0.00000 0.00000 1.00000 64.0000 64.0000)"));
}

#[test]
fn deterministic_styles_repeat_the_same_scene() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Animated, temp.path());
    for style in AnimationStyle::ALL {
        assert_eq!(
            style.is_deterministic(Regime::Preview),
            style != AnimationStyle::Glitch
        );
        config.emoji.set_animation_style(style);
        for regime in [Regime::Preview, Regime::Export] {
            if !style.is_deterministic(regime) {
                continue;
            }
            for frame in [0, 7, 19] {
                let svg = frame_svg(&config, frame, regime);
                assert!(svg.contains("<text"), "{} frame {frame}", style.id());
                assert_eq!(svg, frame_svg(&config, frame, regime), "{}", style.id());
            }
        }
    }

    let mut config = config_with("HI", OutputMode::Static, temp.path());
    for style in StaticStyle::ALL {
        config.emoji.set_static_style(style);
        let svg = frame_svg(&config, 0, Regime::Export);
        assert!(svg.contains("<text"), "{}", style.id());
        assert_eq!(svg, frame_svg(&config, 5, Regime::Preview), "{}", style.id());
    }
}

/// A family with Latin glyphs from the system fonts, if the host has any.
fn system_text_family() -> Option<String> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let names: Vec<String> = fontdb
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    let preferred = ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial", "Helvetica"];
    preferred
        .iter()
        .find(|want| names.iter().any(|name| name == *want))
        .map(|want| want.to_string())
        .or_else(|| {
            names.into_iter().find(|name| {
                let lower = name.to_lowercase();
                !lower.contains("emoji") && !lower.contains("symbol")
            })
        })
}

#[test]
fn text_pixels_are_drawn_and_repeatable() {
    let Some(family) = system_text_family() else {
        return;
    };
    let temp = tempfile::tempdir().expect("tempdir");
    let font = Font {
        family,
        system_fallback: FontSystemFallback::Always,
        ..quiet_font(temp.path())
    };
    let mut surface = FrameBuffer::new(&font).expect("surface");
    let mut config = config_with("HI", OutputMode::Static, temp.path());
    config.font = font;
    config.emoji.set_text_color(Color::BLACK);
    config.emoji.set_background_color(Color::WHITE);
    paint_frame(&mut surface, &config, 0, Regime::Export).expect("paint");
    let rgba = surface.snapshot_rgba();
    let inked = rgba
        .chunks_exact(4)
        .filter(|px| px[0] < 128 && px[1] < 128 && px[2] < 128)
        .count();
    assert!(inked > 100, "only {inked} dark pixels");
    assert_eq!(&rgba[..4], &[255, 255, 255, 255]);

    config.emoji.set_output_mode(OutputMode::Animated);
    for style in AnimationStyle::ALL {
        config.emoji.set_animation_style(style);
        paint_frame(&mut surface, &config, 7, Regime::Export).expect("paint");
        let first = surface.snapshot_rgba();
        assert!(
            first.chunks_exact(4).any(|px| px[..3] != [255, 255, 255]),
            "{} drew no text",
            style.id()
        );
        paint_frame(&mut surface, &config, 7, Regime::Export).expect("paint");
        assert_eq!(first, surface.snapshot_rgba(), "{}", style.id());
    }
}

#[test]
fn animated_background_is_always_opaque() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Static, temp.path());
    config.emoji.set_background_color(Color::rgba(255, 255, 255, 0));
    assert!(frame_svg(&config, 0, Regime::Export).contains(r#"fill-opacity="0.000""#));

    config.emoji.set_output_mode(OutputMode::Animated);
    let svg = frame_svg(&config, 0, Regime::Export);
    assert!(svg.contains("<rect"));
    assert!(!svg.contains(r#"fill-opacity="0.000""#));

    let mut surface = FrameBuffer::new(&quiet_font(temp.path())).expect("surface");
    paint_frame(&mut surface, &config, 0, Regime::Export).expect("paint");
    assert_eq!(&surface.snapshot_rgba()[..4], &[255, 255, 255, 255]);
}

#[test]
fn surface_background_pixels() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut surface = FrameBuffer::new(&quiet_font(temp.path())).expect("surface");
    let mut config = config_with("HI", OutputMode::Static, temp.path());
    config.emoji.set_background_color(Color::rgb(255, 0, 0));
    paint_frame(&mut surface, &config, 0, Regime::Export).expect("paint");
    let rgba = surface.snapshot_rgba();
    assert_eq!(rgba.len(), 128 * 128 * 4);
    assert_eq!(&rgba[..4], &[255, 0, 0, 255]);

    config.emoji.set_use_transparent_background(true);
    paint_frame(&mut surface, &config, 0, Regime::Export).expect("paint");
    assert_eq!(&surface.snapshot_rgba()[..4], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let data = [64, 32, 0, 128, 0, 0, 0, 0];
    let out = crate::surface::unpremultiply_rgba(&data);
    assert_eq!(out, vec![128, 64, 0, 128, 0, 0, 0, 0]);
}

#[test]
fn export_frame_counts() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut surface = FrameBuffer::new(&quiet_font(temp.path())).expect("surface");
    for style in AnimationStyle::ALL {
        let mut config = config_with("GO", OutputMode::Animated, temp.path());
        config.emoji.set_animation_style(style);
        let frames = export_frames(&mut surface, &config).expect("frames");
        assert_eq!(frames.len(), 20);
    }
    let config = config_with("GO", OutputMode::Static, temp.path());
    assert_eq!(export_frames(&mut surface, &config).expect("frames").len(), 1);
}

#[test]
fn animated_artifact_has_twenty_frames_at_100ms() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HEY YOU", OutputMode::Animated, temp.path());
    config.emoji.set_animation_style(AnimationStyle::Pulse);
    let artifact = render_artifact(&config).expect("artifact");
    assert_eq!(artifact.format, ArtifactFormat::Gif);
    assert_eq!(artifact.mime_type(), "image/gif");
    assert_eq!(artifact.file_name, "HEY_YOU_pulse.gif");
    assert!(artifact.bytes.starts_with(b"GIF89a"));
    assert!(artifact.bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let mut decoder = gif_crate::DecodeOptions::new()
        .read_info(Cursor::new(&artifact.bytes))
        .expect("gif header");
    assert_eq!((decoder.width(), decoder.height()), (128, 128));
    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().expect("gif frame") {
        delays.push(frame.delay);
    }
    assert_eq!(delays, vec![10; 20]);
}

#[test]
fn static_artifact_keeps_alpha_only_when_requested() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = unoptimized(config_with("OK", OutputMode::Static, temp.path()));
    let opaque = render_artifact(&config).expect("artifact");
    assert_eq!(opaque.file_name, "OK_plain.png");
    assert_eq!(opaque.mime_type(), "image/png");
    assert_eq!(png_color_type(&opaque.bytes), png_crate::ColorType::Rgb);

    config.emoji.set_use_transparent_background(true);
    let clear = render_artifact(&config).expect("artifact");
    assert_eq!(png_color_type(&clear.bytes), png_crate::ColorType::Rgba);
}

fn png_color_type(bytes: &[u8]) -> png_crate::ColorType {
    let decoder = png_crate::Decoder::new(Cursor::new(bytes));
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    assert_eq!((info.width, info.height), (128, 128));
    info.color_type
}

#[test]
fn optimized_png_stays_decodable() {
    let rgba = vec![200u8; 16 * 16 * 4];
    let raw = encode_png(
        &rgba,
        16,
        16,
        false,
        &PngOptions {
            optimize: false,
            ..PngOptions::default()
        },
    )
    .expect("png");
    let optimized = encode_png(&rgba, 16, 16, false, &PngOptions::default()).expect("png");
    assert!(optimized.starts_with(b"\x89PNG"));
    assert!(optimized.len() <= raw.len());
}

#[test]
fn encode_png_rejects_bad_buffer() {
    assert!(encode_png(&[0, 0, 0], 1, 1, false, &PngOptions::default()).is_err());
}

#[test]
fn encode_gif_preserves_submission_order() {
    let frames: Vec<Vec<u8>> = [0u8, 255, 0, 255]
        .iter()
        .map(|&v| {
            let mut rgba = Vec::with_capacity(4 * 4 * 4);
            for _ in 0..16 {
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
            rgba
        })
        .collect();
    let options = GifOptions {
        workers: 4,
        ..GifOptions::default()
    };
    let bytes = encode_gif(frames, 4, 4, &options).wait().expect("gif");
    let mut decoder = gif_crate::DecodeOptions::new()
        .read_info(Cursor::new(&bytes))
        .expect("gif header");
    let mut firsts = Vec::new();
    while let Some(frame) = decoder.read_next_frame().expect("gif frame") {
        let palette = frame.palette.clone().expect("local palette");
        let idx = frame.buffer[0] as usize * 3;
        firsts.push(palette[idx]);
    }
    assert_eq!(firsts, vec![0, 255, 0, 255]);
}

#[test]
fn encode_gif_without_frames_fails() {
    let mut job = encode_gif(Vec::new(), 4, 4, &GifOptions::default());
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(result) = job.try_wait() {
            assert!(matches!(result, Err(Error::Encode(_))));
            break;
        }
        assert!(Instant::now() < deadline, "encoder never finished");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn render_artifact_requires_text() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("   ", OutputMode::Static, temp.path());
    assert!(matches!(
        render_artifact(&config),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn suggested_names_collapse_whitespace() {
    let mut config = GeneratorConfig::default();
    config.set_text_mode(TextMode::Multi);
    config.set_text("AB\nCD");
    assert_eq!(suggested_file_name(&config), "AB_CD_bounce.gif");
    config.set_text_mode(TextMode::Single);
    config.set_text("a  b/c");
    config.set_output_mode(OutputMode::Static);
    config.set_static_style(StaticStyle::Neon);
    assert_eq!(suggested_file_name(&config), "a_b_c_neon.png");
}

fn wait_until(mut check: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(20);
    while !check() {
        assert!(Instant::now() < deadline, "timed out");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn studio_generate_with_empty_text_is_a_no_op() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("", OutputMode::Static, temp.path());
    let mut studio = Studio::new(config, no_sink()).expect("studio");
    assert_eq!(studio.generate(), GenerateStatus::SkippedEmptyText);
    assert!(studio.artifact().is_none());
    assert!(studio.failure().is_none());
    assert!(studio.download(temp.path()).is_err());
}

#[test]
fn studio_static_export_and_download() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("A", OutputMode::Static, temp.path());
    let mut studio = Studio::new(config, no_sink()).expect("studio");
    assert_eq!(studio.generate(), GenerateStatus::Ready);
    assert!(studio.is_previewing());
    let artifact = studio.artifact().expect("artifact");
    assert_eq!(artifact.file_name, "A_plain.png");
    let path = studio.download(&temp.path().join("out")).expect("download");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("A_plain.png"));
    let written = std::fs::read(&path).expect("read");
    assert!(written.starts_with(b"\x89PNG"));
    assert!(studio.poll());
}

#[test]
fn studio_animated_export_rejects_overlap() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("GO", OutputMode::Animated, temp.path());
    let mut studio = Studio::new(config, no_sink()).expect("studio");
    assert_eq!(studio.generate(), GenerateStatus::Started);
    assert!(studio.is_busy());
    assert_eq!(studio.generate(), GenerateStatus::SkippedBusy);

    let artifact = studio.wait().expect("artifact");
    assert_eq!(artifact.file_name, "GO_bounce.gif");
    assert!(!studio.is_busy());
    assert!(studio.failure().is_none());

    studio.set_animation_style(AnimationStyle::Wave);
    assert_eq!(studio.generate(), GenerateStatus::Started);
    assert!(studio.artifact().is_none());
    wait_until(|| studio.poll());
    assert_eq!(
        studio.artifact().map(|a| a.file_name.as_str()),
        Some("GO_wave.gif")
    );
}

#[test]
fn studio_switching_to_animated_clears_transparency() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("HI", OutputMode::Static, temp.path());
    let mut studio = Studio::new(config, no_sink()).expect("studio");
    studio.set_use_transparent_background(true);
    assert!(studio.config().use_transparent_background());
    studio.set_output_mode(OutputMode::Animated);
    assert!(!studio.config().use_transparent_background());
}

#[test]
fn studio_preview_advances_and_stops() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut config = config_with("HI", OutputMode::Animated, temp.path());
    config.preview.frame_interval_ms = 1;
    let latest = Arc::new(AtomicU64::new(0));
    let seen = Arc::clone(&latest);
    let sink: FrameSink = Arc::new(move |frame: u64, surface: &FrameBuffer| {
        assert_eq!(surface.width(), 128);
        seen.fetch_max(frame, Ordering::SeqCst);
    });
    let mut studio = Studio::new(config, sink).expect("studio");
    wait_until(|| latest.load(Ordering::SeqCst) >= 3);
    assert!(studio.is_previewing());
    studio.shutdown();
    assert!(!studio.is_previewing());
    let stopped_at = latest.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(latest.load(Ordering::SeqCst), stopped_at);
}

#[test]
fn studio_static_preview_draws_once_per_change() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = config_with("HI", OutputMode::Static, temp.path());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let sink: FrameSink = Arc::new(move |frame: u64, _: &FrameBuffer| {
        assert_eq!(frame, 0);
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let mut studio = Studio::new(config, sink).expect("studio");
    wait_until(|| calls.load(Ordering::SeqCst) == 1);
    studio.set_text("YO");
    wait_until(|| calls.load(Ordering::SeqCst) == 2);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn preview_loop_returns_surface() {
    let temp = tempfile::tempdir().expect("tempdir");
    let surface = FrameBuffer::new(&quiet_font(temp.path())).expect("surface");
    let config = config_with("HI", OutputMode::Animated, temp.path());
    let preview = PreviewLoop::start(surface, config, no_sink()).expect("preview");
    let surface = preview.stop().expect("surface back");
    assert_eq!(surface.height(), 128);
}

#[test]
fn cjk_region_detection() {
    assert_eq!(
        parse_cjk_region_from_locale("ja_JP.UTF-8"),
        Some(CjkRegion::Jp)
    );
    assert_eq!(parse_cjk_region_from_locale("zh-Hant-TW"), Some(CjkRegion::Tc));
    assert_eq!(parse_cjk_region_from_locale("zh_HK"), Some(CjkRegion::Hk));
    assert_eq!(parse_cjk_region_from_locale("en_US"), None);
    assert_eq!(resolve_cjk_region(CjkRegion::Sc, "안녕"), CjkRegion::Kr);
    assert_eq!(resolve_cjk_region(CjkRegion::Tc, "かな"), CjkRegion::Jp);
    assert_eq!(resolve_cjk_region(CjkRegion::Tc, "漢字"), CjkRegion::Tc);
}

#[test]
fn font_families_include_fallbacks() {
    let families = FontFamilies::new(&Font::default(), CjkRegion::Kr);
    assert!(families.default.starts_with("system-ui, sans-serif"));
    assert!(families.cjk.starts_with("Noto Sans CJK KR"));
    assert!(families.emoji.contains("Noto Color Emoji"));
}

#[test]
fn font_dirs_from_env() {
    let _lock = env_lock().lock().expect("lock");
    let previous = std::env::var_os("EMOJI_STUDIO_FONT_DIRS");
    std::env::set_var("EMOJI_STUDIO_FONT_DIRS", "/tmp/a, ,/tmp/b");
    let dirs = resolve_font_dirs(&Font::default()).expect("dirs");
    match previous {
        Some(value) => std::env::set_var("EMOJI_STUDIO_FONT_DIRS", value),
        None => std::env::remove_var("EMOJI_STUDIO_FONT_DIRS"),
    }
    assert_eq!(
        dirs,
        vec![std::path::PathBuf::from("/tmp/a"), std::path::PathBuf::from("/tmp/b")]
    );
}

#[test]
fn font_file_is_loaded_into_database() {
    let temp = tempfile::tempdir().expect("tempdir");
    let font = Font {
        file: Some(temp.path().join("nope.ttf").to_string_lossy().to_string()),
        ..quiet_font(temp.path())
    };
    assert!(matches!(FrameBuffer::new(&font), Err(Error::Io(_))));
    assert!(!needs_system_fonts(&font));
}
