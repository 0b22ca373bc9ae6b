use super::FontGroup;
use crate::{CjkRegion, Font};

const GLOBAL_FALLBACKS: &[&str] = &[
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Segoe UI",
    "Helvetica",
    "Arial",
];
const EMOJI_FAMILIES: &[&str] = &[
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Noto Color Emoji",
    "Twemoji Mozilla",
];
const GENERIC_FAMILIES: &[&str] = &["serif", "sans-serif", "monospace", "system-ui"];

fn cjk_families(region: CjkRegion) -> &'static [&'static str] {
    match region {
        CjkRegion::Sc | CjkRegion::Auto => &[
            "Noto Sans CJK SC",
            "Source Han Sans SC",
            "PingFang SC",
            "Microsoft YaHei",
            "WenQuanYi Micro Hei",
        ],
        CjkRegion::Tc => &[
            "Noto Sans CJK TC",
            "Source Han Sans TC",
            "PingFang TC",
            "Microsoft JhengHei",
        ],
        CjkRegion::Hk => &[
            "Noto Sans CJK HK",
            "Source Han Sans HK",
            "PingFang HK",
            "Microsoft JhengHei",
        ],
        CjkRegion::Jp => &[
            "Noto Sans CJK JP",
            "Source Han Sans JP",
            "Hiragino Sans",
            "Yu Gothic",
            "Meiryo",
        ],
        CjkRegion::Kr => &[
            "Noto Sans CJK KR",
            "Source Han Sans KR",
            "Apple SD Gothic Neo",
            "Malgun Gothic",
        ],
    }
}

/// Ordered family names without case-insensitive duplicates.
#[derive(Clone, Default)]
struct Chain(Vec<String>);

impl Chain {
    fn with<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names.into_iter().map(str::trim) {
            if !name.is_empty() && !self.0.iter().any(|have| have.eq_ignore_ascii_case(name)) {
                self.0.push(name.to_string());
            }
        }
        self
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn has_generic(&self) -> bool {
        self.names()
            .any(|name| GENERIC_FAMILIES.iter().any(|g| g.eq_ignore_ascii_case(name)))
    }

    fn render(&self) -> String {
        self.0.join(", ")
    }
}

/// Font-family chains per [`FontGroup`], written into every text run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FontFamilies {
    pub(crate) default: String,
    pub(crate) cjk: String,
    pub(crate) emoji: String,
    pub(crate) unicode: String,
}

impl FontFamilies {
    pub(crate) fn new(font: &Font, cjk_region: CjkRegion) -> Self {
        let configured = Chain::default()
            .with([font.family.as_str()])
            .with(font.fallbacks.iter().map(String::as_str));
        let mut default = configured.clone().with(GLOBAL_FALLBACKS.iter().copied());
        if !default.has_generic() {
            default = default.with(["sans-serif"]);
        }
        let led_by = |first: &[&str], rest: &Chain| {
            Chain::default()
                .with(first.iter().copied())
                .with(rest.names())
                .render()
        };
        Self {
            cjk: led_by(cjk_families(cjk_region), &default),
            emoji: led_by(EMOJI_FAMILIES, &default),
            unicode: led_by(GLOBAL_FALLBACKS, &configured),
            default: default.render(),
        }
    }

    /// The chain for a run, or `None` when the element default applies.
    pub(crate) fn for_group(&self, group: FontGroup) -> Option<&str> {
        match group {
            FontGroup::Default => None,
            FontGroup::Cjk => Some(&self.cjk),
            FontGroup::Emoji => Some(&self.emoji),
            FontGroup::Unicode => Some(&self.unicode),
        }
    }
}

impl Default for FontFamilies {
    fn default() -> Self {
        Self::new(&Font::default(), CjkRegion::Sc)
    }
}
