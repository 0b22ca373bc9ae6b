mod database;
mod families;
mod region;
mod script;

pub(crate) use database::{build_fontdb, needs_system_fonts, resolve_font_dirs};
pub(crate) use families::FontFamilies;
pub(crate) use region::{parse_cjk_region_from_locale, resolve_cjk_region};
pub(crate) use script::{script_runs, FontGroup};
