use unicode_script::{Script, UnicodeScript};

/// Groups of characters that share a font-family chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FontGroup {
    Default,
    Cjk,
    Emoji,
    Unicode,
}

fn is_emoji(ch: char) -> bool {
    matches!(
        ch,
        '\u{2300}'..='\u{23FF}'
            | '\u{2600}'..='\u{27BF}'
            | '\u{2B00}'..='\u{2BFF}'
            | '\u{1F000}'..='\u{1FAFF}'
    )
}

/// `None` for script-neutral characters (spaces, digits, punctuation,
/// variation selectors, joiners), which stay in the surrounding run.
fn classify(ch: char) -> Option<FontGroup> {
    if is_emoji(ch) {
        return Some(FontGroup::Emoji);
    }
    match ch.script() {
        Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul | Script::Bopomofo => {
            Some(FontGroup::Cjk)
        }
        Script::Common | Script::Inherited | Script::Unknown => None,
        _ if ch.is_ascii() => Some(FontGroup::Default),
        _ => Some(FontGroup::Unicode),
    }
}

/// Splits `text` into maximal runs of one [`FontGroup`].
pub(crate) fn script_runs(text: &str) -> Vec<(FontGroup, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<FontGroup> = None;
    for (idx, ch) in text.char_indices() {
        let group = match (classify(ch), current) {
            (Some(group), _) => group,
            (None, Some(group)) => group,
            (None, None) if ch.is_ascii() => FontGroup::Default,
            (None, None) => FontGroup::Unicode,
        };
        if let Some(previous) = current {
            if previous != group {
                runs.push((previous, &text[start..idx]));
                start = idx;
            }
        }
        current = Some(group);
    }
    if let Some(group) = current {
        runs.push((group, &text[start..]));
    }
    runs
}
