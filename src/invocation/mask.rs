/// Mask styles understood by `deface --replacewith`.
///
/// The style is forwarded verbatim whatever it is; this module only exists to
/// warn early about values the tool is going to reject.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

/// Styles accepted by the tool.
pub const KNOWN_STYLES: &[&str] = &["blur", "solid", "none", "img", "mosaic"];

/// Whether `style` is one of [`KNOWN_STYLES`] (case-sensitive, as the tool is).
#[must_use]
pub fn is_known(style: &str) -> bool {
    KNOWN_STYLES.contains(&style)
}

/// Closest known style for an unknown one, by fuzzy score.
///
/// Returns `None` for known styles, empty input, or when nothing matches.
#[must_use]
pub fn suggest(style: &str) -> Option<&'static str> {
    let query = style.trim();
    if query.is_empty() || is_known(query) {
        return None;
    }

    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    KNOWN_STYLES
        .iter()
        .filter_map(|&known| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(known, &mut buf);
            pattern.score(haystack, &mut matcher).map(|s| (known, s))
        })
        .max_by_key(|&(_, score)| score)
        .map(|(known, _)| known)
}

/// Log a warning when `style` is not a style the tool knows.
pub fn warn_if_unknown(style: &str) {
    if is_known(style) {
        return;
    }
    match suggest(style) {
        Some(hint) => tracing::warn!(
            mask_style = style,
            "unknown mask style; did you mean '{hint}'? forwarding as given"
        ),
        None => tracing::warn!(
            mask_style = style,
            known = ?KNOWN_STYLES,
            "unknown mask style; forwarding as given"
        ),
    }
}
