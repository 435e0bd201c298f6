//! Platform-to-glyph resolution for vault items.

/// Ordered (substring, glyph) table. Order is load-bearing: overlapping
/// substrings resolve to the first entry that matches ("bank" wins over
/// "banking"), and icons already shown to users depend on this exact
/// ordering.
const ICON_TABLE: &[(&str, &str)] = &[
    ("gmail", "📧"),
    ("email", "📧"),
    ("facebook", "📘"),
    ("instagram", "📷"),
    ("twitter", "🐦"),
    ("linkedin", "💼"),
    ("github", "🐱"),
    ("google", "🌐"),
    ("apple", "🍎"),
    ("microsoft", "🪟"),
    ("amazon", "📦"),
    ("netflix", "🎬"),
    ("spotify", "🎵"),
    ("youtube", "📺"),
    ("dropbox", "📦"),
    ("slack", "💬"),
    ("zoom", "📹"),
    ("paypal", "💳"),
    ("bank", "🏦"),
    ("banking", "🏦"),
];

/// Glyph for platforms with no table match.
pub const DEFAULT_ICON: &str = "🔐";

/// Map a platform name to its display glyph. Total over all inputs: the
/// name is lower-cased, matched by substring against the table in order,
/// and unknown platforms fall back to [`DEFAULT_ICON`].
pub fn icon_for_platform(platform: &str) -> &'static str {
    let platform = platform.to_lowercase();
    for (key, icon) in ICON_TABLE {
        if platform.contains(key) {
            return icon;
        }
    }
    DEFAULT_ICON
}
