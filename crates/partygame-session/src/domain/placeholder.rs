//! Placeholder token handling in prompt text.

/// Token replaced with another player's name when a prompt is shown.
pub const DEFAULT_PLACEHOLDER_TOKEN: &str = "${player}";

/// Number of non-overlapping occurrences of `token` in `text`.
#[must_use]
pub fn count_placeholders(text: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    text.matches(token).count()
}

/// Replaces each occurrence of `token` left to right with the next name,
/// cycling through `names` when there are more occurrences than names.
///
/// Returns `text` unchanged when `names` is empty or the token is absent.
#[must_use]
pub fn substitute(text: &str, token: &str, names: &[&str]) -> String {
    if names.is_empty() || count_placeholders(text, token) == 0 {
        return text.to_owned();
    }

    let mut rendered = String::with_capacity(text.len());
    for (i, segment) in text.split(token).enumerate() {
        if i > 0 {
            rendered.push_str(names[(i - 1) % names.len()]);
        }
        rendered.push_str(segment);
    }
    rendered
}
