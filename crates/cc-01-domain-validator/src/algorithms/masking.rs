//! Log-safe rendering of candidate addresses.

use crate::domain::is_padding;

/// Placeholder for candidates with no usable address.
const NO_ADDRESS: &str = "<none>";

/// Mask the local part of an address for logging.
///
/// Keeps at most three leading characters of the local part, always hiding
/// at least one, and leaves the domain intact: `student@berkeley.edu`
/// becomes `stu***@berkeley.edu`, `ab@ucla.edu` becomes `a***@ucla.edu`.
///
/// Control characters and line separators in the visible parts are escaped
/// (`\u{a}`), so one rendering is always one log line.
pub fn mask_email(raw: &str) -> String {
    let trimmed = raw.trim_matches(is_padding);
    let Some((local, domain)) = trimmed.rsplit_once('@') else {
        return NO_ADDRESS.to_string();
    };

    let visible = local.chars().count().saturating_sub(1).min(3);
    let prefix: String = local.chars().take(visible).collect();
    format!("{}***@{}", escape_control(&prefix), escape_control(domain))
}

fn escape_control(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') {
            out.extend(c.escape_unicode());
        } else {
            out.push(c);
        }
        out
    })
}
