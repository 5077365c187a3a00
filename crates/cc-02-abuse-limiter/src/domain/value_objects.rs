//! Limiter keys and timestamps.

use std::fmt;

/// Milliseconds since the limiter's clock origin.
pub type Timestamp = u64;

/// Origin identifier used when the transport gives none.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Composite rate-limit key: normalized candidate email plus client origin.
///
/// Keying on both dimensions means rotating origins with one email, or
/// rotating emails from one origin, still hits a limit. The two parts are
/// kept as separate fields so no choice of separator can make two distinct
/// pairs collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LimitKey {
    email: String,
    origin: String,
}

impl LimitKey {
    /// Derive the key for `email` seen from `origin`.
    pub fn derive(email: &str, origin: &str) -> Self {
        let origin = origin.trim_matches(is_padding);
        Self {
            email: email.trim_matches(is_padding).to_lowercase(),
            origin: if origin.is_empty() {
                UNKNOWN_ORIGIN.to_string()
            } else {
                origin.to_string()
            },
        }
    }

    /// Normalized email part.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Client origin part.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Whitespace or byte-order mark; the same padding the validator trims.
fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

impl fmt::Display for LimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.email, self.origin)
    }
}
