//! Username normalization for host account creation.
//!
//! Provider usernames can contain characters or lengths the host will not
//! accept. Whether a raw username is acceptable is the host's call, so the
//! validity check is an injected policy; the rewrite applied to rejected names
//! is fixed.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum username length in Unicode code points.
const MIN_USERNAME_LEN: usize = 4;
/// Maximum username length in Unicode code points.
const MAX_USERNAME_LEN: usize = 30;

fn replace_username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9._-]+").expect("valid regex"))
}

/// Host-supplied username validity predicate.
///
/// Decides only whether character replacement applies; length adjustment
/// always runs.
pub trait UsernamePolicy: Send + Sync {
    /// Returns true if the raw username is not acceptable as-is.
    fn is_invalid(&self, username: &str) -> bool;
}

/// Default policy: a username is invalid if it contains any character outside
/// `[a-zA-Z0-9._-]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharsetPolicy;

impl UsernamePolicy for CharsetPolicy {
    fn is_invalid(&self, username: &str) -> bool {
        replace_username_re().is_match(username)
    }
}

/// Normalize a provider username for the host.
///
/// If the policy rejects the raw username, every run of one or more characters
/// outside `[a-zA-Z0-9._-]` is replaced with a single underscore. The result
/// is then right-padded with underscores to 4 code points or truncated to 30
/// code points. Lengths are measured in Unicode code points, not bytes.
///
/// Single-pass transform: apply exactly once per fetched profile. Re-running
/// it on a truncated result is not guaranteed to be a no-op.
pub fn normalize_username(raw: &str, policy: &dyn UsernamePolicy) -> String {
    let mut username = if policy.is_invalid(raw) {
        replace_username_re().replace_all(raw, "_").into_owned()
    } else {
        raw.to_string()
    };

    let length = username.chars().count();
    if length < MIN_USERNAME_LEN {
        username.push_str(&"_".repeat(MIN_USERNAME_LEN - length));
    } else if length > MAX_USERNAME_LEN {
        username = username.chars().take(MAX_USERNAME_LEN).collect();
    }
    username
}
