//! Plaintext credential check.
//!
//! WARNING: this is not password hashing. Stored values are the password in clear
//! text behind a `PLAINTEXT:` marker. It exists only so existing `user.json`
//! files keep working and must not be used for anything production-grade.
//! Real deployments should store an Argon2 (or similar) hash instead.

pub const PLAINTEXT_PREFIX: &str = "PLAINTEXT:";

/// Exact, case-sensitive comparison of `stored` against `PLAINTEXT:<supplied>`.
pub fn verify_plaintext(supplied: &str, stored: &str) -> bool {
    stored
        .strip_prefix(PLAINTEXT_PREFIX)
        .is_some_and(|plain| plain == supplied)
}
