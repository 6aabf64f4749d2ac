//! Attribution hash generation.

use rand::Rng;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A fresh attribution hash: the current time in base-36 milliseconds followed
/// by a random number in `0..=100`.
pub fn generate_hash() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::rng().random_range(0..=100);
    hash_at(millis, suffix)
}

/// The hash minted at `millis` with the given random `suffix`. Negative
/// timestamps clamp to zero.
pub fn hash_at(millis: i64, suffix: u32) -> String {
    let mut out = base36(u64::try_from(millis).unwrap_or(0));
    out.push_str(&suffix.to_string());
    out
}

pub(crate) fn base36(mut n: u64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
