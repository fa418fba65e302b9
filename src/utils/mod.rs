use rand::Rng;

/// URL-safe alphabet for short codes: letters, digits, `_` and `-`.
const CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a random short code of the given length.
///
/// Every character is drawn uniformly from [`CODE_ALPHABET`]. Collisions
/// can happen; the caller enforces uniqueness against storage.
pub fn generate_short_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Check that a path segment looks like a code we could have issued.
///
/// Rejecting anything else up front keeps junk paths out of the cache
/// and the database.
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 64
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
