use rand::{rng, Rng};

/// Lowercase base36 alphabet (0-9, a-z)
pub const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const BASE: u64 = 36;

/// Converts a number to its lowercase base36 representation
pub fn encode_base36(mut num: u64) -> String {
    if num == 0 {
        return "0".to_string();
    }

    let mut result = Vec::new();

    while num > 0 {
        result.push(CHARSET[(num % BASE) as usize] as char);
        num /= BASE;
    }

    result.iter().rev().collect()
}

/// Smallest power of 36 with `width` digits, i.e. the exclusive upper bound of
/// a `width`-character base36 number. `None` when it overflows a u64.
pub fn upper_bound(width: u32) -> Option<u64> {
    BASE.checked_pow(width)
}

/// Generates a random base36 character
pub fn random_base36_char() -> char {
    let idx = rng().random_range(0..CHARSET.len());
    CHARSET[idx] as char
}
