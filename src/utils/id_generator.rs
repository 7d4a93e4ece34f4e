use rand::{rng, Rng};

use super::base36::{encode_base36, random_base36_char, upper_bound};

/// Length of every minted short id
pub const SHORT_ID_LENGTH: usize = 9;

/// Generates a random short id of `length` lowercase base36 characters.
///
/// A uniform value below `36^length` is encoded and left-padded with `0`, so
/// every id in the space is equally likely. Lengths whose space does not fit
/// in a u64 fall back to drawing each character independently.
pub fn generate_short_id(length: usize) -> String {
    if length == 0 {
        return String::new();
    }

    let Some(bound) = u32::try_from(length).ok().and_then(upper_bound) else {
        return (0..length).map(|_| random_base36_char()).collect();
    };

    let value = rng().random_range(0..bound);
    format!("{:0>width$}", encode_base36(value), width = length)
}

/// Generates an id of the standard [`SHORT_ID_LENGTH`]
pub fn generate_link_id() -> String {
    generate_short_id(SHORT_ID_LENGTH)
}

/// Whether `id` has the shape of a minted short id
#[cfg(test)]
pub fn is_well_formed(id: &str) -> bool {
    id.len() == SHORT_ID_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}
