//! The compile-time name hash that is part of the ABI between the schema
//! toolchain's generated registration glue and this crate: both sides must
//! compute `message_id` with this exact function for independently generated
//! descriptors to compare equal.

/// DJB2 hash of a topic name's UTF-8 bytes, evaluable in `const` context.
///
/// This mirrors the source's `hash_string`: `hash = 5381; hash = hash*33 + c`
/// folded over every byte.
pub const fn djb2(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut hash: u64 = 5381;
    let mut i = 0;
    while i < bytes.len() {
        hash = hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(bytes[i] as u64);
        i += 1;
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(djb2("sensor_temperature"), djb2("sensor_temperature"));
    }

    #[test]
    fn distinguishes_distinct_names() {
        assert_ne!(djb2("sensor_temperature"), djb2("sensor_baro"));
    }

    #[test]
    fn empty_name_is_the_djb2_seed() {
        assert_eq!(djb2(""), 5381);
    }

    #[test]
    fn matches_reference_djb2_of_a() {
        // hash("a") = 5381 * 33 + 'a' = 177573 + 97 = 177670
        assert_eq!(djb2("a"), 177_670);
    }
}
