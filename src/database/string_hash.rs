//! Строковый хеш для обеих хеш-таблиц.
//!
//! Порядкочувствительный скользящий хеш. Алгоритм и seed воспроизводятся
//! байт в байт: от них зависит раскладка по бакетам и совместимость со
//! старыми бинарными дампами.

const HASH_SEED: u64 = 146_527;

/// Хеширует строку в u64.
pub fn raw_hash(key: &str) -> u64 {
    let mut hash = HASH_SEED;
    for byte in key.bytes() {
        hash ^= (hash << 5)
            .wrapping_add(hash >> 2)
            .wrapping_add(u64::from(byte));
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Хеш детерминирован и зависит от порядка байтов.
    #[test]
    fn deterministic_and_order_sensitive() {
        assert_eq!(raw_hash("abc"), raw_hash("abc"));
        assert_ne!(raw_hash("abc"), raw_hash("cba"));
    }

    #[test]
    fn empty_string_is_seed() {
        assert_eq!(raw_hash(""), HASH_SEED);
    }

    #[test]
    fn distinct_keys_rarely_collide() {
        let hashes: Vec<u64> = (0..100).map(|i| raw_hash(&format!("key-{i}"))).collect();
        let mut unique = hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), hashes.len());
    }
}
