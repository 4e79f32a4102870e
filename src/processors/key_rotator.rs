use crate::error::{PollerError, Result};
use crate::models::ApiKey;

/// Round-robin assignment of API keys to calls.
///
/// Call `i` always gets key `i mod len`, so over `n` calls no key is used
/// more than `ceil(n / len)` times.
#[derive(Debug, Clone)]
pub struct KeyRotator {
    keys: Vec<ApiKey>,
}

impl KeyRotator {
    pub fn new(keys: Vec<ApiKey>) -> Result<Self> {
        let keys: Vec<ApiKey> = keys.into_iter().filter(|k| !k.is_blank()).collect();

        if keys.is_empty() {
            return Err(PollerError::config("no API keys configured"));
        }

        Ok(Self { keys })
    }

    pub fn key_for(&self, index: usize) -> &ApiKey {
        &self.keys[index % self.keys.len()]
    }

    pub fn slot_for(&self, index: usize) -> usize {
        index % self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn max_calls_per_key(&self, calls: usize) -> usize {
        calls.div_ceil(self.keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(names: &[&str]) -> Vec<ApiKey> {
        names.iter().map(|n| ApiKey::new(*n)).collect()
    }

    #[test]
    fn test_five_calls_two_keys() {
        let rotator = KeyRotator::new(keys(&["key0", "key1"])).unwrap();

        let assigned: Vec<&str> = (0..5).map(|i| rotator.key_for(i).expose()).collect();

        assert_eq!(assigned, vec!["key0", "key1", "key0", "key1", "key0"]);
    }

    #[test]
    fn test_cyclic_for_all_sizes() {
        for k in 1..=6 {
            let names: Vec<String> = (0..k).map(|i| format!("key{}", i)).collect();
            let rotator =
                KeyRotator::new(names.iter().map(|n| ApiKey::new(n.as_str())).collect()).unwrap();

            for i in 0..50 {
                assert_eq!(rotator.key_for(i).expose(), names[i % k]);
                assert_eq!(rotator.slot_for(i), i % k);
            }
        }
    }

    #[test]
    fn test_calls_per_key_bounded() {
        for k in 1..=5 {
            for n in 0..=23 {
                let names: Vec<String> = (0..k).map(|i| format!("key{}", i)).collect();
                let keys = names.iter().map(|s| ApiKey::new(s.as_str())).collect();
                let rotator = KeyRotator::new(keys).unwrap();

                let mut counts = vec![0usize; k];
                for i in 0..n {
                    counts[rotator.slot_for(i)] += 1;
                }

                let bound = rotator.max_calls_per_key(n);
                assert!(counts.iter().all(|&c| c <= bound), "k={} n={}", k, n);
            }
        }
    }

    #[test]
    fn test_empty_keys_is_config_error() {
        let result = KeyRotator::new(Vec::new());
        assert!(matches!(result, Err(PollerError::Config(_))));
    }

    #[test]
    fn test_blank_keys_ignored() {
        let rotator = KeyRotator::new(keys(&["", "key0", "  "])).unwrap();
        assert_eq!(rotator.len(), 1);

        assert!(KeyRotator::new(keys(&["", " "])).is_err());
    }
}
