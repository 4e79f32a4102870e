use serde::Deserialize;
use std::fmt;

/// Credential for the weather provider. `Debug` and `Display` only show a masked form.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// The raw credential, for building request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn masked(&self) -> String {
        let visible: String = self.0.chars().take(4).collect();
        if self.0.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("{}****", visible)
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_masked() {
        let key = ApiKey::new("abcd1234secret");

        assert_eq!(key.masked(), "abcd****");
        assert_eq!(format!("{}", key), "abcd****");
        assert_eq!(format!("{:?}", key), "ApiKey(abcd****)");
        assert_eq!(key.expose(), "abcd1234secret");
    }

    #[test]
    fn test_short_key_fully_masked() {
        let key = ApiKey::new("abc");
        assert_eq!(key.masked(), "****");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let key = ApiKey::new("  key-1 \n");
        assert_eq!(key.expose(), "key-1");
        assert!(ApiKey::new("   ").is_blank());
    }
}
