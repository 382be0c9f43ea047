//! Service credentials held with the secrecy crate
//!
//! API keys for the analyzer and anonymizer are wrapped in [`SecretString`]:
//! the memory is zeroed on drop, `Debug` output is redacted and the value is
//! only reachable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use noteguard::config::{bearer_value, secret_string};
//!
//! let key = secret_string("analyzer-token".to_string());
//! assert_eq!(bearer_value(&key), "Bearer analyzer-token");
//! println!("{:?}", key); // Secret([REDACTED ...])
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// String newtype that can live inside a [`Secret`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A secret string; see the module docs
pub type SecretString = Secret<SecretValue>;

/// Wrap a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// `Authorization` header value for a bearer token
///
/// The returned string contains the token; send it, never log it.
pub fn bearer_value(token: &SecretString) -> String {
    format!("Bearer {}", token.expose_secret().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("token-123".to_string());
        assert_eq!(secret.expose_secret(), "token-123");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_bearer_value() {
        let secret = secret_string("abc".to_string());
        assert_eq!(bearer_value(&secret), "Bearer abc");
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Service {
            api_key: SecretString,
        }

        let service: Service = toml::from_str("api_key = \"from-file\"").unwrap();
        assert_eq!(service.api_key.expose_secret(), "from-file");
        assert!(!service.api_key.expose_secret().is_empty());
    }
}
