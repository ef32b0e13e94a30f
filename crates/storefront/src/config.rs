//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ENCORE_CATALOG_URL` - Base URL of the catalog service
//! - `ENCORE_LOGIN_URL` - URL of the external login flow
//!
//! ## Required in live payment mode
//! - `ENCORE_PAYMENT_URL` - Charge endpoint of the payment processor
//! - `ENCORE_PAYMENT_SECRET_KEY` - Processor secret key (validated for
//!   placeholder patterns and entropy)
//!
//! ## Optional
//! - `ENCORE_CART_DIR` - Directory for the persisted cart (default: .encore/cart)
//! - `ENCORE_PAYMENT_MODE` - `demo` (default) or `live`
//! - `ENCORE_DEMO_PAYMENT_DELAY_MS` - Simulated charge delay in demo mode
//!   (default: 800)

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_CART_DIR: &str = ".encore/cart";
const DEFAULT_DEMO_DELAY_MS: u64 = 800;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog service configuration
    pub catalog: CatalogConfig,
    /// URL of the external login flow (receives a `return_to` parameter)
    pub login_url: String,
    /// Directory holding the persisted cart
    pub cart_dir: PathBuf,
    /// Payment collaborator configuration
    pub payment: PaymentConfig,
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service (e.g., <http://localhost:5000>)
    pub base_url: String,
}

/// Payment collaborator configuration.
///
/// The demo path simulates a successful charge after a fixed delay and is
/// the default for environments without live payment credentials.
#[derive(Debug, Clone)]
pub enum PaymentConfig {
    /// Simulated payments: always succeed after `delay`.
    Demo {
        /// Simulated round-trip delay.
        delay: Duration,
    },
    /// Live payment processor.
    Live(ProcessorConfig),
}

/// Live payment processor configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct ProcessorConfig {
    /// Charge endpoint URL
    pub endpoint: String,
    /// Processor secret key (server-side only)
    pub secret_key: SecretString,
}

impl std::fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("endpoint", &self.endpoint)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig {
            base_url: get_required_env("ENCORE_CATALOG_URL")?,
        };
        let login_url = get_required_env("ENCORE_LOGIN_URL")?;
        let cart_dir = PathBuf::from(get_env_or_default("ENCORE_CART_DIR", DEFAULT_CART_DIR));
        let payment = PaymentConfig::from_env()?;

        Ok(Self {
            catalog,
            login_url,
            cart_dir,
            payment,
        })
    }
}

impl PaymentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mode = get_env_or_default("ENCORE_PAYMENT_MODE", "demo");
        match mode.as_str() {
            "demo" => {
                let delay_ms = get_env_or_default(
                    "ENCORE_DEMO_PAYMENT_DELAY_MS",
                    &DEFAULT_DEMO_DELAY_MS.to_string(),
                )
                .parse::<u64>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "ENCORE_DEMO_PAYMENT_DELAY_MS".to_string(),
                        e.to_string(),
                    )
                })?;
                Ok(Self::Demo {
                    delay: Duration::from_millis(delay_ms),
                })
            }
            "live" => Ok(Self::Live(ProcessorConfig {
                endpoint: get_required_env("ENCORE_PAYMENT_URL")?,
                secret_key: get_validated_secret("ENCORE_PAYMENT_SECRET_KEY")?,
            })),
            other => Err(ConfigError::InvalidEnvVar(
                "ENCORE_PAYMENT_MODE".to_string(),
                format!("expected 'demo' or 'live', got '{other}'"),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Random-looking string should have high entropy
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_processor_config_debug_redacts_secret() {
        let config = ProcessorConfig {
            endpoint: "https://pay.example.com/v1/charges".to_string(),
            secret_key: SecretString::from("sk_live_abcdef123456"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("https://pay.example.com/v1/charges"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_live_abcdef123456"));
    }
}
