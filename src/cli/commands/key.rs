//! Chat-service API key management
//!
//! `set-key` and `clear-key` write the durable local credential store that
//! the resolver consults after the environment.

use super::load_or_env;
use crate::config::secret_string;
use crate::credentials::LocalStore;
use clap::Args;
use std::fmt;

/// Arguments for the set-key command
#[derive(Args)]
pub struct SetKeyArgs {
    /// API key to store
    pub key: String,
}

impl fmt::Debug for SetKeyArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetKeyArgs")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SetKeyArgs {
    /// Execute the set-key command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_env(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        if self.key.trim().is_empty() {
            println!("❌ API key cannot be empty");
            return Ok(2);
        }

        let store = LocalStore::new(&config.credentials.store_path);
        let key = secret_string(self.key.clone());

        match store.set(&config.credentials.store_key, &key) {
            Ok(()) => {
                println!("✅ API key saved to {}", store.path().display());
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to save API key");
                println!("   Error: {e}");
                Ok(3)
            }
        }
    }
}

/// Arguments for the clear-key command
#[derive(Args, Debug)]
pub struct ClearKeyArgs {}

impl ClearKeyArgs {
    /// Execute the clear-key command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_env(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let store = LocalStore::new(&config.credentials.store_path);

        match store.clear(&config.credentials.store_key) {
            Ok(true) => {
                println!("✅ API key removed from {}", store.path().display());
                Ok(0)
            }
            Ok(false) => {
                println!("ℹ️  No API key stored in {}", store.path().display());
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to clear API key");
                println!("   Error: {e}");
                Ok(3)
            }
        }
    }
}
