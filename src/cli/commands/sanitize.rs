//! Sanitize command implementation

use super::load_or_env;
use crate::credentials::SessionStore;
use crate::gateway::{quick_replies, ComplianceGateway};
use crate::phi::audit::categories_of;
use clap::Args;

/// Arguments for the sanitize command
#[derive(Args)]
pub struct SanitizeArgs {
    /// Chat message to screen
    pub text: String,

    /// Also print quick-reply suggestions for the message
    #[arg(long)]
    pub suggest: bool,
}

// The message may contain PHI; keep it out of debug output
impl std::fmt::Debug for SanitizeArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanitizeArgs")
            .field("text_len", &self.text.len())
            .field("suggest", &self.suggest)
            .finish()
    }
}

impl SanitizeArgs {
    /// Execute the sanitize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_env(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let gateway = match ComplianceGateway::new(&config, SessionStore::new()) {
            Ok(g) => g,
            Err(e) => {
                println!("❌ {}", e.user_message());
                return Ok(e.exit_code());
            }
        };

        let outbound = gateway.sanitize_message(&self.text);
        let icon = if outbound.was_redacted() { "🔒" } else { "✅" };

        println!("{icon} {}", gateway.phi_notice(&self.text));
        let categories = categories_of(&gateway.engine().detector().scan(&self.text));
        if !categories.is_empty() {
            let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
            println!("   Detected: {}", labels.join(", "));
        }
        println!();
        println!("{outbound}");

        if self.suggest {
            println!();
            println!("Suggested follow-ups:");
            for reply in quick_replies(&self.text) {
                println!("  • {reply}");
            }
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_text() {
        let args = SanitizeArgs {
            text: "SSN 123-45-6789".to_string(),
            suggest: false,
        };
        assert!(!format!("{args:?}").contains("123-45-6789"));
    }
}
