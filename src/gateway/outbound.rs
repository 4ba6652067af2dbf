//! Text cleared for the conversational layer

use crate::phi::RedactedMessage;
use std::fmt;

/// Text that has passed through the redaction engine
///
/// The only way to obtain one is from a [`RedactedMessage`], which only the
/// redaction engine produces. Anything handed to the conversational layer is
/// typed as `OutboundText`, so unscreened text cannot reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundText {
    text: String,
    redacted: bool,
}

impl OutboundText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether live PHI was found and redacted
    pub fn was_redacted(&self) -> bool {
        self.redacted
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl From<RedactedMessage> for OutboundText {
    fn from(message: RedactedMessage) -> Self {
        let redacted = message.was_redacted();
        Self {
            text: message.into_text(),
            redacted,
        }
    }
}

impl AsRef<str> for OutboundText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OutboundText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
