//! Console mailer for development.
//!
//! Prints emails to stdout instead of sending them. Body content is redacted
//! by default since stdout is often captured by log aggregation.

use async_trait::async_trait;

use super::{Email, Mailer};
use crate::error::Result;

/// A mailer that prints emails to stdout instead of sending them.
///
/// For development only. Use [`with_full_output`](Self::with_full_output) to
/// see full body content in a trusted environment.
#[derive(Debug, Clone)]
pub struct ConsoleMailer {
    prefix: String,
    show_full_content: bool,
}

impl ConsoleMailer {
    /// Create a new console mailer with redacted body output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: "[EMAIL]".to_string(),
            show_full_content: false,
        }
    }

    /// Create a console mailer with a custom output prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            show_full_content: false,
        }
    }

    /// Enable or disable full body output.
    #[must_use]
    pub fn with_full_output(mut self, enabled: bool) -> Self {
        if enabled {
            tracing::warn!(
                target: "planboard::email",
                "ConsoleMailer: full output enabled, email content will be visible in logs"
            );
        }
        self.show_full_content = enabled;
        self
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;

        println!("{} From:    {}", self.prefix, email.from);
        println!("{} To:      {} recipient(s)", self.prefix, email.to.len());
        if !email.cc.is_empty() {
            println!("{} CC:      {} recipient(s)", self.prefix, email.cc.len());
        }
        println!("{} Subject: {}", self.prefix, email.subject);

        if self.show_full_content {
            if let Some(ref text) = email.text {
                for line in text.lines() {
                    println!("{} {}", self.prefix, line);
                }
            }
            if let Some(ref html) = email.html {
                for line in html.lines() {
                    println!("{} {}", self.prefix, line);
                }
            }
        } else {
            if let Some(ref text) = email.text {
                println!("{} [TEXT] {} bytes [REDACTED]", self.prefix, text.len());
            }
            if let Some(ref html) = email.html {
                println!("{} [HTML] {} bytes [REDACTED]", self.prefix, html.len());
            }
        }

        Ok(())
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_mailer_sends_without_error() {
        let mailer = ConsoleMailer::new();
        let email = Email::new("from@test.com", "to@test.com", "Subject").text("body");
        assert!(mailer.send(&email).await.is_ok());
    }

    #[tokio::test]
    async fn test_console_mailer_validates_email() {
        let mailer = ConsoleMailer::new();
        // No body
        let email = Email::new("from@test.com", "to@test.com", "Subject");
        assert!(mailer.send(&email).await.is_err());
    }

    #[test]
    fn test_console_mailer_is_healthy() {
        assert!(ConsoleMailer::new().is_healthy());
    }
}
