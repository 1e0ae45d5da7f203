//! Admin notification plumbing.
//!
//! The storefront alerts its owner over a messaging channel (WhatsApp, in
//! production). This module only formats summaries and hands them to a
//! [`NotificationSink`]; delivery and retry are entirely the sink's
//! responsibility.

pub mod format;

use async_trait::async_trait;
use mockall::automock;
use url::Url;

/// Capability accepting formatted text summaries for the admin channel.
#[automock]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Hand off a summary. Fire-and-forget: callers never fail their own
    /// operation over a misbehaving sink.
    async fn send(&self, summary: &str);
}

/// Sink that writes summaries to the log.
///
/// Stands in for a real messaging transport in development and the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn send(&self, summary: &str) {
        tracing::info!(target: "atelier::notifications", %summary, "admin notification");
    }
}

/// Build a `wa.me` deep link carrying a prefilled message.
///
/// `number` is the international number without the leading `+`.
///
/// # Errors
///
/// Returns an error when the number does not form a valid URL.
pub fn whatsapp_link(number: &str, message: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(&format!("https://wa.me/{number}"), &[("text", message)])
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn whatsapp_link_carries_the_encoded_message() -> TestResult {
        let link = whatsapp_link("918812345678", "Hi, I'm interested in the collection")?;

        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/918812345678");

        let text: Vec<(String, String)> = link
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            text,
            vec![(
                "text".to_string(),
                "Hi, I'm interested in the collection".to_string()
            )]
        );

        Ok(())
    }
}
