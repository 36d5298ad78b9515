//! Click event model for asynchronous click capture.

/// An in-memory click captured on the redirect path, queued for persistence.
///
/// Carries the already-resolved link id plus raw request metadata; the
/// background worker derives the stored device hint from the User-Agent.
/// Decoupling the HTTP response from the database write keeps redirects fast.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
    /// ISO country code injected by the edge (e.g. `CF-IPCountry`).
    pub country: Option<String>,
}

impl ClickEvent {
    pub fn new(
        link_id: i64,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
        country: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
            country: country.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            42,
            Some("192.168.1.1".to_string()),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
            Some("SE"),
        );

        assert_eq!(event.link_id, 42);
        assert_eq!(event.ip, Some("192.168.1.1".to_string()));
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.referer, Some("https://google.com".to_string()));
        assert_eq!(event.country, Some("SE".to_string()));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new(7, None, None, None, None);

        assert_eq!(event.link_id, 7);
        assert!(event.ip.is_none());
        assert!(event.user_agent.is_none());
        assert!(event.country.is_none());
    }
}
