//! Click entity representing a single recorded visit to a referral link.

use chrono::{DateTime, Utc};

/// A click recorded when a referral link is followed.
///
/// Rows are written once by the capture path and only ever touched again by
/// conversion marking; the analytics aggregator reads them as-is. `converted`
/// is monotonic: once true it is never reset.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    /// Free-text device hint derived from the User-Agent at capture time.
    pub device_type: Option<String>,
    /// ISO country code supplied by the edge, when available.
    pub country: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
    pub converted: bool,
}

/// Input data for recording a new click.
///
/// The timestamp is set by the database.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub device_type: Option<String>,
    pub country: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}
