//! DTOs for conversion tracking.

use serde::Deserialize;

/// Request to mark a click as converted.
#[derive(Debug, Deserialize)]
pub struct ConversionRequest {
    pub click_id: i64,
}
