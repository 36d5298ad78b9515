//! DTOs for the analytics endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::analytics::{
    CountryCount, DeviceBreakdown, LinkPerformance, Timeframe, TimeSeriesPoint,
};
use crate::error::AppError;

/// Query parameters shared by all analytics views.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub timeframe: Option<String>,
}

impl AnalyticsQuery {
    /// Parses the timeframe selector, defaulting to the last 30 days.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown selector.
    pub fn timeframe(&self) -> Result<Timeframe, AppError> {
        match &self.timeframe {
            None => Ok(Timeframe::Last30Days),
            Some(raw) => Timeframe::parse(raw).ok_or_else(|| {
                AppError::bad_request(
                    "Invalid timeframe",
                    json!({ "allowed": ["7d", "30d", "90d", "1y", "all"], "got": raw }),
                )
            }),
        }
    }
}

/// Device histogram. All four categories are always present.
#[derive(Debug, Serialize)]
pub struct DeviceBreakdownResponse {
    pub timeframe: &'static str,
    pub desktop: u64,
    pub mobile: u64,
    pub tablet: u64,
    pub other: u64,
}

impl DeviceBreakdownResponse {
    pub fn from_breakdown(timeframe: Timeframe, breakdown: DeviceBreakdown) -> Self {
        Self {
            timeframe: timeframe.as_str(),
            desktop: breakdown.desktop,
            mobile: breakdown.mobile,
            tablet: breakdown.tablet,
            other: breakdown.other,
        }
    }
}

/// One geography entry.
#[derive(Debug, Serialize)]
pub struct CountryStatItem {
    pub country: String,
    pub clicks: u64,
}

impl From<CountryCount> for CountryStatItem {
    fn from(count: CountryCount) -> Self {
        Self {
            country: count.country,
            clicks: count.clicks,
        }
    }
}

/// One per-link performance entry.
#[derive(Debug, Serialize)]
pub struct LinkPerformanceItem {
    pub link_id: i64,
    pub name: String,
    pub short_code: String,
    pub clicks: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
}

impl From<LinkPerformance> for LinkPerformanceItem {
    fn from(performance: LinkPerformance) -> Self {
        Self {
            link_id: performance.link_id,
            name: performance.name,
            short_code: performance.short_code,
            clicks: performance.clicks,
            conversions: performance.conversions,
            conversion_rate: performance.conversion_rate,
        }
    }
}

/// One day in the time series. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Serialize)]
pub struct TimeSeriesItem {
    pub date: NaiveDate,
    pub clicks: u64,
    pub conversions: u64,
}

impl From<TimeSeriesPoint> for TimeSeriesItem {
    fn from(point: TimeSeriesPoint) -> Self {
        Self {
            date: point.date,
            clicks: point.clicks,
            conversions: point.conversions,
        }
    }
}
