//! Click analytics service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::analytics::{
    self, CountryCount, DeviceBreakdown, LinkPerformance, Timeframe, TimeSeriesPoint,
};
use crate::domain::entities::Click;
use crate::domain::repositories::{ClickRepository, LinkRepository, UserRepository};
use crate::error::AppError;

/// Service computing the four analytics views over a user's clicks.
///
/// All views resolve their reporting window through
/// [`Timeframe::start_at`] and fetch the same click set; only the reduction
/// differs. The service never writes click rows.
pub struct AnalyticsService<U, C, L>
where
    U: UserRepository,
    C: ClickRepository,
    L: LinkRepository,
{
    users: Arc<U>,
    clicks: Arc<C>,
    links: Arc<L>,
}

impl<U, C, L> AnalyticsService<U, C, L>
where
    U: UserRepository,
    C: ClickRepository,
    L: LinkRepository,
{
    /// Creates a new analytics service.
    pub fn new(users: Arc<U>, clicks: Arc<C>, links: Arc<L>) -> Self {
        Self {
            users,
            clicks,
            links,
        }
    }

    /// Confirms the principal still maps to a user row, then fetches the
    /// click set for the window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    async fn clicks_in_window(
        &self,
        user_id: i64,
        timeframe: Timeframe,
    ) -> Result<Vec<Click>, AppError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": user_id }),
            ));
        }

        let since = timeframe.start_at(Utc::now());
        self.clicks.list_for_user_since(user_id, since).await
    }

    /// Device-category histogram for the window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn device_breakdown(
        &self,
        user_id: i64,
        timeframe: Timeframe,
    ) -> Result<DeviceBreakdown, AppError> {
        let clicks = self.clicks_in_window(user_id, timeframe).await?;
        Ok(analytics::device_breakdown(&clicks))
    }

    /// Top-ten country histogram for the window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn country_breakdown(
        &self,
        user_id: i64,
        timeframe: Timeframe,
    ) -> Result<Vec<CountryCount>, AppError> {
        let clicks = self.clicks_in_window(user_id, timeframe).await?;
        Ok(analytics::country_breakdown(&clicks))
    }

    /// Clicks, conversions, and conversion rate per active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn link_performance(
        &self,
        user_id: i64,
        timeframe: Timeframe,
    ) -> Result<Vec<LinkPerformance>, AppError> {
        let clicks = self.clicks_in_window(user_id, timeframe).await?;
        let links = self.links.list_by_user(user_id).await?;
        Ok(analytics::link_performance(&links, &clicks))
    }

    /// Daily clicks/conversions series for the window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn time_series(
        &self,
        user_id: i64,
        timeframe: Timeframe,
    ) -> Result<Vec<TimeSeriesPoint>, AppError> {
        let clicks = self.clicks_in_window(user_id, timeframe).await?;
        Ok(analytics::time_series(&clicks))
    }
}
