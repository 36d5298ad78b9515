//! Pure analytics aggregation over recorded clicks.
//!
//! Everything in this module is side-effect free: the service layer fetches
//! clicks and links for a user, and these functions reduce them to the four
//! dashboard views. Timeframe resolution lives here too, in one place, so
//! every view resolves its window identically.

use crate::domain::entities::{Click, ReferralLink};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

/// Maximum number of entries returned by the geography breakdown.
const TOP_COUNTRIES: usize = 10;

/// Label used for clicks with no recorded country.
const UNKNOWN_COUNTRY: &str = "Unknown";

/// Reporting window selector.
///
/// Parsed from the `timeframe` query parameter. `All` floors the window at
/// the Unix epoch rather than scanning unbounded history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Last7Days,
    Last30Days,
    Last90Days,
    LastYear,
    All,
}

impl Timeframe {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "7d" => Some(Self::Last7Days),
            "30d" => Some(Self::Last30Days),
            "90d" => Some(Self::Last90Days),
            "1y" => Some(Self::LastYear),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
            Self::LastYear => "1y",
            Self::All => "all",
        }
    }

    /// Resolves the inclusive start instant of the window ending at `now`.
    ///
    /// This is the only start-instant computation in the crate; all four
    /// analytics views go through it.
    pub fn start_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Last7Days => now - Duration::days(7),
            Self::Last30Days => now - Duration::days(30),
            Self::Last90Days => now - Duration::days(90),
            Self::LastYear => now - Duration::days(365),
            Self::All => DateTime::UNIX_EPOCH,
        }
    }
}

/// Device bucket a click's free-text device hint classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCategory {
    Desktop,
    Mobile,
    Tablet,
    Other,
}

impl DeviceCategory {
    /// Classifies a free-text device hint into exactly one category.
    ///
    /// Case-insensitive substring match: `mobile`/`phone` win over `tablet`,
    /// which wins over `desktop`; anything unrecognized, including a missing
    /// hint, is `Other`.
    pub fn classify(device_type: Option<&str>) -> Self {
        let Some(raw) = device_type else {
            return Self::Other;
        };

        let lowered = raw.to_lowercase();
        if lowered.contains("mobile") || lowered.contains("phone") {
            Self::Mobile
        } else if lowered.contains("tablet") {
            Self::Tablet
        } else if lowered.contains("desktop") {
            Self::Desktop
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Other => "other",
        }
    }
}

/// Click counts per device category.
///
/// All four categories are always present, zero counts included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceBreakdown {
    pub desktop: u64,
    pub mobile: u64,
    pub tablet: u64,
    pub other: u64,
}

/// Click count for a single country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub clicks: u64,
}

/// Click/conversion totals for one link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPerformance {
    pub link_id: i64,
    pub name: String,
    pub short_code: String,
    pub clicks: u64,
    pub conversions: u64,
    /// Percentage rounded to one decimal; 0.0 when there are no clicks.
    pub conversion_rate: f64,
}

/// Clicks and conversions on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub clicks: u64,
    pub conversions: u64,
}

/// Counts clicks per device category.
pub fn device_breakdown(clicks: &[Click]) -> DeviceBreakdown {
    let mut breakdown = DeviceBreakdown::default();

    for click in clicks {
        match DeviceCategory::classify(click.device_type.as_deref()) {
            DeviceCategory::Desktop => breakdown.desktop += 1,
            DeviceCategory::Mobile => breakdown.mobile += 1,
            DeviceCategory::Tablet => breakdown.tablet += 1,
            DeviceCategory::Other => breakdown.other += 1,
        }
    }

    breakdown
}

/// Counts clicks per country and returns the top entries.
///
/// Missing countries group under `"Unknown"`. Results are sorted descending
/// by count; ties keep first-seen order (the sort is stable), and at most
/// ten entries are returned.
pub fn country_breakdown(clicks: &[Click]) -> Vec<CountryCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for click in clicks {
        let country = click
            .country
            .clone()
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        match counts.get_mut(&country) {
            Some(count) => *count += 1,
            None => {
                counts.insert(country.clone(), 1);
                order.push(country);
            }
        }
    }

    let mut entries: Vec<CountryCount> = order
        .into_iter()
        .map(|country| {
            let clicks = counts[&country];
            CountryCount { country, clicks }
        })
        .collect();

    entries.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    entries.truncate(TOP_COUNTRIES);
    entries
}

/// Computes a conversion rate as a percentage rounded to one decimal.
///
/// Zero clicks yield 0.0 rather than a division error.
pub fn conversion_rate(clicks: u64, conversions: u64) -> f64 {
    if clicks == 0 {
        return 0.0;
    }

    let rate = conversions as f64 / clicks as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Computes per-link performance for the user's active links.
///
/// Links with no clicks in the window still appear, at zero. Results are
/// sorted descending by click count; ties keep the caller's link order.
pub fn link_performance(links: &[ReferralLink], clicks: &[Click]) -> Vec<LinkPerformance> {
    let mut totals: HashMap<i64, (u64, u64)> = HashMap::new();

    for click in clicks {
        let entry = totals.entry(click.link_id).or_default();
        entry.0 += 1;
        if click.converted {
            entry.1 += 1;
        }
    }

    let mut performance: Vec<LinkPerformance> = links
        .iter()
        .filter(|link| link.is_active())
        .map(|link| {
            let (clicks, conversions) = totals.get(&link.id).copied().unwrap_or((0, 0));
            LinkPerformance {
                link_id: link.id,
                name: link.name.clone(),
                short_code: link.short_code.clone(),
                clicks,
                conversions,
                conversion_rate: conversion_rate(clicks, conversions),
            }
        })
        .collect();

    performance.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    performance
}

/// Groups clicks into a daily time series on UTC calendar days.
///
/// Only days with at least one click appear; dates are unique and strictly
/// ascending.
pub fn time_series(clicks: &[Click]) -> Vec<TimeSeriesPoint> {
    let mut days: std::collections::BTreeMap<NaiveDate, (u64, u64)> =
        std::collections::BTreeMap::new();

    for click in clicks {
        let entry = days.entry(click.clicked_at.date_naive()).or_default();
        entry.0 += 1;
        if click.converted {
            entry.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (clicks, conversions))| TimeSeriesPoint {
            date,
            clicks,
            conversions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkStatus;
    use chrono::TimeZone;

    fn click(device: Option<&str>, country: Option<&str>) -> Click {
        Click {
            id: 0,
            link_id: 1,
            clicked_at: Utc::now(),
            device_type: device.map(|s| s.to_string()),
            country: country.map(|s| s.to_string()),
            referer: None,
            ip: None,
            converted: false,
        }
    }

    fn click_on(link_id: i64, at: DateTime<Utc>, converted: bool) -> Click {
        Click {
            id: 0,
            link_id,
            clicked_at: at,
            device_type: None,
            country: None,
            referer: None,
            ip: None,
            converted,
        }
    }

    fn link(id: i64, status: LinkStatus) -> ReferralLink {
        ReferralLink {
            id,
            user_id: 1,
            name: format!("Link {id}"),
            short_code: format!("code-{id}"),
            target_url: "https://example.com".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::parse("7d"), Some(Timeframe::Last7Days));
        assert_eq!(Timeframe::parse("30d"), Some(Timeframe::Last30Days));
        assert_eq!(Timeframe::parse("90d"), Some(Timeframe::Last90Days));
        assert_eq!(Timeframe::parse("1y"), Some(Timeframe::LastYear));
        assert_eq!(Timeframe::parse("all"), Some(Timeframe::All));
        assert_eq!(Timeframe::parse("2w"), None);
        assert_eq!(Timeframe::parse(""), None);
    }

    #[test]
    fn test_timeframe_start_monotonically_non_increasing() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();

        let starts: Vec<DateTime<Utc>> = [
            Timeframe::Last7Days,
            Timeframe::Last30Days,
            Timeframe::Last90Days,
            Timeframe::LastYear,
            Timeframe::All,
        ]
        .iter()
        .map(|tf| tf.start_at(now))
        .collect();

        for pair in starts.windows(2) {
            assert!(pair[1] <= pair[0], "start dates must not increase");
        }
    }

    #[test]
    fn test_timeframe_all_floors_at_epoch() {
        let now = Utc::now();
        assert_eq!(Timeframe::All.start_at(now), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_device_classification_total() {
        let cases = [
            (Some("Mobile Safari"), DeviceCategory::Mobile),
            (Some("windows phone"), DeviceCategory::Mobile),
            (Some("Android Tablet"), DeviceCategory::Tablet),
            (Some("DESKTOP"), DeviceCategory::Desktop),
            (Some("smart-tv"), DeviceCategory::Other),
            (Some(""), DeviceCategory::Other),
            (None, DeviceCategory::Other),
        ];

        for (input, expected) in cases {
            assert_eq!(DeviceCategory::classify(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_device_mobile_wins_over_tablet() {
        // A hint matching several substrings lands in exactly one bucket.
        assert_eq!(
            DeviceCategory::classify(Some("mobile tablet")),
            DeviceCategory::Mobile
        );
    }

    #[test]
    fn test_device_breakdown_always_has_all_categories() {
        let breakdown = device_breakdown(&[]);
        assert_eq!(breakdown, DeviceBreakdown::default());

        let clicks = vec![click(Some("iPhone mobile"), None), click(None, None)];
        let breakdown = device_breakdown(&clicks);
        assert_eq!(breakdown.mobile, 1);
        assert_eq!(breakdown.other, 1);
        assert_eq!(breakdown.desktop, 0);
        assert_eq!(breakdown.tablet, 0);
    }

    #[test]
    fn test_country_breakdown_missing_is_unknown() {
        let clicks = vec![click(None, None), click(None, Some("DE"))];
        let entries = country_breakdown(&clicks);

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.country == "Unknown" && e.clicks == 1));
    }

    #[test]
    fn test_country_breakdown_sorted_and_capped() {
        let mut clicks = Vec::new();
        // 12 countries, country N gets N clicks
        for n in 1..=12u64 {
            for _ in 0..n {
                clicks.push(click(None, Some(&format!("C{n:02}"))));
            }
        }

        let entries = country_breakdown(&clicks);

        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].country, "C12");
        assert_eq!(entries[0].clicks, 12);
        for pair in entries.windows(2) {
            assert!(pair[0].clicks >= pair[1].clicks);
        }
        // The two smallest countries fell off
        assert!(!entries.iter().any(|e| e.country == "C01" || e.country == "C02"));
    }

    #[test]
    fn test_country_breakdown_ties_keep_first_seen_order() {
        let clicks = vec![
            click(None, Some("SE")),
            click(None, Some("NO")),
            click(None, Some("FI")),
        ];

        let entries = country_breakdown(&clicks);
        let countries: Vec<&str> = entries.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(countries, vec!["SE", "NO", "FI"]);
    }

    #[test]
    fn test_conversion_rate_zero_clicks() {
        assert_eq!(conversion_rate(0, 0), 0.0);
    }

    #[test]
    fn test_conversion_rate_rounds_to_one_decimal() {
        assert_eq!(conversion_rate(10, 3), 30.0);
        assert_eq!(conversion_rate(3, 1), 33.3);
        assert_eq!(conversion_rate(3, 2), 66.7);
        assert_eq!(conversion_rate(8, 8), 100.0);
    }

    #[test]
    fn test_link_performance_sorted_by_clicks() {
        let now = Utc::now();
        let links = vec![link(1, LinkStatus::Active), link(2, LinkStatus::Active)];
        let clicks = vec![
            click_on(2, now, false),
            click_on(2, now, true),
            click_on(1, now, true),
        ];

        let performance = link_performance(&links, &clicks);

        assert_eq!(performance.len(), 2);
        assert_eq!(performance[0].link_id, 2);
        assert_eq!(performance[0].clicks, 2);
        assert_eq!(performance[0].conversions, 1);
        assert_eq!(performance[0].conversion_rate, 50.0);
        assert_eq!(performance[1].link_id, 1);
        assert_eq!(performance[1].conversion_rate, 100.0);
    }

    #[test]
    fn test_link_performance_skips_archived_and_keeps_zero_click_links() {
        let links = vec![link(1, LinkStatus::Archived), link(2, LinkStatus::Active)];

        let performance = link_performance(&links, &[]);

        assert_eq!(performance.len(), 1);
        assert_eq!(performance[0].link_id, 2);
        assert_eq!(performance[0].clicks, 0);
        assert_eq!(performance[0].conversion_rate, 0.0);
    }

    #[test]
    fn test_time_series_groups_by_utc_day() {
        let day1_morning = Utc.with_ymd_and_hms(2026, 7, 1, 0, 5, 0).unwrap();
        let day1_evening = Utc.with_ymd_and_hms(2026, 7, 1, 23, 55, 0).unwrap();
        let day3 = Utc.with_ymd_and_hms(2026, 7, 3, 12, 0, 0).unwrap();

        let clicks = vec![
            click_on(1, day3, true),
            click_on(1, day1_morning, false),
            click_on(1, day1_evening, true),
        ];

        let series = time_series(&clicks);

        assert_eq!(series.len(), 2); // day 2 had no events and is absent
        assert_eq!(series[0].date.to_string(), "2026-07-01");
        assert_eq!(series[0].clicks, 2);
        assert_eq!(series[0].conversions, 1);
        assert_eq!(series[1].date.to_string(), "2026-07-03");

        // strictly ascending, unique dates
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_time_series_empty() {
        assert!(time_series(&[]).is_empty());
    }
}
