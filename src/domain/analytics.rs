//! Click analytics aggregation.
//!
//! Pure functions over a link's click log. Totals are always recomputed from
//! the events themselves, never taken from [`Link::click_count`].
//!
//! Hour-of-day buckets use UTC. Click timestamps are stored as UTC, so write
//! time and read time agree on the interpretation regardless of the server's
//! local timezone.

use chrono::Timelike;
use std::collections::HashSet;

use crate::domain::entities::{Click, Link};

/// Number of hour-of-day buckets.
pub const HOURS_PER_DAY: usize = 24;

/// Aggregated statistics for one short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnalytics {
    pub link: Link,
    /// Number of recorded click events.
    pub total_clicks: u64,
    /// Number of distinct client addresses; clicks without an address are ignored.
    pub unique_visitors: u64,
    /// Click counts indexed by UTC hour of day, summed across all days.
    pub clicks_per_hour: [u64; HOURS_PER_DAY],
    /// The raw events, oldest first.
    pub clicks: Vec<Click>,
}

impl LinkAnalytics {
    /// Aggregates the click log of `link`.
    ///
    /// `clicks` is expected in ascending timestamp order; the aggregates do
    /// not depend on it, the retained event list does.
    pub fn from_clicks(link: Link, clicks: Vec<Click>) -> Self {
        Self {
            link,
            total_clicks: clicks.len() as u64,
            unique_visitors: count_unique_visitors(&clicks),
            clicks_per_hour: bucket_by_hour(&clicks),
            clicks,
        }
    }
}

/// Counts distinct non-empty client addresses.
pub fn count_unique_visitors(clicks: &[Click]) -> u64 {
    clicks
        .iter()
        .filter_map(|c| c.ip.as_deref())
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Counts clicks per UTC hour of day.
pub fn bucket_by_hour(clicks: &[Click]) -> [u64; HOURS_PER_DAY] {
    let mut buckets = [0u64; HOURS_PER_DAY];
    for click in clicks {
        buckets[click.clicked_at.hour() as usize] += 1;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
    }

    fn click(id: i64, ip: Option<&str>, clicked_at: DateTime<Utc>) -> Click {
        Click::new(
            id,
            1,
            ip.map(str::to_string),
            Some("TestAgent/1.0".to_string()),
            clicked_at,
        )
    }

    fn test_link() -> Link {
        Link::new(
            1,
            "abc123".to_string(),
            "https://example.com/page".to_string(),
            0,
            at(1, 0, 0),
        )
    }

    #[test]
    fn test_empty_log() {
        let analytics = LinkAnalytics::from_clicks(test_link(), vec![]);

        assert_eq!(analytics.total_clicks, 0);
        assert_eq!(analytics.unique_visitors, 0);
        assert!(analytics.clicks_per_hour.iter().all(|&n| n == 0));
        assert!(analytics.clicks.is_empty());
    }

    #[test]
    fn test_two_visitors_three_clicks() {
        let clicks = vec![
            click(1, Some("1.1.1.1"), at(2, 9, 0)),
            click(2, Some("1.1.1.1"), at(2, 9, 30)),
            click(3, Some("2.2.2.2"), at(2, 10, 5)),
        ];

        let analytics = LinkAnalytics::from_clicks(test_link(), clicks);

        assert_eq!(analytics.total_clicks, 3);
        assert_eq!(analytics.unique_visitors, 2);
    }

    #[test]
    fn test_clicks_without_ip_are_not_visitors() {
        let clicks = vec![
            click(1, None, at(2, 9, 0)),
            click(2, None, at(2, 9, 1)),
            click(3, Some("10.0.0.1"), at(2, 9, 2)),
        ];

        let analytics = LinkAnalytics::from_clicks(test_link(), clicks);

        assert_eq!(analytics.total_clicks, 3);
        assert_eq!(analytics.unique_visitors, 1);
    }

    #[test]
    fn test_distinct_ips_equal_total() {
        let clicks: Vec<Click> = (0..10)
            .map(|i| click(i, Some(&format!("192.168.0.{i}")), at(2, 12, i as u32)))
            .collect();

        let analytics = LinkAnalytics::from_clicks(test_link(), clicks);

        assert_eq!(analytics.unique_visitors, analytics.total_clicks);
    }

    #[test]
    fn test_hours_sum_across_days() {
        let clicks = vec![
            click(1, Some("1.1.1.1"), at(2, 14, 0)),
            click(2, Some("1.1.1.1"), at(3, 14, 59)),
            click(3, Some("1.1.1.1"), at(4, 14, 30)),
            click(4, Some("1.1.1.1"), at(4, 15, 0)),
            click(5, Some("1.1.1.1"), at(4, 0, 0)),
            click(6, Some("1.1.1.1"), at(4, 23, 59)),
        ];

        let buckets = bucket_by_hour(&clicks);

        assert_eq!(buckets[14], 3);
        assert_eq!(buckets[15], 1);
        assert_eq!(buckets[0], 1);
        assert_eq!(buckets[23], 1);
        assert_eq!(buckets[13], 0);
    }

    #[test]
    fn test_hours_sum_to_total() {
        let clicks: Vec<Click> = (0..50)
            .map(|i| click(i, Some("1.1.1.1"), at(5, (i * 7 % 24) as u32, 0)))
            .collect();

        let analytics = LinkAnalytics::from_clicks(test_link(), clicks);

        assert_eq!(
            analytics.clicks_per_hour.iter().sum::<u64>(),
            analytics.total_clicks
        );
        assert!(analytics.unique_visitors <= analytics.total_clicks);
    }

    #[test]
    fn test_bucketing_uses_utc_hour() {
        let offset = chrono::FixedOffset::east_opt(5 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2025, 3, 2, 3, 0, 0).unwrap();
        let clicks = vec![click(1, None, local.with_timezone(&Utc))];

        let buckets = bucket_by_hour(&clicks);

        assert_eq!(buckets[22], 1);
        assert_eq!(buckets[3], 0);
    }

    #[test]
    fn test_ignores_denormalized_counter() {
        let mut link = test_link();
        link.click_count = 999;

        let analytics =
            LinkAnalytics::from_clicks(link, vec![click(1, Some("1.1.1.1"), at(2, 1, 0))]);

        assert_eq!(analytics.total_clicks, 1);
    }
}
