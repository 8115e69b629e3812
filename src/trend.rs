use chrono::{DateTime, Utc};

use crate::{metrics, JoinedContentView, PerformanceSnapshot};

/// Views gained per hour between the first and last snapshot.
///
/// Requires at least 2 points and a span of at least 1 hour; anything
/// shorter reports 0 rather than an inflated hourly figure.
pub fn growth_rate(snapshots: &[PerformanceSnapshot]) -> f64 {
    if snapshots.len() < 2 {
        return 0.0;
    }
    let first = &snapshots[0];
    let last = &snapshots[snapshots.len() - 1];
    let hours = hours_between(first.recorded_at, last.recorded_at);
    if hours < 1.0 {
        return 0.0;
    }
    (last.views as f64 - first.views as f64) / hours
}

/// Interactions gained per hour, same normalization as `growth_rate`.
pub fn engagement_speed(snapshots: &[PerformanceSnapshot]) -> f64 {
    if snapshots.len() < 2 {
        return 0.0;
    }
    let first = &snapshots[0];
    let last = &snapshots[snapshots.len() - 1];
    let hours = hours_between(first.recorded_at, last.recorded_at);
    if hours < 1.0 {
        return 0.0;
    }
    (last.interactions() as f64 - first.interactions() as f64) / hours
}

/// Percent change in mean engagement score between the chronological
/// first and second half of a topic's items. Needs at least 3 items and
/// a non-zero first-half mean.
pub fn topic_growth_trend(items: &[&JoinedContentView]) -> f64 {
    if items.len() < 3 {
        return 0.0;
    }

    let mut ordered: Vec<&JoinedContentView> = items.to_vec();
    ordered.sort_by_key(|view| view.content.published_at);

    let mid = ordered.len() / 2;
    let first_mean = half_mean(&ordered[..mid]);
    let second_mean = half_mean(&ordered[mid..]);

    if first_mean == 0.0 {
        return 0.0;
    }
    (second_mean - first_mean) / first_mean * 100.0
}

fn half_mean(views: &[&JoinedContentView]) -> f64 {
    if views.is_empty() {
        return 0.0;
    }
    let total: f64 = views
        .iter()
        .map(|view| metrics::engagement_score(&view.snapshots))
        .sum();
    total / views.len() as f64
}

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}
