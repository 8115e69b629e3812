use chrono::{TimeZone, Utc};

use creator_analytics::metrics::{
    correlation, engagement_rate, engagement_score, variance, weighted_engagement,
};
use creator_analytics::{PerformanceSnapshot, Platform};

fn snapshot(views: u64, likes: u64, comments: u64, shares: u64) -> PerformanceSnapshot {
    PerformanceSnapshot {
        content_id: "post".to_string(),
        platform: Platform::Instagram,
        recorded_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        views,
        likes,
        comments,
        shares,
    }
}

#[test]
fn engagement_rate_is_zero_without_views() {
    let rate = engagement_rate(&snapshot(0, 50, 10, 5));
    assert_eq!(rate, 0.0);
}

#[test]
fn engagement_rate_divides_interactions_by_views() {
    let rate = engagement_rate(&snapshot(1000, 80, 15, 5));
    assert!((rate - 0.1).abs() < 1e-9);
}

#[test]
fn engagement_score_of_empty_sequence_is_zero() {
    assert_eq!(engagement_score(&[]), 0.0);
}

#[test]
fn engagement_score_ignores_nothing_and_averages() {
    let snapshots = vec![snapshot(100, 10, 0, 0), snapshot(100, 30, 0, 0)];
    let score = engagement_score(&snapshots);
    assert!((score - 0.2).abs() < 1e-9);
}

#[test]
fn zero_view_sequence_scores_exactly_zero() {
    let snapshots = vec![snapshot(0, 10, 5, 2), snapshot(0, 3, 1, 0)];
    assert_eq!(engagement_score(&snapshots), 0.0);
}

#[test]
fn weighted_engagement_weights_comments_and_shares() {
    // 10 likes + 2*5 comments + 3*10 shares = 50 over 1000 views
    let weighted = weighted_engagement(&snapshot(1000, 10, 5, 10));
    assert!((weighted - 0.05).abs() < 1e-9);

    // The plain rate counts the same interactions once each.
    let plain = engagement_rate(&snapshot(1000, 10, 5, 10));
    assert!((plain - 0.025).abs() < 1e-9);
}

#[test]
fn variance_of_empty_and_singleton_is_zero() {
    assert_eq!(variance(&[]), 0.0);
    assert_eq!(variance(&[42.0]), 0.0);
}

#[test]
fn variance_is_population_variance() {
    let value = variance(&[2.0, 4.0, 6.0]);
    assert!((value - 8.0 / 3.0).abs() < 1e-9);
}

#[test]
fn correlation_needs_three_pairs() {
    assert_eq!(correlation(&[1.0, 2.0], &[2.0, 4.0]), 0.0);
    assert_eq!(correlation(&[], &[]), 0.0);
}

#[test]
fn correlation_of_constant_series_is_zero() {
    assert_eq!(correlation(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn correlation_detects_a_perfect_linear_relation() {
    let value = correlation(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
    assert!((value - 1.0).abs() < 1e-9);

    let inverse = correlation(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]);
    assert!((inverse + 1.0).abs() < 1e-9);
}
