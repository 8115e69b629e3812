use chrono::{Duration, TimeZone, Utc};

use creator_analytics::trend::{engagement_speed, growth_rate};
use creator_analytics::viral::{ViralPotential, ViralScorer, ViralWeights};
use creator_analytics::{PerformanceSnapshot, Platform};

fn snapshot_at(hours: i64, views: u64, shares: u64) -> PerformanceSnapshot {
    PerformanceSnapshot {
        content_id: "post".to_string(),
        platform: Platform::Instagram,
        recorded_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap() + Duration::hours(hours),
        views,
        likes: 0,
        comments: 0,
        shares,
    }
}

#[test]
fn growth_rate_needs_two_points_and_a_full_hour() {
    assert_eq!(growth_rate(&[snapshot_at(0, 100, 0)]), 0.0);

    let tight = vec![snapshot_at(0, 100, 0), {
        let mut snapshot = snapshot_at(0, 500, 0);
        snapshot.recorded_at += Duration::minutes(30);
        snapshot
    }];
    assert_eq!(growth_rate(&tight), 0.0);
}

#[test]
fn growth_rate_normalizes_views_per_hour() {
    let snapshots = vec![
        snapshot_at(0, 100, 1),
        snapshot_at(5, 400, 5),
        snapshot_at(10, 1000, 20),
    ];
    // (1000 - 100) / 10h
    assert!((growth_rate(&snapshots) - 90.0).abs() < 1e-9);
    // shares are the only interactions here: (20 - 1) / 10h
    assert!((engagement_speed(&snapshots) - 1.9).abs() < 1e-9);
}

#[test]
fn viral_score_is_nonzero_for_a_growing_post() {
    let scorer = ViralScorer::new(ViralWeights::default());
    let snapshots = vec![
        snapshot_at(0, 100, 1),
        snapshot_at(5, 400, 5),
        snapshot_at(10, 1000, 20),
    ];
    let report = scorer.score(&snapshots);

    assert!(report.score > 0.0);
    assert!((report.growth_rate - 90.0).abs() < 1e-9);
    // 26 shares over 1500 cumulative views
    assert!((report.share_rate - 26.0 / 1500.0 * 100.0).abs() < 1e-9);
    assert_eq!(report.potential, ViralPotential::ExtremelyHigh);
    assert!(report
        .key_factors
        .iter()
        .any(|factor| factor.contains("Crescimento")));
}

#[test]
fn potential_thresholds_are_exclusive_at_the_boundary() {
    assert_eq!(ViralPotential::from_score(6.0), ViralPotential::Moderate);
    assert_eq!(ViralPotential::from_score(6.01), ViralPotential::High);
    assert_eq!(ViralPotential::from_score(8.0), ViralPotential::High);
    assert_eq!(ViralPotential::from_score(8.01), ViralPotential::ExtremelyHigh);
    assert_eq!(ViralPotential::from_score(2.0), ViralPotential::VeryLow);
    assert_eq!(ViralPotential::from_score(4.5), ViralPotential::Moderate);
}

#[test]
fn score_grows_with_share_rate_holding_the_rest_fixed() {
    let scorer = ViralScorer::new(ViralWeights::default());

    // Same view curve, increasing shares only.
    let few_shares = vec![snapshot_at(0, 100, 0), snapshot_at(10, 1000, 5)];
    let more_shares = vec![snapshot_at(0, 100, 0), snapshot_at(10, 1000, 40)];

    let low = scorer.score(&few_shares);
    let high = scorer.score(&more_shares);
    assert!(high.score > low.score);
}

#[test]
fn share_probability_is_split_by_platform() {
    let scorer = ViralScorer::new(ViralWeights::default());
    let mut tiktok = snapshot_at(2, 200, 20);
    tiktok.platform = Platform::TikTok;
    let snapshots = vec![snapshot_at(0, 1000, 10), tiktok];

    let report = scorer.score(&snapshots);
    let instagram = report.platform_share_probability.get("Instagram").copied();
    let tiktok = report.platform_share_probability.get("TikTok").copied();
    assert!((instagram.unwrap() - 1.0).abs() < 1e-9);
    assert!((tiktok.unwrap() - 10.0).abs() < 1e-9);
}
