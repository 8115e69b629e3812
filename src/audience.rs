use serde::Serialize;
use std::collections::BTreeMap;

use crate::{metrics, tables, JoinedContentView};

/// A breakdown whose segments come from a fixed table, not from real
/// audience measurement. `simulated` is always true; callers decide how
/// to present that.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedBreakdown {
    pub simulated: bool,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub label: String,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudienceInsights {
    pub posts: usize,
    pub total_views: u64,
    pub total_interactions: u64,
    pub engagement_score: f64,
    pub best_weekday: Option<String>,
    pub best_hour: Option<u32>,
    pub demographics: SimulatedBreakdown,
    pub sentiment: SimulatedBreakdown,
}

/// Real aggregates over the selected range, plus simulated demographic
/// and sentiment sections (placeholder output, kept deliberately).
pub fn insights(views: &[JoinedContentView]) -> AudienceInsights {
    let with_performance: Vec<&JoinedContentView> = views
        .iter()
        .filter(|view| view.has_performance())
        .collect();

    let total_views: u64 = with_performance
        .iter()
        .map(|view| view.total_views())
        .sum();
    let total_interactions: u64 = with_performance
        .iter()
        .map(|view| view.total_interactions())
        .sum();

    let all_snapshots: Vec<_> = with_performance
        .iter()
        .flat_map(|view| view.snapshots.iter().cloned())
        .collect();

    AudienceInsights {
        posts: with_performance.len(),
        total_views,
        total_interactions,
        engagement_score: metrics::engagement_score(&all_snapshots),
        best_weekday: best_weekday(&with_performance),
        best_hour: best_hour(&with_performance),
        demographics: breakdown(&tables::SIMULATED_DEMOGRAPHICS),
        sentiment: breakdown(&tables::SIMULATED_SENTIMENT),
    }
}

fn breakdown(table: &[(&str, f64)]) -> SimulatedBreakdown {
    SimulatedBreakdown {
        simulated: true,
        segments: table
            .iter()
            .map(|&(label, share)| Segment {
                label: label.to_string(),
                share,
            })
            .collect(),
    }
}

fn best_weekday(views: &[&JoinedContentView]) -> Option<String> {
    best_bucket(views, |view| {
        tables::weekday_label(view.content.published_weekday()).to_string()
    })
}

fn best_hour(views: &[&JoinedContentView]) -> Option<u32> {
    best_bucket(views, |view| view.content.published_hour())
}

fn best_bucket<K: Ord>(
    views: &[&JoinedContentView],
    key_for: impl Fn(&JoinedContentView) -> K,
) -> Option<K> {
    let mut buckets: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for &view in views {
        buckets
            .entry(key_for(view))
            .or_default()
            .push(view.engagement_score());
    }

    buckets
        .into_iter()
        .map(|(key, scores)| {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            (key, mean)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(key, _)| key)
}
