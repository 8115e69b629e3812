use serde::Serialize;
use std::collections::BTreeMap;

use super::confidence_for_sample;
use crate::{metrics, tables, JoinedContentView, Platform};

#[derive(Debug, Clone, Serialize)]
pub struct TimingSlot {
    pub label: String,
    pub mean_engagement: f64,
    pub samples: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformSlot {
    pub platform: Platform,
    pub day: String,
    pub hour: u32,
    pub mean_engagement: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingPattern {
    pub best_days: Vec<TimingSlot>,
    pub best_hours: Vec<TimingSlot>,
    pub platform_slots: Vec<PlatformSlot>,
    pub confidence: f64,
}

/// Publication-time analysis: snapshots contribute their engagement rate
/// to the weekday/hour the owning item was published.
pub fn extract(views: &[&JoinedContentView]) -> TimingPattern {
    let day_rates = collect_day_rates(views);
    let hour_rates = collect_hour_rates(views);
    let platform_rates = collect_platform_rates(views);

    let total_samples: usize = views.iter().map(|view| view.snapshots.len()).sum();

    TimingPattern {
        best_days: rank_slots(day_rates),
        best_hours: rank_slots(hour_rates),
        platform_slots: rank_platform_slots(platform_rates),
        confidence: confidence_for_sample(total_samples),
    }
}

fn collect_day_rates(views: &[&JoinedContentView]) -> BTreeMap<String, Vec<f64>> {
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for view in views {
        let label = tables::weekday_label(view.content.published_weekday()).to_string();
        for snapshot in &view.snapshots {
            buckets
                .entry(label.clone())
                .or_default()
                .push(metrics::engagement_rate(snapshot));
        }
    }
    buckets
}

fn collect_hour_rates(views: &[&JoinedContentView]) -> BTreeMap<String, Vec<f64>> {
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for view in views {
        let label = format!("{}h", view.content.published_hour());
        for snapshot in &view.snapshots {
            buckets
                .entry(label.clone())
                .or_default()
                .push(metrics::engagement_rate(snapshot));
        }
    }
    buckets
}

type PlatformSlotKey = (Platform, String, u32);

fn collect_platform_rates(views: &[&JoinedContentView]) -> BTreeMap<PlatformSlotKey, Vec<f64>> {
    let mut buckets: BTreeMap<PlatformSlotKey, Vec<f64>> = BTreeMap::new();
    for view in views {
        let key = (
            view.content.platform,
            tables::weekday_label(view.content.published_weekday()).to_string(),
            view.content.published_hour(),
        );
        for snapshot in &view.snapshots {
            buckets
                .entry(key.clone())
                .or_default()
                .push(metrics::engagement_rate(snapshot));
        }
    }
    buckets
}

fn rank_slots(buckets: BTreeMap<String, Vec<f64>>) -> Vec<TimingSlot> {
    let mut slots: Vec<TimingSlot> = buckets
        .into_iter()
        .map(|(label, rates)| TimingSlot {
            label,
            mean_engagement: mean(&rates),
            samples: rates.len(),
            confidence: confidence_for_sample(rates.len()),
        })
        .collect();
    slots.sort_by(|a, b| {
        b.mean_engagement
            .partial_cmp(&a.mean_engagement)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    slots
}

/// Ranks (platform, day, hour) slots and keeps the top 3 per platform.
fn rank_platform_slots(buckets: BTreeMap<PlatformSlotKey, Vec<f64>>) -> Vec<PlatformSlot> {
    let mut slots: Vec<PlatformSlot> = buckets
        .into_iter()
        .map(|((platform, day, hour), rates)| PlatformSlot {
            platform,
            day,
            hour,
            mean_engagement: mean(&rates),
            samples: rates.len(),
        })
        .collect();
    slots.sort_by(|a, b| {
        b.mean_engagement
            .partial_cmp(&a.mean_engagement)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<PlatformSlot> = Vec::new();
    let mut counts: BTreeMap<Platform, usize> = BTreeMap::new();
    for slot in slots {
        let count = counts.entry(slot.platform).or_insert(0);
        if *count < 3 {
            *count += 1;
            kept.push(slot);
        }
    }
    kept
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
