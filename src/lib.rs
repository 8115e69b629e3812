pub mod audience;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod metrics;
pub mod patterns;
pub mod predict;
pub mod recommend;
pub mod sample;
pub mod store;
pub mod tables;
pub mod trend;
pub mod viral;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    YouTube,
    TikTok,
    Twitter,
    Facebook,
    LinkedIn,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Instagram,
        Platform::YouTube,
        Platform::TikTok,
        Platform::Twitter,
        Platform::Facebook,
        Platform::LinkedIn,
        Platform::Pinterest,
    ];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "instagram" | "ig" => Some(Platform::Instagram),
            "youtube" | "yt" => Some(Platform::YouTube),
            "tiktok" => Some(Platform::TikTok),
            "twitter" | "x" => Some(Platform::Twitter),
            "facebook" | "fb" => Some(Platform::Facebook),
            "linkedin" => Some(Platform::LinkedIn),
            "pinterest" => Some(Platform::Pinterest),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Twitter => "Twitter",
            Platform::Facebook => "Facebook",
            Platform::LinkedIn => "LinkedIn",
            Platform::Pinterest => "Pinterest",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub name: String,
    pub followers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub platform: Platform,
    #[serde(default)]
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn has_media(&self) -> bool {
        self.media_url.is_some()
    }

    pub fn published_weekday(&self) -> Weekday {
        self.published_at.weekday()
    }

    pub fn published_hour(&self) -> u32 {
        self.published_at.hour()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub content_id: String,
    pub platform: Platform,
    pub recorded_at: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl PerformanceSnapshot {
    pub fn interactions(&self) -> u64 {
        self.likes + self.comments + self.shares
    }
}

/// A content item joined with its performance history. Snapshots are
/// re-sorted by observation date at construction; input order is never
/// trusted.
#[derive(Debug, Clone)]
pub struct JoinedContentView {
    pub content: ContentItem,
    pub snapshots: Vec<PerformanceSnapshot>,
}

impl JoinedContentView {
    pub fn new(content: ContentItem, mut snapshots: Vec<PerformanceSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.recorded_at);
        Self { content, snapshots }
    }

    pub fn has_performance(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&PerformanceSnapshot> {
        self.snapshots.last()
    }

    pub fn engagement_score(&self) -> f64 {
        metrics::engagement_score(&self.snapshots)
    }

    pub fn weighted_engagement_score(&self) -> f64 {
        metrics::weighted_engagement_score(&self.snapshots)
    }

    pub fn total_views(&self) -> u64 {
        self.latest().map(|snapshot| snapshot.views).unwrap_or(0)
    }

    pub fn total_interactions(&self) -> u64 {
        self.latest()
            .map(|snapshot| snapshot.interactions())
            .unwrap_or(0)
    }
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push('.');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
