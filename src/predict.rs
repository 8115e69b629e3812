use serde::{Deserialize, Serialize};

use crate::patterns::confidence_for_sample;
use crate::{factors, safe_ratio, tables, JoinedContentView, Platform};

/// Fallback interaction ratios used when the creator has no usable
/// history for a channel.
const FALLBACK_LIKE_RATIO: f64 = 0.04;
const FALLBACK_COMMENT_RATIO: f64 = 0.008;
const FALLBACK_SHARE_RATIO: f64 = 0.005;

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub creator_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub platform: Platform,
    #[serde(default)]
    pub has_media: bool,
    #[serde(default)]
    pub publish_hour: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub estimated_views: f64,
    pub estimated_likes: f64,
    pub estimated_comments: f64,
    pub estimated_shares: f64,
    pub estimated_engagement_rate: f64,
    pub confidence: f64,
    pub applied_rules: Vec<String>,
    /// Rule-table estimate, not a learned model.
    pub heuristic: bool,
}

/// Rule-table prediction: the creator's historical baseline adjusted by
/// fixed multipliers. Explicitly heuristic, never a learned model.
pub fn predict(request: &PredictionRequest, history: &[JoinedContentView]) -> PredictionReport {
    let with_performance: Vec<&JoinedContentView> = history
        .iter()
        .filter(|view| view.has_performance())
        .collect();

    let platform_views: Vec<&&JoinedContentView> = with_performance
        .iter()
        .filter(|view| view.content.platform == request.platform)
        .collect();

    let baseline = if platform_views.is_empty() {
        mean_views(&with_performance)
    } else {
        platform_views
            .iter()
            .map(|view| view.total_views() as f64)
            .sum::<f64>()
            / platform_views.len() as f64
    };

    let (multiplier, applied_rules) = rule_multiplier(request);
    let estimated_views = baseline * multiplier;

    let (like_ratio, comment_ratio, share_ratio) = interaction_ratios(&with_performance);

    let estimated_likes = estimated_views * like_ratio;
    let estimated_comments = estimated_views * comment_ratio;
    let estimated_shares = estimated_views * share_ratio;
    let estimated_engagement_rate = safe_ratio(
        estimated_likes + estimated_comments + estimated_shares,
        estimated_views,
    );

    PredictionReport {
        estimated_views,
        estimated_likes,
        estimated_comments,
        estimated_shares,
        estimated_engagement_rate,
        confidence: confidence_for_sample(with_performance.len()),
        applied_rules,
        heuristic: true,
    }
}

fn rule_multiplier(request: &PredictionRequest) -> (f64, Vec<String>) {
    let mut multiplier = 1.0;
    let mut applied = Vec::new();

    if request.has_media {
        multiplier *= 1.2;
        applied.push("Mídia anexada: +20%".to_string());
    }

    let title_len = request.title.chars().count();
    if (20..=60).contains(&title_len) {
        multiplier *= 1.1;
        applied.push("Título na faixa ideal de 20 a 60 caracteres: +10%".to_string());
    }

    let lowered = request.body.to_lowercase();
    if tables::CTA_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        multiplier *= 1.1;
        applied.push("Chamada para ação no texto: +10%".to_string());
    }

    match factors::count_hashtags(&request.body) {
        1..=3 => {
            multiplier *= 1.1;
            applied.push("1 a 3 hashtags: +10%".to_string());
        }
        7.. => {
            multiplier *= 0.9;
            applied.push("7 ou mais hashtags: -10%".to_string());
        }
        _ => {}
    }

    if let Some(hour) = request.publish_hour {
        if matches!(hour, 11..=13 | 18..=21) {
            multiplier *= 1.15;
            applied.push("Horário de pico: +15%".to_string());
        }
    }

    (multiplier, applied)
}

/// Per-view interaction ratios from history, with fixed fallbacks when a
/// channel has no signal.
fn interaction_ratios(history: &[&JoinedContentView]) -> (f64, f64, f64) {
    let mut views = 0u64;
    let mut likes = 0u64;
    let mut comments = 0u64;
    let mut shares = 0u64;
    for view in history {
        if let Some(latest) = view.latest() {
            views += latest.views;
            likes += latest.likes;
            comments += latest.comments;
            shares += latest.shares;
        }
    }

    if views == 0 {
        return (
            FALLBACK_LIKE_RATIO,
            FALLBACK_COMMENT_RATIO,
            FALLBACK_SHARE_RATIO,
        );
    }

    let ratio = |count: u64, fallback: f64| {
        if count == 0 {
            fallback
        } else {
            count as f64 / views as f64
        }
    };
    (
        ratio(likes, FALLBACK_LIKE_RATIO),
        ratio(comments, FALLBACK_COMMENT_RATIO),
        ratio(shares, FALLBACK_SHARE_RATIO),
    )
}

fn mean_views(history: &[&JoinedContentView]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    history
        .iter()
        .map(|view| view.total_views() as f64)
        .sum::<f64>()
        / history.len() as f64
}
