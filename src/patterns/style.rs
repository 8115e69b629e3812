use serde::Serialize;

use crate::{tables, ContentItem, JoinedContentView};

const CONCISE_BODY_MAX: usize = 500;
const MIN_MATCHES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Storytelling,
    Inspirational,
    Concise,
    CallToAction,
}

impl StyleKind {
    pub const ALL: [StyleKind; 4] = [
        StyleKind::Storytelling,
        StyleKind::Inspirational,
        StyleKind::Concise,
        StyleKind::CallToAction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StyleKind::Storytelling => "Narrativa pessoal",
            StyleKind::Inspirational => "Inspiracional",
            StyleKind::Concise => "Conteúdo conciso",
            StyleKind::CallToAction => "Chamada para ação",
        }
    }

    pub fn matches(self, item: &ContentItem) -> bool {
        match self {
            StyleKind::Storytelling => contains_any(item, &tables::STORYTELLING_KEYWORDS),
            StyleKind::Inspirational => contains_any(item, &tables::INSPIRATIONAL_KEYWORDS),
            StyleKind::Concise => item.body.chars().count() < CONCISE_BODY_MAX,
            StyleKind::CallToAction => contains_any(item, &tables::CTA_KEYWORDS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StylePattern {
    pub style: StyleKind,
    pub label: String,
    pub items: usize,
    pub mean_engagement: f64,
    pub characteristics: Vec<String>,
}

/// A style is reported only when at least 2 items match its heuristic.
pub fn extract(views: &[&JoinedContentView]) -> Vec<StylePattern> {
    let mut patterns: Vec<StylePattern> = StyleKind::ALL
        .iter()
        .filter_map(|&kind| {
            let matching: Vec<&&JoinedContentView> = views
                .iter()
                .filter(|view| kind.matches(&view.content))
                .collect();
            if matching.len() < MIN_MATCHES {
                return None;
            }
            let mean_engagement = matching
                .iter()
                .map(|view| view.engagement_score())
                .sum::<f64>()
                / matching.len() as f64;
            Some(StylePattern {
                style: kind,
                label: kind.label().to_string(),
                items: matching.len(),
                mean_engagement,
                characteristics: tables::style_characteristics(kind)
                    .iter()
                    .map(|entry| entry.to_string())
                    .collect(),
            })
        })
        .collect();

    patterns.sort_by(|a, b| {
        b.mean_engagement
            .partial_cmp(&a.mean_engagement)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    patterns
}

fn contains_any(item: &ContentItem, keywords: &[&str]) -> bool {
    let haystack = format!("{} {}", item.title, item.body).to_lowercase();
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
