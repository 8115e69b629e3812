pub mod format;
pub mod style;
pub mod timing;
pub mod topic;

use serde::Serialize;

pub use format::FormatPattern;
pub use style::StylePattern;
pub use timing::TimingPattern;
pub use topic::TopicPattern;

use crate::tables;
use crate::JoinedContentView;

#[derive(Debug, Clone, Serialize)]
pub struct PatternReport {
    pub timing: TimingPattern,
    pub topics: Vec<TopicPattern>,
    pub formats: Vec<FormatPattern>,
    pub styles: Vec<StylePattern>,
    pub best_practices: Vec<String>,
}

/// Confidence as a step function of sample size. The thresholds are part
/// of the product contract.
pub fn confidence_for_sample(samples: usize) -> f64 {
    if samples < 5 {
        0.3
    } else if samples < 10 {
        0.5
    } else if samples < 20 {
        0.7
    } else if samples < 50 {
        0.85
    } else {
        0.95
    }
}

/// The creator's top-N items ranked by weighted engagement. Pattern
/// extraction looks only at what already performed well.
pub fn top_by_engagement(views: &[JoinedContentView], top_n: usize) -> Vec<&JoinedContentView> {
    let mut ranked: Vec<&JoinedContentView> = views
        .iter()
        .filter(|view| view.has_performance())
        .collect();
    ranked.sort_by(|a, b| {
        b.weighted_engagement_score()
            .partial_cmp(&a.weighted_engagement_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

pub fn extract_patterns(views: &[JoinedContentView], top_n: usize) -> PatternReport {
    let top = top_by_engagement(views, top_n);

    let timing = timing::extract(&top);
    let topics = topic::extract(&top);
    let formats = format::extract(&top);
    let styles = style::extract(&top);

    let mut best_practices: Vec<String> = formats
        .first()
        .map(|format| {
            format
                .best_practices
                .iter()
                .cloned()
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    best_practices.push(tables::UNIVERSAL_TIP.to_string());

    PatternReport {
        timing,
        topics,
        formats,
        styles,
        best_practices,
    }
}
