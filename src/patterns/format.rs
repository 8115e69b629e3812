use serde::Serialize;
use std::collections::BTreeMap;

use crate::{tables, JoinedContentView, Platform};

#[derive(Debug, Clone, Serialize)]
pub struct FormatPattern {
    pub platform: Platform,
    pub format_name: String,
    pub items: usize,
    pub mean_engagement: f64,
    pub best_practices: Vec<String>,
}

/// Platform is the proxy for content format: group, rank by mean
/// engagement score, attach the fixed format name and practice strings.
pub fn extract(views: &[&JoinedContentView]) -> Vec<FormatPattern> {
    let groups = group_by_platform(views);

    let mut patterns: Vec<FormatPattern> = groups
        .into_iter()
        .map(|(platform, group)| {
            let mean_engagement = group
                .iter()
                .map(|view| view.engagement_score())
                .sum::<f64>()
                / group.len() as f64;
            FormatPattern {
                platform,
                format_name: tables::format_name(platform).to_string(),
                items: group.len(),
                mean_engagement,
                best_practices: tables::platform_best_practices(platform)
                    .iter()
                    .map(|practice| practice.to_string())
                    .collect(),
            }
        })
        .collect();

    patterns.sort_by(|a, b| {
        b.mean_engagement
            .partial_cmp(&a.mean_engagement)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    patterns
}

fn group_by_platform<'a>(
    views: &[&'a JoinedContentView],
) -> BTreeMap<Platform, Vec<&'a JoinedContentView>> {
    let mut groups: BTreeMap<Platform, Vec<&JoinedContentView>> = BTreeMap::new();
    for &view in views {
        groups.entry(view.content.platform).or_default().push(view);
    }
    groups
}
