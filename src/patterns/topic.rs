use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::{trend, JoinedContentView};

const TOPIC_SEPARATORS: [char; 4] = ['-', ':', '|', '—'];
const TOPIC_LABEL_MAX: usize = 30;
const MIN_ITEMS_PER_TOPIC: usize = 2;
const MAX_TOPICS: usize = 5;
const MAX_RELATED: usize = 3;
const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct TopicPattern {
    pub topic: String,
    pub items: usize,
    pub mean_engagement: f64,
    pub mean_views: f64,
    pub growth_trend: f64,
    pub related_topics: Vec<String>,
    pub keywords: Vec<String>,
    pub example_ids: Vec<String>,
}

/// Topic label for a title: the text before the first `-`, `:`, `|` or
/// `—`; with no separator, the first 30 characters.
pub fn topic_label(title: &str) -> String {
    let separator = title
        .char_indices()
        .find(|(_, ch)| TOPIC_SEPARATORS.contains(ch));

    if let Some((index, _)) = separator {
        let label = title[..index].trim();
        if !label.is_empty() {
            return label.to_string();
        }
    }
    title.chars().take(TOPIC_LABEL_MAX).collect::<String>().trim().to_string()
}

pub fn extract(views: &[&JoinedContentView]) -> Vec<TopicPattern> {
    let groups = group_by_topic(views);
    let ranked = rank_topics(groups);
    let all_topics: Vec<String> = ranked.iter().map(|(topic, _, _)| topic.clone()).collect();

    ranked
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(topic, group, mean_engagement)| {
            let related_topics = related_topics(&topic, &all_topics);
            let keywords = keywords(&group);
            let example_ids = group
                .iter()
                .map(|view| view.content.id.clone())
                .collect();
            let mean_views = group
                .iter()
                .map(|view| view.total_views() as f64)
                .sum::<f64>()
                / group.len() as f64;
            TopicPattern {
                growth_trend: trend::topic_growth_trend(&group),
                topic,
                items: group.len(),
                mean_engagement,
                mean_views,
                related_topics,
                keywords,
                example_ids,
            }
        })
        .collect()
}

fn group_by_topic<'a>(
    views: &[&'a JoinedContentView],
) -> BTreeMap<String, Vec<&'a JoinedContentView>> {
    let mut groups: BTreeMap<String, Vec<&JoinedContentView>> = BTreeMap::new();
    for &view in views {
        let label = topic_label(&view.content.title);
        if label.is_empty() {
            continue;
        }
        groups.entry(label).or_default().push(view);
    }
    groups
}

type RankedTopic<'a> = (String, Vec<&'a JoinedContentView>, f64);

fn rank_topics(groups: BTreeMap<String, Vec<&JoinedContentView>>) -> Vec<RankedTopic<'_>> {
    let mut ranked: Vec<RankedTopic> = groups
        .into_iter()
        .filter(|(_, group)| group.len() >= MIN_ITEMS_PER_TOPIC)
        .map(|(topic, group)| {
            let mean = group
                .iter()
                .map(|view| view.engagement_score())
                .sum::<f64>()
                / group.len() as f64;
            (topic, group, mean)
        })
        .collect();
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Related topics by substring containment, either direction, lowercased.
fn related_topics(topic: &str, all_topics: &[String]) -> Vec<String> {
    let needle = topic.to_lowercase();
    all_topics
        .iter()
        .filter(|candidate| candidate.as_str() != topic)
        .filter(|candidate| {
            let other = candidate.to_lowercase();
            other.contains(&needle) || needle.contains(&other)
        })
        .take(MAX_RELATED)
        .cloned()
        .collect()
}

/// Most frequent title tokens longer than 3 characters, lowercased.
fn keywords(group: &[&JoinedContentView]) -> Vec<String> {
    let mut frequency: HashMap<String, usize> = HashMap::new();
    for view in group {
        for token in view.content.title.split_whitespace() {
            let word: String = token
                .chars()
                .filter(|ch| ch.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if word.chars().count() > 3 {
                *frequency.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}
