use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{clamp01, safe_ratio, JoinedContentView, Platform};

#[derive(Debug, Clone, Serialize)]
pub struct TypeMetrics {
    pub avg_views: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
    pub like_rate: f64,
    pub comment_rate: f64,
    pub share_rate: f64,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPerformer {
    pub content_id: String,
    pub title: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentTypeComparison {
    pub content_type: String,
    pub platform: Platform,
    pub posts: usize,
    pub metrics: TypeMetrics,
    pub performance_score: f64,
    pub top_performers: Vec<TopPerformer>,
    pub insights: Vec<String>,
    pub relative_performance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendPoint {
    pub month: String,
    pub posts: usize,
    pub avg_views: f64,
    pub avg_engagements: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub groups: Vec<ContentTypeComparison>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub cross_insights: Vec<String>,
    pub strategies: Vec<String>,
}

struct GroupTotals {
    platform: Platform,
    posts: usize,
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
}

impl GroupTotals {
    fn interactions(&self) -> u64 {
        self.likes + self.comments + self.shares
    }

    fn engagement_rate(&self) -> f64 {
        safe_ratio(self.interactions() as f64, self.views as f64)
    }
}

/// Content type is derived from the target platform. Item totals come
/// from each item's most recent snapshot.
pub fn compare(views: &[JoinedContentView]) -> ComparisonReport {
    let grouped = group_by_type(views);
    let totals: Vec<GroupTotals> = grouped
        .iter()
        .map(|(&platform, group)| group_totals(platform, group))
        .collect();

    let mut groups: Vec<ContentTypeComparison> = grouped
        .iter()
        .zip(totals.iter())
        .map(|((&platform, group), own)| {
            build_comparison(platform, group, own, &totals)
        })
        .collect();
    groups.sort_by(|a, b| {
        b.metrics
            .engagement_rate
            .partial_cmp(&a.metrics.engagement_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ComparisonReport {
        cross_insights: cross_insights(&groups),
        strategies: strategies(&groups),
        monthly_trend: monthly_trend(views),
        groups,
    }
}

fn group_by_type(views: &[JoinedContentView]) -> BTreeMap<Platform, Vec<&JoinedContentView>> {
    let mut grouped: BTreeMap<Platform, Vec<&JoinedContentView>> = BTreeMap::new();
    for view in views {
        if !view.has_performance() {
            continue;
        }
        grouped.entry(view.content.platform).or_default().push(view);
    }
    grouped
}

fn group_totals(platform: Platform, group: &[&JoinedContentView]) -> GroupTotals {
    let mut totals = GroupTotals {
        platform,
        posts: group.len(),
        views: 0,
        likes: 0,
        comments: 0,
        shares: 0,
    };
    for view in group {
        if let Some(latest) = view.latest() {
            totals.views += latest.views;
            totals.likes += latest.likes;
            totals.comments += latest.comments;
            totals.shares += latest.shares;
        }
    }
    totals
}

fn build_comparison(
    platform: Platform,
    group: &[&JoinedContentView],
    own: &GroupTotals,
    all: &[GroupTotals],
) -> ContentTypeComparison {
    let posts = own.posts.max(1) as f64;
    let metrics = TypeMetrics {
        avg_views: own.views as f64 / posts,
        avg_likes: own.likes as f64 / posts,
        avg_comments: own.comments as f64 / posts,
        avg_shares: own.shares as f64 / posts,
        like_rate: safe_ratio(own.likes as f64, own.views as f64),
        comment_rate: safe_ratio(own.comments as f64, own.views as f64),
        share_rate: safe_ratio(own.shares as f64, own.views as f64),
        engagement_rate: own.engagement_rate(),
    };

    let performance_score = clamp01(safe_ratio(own.interactions() as f64, own.views as f64) * 20.0);

    ContentTypeComparison {
        content_type: platform.label().to_string(),
        platform,
        posts: own.posts,
        performance_score,
        top_performers: top_performers(group),
        insights: group_insights(platform, own),
        relative_performance: relative_performance(own, all),
        metrics,
    }
}

fn top_performers(group: &[&JoinedContentView]) -> Vec<TopPerformer> {
    let mut performers: Vec<TopPerformer> = group
        .iter()
        .filter_map(|view| {
            let latest = view.latest()?;
            let score =
                clamp01(safe_ratio(latest.interactions() as f64, latest.views as f64) * 20.0);
            Some(TopPerformer {
                content_id: view.content.id.clone(),
                title: view.content.title.clone(),
                score,
            })
        })
        .collect();
    performers.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    performers.truncate(3);
    performers
}

/// Which engagement channel dominates this group.
fn group_insights(platform: Platform, totals: &GroupTotals) -> Vec<String> {
    let mut insights = Vec::new();
    let label = platform.label();

    if totals.likes >= totals.comments && totals.likes >= totals.shares {
        insights.push(format!("Curtidas são o principal canal de engajamento no {}", label));
    } else if totals.comments >= totals.shares {
        insights.push(format!("Comentários dominam o engajamento no {}", label));
    } else {
        insights.push(format!(
            "Compartilhamentos dominam o engajamento no {}",
            label
        ));
    }
    insights
}

/// Engagement-rate ratio of this group against all other groups combined.
fn relative_performance(own: &GroupTotals, all: &[GroupTotals]) -> f64 {
    let mut other_views = 0u64;
    let mut other_interactions = 0u64;
    for totals in all {
        if totals.platform == own.platform {
            continue;
        }
        other_views += totals.views;
        other_interactions += totals.interactions();
    }
    let others_rate = safe_ratio(other_interactions as f64, other_views as f64);
    safe_ratio(own.engagement_rate(), others_rate)
}

fn cross_insights(groups: &[ContentTypeComparison]) -> Vec<String> {
    let mut insights = Vec::new();
    if groups.is_empty() {
        return insights;
    }

    let best = &groups[0];
    insights.push(format!(
        "{} é o tipo de conteúdo com melhor desempenho (engajamento de {:.1}%)",
        best.content_type,
        best.metrics.engagement_rate * 100.0
    ));

    if groups.len() > 1 {
        let worst = &groups[groups.len() - 1];
        insights.push(format!(
            "{} tem o menor engajamento entre os seus formatos",
            worst.content_type
        ));

        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                let ratio = safe_ratio(a.metrics.engagement_rate, b.metrics.engagement_rate);
                if ratio > 1.5 {
                    insights.push(format!(
                        "{} engaja {:.1}x mais que {} (acima do limiar de 1.5x)",
                        a.content_type, ratio, b.content_type
                    ));
                }
            }
        }
    }
    insights
}

/// Strategies from the ranked group list: push the leader, balance a
/// close second, flag a distant last.
fn strategies(groups: &[ContentTypeComparison]) -> Vec<String> {
    let mut strategies = Vec::new();
    let Some(best) = groups.first() else {
        return strategies;
    };

    strategies.push(format!(
        "Priorize {} no seu calendário de conteúdo",
        best.content_type
    ));

    if let Some(second) = groups.get(1) {
        if second.metrics.engagement_rate >= best.metrics.engagement_rate * 0.8 {
            strategies.push(format!(
                "Equilibre a produção entre {} e {}; o desempenho é próximo",
                best.content_type, second.content_type
            ));
        }
    }

    if groups.len() > 1 {
        let worst = &groups[groups.len() - 1];
        if worst.metrics.engagement_rate < best.metrics.engagement_rate * 0.4 {
            strategies.push(format!(
                "Reavalie o investimento em {}; o retorno está bem abaixo do seu melhor formato",
                worst.content_type
            ));
        }
    }
    strategies
}

/// Views and engagements per post by calendar month, across all groups.
fn monthly_trend(views: &[JoinedContentView]) -> Vec<MonthlyTrendPoint> {
    let mut months: BTreeMap<String, (usize, u64, u64)> = BTreeMap::new();
    for view in views {
        let Some(latest) = view.latest() else {
            continue;
        };
        let key = format!(
            "{:04}-{:02}",
            view.content.published_at.year(),
            view.content.published_at.month()
        );
        let entry = months.entry(key).or_insert((0, 0, 0));
        entry.0 += 1;
        entry.1 += latest.views;
        entry.2 += latest.interactions();
    }

    months
        .into_iter()
        .map(|(month, (posts, views, engagements))| MonthlyTrendPoint {
            month,
            posts,
            avg_views: views as f64 / posts as f64,
            avg_engagements: engagements as f64 / posts as f64,
        })
        .collect()
}
