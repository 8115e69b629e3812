use serde::Serialize;
use std::collections::BTreeMap;

use crate::patterns::{confidence_for_sample, PatternReport};
use crate::{factors, metrics, tables, Creator, JoinedContentView, Platform};

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub score: f64,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicRecommendation {
    pub topic: String,
    pub reason: String,
    pub potential_reach: String,
    pub trending: bool,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatRecommendation {
    pub platform: Platform,
    pub ideal_format: String,
    pub ideal_length: String,
    pub best_practices: Vec<String>,
    pub mean_engagement: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub topics: Vec<TopicRecommendation>,
    pub formats: Vec<FormatRecommendation>,
    pub strategies: Vec<Recommendation>,
    pub tactics: Vec<Recommendation>,
    pub monetization: Vec<Recommendation>,
}

pub fn generate(
    creator: &Creator,
    views: &[JoinedContentView],
    patterns: &PatternReport,
) -> RecommendationReport {
    RecommendationReport {
        topics: topic_recommendations(views, patterns),
        formats: format_recommendations(views, patterns),
        strategies: strategy_recommendations(views),
        tactics: tactic_recommendations(views),
        monetization: monetization_recommendations(creator, views),
    }
}

fn reach_label(average_views: f64) -> &'static str {
    if average_views > 10_000.0 {
        "Muito alto"
    } else if average_views > 5_000.0 {
        "Alto"
    } else if average_views > 1_000.0 {
        "Médio"
    } else {
        "Moderado"
    }
}

/// Own top topics plus up to 2 trending topics the creator has not
/// covered yet.
fn topic_recommendations(
    views: &[JoinedContentView],
    patterns: &PatternReport,
) -> Vec<TopicRecommendation> {
    let mut recommendations: Vec<TopicRecommendation> = patterns
        .topics
        .iter()
        .map(|topic| TopicRecommendation {
            topic: topic.topic.clone(),
            reason: format!(
                "Seus {} posts sobre o tema mantêm engajamento médio de {:.1}%",
                topic.items,
                topic.mean_engagement * 100.0
            ),
            potential_reach: reach_label(topic.mean_views).to_string(),
            trending: false,
            score: confidence_for_sample(topic.items),
        })
        .collect();

    let own_topics: Vec<String> = patterns
        .topics
        .iter()
        .map(|topic| topic.topic.to_lowercase())
        .collect();
    let overall_views = average_views(views);

    let trending = tables::TRENDING_TOPICS
        .iter()
        .filter(|trending| {
            let name = trending.name.to_lowercase();
            !own_topics
                .iter()
                .any(|own| name.contains(own.as_str()) || own.contains(&name))
        })
        .take(2);
    for topic in trending {
        recommendations.push(TopicRecommendation {
            topic: topic.name.to_string(),
            reason: format!("Tema em alta na categoria {}", topic.category),
            potential_reach: reach_label(overall_views).to_string(),
            trending: true,
            score: 0.5,
        });
    }

    recommendations
}

/// Top 3 platforms with ideal format, observed practices from the
/// platform's top posts, and the length bucket that engages best there.
fn format_recommendations(
    views: &[JoinedContentView],
    patterns: &PatternReport,
) -> Vec<FormatRecommendation> {
    patterns
        .formats
        .iter()
        .take(3)
        .map(|format| {
            let platform_views: Vec<&JoinedContentView> = views
                .iter()
                .filter(|view| view.content.platform == format.platform)
                .collect();
            FormatRecommendation {
                platform: format.platform,
                ideal_format: tables::format_name(format.platform).to_string(),
                ideal_length: best_length_bucket(&platform_views),
                best_practices: observed_practices(&platform_views),
                mean_engagement: format.mean_engagement,
            }
        })
        .collect()
}

/// Practices read off a platform's top-3 posts by weighted engagement.
fn observed_practices(platform_views: &[&JoinedContentView]) -> Vec<String> {
    let mut ranked: Vec<&&JoinedContentView> = platform_views.iter().collect();
    ranked.sort_by(|a, b| {
        b.weighted_engagement_score()
            .partial_cmp(&a.weighted_engagement_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top: Vec<&&JoinedContentView> = ranked.into_iter().take(3).collect();
    if top.is_empty() {
        return Vec::new();
    }

    let mut practices = Vec::new();
    let with_media = top.iter().filter(|view| view.content.has_media()).count();
    if with_media * 2 > top.len() {
        practices.push("Seus melhores posts aqui usam imagem ou vídeo".to_string());
    }
    let with_question = top
        .iter()
        .filter(|view| view.content.title.contains('?') || view.content.body.contains('?'))
        .count();
    if with_question * 2 > top.len() {
        practices.push("Perguntas diretas aparecem nos posts de maior engajamento".to_string());
    }
    let with_hashtags = top
        .iter()
        .filter(|view| factors::count_hashtags(&view.content.body) > 0)
        .count();
    if with_hashtags * 2 > top.len() {
        practices.push("Hashtags estão presentes nos posts que mais performam".to_string());
    }
    if practices.is_empty() {
        practices.push("Repita a estrutura dos seus posts de maior engajamento".to_string());
    }
    practices
}

fn best_length_bucket(platform_views: &[&JoinedContentView]) -> String {
    let mut buckets: BTreeMap<&'static str, Vec<f64>> = BTreeMap::new();
    for view in platform_views {
        buckets
            .entry(factors::length_bucket(&view.content.body))
            .or_default()
            .push(view.engagement_score());
    }

    buckets
        .into_iter()
        .map(|(bucket, scores)| {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            (bucket, mean)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(bucket, _)| bucket.to_string())
        .unwrap_or_else(|| "Médio (300 a 1000)".to_string())
}

fn strategy_recommendations(views: &[JoinedContentView]) -> Vec<Recommendation> {
    let mut strategies = Vec::new();

    let (weekday_mean, weekend_mean) = weekday_weekend_means(views);
    if weekday_mean > 0.0 || weekend_mean > 0.0 {
        let (better, worse, better_mean, worse_mean) = if weekday_mean >= weekend_mean {
            ("dias úteis", "fins de semana", weekday_mean, weekend_mean)
        } else {
            ("fins de semana", "dias úteis", weekend_mean, weekday_mean)
        };
        let difference = if worse_mean > 0.0 {
            (better_mean - worse_mean) / worse_mean * 100.0
        } else {
            100.0
        };
        strategies.push(Recommendation {
            title: format!("Concentre publicações em {}", better),
            description: format!(
                "O engajamento em {} supera {} em {:.0}%",
                better, worse, difference
            ),
            score: 0.7,
            examples: Vec::new(),
        });
    }

    for (attribute, value) in attribute_correlations(views) {
        if value.abs() <= 0.3 {
            continue;
        }
        let direction = if value > 0.0 { "mais" } else { "menos" };
        strategies.push(Recommendation {
            title: format!("Ajuste o atributo '{}' dos seus posts", attribute),
            description: format!(
                "Posts com {} '{}' estão correlacionados com engajamento maior (r = {:.2})",
                direction, attribute, value
            ),
            score: value.abs().min(1.0),
            examples: Vec::new(),
        });
    }

    if let Some(per_week) = posting_cadence(views) {
        strategies.push(Recommendation {
            title: "Ajuste a cadência de publicação".to_string(),
            description: format!(
                "Seu ritmo atual é de {:.1} posts por semana; mantenha a regularidade antes de aumentar o volume",
                per_week
            ),
            score: 0.6,
            examples: Vec::new(),
        });
    }

    for strategy in tables::GENERAL_STRATEGIES {
        strategies.push(Recommendation {
            title: strategy.to_string(),
            description: String::new(),
            score: 0.5,
            examples: Vec::new(),
        });
    }
    strategies
}

/// Tactics read off the top-5 posts, plus the fixed general list.
fn tactic_recommendations(views: &[JoinedContentView]) -> Vec<Recommendation> {
    let mut ranked: Vec<&JoinedContentView> = views
        .iter()
        .filter(|view| view.has_performance())
        .collect();
    ranked.sort_by(|a, b| {
        b.weighted_engagement_score()
            .partial_cmp(&a.weighted_engagement_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top: Vec<&JoinedContentView> = ranked.into_iter().take(5).collect();

    let mut tactics = Vec::new();
    let examples: Vec<String> = top.iter().map(|view| view.content.id.clone()).collect();

    let with_question = top
        .iter()
        .filter(|view| view.content.body.contains('?'))
        .count();
    if with_question * 2 > top.len() && !top.is_empty() {
        tactics.push(Recommendation {
            title: "Perguntas geram conversa".to_string(),
            description: "A maioria dos seus melhores posts termina com uma pergunta".to_string(),
            score: 0.7,
            examples: examples.clone(),
        });
    }

    let with_cta = top
        .iter()
        .filter(|view| factors::cta_bucket(&view.content.body) == "Com CTA")
        .count();
    if with_cta * 2 > top.len() && !top.is_empty() {
        tactics.push(Recommendation {
            title: "CTAs explícitos funcionam para você".to_string(),
            description: "Posts com chamada para ação dominam seu top 5".to_string(),
            score: 0.7,
            examples,
        });
    }

    for tactic in tables::GENERAL_TACTICS {
        tactics.push(Recommendation {
            title: tactic.to_string(),
            description: String::new(),
            score: 0.5,
            examples: Vec::new(),
        });
    }
    tactics
}

/// Threshold rules on engagement, reach, followers and platform usage.
fn monetization_recommendations(
    creator: &Creator,
    views: &[JoinedContentView],
) -> Vec<Recommendation> {
    let mut opportunities = Vec::new();

    let scored: Vec<f64> = views
        .iter()
        .filter(|view| view.has_performance())
        .map(|view| view.engagement_score())
        .collect();
    let mean_engagement = if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    };
    let total_views: u64 = views.iter().map(|view| view.total_views()).sum();

    if mean_engagement > 0.05 && creator.followers > 10_000 {
        opportunities.push(Recommendation {
            title: "Parcerias com marcas".to_string(),
            description: "Engajamento acima de 5% com audiência relevante atrai patrocínios"
                .to_string(),
            score: 0.8,
            examples: Vec::new(),
        });
    }
    if total_views > 100_000 {
        opportunities.push(Recommendation {
            title: "Programas de monetização das plataformas".to_string(),
            description: "Seu volume de visualizações habilita receita por anúncios".to_string(),
            score: 0.7,
            examples: Vec::new(),
        });
    }
    if creator.followers > 5_000 {
        opportunities.push(Recommendation {
            title: "Produtos digitais próprios".to_string(),
            description: "Audiência suficiente para validar um produto ou mentoria".to_string(),
            score: 0.6,
            examples: Vec::new(),
        });
    }

    let mut platform_counts: BTreeMap<Platform, usize> = BTreeMap::new();
    for view in views {
        *platform_counts.entry(view.content.platform).or_insert(0) += 1;
    }
    if platform_counts.get(&Platform::YouTube).copied().unwrap_or(0) >= 3 {
        opportunities.push(Recommendation {
            title: "Receita de anúncios no YouTube".to_string(),
            description: "Produção recorrente no YouTube permite ativar o programa de parceiros"
                .to_string(),
            score: 0.6,
            examples: Vec::new(),
        });
    }
    if platform_counts
        .get(&Platform::Instagram)
        .copied()
        .unwrap_or(0)
        >= 3
    {
        opportunities.push(Recommendation {
            title: "Posts patrocinados no Instagram".to_string(),
            description: "Presença consistente no Instagram abre espaço para publis".to_string(),
            score: 0.6,
            examples: Vec::new(),
        });
    }

    for suggestion in tables::GENERAL_MONETIZATION {
        opportunities.push(Recommendation {
            title: suggestion.to_string(),
            description: String::new(),
            score: 0.5,
            examples: Vec::new(),
        });
    }
    opportunities
}

/// Correlation between a content attribute and engagement, exposed for
/// callers that want the raw signal behind the strategy texts.
pub fn attribute_correlations(views: &[JoinedContentView]) -> BTreeMap<String, f64> {
    let scored: Vec<&JoinedContentView> = views
        .iter()
        .filter(|view| view.has_performance())
        .collect();
    let engagement: Vec<f64> = scored.iter().map(|view| view.engagement_score()).collect();

    let attributes: [(&str, Box<dyn Fn(&JoinedContentView) -> f64>); 6] = [
        ("título", Box::new(|view| view.content.title.chars().count() as f64)),
        ("texto", Box::new(|view| view.content.body.chars().count() as f64)),
        ("mídia", Box::new(|view| if view.content.has_media() { 1.0 } else { 0.0 })),
        ("manhã", Box::new(|view| flag(view.content.published_hour(), 6, 11))),
        ("tarde", Box::new(|view| flag(view.content.published_hour(), 12, 17))),
        ("noite", Box::new(|view| flag(view.content.published_hour(), 18, 23))),
    ];

    attributes
        .iter()
        .map(|(name, extract)| {
            let values: Vec<f64> = scored.iter().map(|&view| extract(view)).collect();
            (name.to_string(), metrics::correlation(&values, &engagement))
        })
        .collect()
}

fn flag(hour: u32, start: u32, end: u32) -> f64 {
    if (start..=end).contains(&hour) {
        1.0
    } else {
        0.0
    }
}

fn weekday_weekend_means(views: &[JoinedContentView]) -> (f64, f64) {
    let mut weekday = Vec::new();
    let mut weekend = Vec::new();
    for view in views {
        if !view.has_performance() {
            continue;
        }
        let score = view.engagement_score();
        match view.content.published_weekday() {
            chrono::Weekday::Sat | chrono::Weekday::Sun => weekend.push(score),
            _ => weekday.push(score),
        }
    }
    (mean(&weekday), mean(&weekend))
}

/// Posts per week estimated from the mean interval between publications.
fn posting_cadence(views: &[JoinedContentView]) -> Option<f64> {
    let mut dates: Vec<_> = views.iter().map(|view| view.content.published_at).collect();
    if dates.len() < 2 {
        return None;
    }
    dates.sort();

    let total_hours: f64 = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_seconds() as f64 / 3600.0)
        .sum();
    let mean_hours = total_hours / (dates.len() - 1) as f64;
    if mean_hours <= 0.0 {
        return None;
    }
    Some(168.0 / mean_hours)
}

fn average_views(views: &[JoinedContentView]) -> f64 {
    let totals: Vec<f64> = views
        .iter()
        .filter(|view| view.has_performance())
        .map(|view| view.total_views() as f64)
        .collect();
    mean(&totals)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
