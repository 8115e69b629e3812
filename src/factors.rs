use serde::Serialize;
use std::collections::BTreeMap;

use crate::{metrics, tables, JoinedContentView};

/// Marginal effect of one controllable factor on engagement.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementFactor {
    pub name: String,
    pub description: String,
    pub subfactors: BTreeMap<String, f64>,
    pub optimization_tips: Vec<String>,
    pub importance: f64,
    pub confidence: f64,
}

/// How a factor's importance grows beyond its base constant.
#[derive(Debug, Clone, Copy)]
enum Spread {
    /// Coefficient of variation across bucket means, capped.
    Variance,
    /// Relative best-vs-worst bucket delta, capped.
    BestWorstDelta,
}

/// Base constants, caps and confidences are fixed per factor; they encode
/// how much the product trusts each factor, and are never derived.
struct FactorSpec {
    name: &'static str,
    description: &'static str,
    base: f64,
    cap: f64,
    confidence: f64,
    spread: Spread,
}

pub fn analyze(views: &[JoinedContentView]) -> Vec<EngagementFactor> {
    vec![
        timing_factor(views),
        content_type_factor(views),
        length_factor(views),
        visual_factor(views),
        cta_factor(views),
        hashtag_factor(views),
    ]
}

fn timing_factor(views: &[JoinedContentView]) -> EngagementFactor {
    let spec = FactorSpec {
        name: "Horário de publicação",
        description: "Dia da semana e período do dia em que o conteúdo é publicado",
        base: 0.5,
        cap: 0.3,
        confidence: 0.8,
        spread: Spread::Variance,
    };
    let subfactors = bucket_means(views, |view| {
        vec![
            tables::weekday_label(view.content.published_weekday()).to_string(),
            tables::period_label(view.content.published_hour()).to_string(),
        ]
    });
    let tips = |best: &str| {
        vec![
            format!("Concentre as próximas publicações em {}", best),
            "Mantenha horários consistentes nas semanas de teste".to_string(),
            "Compare períodos do dia antes de fixar o calendário".to_string(),
            "Evite publicar em horários de baixo alcance histórico".to_string(),
        ]
    };
    build_factor(spec, subfactors, tips)
}

fn content_type_factor(views: &[JoinedContentView]) -> EngagementFactor {
    let spec = FactorSpec {
        name: "Tipo de conteúdo",
        description: "Plataforma de destino como aproximação do formato",
        base: 0.6,
        cap: 0.3,
        confidence: 0.85,
        spread: Spread::Variance,
    };
    let subfactors = bucket_means(views, |view| vec![view.content.platform.label().to_string()]);
    let tips = |best: &str| {
        vec![
            format!("Priorize a produção para {}", best),
            "Adapte o mesmo tema ao formato nativo de cada plataforma".to_string(),
            "Reavalie plataformas com engajamento consistentemente baixo".to_string(),
        ]
    };
    build_factor(spec, subfactors, tips)
}

fn length_factor(views: &[JoinedContentView]) -> EngagementFactor {
    let spec = FactorSpec {
        name: "Comprimento do conteúdo",
        description: "Tamanho do texto do post em caracteres",
        base: 0.4,
        cap: 0.3,
        confidence: 0.7,
        spread: Spread::Variance,
    };
    let subfactors = bucket_means(views, |view| vec![length_bucket(&view.content.body).to_string()]);
    let tips = |best: &str| {
        vec![
            format!("Escreva na faixa '{}', a de melhor desempenho", best),
            "Corte introduções longas; entregue o valor no primeiro parágrafo".to_string(),
            "Teste uma versão curta e uma longa do mesmo tema".to_string(),
        ]
    };
    build_factor(spec, subfactors, tips)
}

fn visual_factor(views: &[JoinedContentView]) -> EngagementFactor {
    let spec = FactorSpec {
        name: "Elementos visuais",
        description: "Presença de imagem ou vídeo anexado ao post",
        base: 0.5,
        cap: 0.4,
        confidence: 0.75,
        spread: Spread::BestWorstDelta,
    };
    let subfactors = bucket_means(views, |view| {
        vec![if view.content.has_media() {
            "Com mídia".to_string()
        } else {
            "Sem mídia".to_string()
        }]
    });
    let tips = |best: &str| {
        vec![
            format!("Posts '{}' lideram o engajamento; siga esse padrão", best),
            "Padronize a identidade visual entre os posts".to_string(),
            "Teste miniaturas diferentes para o mesmo conteúdo".to_string(),
        ]
    };
    build_factor(spec, subfactors, tips)
}

fn cta_factor(views: &[JoinedContentView]) -> EngagementFactor {
    let spec = FactorSpec {
        name: "Chamada para ação",
        description: "Presença de CTA explícito ou pergunta no texto",
        base: 0.4,
        cap: 0.4,
        confidence: 0.7,
        spread: Spread::BestWorstDelta,
    };
    let subfactors = bucket_means(views, |view| vec![cta_bucket(&view.content.body).to_string()]);
    let tips = |best: &str| {
        vec![
            format!("Posts '{}' convertem melhor; repita a estrutura", best),
            "Use um único CTA por post".to_string(),
            "Troque CTAs genéricos por instruções específicas".to_string(),
        ]
    };
    build_factor(spec, subfactors, tips)
}

fn hashtag_factor(views: &[JoinedContentView]) -> EngagementFactor {
    let spec = FactorSpec {
        name: "Hashtags",
        description: "Quantidade de hashtags no texto do post",
        base: 0.3,
        cap: 0.2,
        confidence: 0.6,
        spread: Spread::Variance,
    };
    let subfactors = bucket_means(views, |view| {
        vec![hashtag_bucket(count_hashtags(&view.content.body)).to_string()]
    });
    let tips = |best: &str| {
        vec![
            format!("A faixa '{}' tem o melhor engajamento médio", best),
            "Prefira hashtags de nicho a hashtags genéricas".to_string(),
            "Revise hashtags que não trazem alcance novo".to_string(),
        ]
    };
    build_factor(spec, subfactors, tips)
}

fn build_factor(
    spec: FactorSpec,
    subfactors: BTreeMap<String, f64>,
    tips: impl Fn(&str) -> Vec<String>,
) -> EngagementFactor {
    let importance = importance(&spec, &subfactors);
    let best = best_bucket(&subfactors).unwrap_or_default();
    EngagementFactor {
        name: spec.name.to_string(),
        description: spec.description.to_string(),
        optimization_tips: tips(&best),
        subfactors,
        importance,
        confidence: spec.confidence,
    }
}

fn importance(spec: &FactorSpec, subfactors: &BTreeMap<String, f64>) -> f64 {
    let means: Vec<f64> = subfactors.values().copied().collect();
    let contribution = match spec.spread {
        Spread::Variance => {
            let mean = if means.is_empty() {
                0.0
            } else {
                means.iter().sum::<f64>() / means.len() as f64
            };
            if mean <= 0.0 {
                0.0
            } else {
                (metrics::variance(&means).sqrt() / mean).min(spec.cap)
            }
        }
        Spread::BestWorstDelta => {
            let best = means.iter().cloned().fold(f64::MIN, f64::max);
            let worst = means.iter().cloned().fold(f64::MAX, f64::min);
            if means.is_empty() || best <= 0.0 {
                0.0
            } else {
                ((best - worst) / best).min(spec.cap)
            }
        }
    };
    (spec.base + contribution).min(1.0)
}

fn bucket_means(
    views: &[JoinedContentView],
    buckets_for: impl Fn(&JoinedContentView) -> Vec<String>,
) -> BTreeMap<String, f64> {
    let mut rates: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for view in views {
        if !view.has_performance() {
            continue;
        }
        let score = view.engagement_score();
        for bucket in buckets_for(view) {
            rates.entry(bucket).or_default().push(score);
        }
    }

    rates
        .into_iter()
        .map(|(bucket, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (bucket, mean)
        })
        .collect()
}

fn best_bucket(subfactors: &BTreeMap<String, f64>) -> Option<String> {
    subfactors
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(bucket, _)| bucket.clone())
}

pub(crate) fn length_bucket(body: &str) -> &'static str {
    match body.chars().count() {
        0..=299 => "Curto (até 300)",
        300..=999 => "Médio (300 a 1000)",
        1000..=1999 => "Longo (1000 a 2000)",
        _ => "Muito longo (2000+)",
    }
}

pub(crate) fn cta_bucket(body: &str) -> &'static str {
    let lowered = body.to_lowercase();
    if tables::CTA_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        "Com CTA"
    } else if body.contains('?') {
        "Com pergunta"
    } else {
        "Sem CTA"
    }
}

fn hashtag_bucket(count: usize) -> &'static str {
    match count {
        0 => "Sem hashtags",
        1..=3 => "1 a 3 hashtags",
        4..=6 => "4 a 6 hashtags",
        _ => "7 ou mais hashtags",
    }
}

/// Counts tokens that start with `#` followed by word characters.
pub fn count_hashtags(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| {
            let mut chars = token.chars();
            chars.next() == Some('#')
                && chars
                    .next()
                    .map(|ch| ch.is_alphanumeric() || ch == '_')
                    .unwrap_or(false)
        })
        .count()
}
