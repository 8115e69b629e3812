use chrono::{Duration, TimeZone, Utc};

use creator_analytics::factors::{analyze, count_hashtags};
use creator_analytics::{ContentItem, JoinedContentView, PerformanceSnapshot, Platform};

fn view(
    id: &str,
    body: &str,
    platform: Platform,
    media: bool,
    hour: u32,
    likes: u64,
) -> JoinedContentView {
    let published = Utc.with_ymd_and_hms(2025, 3, 3, hour, 0, 0).unwrap();
    let item = ContentItem {
        id: id.to_string(),
        creator_id: "creator-1".to_string(),
        title: format!("Post {}", id),
        body: body.to_string(),
        platform,
        media_url: media.then(|| format!("https://cdn.example.com/{id}.jpg")),
        created_at: published,
        published_at: published,
    };
    let snapshot = PerformanceSnapshot {
        content_id: item.id.clone(),
        platform,
        recorded_at: published + Duration::hours(6),
        views: 1000,
        likes,
        comments: 0,
        shares: 0,
    };
    JoinedContentView::new(item, vec![snapshot])
}

#[test]
fn all_six_factors_are_reported() {
    let views = vec![
        view("a", "texto com #dicas", Platform::Instagram, true, 9, 80),
        view("b", "texto sem nada", Platform::YouTube, false, 20, 10),
    ];

    let factors = analyze(&views);
    let names: Vec<&str> = factors.iter().map(|factor| factor.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Horário de publicação",
            "Tipo de conteúdo",
            "Comprimento do conteúdo",
            "Elementos visuais",
            "Chamada para ação",
            "Hashtags",
        ]
    );
}

#[test]
fn importance_stays_between_base_and_base_plus_cap() {
    let views = vec![
        view("a", "", Platform::Instagram, true, 9, 90),
        view("b", "", Platform::YouTube, false, 20, 1),
        view("c", "", Platform::TikTok, false, 14, 30),
    ];

    let factors = analyze(&views);
    let visual = factors
        .iter()
        .find(|factor| factor.name == "Elementos visuais")
        .unwrap();
    // Base 0.5, delta cap 0.4.
    assert!(visual.importance >= 0.5);
    assert!(visual.importance <= 0.9 + 1e-9);
    assert_eq!(visual.confidence, 0.75);

    let hashtags = factors.iter().find(|factor| factor.name == "Hashtags").unwrap();
    assert!(hashtags.importance >= 0.3);
    assert!(hashtags.importance <= 0.5 + 1e-9);
    assert_eq!(hashtags.confidence, 0.6);
}

#[test]
fn timing_subfactors_cover_weekday_and_period() {
    let views = vec![
        view("a", "", Platform::Instagram, false, 9, 50),
        view("b", "", Platform::Instagram, false, 20, 10),
    ];

    let factors = analyze(&views);
    let timing = &factors[0];
    assert!(timing.subfactors.contains_key("Segunda-feira"));
    assert!(timing.subfactors.contains_key("Manhã"));
    assert!(timing.subfactors.contains_key("Noite"));
    assert!(!timing.optimization_tips.is_empty());
}

#[test]
fn best_bucket_parameterizes_the_first_tip() {
    let views = vec![
        view("a", "", Platform::Instagram, true, 9, 90),
        view("b", "", Platform::Instagram, false, 9, 5),
    ];

    let factors = analyze(&views);
    let visual = factors
        .iter()
        .find(|factor| factor.name == "Elementos visuais")
        .unwrap();
    assert!(visual.optimization_tips[0].contains("Com mídia"));
}

#[test]
fn hashtag_counting_requires_word_characters() {
    assert_eq!(count_hashtags("post sem tags"), 0);
    assert_eq!(count_hashtags("dicas #criadores #conteudo"), 2);
    assert_eq!(count_hashtags("## # #_ok #1dica"), 2);
    assert_eq!(count_hashtags(""), 0);
}
