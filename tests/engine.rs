use chrono::{Duration, TimeZone, Utc};

use creator_analytics::config::EngineConfig;
use creator_analytics::predict::PredictionRequest;
use creator_analytics::store::{Dataset, JsonDataStore};
use creator_analytics::{
    AnalyticsEngine, AnalyticsError, ContentItem, Creator, PerformanceSnapshot, Platform,
};

fn creator() -> Creator {
    Creator {
        id: "creator-1".to_string(),
        name: "Criadora Demo".to_string(),
        followers: 12_000,
    }
}

fn item(id: &str, title: &str, platform: Platform, day: u32) -> ContentItem {
    let published = Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap();
    ContentItem {
        id: id.to_string(),
        creator_id: "creator-1".to_string(),
        title: title.to_string(),
        body: "conteúdo de teste".to_string(),
        platform,
        media_url: None,
        created_at: published,
        published_at: published,
    }
}

fn snapshot(content_id: &str, platform: Platform, day: u32, hour: i64, views: u64, likes: u64, shares: u64) -> PerformanceSnapshot {
    PerformanceSnapshot {
        content_id: content_id.to_string(),
        platform,
        recorded_at: Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap() + Duration::hours(hour),
        views,
        likes,
        comments: 0,
        shares,
    }
}

fn engine_with(dataset: Dataset) -> AnalyticsEngine<JsonDataStore> {
    AnalyticsEngine::new(JsonDataStore::from_dataset(dataset), EngineConfig::default())
}

#[tokio::test]
async fn unknown_creator_is_a_typed_not_found() {
    let engine = engine_with(Dataset::default());
    let result = engine.high_performance_patterns("ghost", None).await;
    assert!(matches!(result, Err(AnalyticsError::CreatorNotFound(_))));
}

#[tokio::test]
async fn unknown_content_is_a_typed_not_found() {
    let engine = engine_with(Dataset::default());
    let result = engine.content_insights("missing-post").await;
    assert!(matches!(result, Err(AnalyticsError::ContentNotFound(_))));
}

#[tokio::test]
async fn content_without_snapshots_is_insufficient_data_not_a_zero_score() {
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![item("a", "Post sem métricas", Platform::Instagram, 3)],
        performance: Vec::new(),
    };
    let engine = engine_with(dataset);

    let patterns = engine.high_performance_patterns("creator-1", None).await;
    assert!(matches!(patterns, Err(AnalyticsError::InsufficientData(_))));

    let insights = engine.content_insights("a").await;
    assert!(matches!(insights, Err(AnalyticsError::InsufficientData(_))));
}

#[tokio::test]
async fn zero_top_n_is_rejected() {
    let engine = engine_with(Dataset::default());
    let result = engine.high_performance_patterns("creator-1", Some(0)).await;
    assert!(matches!(result, Err(AnalyticsError::InvalidArgument(_))));
}

#[tokio::test]
async fn inverted_date_range_is_rejected() {
    let engine = engine_with(Dataset {
        creators: vec![creator()],
        content: Vec::new(),
        performance: Vec::new(),
    });
    let start = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

    let result = engine.compare_content_types("creator-1", start, end).await;
    assert!(matches!(result, Err(AnalyticsError::InvalidArgument(_))));
}

#[tokio::test]
async fn content_insights_reports_growth_and_viral_tier() {
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![item("a", "Lançamento: bastidores", Platform::Instagram, 3)],
        performance: vec![
            snapshot("a", Platform::Instagram, 3, 0, 100, 0, 1),
            snapshot("a", Platform::Instagram, 3, 5, 400, 0, 5),
            snapshot("a", Platform::Instagram, 3, 10, 1000, 0, 20),
        ],
    };
    let engine = engine_with(dataset);

    let insights = engine.content_insights("a").await.unwrap();
    assert!((insights.growth_rate - 90.0).abs() < 1e-9);
    assert!(insights.viral.score > 6.0);
    assert_eq!(insights.views, 1000);
    assert_eq!(insights.shares, 20);
}

#[tokio::test]
async fn comparison_names_the_stronger_group_and_flags_the_ratio() {
    // Instagram engages at 10%, YouTube at 3%.
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![
            item("a", "Post Instagram", Platform::Instagram, 3),
            item("b", "Post YouTube", Platform::YouTube, 4),
        ],
        performance: vec![
            snapshot("a", Platform::Instagram, 3, 6, 1000, 100, 0),
            snapshot("b", Platform::YouTube, 4, 6, 1000, 30, 0),
        ],
    };
    let engine = engine_with(dataset);

    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let report = engine
        .compare_content_types("creator-1", start, end)
        .await
        .unwrap();

    assert_eq!(report.groups[0].content_type, "Instagram");
    assert!((report.groups[0].metrics.engagement_rate - 0.10).abs() < 1e-9);
    assert!(report
        .cross_insights
        .iter()
        .any(|insight| insight.starts_with("Instagram é o tipo de conteúdo")));
    assert!(report
        .cross_insights
        .iter()
        .any(|insight| insight.contains("1.5x")));
    assert!(report
        .strategies
        .iter()
        .any(|strategy| strategy.contains("Priorize Instagram")));
}

#[tokio::test]
async fn monthly_trend_buckets_by_calendar_month() {
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![
            item("a", "Post de março", Platform::Instagram, 3),
            item("b", "Outro de março", Platform::Instagram, 20),
        ],
        performance: vec![
            snapshot("a", Platform::Instagram, 3, 6, 1000, 50, 0),
            snapshot("b", Platform::Instagram, 20, 6, 3000, 90, 0),
        ],
    };
    let engine = engine_with(dataset);

    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let report = engine
        .compare_content_types("creator-1", start, end)
        .await
        .unwrap();

    assert_eq!(report.monthly_trend.len(), 1);
    assert_eq!(report.monthly_trend[0].month, "2025-03");
    assert_eq!(report.monthly_trend[0].posts, 2);
    assert!((report.monthly_trend[0].avg_views - 2000.0).abs() < 1e-9);
}

#[tokio::test]
async fn audience_insights_marks_simulated_sections() {
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![item("a", "Post", Platform::Instagram, 3)],
        performance: vec![snapshot("a", Platform::Instagram, 3, 6, 1000, 80, 0)],
    };
    let engine = engine_with(dataset);

    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let insights = engine
        .audience_insights("creator-1", start, end)
        .await
        .unwrap();

    assert_eq!(insights.posts, 1);
    assert_eq!(insights.total_views, 1000);
    assert!(insights.demographics.simulated);
    assert!(insights.sentiment.simulated);
    assert_eq!(insights.best_weekday.as_deref(), Some("Segunda-feira"));
}

#[tokio::test]
async fn prediction_builds_on_platform_history() {
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![item("a", "Referência", Platform::Instagram, 3)],
        performance: vec![snapshot("a", Platform::Instagram, 3, 6, 2000, 100, 10)],
    };
    let engine = engine_with(dataset);

    let request = PredictionRequest {
        creator_id: "creator-1".to_string(),
        title: "Novo post com tamanho ideal de título".to_string(),
        body: String::new(),
        platform: Platform::Instagram,
        has_media: false,
        publish_hour: None,
    };
    let report = engine.predict_performance(&request).await.unwrap();

    // Baseline 2000 views with the title-length rule applied.
    assert!((report.estimated_views - 2200.0).abs() < 1e-9);
    assert!(report.heuristic);
    assert_eq!(report.confidence, 0.3);
    assert!(report
        .applied_rules
        .iter()
        .any(|rule| rule.contains("Título")));
}

#[tokio::test]
async fn recommendations_include_trending_topics() {
    let dataset = Dataset {
        creators: vec![creator()],
        content: vec![
            item("a", "Culinária: massas", Platform::Instagram, 3),
            item("b", "Culinária: sobremesas", Platform::Instagram, 4),
        ],
        performance: vec![
            snapshot("a", Platform::Instagram, 3, 6, 1000, 80, 5),
            snapshot("b", Platform::Instagram, 4, 6, 1200, 70, 2),
        ],
    };
    let engine = engine_with(dataset);

    let report = engine.content_recommendations("creator-1").await.unwrap();
    assert!(report.topics.iter().any(|topic| topic.topic == "Culinária"));
    assert_eq!(report.topics.iter().filter(|topic| topic.trending).count(), 2);
    assert!(!report.formats.is_empty());
    assert!(!report.monetization.is_empty());
}
