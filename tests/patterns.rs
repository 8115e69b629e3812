use chrono::{Duration, TimeZone, Utc};

use creator_analytics::patterns::topic::topic_label;
use creator_analytics::patterns::{confidence_for_sample, extract_patterns};
use creator_analytics::{ContentItem, JoinedContentView, PerformanceSnapshot, Platform};

fn item(id: &str, title: &str, body: &str, platform: Platform, day_offset: i64) -> ContentItem {
    let published = Utc.with_ymd_and_hms(2025, 3, 3, 10, 0, 0).unwrap() + Duration::days(day_offset);
    ContentItem {
        id: id.to_string(),
        creator_id: "creator-1".to_string(),
        title: title.to_string(),
        body: body.to_string(),
        platform,
        media_url: None,
        created_at: published,
        published_at: published,
    }
}

fn view(item: ContentItem, views: u64, likes: u64) -> JoinedContentView {
    let snapshot = PerformanceSnapshot {
        content_id: item.id.clone(),
        platform: item.platform,
        recorded_at: item.published_at + Duration::hours(6),
        views,
        likes,
        comments: 0,
        shares: 0,
    };
    JoinedContentView::new(item, vec![snapshot])
}

#[test]
fn topic_label_splits_on_the_first_separator() {
    assert_eq!(topic_label("How to Cook: Pasta"), "How to Cook");
    assert_eq!(topic_label("Finanças - guia completo"), "Finanças");
    assert_eq!(topic_label("Rotina | manhãs produtivas"), "Rotina");
    assert_eq!(topic_label("Bastidores — gravação"), "Bastidores");
}

#[test]
fn topic_label_truncates_titles_without_separator() {
    let title = "uma frase longa sem separador nenhum aqui mesmo"; // 47 chars
    let label = topic_label(title);
    assert_eq!(label, title.chars().take(30).collect::<String>().trim());
}

#[test]
fn confidence_steps_exactly_at_the_thresholds() {
    assert_eq!(confidence_for_sample(0), 0.3);
    assert_eq!(confidence_for_sample(4), 0.3);
    assert_eq!(confidence_for_sample(5), 0.5);
    assert_eq!(confidence_for_sample(9), 0.5);
    assert_eq!(confidence_for_sample(10), 0.7);
    assert_eq!(confidence_for_sample(19), 0.7);
    assert_eq!(confidence_for_sample(20), 0.85);
    assert_eq!(confidence_for_sample(49), 0.85);
    assert_eq!(confidence_for_sample(50), 0.95);
}

#[test]
fn topics_require_two_items_and_rank_by_engagement() {
    let views = vec![
        view(item("a", "Culinária: massas", "", Platform::Instagram, 0), 100, 30),
        view(item("b", "Culinária: sobremesas", "", Platform::Instagram, 1), 100, 20),
        view(item("c", "Finanças: reserva", "", Platform::Instagram, 2), 100, 5),
        view(item("d", "Finanças: dívidas", "", Platform::Instagram, 3), 100, 3),
        view(item("e", "Tema único sem par", "", Platform::Instagram, 4), 100, 90),
    ];

    let report = extract_patterns(&views, 20);
    assert_eq!(report.topics.len(), 2);
    assert_eq!(report.topics[0].topic, "Culinária");
    assert_eq!(report.topics[0].items, 2);
    assert!(report.topics[0].mean_engagement > report.topics[1].mean_engagement);
}

#[test]
fn styles_need_at_least_two_matching_items() {
    let cta_body = "Não esqueça: clique no link e inscreva-se no canal para mais.";
    let views = vec![
        view(item("a", "Post A", cta_body, Platform::YouTube, 0), 100, 10),
        view(item("b", "Post B", cta_body, Platform::YouTube, 1), 100, 8),
        view(
            item("c", "Post C", "uma história de quando eu comecei", Platform::YouTube, 2),
            100,
            5,
        ),
    ];

    let report = extract_patterns(&views, 20);
    let labels: Vec<&str> = report.styles.iter().map(|style| style.label.as_str()).collect();
    assert!(labels.contains(&"Chamada para ação"));
    // Storytelling matched only once, so it must not be reported.
    assert!(!labels.contains(&"Narrativa pessoal"));
    // All three bodies are short, so the concise style qualifies.
    assert!(labels.contains(&"Conteúdo conciso"));
}

#[test]
fn formats_group_by_platform_and_carry_fixed_practices() {
    let views = vec![
        view(item("a", "A", "", Platform::Instagram, 0), 100, 30),
        view(item("b", "B", "", Platform::Instagram, 1), 100, 20),
        view(item("c", "C", "", Platform::YouTube, 2), 100, 5),
    ];

    let report = extract_patterns(&views, 20);
    assert_eq!(report.formats[0].platform, Platform::Instagram);
    assert_eq!(report.formats[0].items, 2);
    assert!(!report.formats[0].best_practices.is_empty());
    // The universal tip closes the derived best-practice list.
    assert!(report
        .best_practices
        .iter()
        .any(|practice| practice.contains("consistência") || practice.contains("Publique")));
}

#[test]
fn timing_ranks_the_strongest_publication_slot_first() {
    // Monday posts engage far better than the Thursday one.
    let views = vec![
        view(item("a", "A", "", Platform::Instagram, 0), 100, 50),
        view(item("b", "B", "", Platform::Instagram, 7), 100, 40),
        view(item("c", "C", "", Platform::Instagram, 3), 100, 2),
    ];

    let report = extract_patterns(&views, 20);
    assert_eq!(report.timing.best_days[0].label, "Segunda-feira");
    assert_eq!(report.timing.confidence, 0.3);
    assert!(!report.timing.platform_slots.is_empty());
}

#[test]
fn top_n_limits_the_working_set() {
    let views: Vec<JoinedContentView> = (0..30)
        .map(|index| {
            view(
                item(
                    &format!("post-{index}"),
                    "Tema: variação",
                    "",
                    Platform::Instagram,
                    index,
                ),
                100,
                index as u64,
            )
        })
        .collect();

    let narrow = extract_patterns(&views, 5);
    let wide = extract_patterns(&views, 30);
    assert!(narrow.topics[0].items <= 5);
    assert_eq!(wide.topics[0].items, 30);
}
