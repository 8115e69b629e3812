use chrono::{TimeZone, Utc};

use creator_analytics::sample::generate_dataset;
use creator_analytics::store::{save_dataset, ContentStore, Dataset, JsonDataStore};
use creator_analytics::{ContentItem, Creator, Platform};

fn item(id: &str, creator_id: &str, day: u32) -> ContentItem {
    let published = Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap();
    ContentItem {
        id: id.to_string(),
        creator_id: creator_id.to_string(),
        title: format!("Post {}", id),
        body: String::new(),
        platform: Platform::Instagram,
        media_url: None,
        created_at: published,
        published_at: published,
    }
}

#[tokio::test]
async fn missing_file_loads_as_an_empty_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let store = JsonDataStore::load(&path).await.unwrap();
    assert!(store.creator_by_id("anyone").await.unwrap().is_none());
}

#[tokio::test]
async fn saved_dataset_round_trips_through_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("analytics.json");

    let dataset = Dataset {
        creators: vec![Creator {
            id: "creator-1".to_string(),
            name: "Criadora".to_string(),
            followers: 500,
        }],
        content: vec![item("a", "creator-1", 3), item("b", "creator-2", 4)],
        performance: Vec::new(),
    };
    save_dataset(&path, &dataset).await.unwrap();

    let store = JsonDataStore::load(&path).await.unwrap();
    let creator = store.creator_by_id("creator-1").await.unwrap().unwrap();
    assert_eq!(creator.followers, 500);

    let content = store.content_by_creator("creator-1").await.unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].id, "a");
}

#[tokio::test]
async fn date_filter_is_inclusive_of_both_ends() {
    let dataset = Dataset {
        creators: Vec::new(),
        content: vec![
            item("early", "creator-1", 1),
            item("inside", "creator-1", 10),
            item("late", "creator-1", 25),
        ],
        performance: Vec::new(),
    };
    let store = JsonDataStore::from_dataset(dataset);

    let start = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    let content = store
        .content_by_creator_between("creator-1", start, end)
        .await
        .unwrap();

    assert_eq!(content.len(), 1);
    assert_eq!(content[0].id, "inside");
}

#[test]
fn sample_dataset_is_deterministic_for_a_seed() {
    let first = generate_dataset("creator-demo", 12, 7);
    let second = generate_dataset("creator-demo", 12, 7);

    assert_eq!(first.content.len(), 12);
    assert_eq!(first.creators.len(), 1);
    assert!(!first.performance.is_empty());

    let first_ids: Vec<&str> = first.content.iter().map(|item| item.id.as_str()).collect();
    let second_ids: Vec<&str> = second.content.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);

    // Every snapshot belongs to a generated item.
    for snapshot in &first.performance {
        assert!(first_ids.contains(&snapshot.content_id.as_str()));
    }
}
