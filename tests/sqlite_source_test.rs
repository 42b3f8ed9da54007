use campus_hub::{
    domain::{Announcement, Collection},
    error::AppError,
    source::{fetch_records, PageOptions, RecordSource, SourceFilter, SqliteRecordSource},
};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;

async fn setup_store() -> anyhow::Result<SqliteRecordSource> {
    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    let store = SqliteRecordSource::new(pool);
    store.migrate().await?;
    Ok(store)
}

async fn insert_announcements(store: &SqliteRecordSource, n: usize) -> anyhow::Result<()> {
    for i in 0..n {
        store
            .insert(
                Collection::Announcements,
                &json!({
                    "_id": format!("a{}", i),
                    "title": format!("Notice {}", i),
                    "isUrgent": i % 3 == 0,
                }),
            )
            .await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_pages_follow_insertion_order() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 5).await?;

    let filter = SourceFilter::new();
    let first = store
        .fetch_page(Collection::Announcements, &filter, PageOptions { limit: 2, skip: 0 })
        .await?;
    assert_eq!(first.items.len(), 2);
    assert!(first.has_next);
    assert_eq!(first.next_skip, Some(2));
    assert_eq!(first.items[0]["_id"], "a0");

    let last = store
        .fetch_page(Collection::Announcements, &filter, PageOptions { limit: 2, skip: 4 })
        .await?;
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_next);
    assert_eq!(last.next_skip, None);
    assert_eq!(last.items[0]["_id"], "a4");

    Ok(())
}

#[tokio::test]
async fn test_exact_page_boundary_has_no_next() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 4).await?;

    let page = store
        .fetch_page(
            Collection::Announcements,
            &SourceFilter::new(),
            PageOptions { limit: 4, skip: 0 },
        )
        .await?;
    assert_eq!(page.items.len(), 4);
    assert!(!page.has_next);

    Ok(())
}

#[tokio::test]
async fn test_collections_are_isolated() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 3).await?;
    store
        .insert(Collection::Clubs, &json!({ "_id": "c1", "clubName": "Chess Club" }))
        .await?;

    assert_eq!(store.count(Collection::Announcements).await?, 3);
    assert_eq!(store.count(Collection::Clubs).await?, 1);
    assert_eq!(store.count(Collection::Events).await?, 0);

    store.clear(Collection::Announcements).await?;
    assert_eq!(store.count(Collection::Announcements).await?, 0);
    assert_eq!(store.count(Collection::Clubs).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_field_filter() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 7).await?;

    let urgent = SourceFilter::new().with("isUrgent", true);
    let page = store
        .fetch_page(Collection::Announcements, &urgent, PageOptions { limit: 10, skip: 0 })
        .await?;
    let ids: Vec<&str> = page.items.iter().filter_map(|r| r["_id"].as_str()).collect();
    assert_eq!(ids, vec!["a0", "a3", "a6"]);

    let by_title = SourceFilter::new().with("title", "Notice 4");
    let page = store
        .fetch_page(Collection::Announcements, &by_title, PageOptions { limit: 10, skip: 0 })
        .await?;
    assert_eq!(page.items.len(), 1);

    let invalid = SourceFilter::new().with("title') OR 1=1 --", "x");
    assert!(store
        .fetch_page(Collection::Announcements, &invalid, PageOptions { limit: 10, skip: 0 })
        .await
        .is_err());

    Ok(())
}

#[tokio::test]
async fn test_upsert_keeps_position() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 3).await?;

    store
        .insert(
            Collection::Announcements,
            &json!({ "_id": "a0", "title": "Revised notice" }),
        )
        .await?;
    assert_eq!(store.count(Collection::Announcements).await?, 3);

    let page = store
        .fetch_page(
            Collection::Announcements,
            &SourceFilter::new(),
            PageOptions { limit: 10, skip: 0 },
        )
        .await?;
    assert_eq!(page.items[0]["title"], "Revised notice");

    assert!(store
        .insert(Collection::Announcements, &json!({ "title": "No id" }))
        .await
        .is_err());

    Ok(())
}

#[tokio::test]
async fn test_fetch_by_id() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 2).await?;

    let found = store.fetch_by_id(Collection::Announcements, "a1").await?;
    assert_eq!(found.map(|r| r["title"].clone()), Some(json!("Notice 1")));

    assert!(store.fetch_by_id(Collection::Announcements, "missing").await?.is_none());
    assert!(store.fetch_by_id(Collection::Clubs, "a1").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_typed_fetch_rejects_invalid_records() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 2).await?;

    let page = fetch_records::<Announcement>(
        &store,
        &SourceFilter::new(),
        PageOptions { limit: 10, skip: 0 },
    )
    .await?;
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].is_urgent);

    // A record without a title fails the whole page
    store
        .insert(Collection::Announcements, &json!({ "_id": "broken" }))
        .await?;
    assert!(fetch_records::<Announcement>(
        &store,
        &SourceFilter::new(),
        PageOptions { limit: 10, skip: 0 },
    )
    .await
    .is_err());

    Ok(())
}

#[tokio::test]
async fn test_skip_beyond_sqlite_range_is_rejected() -> anyhow::Result<()> {
    let store = setup_store().await?;
    insert_announcements(&store, 3).await?;
    let filter = SourceFilter::new();

    for skip in [i64::MAX as u64 + 1, u64::MAX] {
        let result = store
            .fetch_page(Collection::Announcements, &filter, PageOptions { limit: 2, skip })
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    let last = store
        .fetch_page(
            Collection::Announcements,
            &filter,
            PageOptions { limit: 2, skip: i64::MAX as u64 },
        )
        .await?;
    assert!(last.items.is_empty());
    assert!(!last.has_next);
    assert_eq!(last.next_skip, None);

    Ok(())
}
