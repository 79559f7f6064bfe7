use smartcap_core::{
    lead::NewLead,
    page_view::NewPageView,
    stats::RECENT_LIMIT,
    store::LandingStore,
};
use smartcap_duckdb::duckdb::params;
use smartcap_duckdb::DuckDbBackend;

fn lead(name: &str, email: &str, variant: Option<&str>) -> NewLead {
    NewLead {
        name: name.to_string(),
        email: email.to_string(),
        ab_variant: variant.map(str::to_string),
    }
}

fn unique_db_path() -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("unix time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("smartcap-store-{nanos}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir.join("waitlist.db")
}

#[tokio::test]
async fn test_insert_lead_ids_strictly_increase() {
    let db = DuckDbBackend::open_in_memory().expect("db");

    let mut previous = 0;
    for i in 0..5 {
        let id = db
            .insert_lead(&lead(&format!("Lead {i}"), "same@x.com", None))
            .await
            .expect("insert");
        assert!(id > previous, "id {id} must exceed {previous}");
        previous = id;
    }
    assert_eq!(db.count_leads().await.expect("count"), 5);
}

#[tokio::test]
async fn test_inserted_lead_is_readable() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    let id = db
        .insert_lead(&lead("Alice", "a@x.com", Some("Control")))
        .await
        .expect("insert");

    let recent = db.recent_leads(RECENT_LIMIT).await.expect("recent");
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, id);
    assert_eq!(recent[0].name, "Alice");
    assert_eq!(recent[0].email, "a@x.com");
    assert_eq!(recent[0].ab_variant.as_deref(), Some("Control"));
    assert!(!recent[0].created_at.is_empty());
}

#[tokio::test]
async fn test_duplicate_emails_are_permitted() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    db.insert_lead(&lead("Alice", "a@x.com", None))
        .await
        .expect("first");
    db.insert_lead(&lead("Alice again", "a@x.com", None))
        .await
        .expect("second");
    assert_eq!(db.count_leads().await.expect("count"), 2);
}

#[tokio::test]
async fn test_variant_counts_exclude_null_variant() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    db.insert_lead(&lead("Alice", "a@x.com", Some("Control")))
        .await
        .expect("insert");
    db.insert_lead(&lead("Bob", "b@x.com", Some("Angle 1")))
        .await
        .expect("insert");
    db.insert_lead(&lead("Carol", "c@x.com", None))
        .await
        .expect("insert");
    db.insert_lead(&lead("Dave", "d@x.com", Some("Control")))
        .await
        .expect("insert");

    let counts = db.lead_variant_counts().await.expect("variants");
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get("Control"), Some(&2));
    assert_eq!(counts.get("Angle 1"), Some(&1));
    assert_eq!(counts.values().sum::<i64>(), 3);
}

#[tokio::test]
async fn test_recent_leads_newest_first() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    for (name, email, variant) in [
        ("Alice", "a@x.com", Some("Control")),
        ("Bob", "b@x.com", Some("Angle 1")),
        ("Carol", "c@x.com", None),
    ] {
        db.insert_lead(&lead(name, email, variant))
            .await
            .expect("insert");
    }

    let names: Vec<String> = db
        .recent_leads(RECENT_LIMIT)
        .await
        .expect("recent")
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(names, vec!["Carol", "Bob", "Alice"]);

    db.insert_lead(&lead("Dave", "d@x.com", None))
        .await
        .expect("insert");
    let recent = db.recent_leads(RECENT_LIMIT).await.expect("recent");
    assert_eq!(recent[0].name, "Dave");
}

#[tokio::test]
async fn test_recent_leads_same_timestamp_breaks_ties_by_id() {
    let db = DuckDbBackend::open_in_memory().expect("db");

    {
        let conn = db.conn_for_test().await;
        for (name, email) in [("First", "first@x.com"), ("Second", "second@x.com")] {
            conn.execute(
                "INSERT INTO leads (name, email, ab_variant, created_at) \
                 VALUES (?1, ?2, NULL, TIMESTAMP '2026-01-01 09:00:00')",
                params![name, email],
            )
            .expect("raw insert");
        }
    }

    let recent = db.recent_leads(RECENT_LIMIT).await.expect("recent");
    let names: Vec<&str> = recent.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Second", "First"]);
    assert_eq!(recent[0].created_at, recent[1].created_at);
    assert!(recent[0].created_at.starts_with("2026-01-01 09:00:00"));
}

#[tokio::test]
async fn test_recent_leads_respects_limit() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    for i in 0..(RECENT_LIMIT + 5) {
        db.insert_lead(&lead(&format!("Lead {i}"), "x@x.com", None))
            .await
            .expect("insert");
    }

    let recent = db.recent_leads(RECENT_LIMIT).await.expect("recent");
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert_eq!(recent[0].name, format!("Lead {}", RECENT_LIMIT + 4));
    assert!(recent.windows(2).all(|w| w[0].id > w[1].id));
}

#[tokio::test]
async fn test_empty_tables_read_as_zero_and_empty() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    assert_eq!(db.count_leads().await.expect("count"), 0);
    assert_eq!(db.count_page_views().await.expect("count"), 0);
    assert!(db.lead_variant_counts().await.expect("variants").is_empty());
    assert!(db.recent_leads(RECENT_LIMIT).await.expect("leads").is_empty());
    assert!(db
        .recent_page_views(RECENT_LIMIT)
        .await
        .expect("views")
        .is_empty());
}

#[tokio::test]
async fn test_page_view_round_trip_with_nulls() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    let first = db
        .insert_page_view(&NewPageView {
            ip_address: Some("1.2.3.4".to_string()),
            ..NewPageView::default()
        })
        .await
        .expect("insert");
    let second = db
        .insert_page_view(&NewPageView {
            ip_address: None,
            user_agent: "Mozilla/5.0".to_string(),
            referrer: Some("https://news.ycombinator.com/".to_string()),
            utm_source: Some("hn".to_string()),
            utm_medium: Some("social".to_string()),
            utm_campaign: Some("launch".to_string()),
            page_url: Some("https://smartcap.example/?utm_source=hn".to_string()),
        })
        .await
        .expect("insert");
    assert!(second > first);
    assert_eq!(db.count_page_views().await.expect("count"), 2);

    let recent = db.recent_page_views(RECENT_LIMIT).await.expect("recent");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, second);
    assert_eq!(recent[0].utm_campaign.as_deref(), Some("launch"));
    assert_eq!(recent[0].ip_address, None);

    let bare = &recent[1];
    assert_eq!(bare.ip_address.as_deref(), Some("1.2.3.4"));
    assert_eq!(bare.user_agent.as_deref(), Some(""));
    assert_eq!(bare.referrer, None);
    assert_eq!(bare.utm_source, None);
    assert_eq!(bare.page_url, None);
}

#[tokio::test]
async fn test_tables_are_independent() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    let lead_id = db
        .insert_lead(&lead("Alice", "a@x.com", None))
        .await
        .expect("lead");
    let view_id = db
        .insert_page_view(&NewPageView::default())
        .await
        .expect("view");
    assert_eq!(lead_id, 1);
    assert_eq!(view_id, 1);
}

#[tokio::test]
async fn test_rows_survive_reopen() {
    let path = unique_db_path();
    let path_str = path.to_string_lossy().to_string();
    {
        let db = DuckDbBackend::open(&path_str, "256MB").expect("open");
        db.insert_lead(&lead("Alice", "a@x.com", Some("Control")))
            .await
            .expect("insert");
        db.checkpoint().await.expect("checkpoint");
    }

    let db = DuckDbBackend::open(&path_str, "256MB").expect("reopen");
    assert_eq!(db.count_leads().await.expect("count"), 1);
    let next = db
        .insert_lead(&lead("Bob", "b@x.com", None))
        .await
        .expect("insert");
    assert_eq!(next, 2);
}

#[tokio::test]
async fn test_store_usable_as_trait_object() {
    let db = std::sync::Arc::new(DuckDbBackend::open_in_memory().expect("db"));
    let store: std::sync::Arc<dyn LandingStore> = db.clone();
    store.ping().await.expect("ping");
    let id = store
        .insert_lead(&lead("Alice", "a@x.com", None))
        .await
        .expect("insert");
    assert_eq!(store.count_leads().await.expect("count"), 1);
    assert_eq!(db.recent_leads(1).await.expect("recent")[0].id, id);
}
