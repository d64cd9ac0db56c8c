//! MongoRepository against a real MongoDB container.
//!
//! Run with `cargo test -p crud -- --ignored` (needs docker).

use chrono::{DateTime, Utc};
use crud::{
    CrudError, CrudService, Entity, FindSpec, ListQuery, MongoRepository, Repository, Resource,
    text_search,
};
use mongodb::{
    IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use test_utils::{
    TestDataBuilder, TestMongo,
    assertions::{assert_object_id, assert_some},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Note {
    #[serde(rename = "_id", with = "crud::hex_id")]
    id: String,
    code: String,
    body: String,
    #[serde(with = "crud::datetime")]
    created_at: DateTime<Utc>,
}

impl Note {
    fn new(code: &str, body: &str) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            code: code.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    fn at(code: &str, created_at: &str) -> Self {
        Self {
            created_at: crud::datetime::parse(created_at).unwrap(),
            ..Self::new(code, "")
        }
    }
}

impl Entity for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Note {
    const NAME: &'static str = "Note";
    const DEFAULT_SORT: &'static str = "createdAt";
    const CONFLICT_MESSAGE: &'static str = "Note with this code already exists";
    type Update = ();
    type Filter = Option<String>;

    fn apply_update(&mut self, _: ()) {}

    fn filter_document(search: &Option<String>) -> Document {
        match search {
            Some(search) => text_search(search, &["body"]),
            None => Document::new(),
        }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("code", self.code.clone()))
    }
}

async fn repository(mongo: &TestMongo, test: &str) -> MongoRepository<Note> {
    let builder = TestDataBuilder::from_test_name(test);
    let repo = MongoRepository::<Note>::new(&mongo.database(&builder.name("db", "notes")));
    repo.create_indexes(vec![
        IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
    ])
    .await
    .unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_insert_then_find_by_id() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "test_insert_then_find_by_id").await;

    let note = Note::new("N-1", "hello");
    repo.insert(note.clone()).await.unwrap();

    assert_object_id(&note.id, "generated id");
    let id = ObjectId::parse_str(&note.id).unwrap();
    let found = assert_some(repo.find_by_id(id).await.unwrap(), "inserted note");
    assert_eq!(found.code, "N-1");
    assert_eq!(found.body, "hello");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_unique_index_maps_to_conflict() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "test_unique_index_maps_to_conflict").await;

    repo.insert(Note::new("N-1", "a")).await.unwrap();
    let err = repo.insert(Note::new("N-1", "b")).await.unwrap_err();
    assert!(matches!(err, CrudError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_count_ignores_paging() {
    let mongo = TestMongo::new().await;
    let service = CrudService::new(repository(&mongo, "test_count_ignores_paging").await);

    for i in 0..15 {
        service
            .insert(Note::new(&format!("N-{i}"), "Match me"))
            .await
            .unwrap();
    }
    service.insert(Note::new("other", "nothing")).await.unwrap();

    let query = ListQuery {
        page: 1,
        limit: 10,
        sort: None,
    };
    let page = service.list(&Some("match".into()), &query).await.unwrap();
    assert_eq!(page.results.len(), 5);
    assert_eq!(page.count, 15);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_latest_by_sorts_descending() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "test_latest_by_sorts_descending").await;

    for code in ["SO-2026-001", "SO-2026-003", "SO-2026-002"] {
        repo.insert(Note::new(code, "")).await.unwrap();
    }

    let latest = repo
        .find_many(Document::new(), FindSpec::latest_by("code"))
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].code, "SO-2026-003");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_replace_and_delete_missing() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "test_replace_and_delete_missing").await;

    let ghost = Note::new("ghost", "");
    assert_eq!(repo.replace(ghost.clone()).await.unwrap(), None);

    let id = ObjectId::parse_str(&ghost.id).unwrap();
    assert!(!repo.delete(id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_ids_and_dates_are_stored_natively() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "test_ids_and_dates_are_stored_natively").await;
    let builder = TestDataBuilder::from_test_name("test_ids_and_dates_are_stored_natively");

    let note = Note {
        id: builder.object_id().to_hex(),
        ..Note::at("N-1", "2025-12-03")
    };
    repo.insert(note.clone()).await.unwrap();

    let raw = assert_some(
        repo.collection()
            .clone_with_type::<Document>()
            .find_one(doc! { "_id": builder.object_id() })
            .await
            .unwrap(),
        "stored document",
    );
    assert_eq!(raw.get_object_id("_id").unwrap(), builder.object_id());
    assert_eq!(
        raw.get_datetime("createdAt").unwrap().timestamp_millis(),
        note.created_at.timestamp_millis()
    );

    let found = assert_some(repo.find_by_id(builder.object_id()).await.unwrap(), "note");
    assert_eq!(found, note);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_dates_sort_chronologically_across_precisions() {
    let mongo = TestMongo::new().await;
    let service = CrudService::new(
        repository(&mongo, "test_dates_sort_chronologically_across_precisions").await,
    );

    for (code, created_at) in [
        ("whole-second", "2026-01-01T00:00:00Z"),
        ("half-second", "2026-01-01T00:00:00.500Z"),
        ("previous-day", "2025-12-31T23:59:59.900Z"),
        ("offset", "2026-01-01T01:00:00.250+02:00"),
    ] {
        service.insert(Note::at(code, created_at)).await.unwrap();
    }

    let page = service.list(&None, &ListQuery::default()).await.unwrap();
    let codes: Vec<_> = page.results.iter().map(|note| note.code.as_str()).collect();
    assert_eq!(codes, ["half-second", "whole-second", "previous-day", "offset"]);

    let since = service
        .repository()
        .count(doc! { "createdAt": { "$gte": mongodb::bson::DateTime::from_millis(
            crud::datetime::parse("2026-01-01").unwrap().timestamp_millis()
        ) } })
        .await
        .unwrap();
    assert_eq!(since, 2);
}
