use chatpush_store_adapter_redb::StoreAdapterRedb;
use chatpush_types::error::Error;
use chatpush_types::store_adapter::{QueryFilter, QueryOptions, SortField, StoreAdapter};
use serde_json::json;
use tempfile::TempDir;

/// Helper to create a temporary adapter for testing
async fn create_test_adapter() -> (StoreAdapterRedb, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = StoreAdapterRedb::new(temp_dir.path().join("store").join("docs.redb"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

#[tokio::test]
async fn test_create_and_get() {
	let (adapter, _temp) = create_test_adapter().await;

	let id = adapter
		.create("rooms/r1/messages", json!({"content": "hello", "senderId": "A"}))
		.await
		.expect("Failed to create document");
	assert_eq!(id.len(), 20);

	let doc = adapter
		.get(&format!("rooms/r1/messages/{}", id))
		.await
		.expect("Failed to get document")
		.expect("Document should exist");
	assert_eq!(doc["content"], "hello");
	assert_eq!(doc["id"], json!(&*id));

	let missing = adapter.get("rooms/r1/messages/nope").await.expect("Failed to get");
	assert!(missing.is_none());
}

#[tokio::test]
async fn test_create_rejects_document_path() {
	let (adapter, _temp) = create_test_adapter().await;

	let res = adapter.create("rooms/r1", json!({"content": "x"})).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_query_equality_and_inequality() {
	let (adapter, _temp) = create_test_adapter().await;
	let path = "rooms/r1/messages";

	for (sender, read) in [("A", false), ("B", false), ("A", true)] {
		adapter
			.create(path, json!({"senderId": sender, "read": read}))
			.await
			.expect("Failed to create document");
	}

	let filter =
		QueryFilter::new().with_not_equals("senderId", json!("A")).with_equals("read", json!(false));
	let results = adapter
		.query(path, QueryOptions::new().with_filter(filter))
		.await
		.expect("Failed to query");

	assert_eq!(results.len(), 1);
	assert_eq!(results[0]["senderId"], "B");
	assert!(results[0]["id"].is_string(), "query results carry their id");
}

#[tokio::test]
async fn test_query_excludes_nested_and_sibling_collections() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.set("rooms/r1", json!({"lastMessage": "hi"})).await.expect("set");
	adapter.set("rooms/r2", json!({"lastMessage": "yo"})).await.expect("set");
	adapter.create("rooms/r1/messages", json!({"content": "hi"})).await.expect("create");
	adapter.set("roomsx/r9", json!({"lastMessage": "no"})).await.expect("set");

	let rooms = adapter.query("rooms", QueryOptions::default()).await.expect("query");
	let mut ids: Vec<_> = rooms.iter().filter_map(|d| d["id"].as_str()).collect();
	ids.sort_unstable();
	assert_eq!(ids, vec!["r1", "r2"]);

	let messages = adapter.query("rooms/r2/messages", QueryOptions::default()).await.expect("query");
	assert!(messages.is_empty());
}

#[tokio::test]
async fn test_query_sort_and_limit() {
	let (adapter, _temp) = create_test_adapter().await;
	let path = "rooms/r1/messages";

	for ts in [3, 1, 2] {
		adapter.create(path, json!({"createdAt": ts})).await.expect("create");
	}

	let opts = QueryOptions::new().with_sort(vec![SortField::desc("createdAt")]).with_limit(2);
	let results = adapter.query(path, opts).await.expect("query");

	let order: Vec<_> = results.iter().filter_map(|d| d["createdAt"].as_i64()).collect();
	assert_eq!(order, vec![3, 2]);
}

#[tokio::test]
async fn test_set_merge_keeps_other_fields() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.set("rooms/r1", json!({"name": "Lobby", "lastMessage": "old"})).await.expect("set");
	adapter
		.set_merge("rooms/r1", json!({"lastMessage": "new", "lastMessageSenderId": "u1"}))
		.await
		.expect("set_merge");

	let doc = adapter.get("rooms/r1").await.expect("get").expect("exists");
	assert_eq!(doc["name"], "Lobby");
	assert_eq!(doc["lastMessage"], "new");
	assert_eq!(doc["lastMessageSenderId"], "u1");
}

#[tokio::test]
async fn test_set_merge_creates_missing_document() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.set_merge("rooms/r7", json!({"lastMessage": "first"})).await.expect("set_merge");

	let doc = adapter.get("rooms/r7").await.expect("get").expect("exists");
	assert_eq!(doc["lastMessage"], "first");
}

#[tokio::test]
async fn test_batch_commit_updates_all() {
	let (adapter, _temp) = create_test_adapter().await;
	let path = "rooms/r1/messages";

	let m1 = adapter.create(path, json!({"read": false, "content": "a"})).await.expect("create");
	let m2 = adapter.create(path, json!({"read": false, "content": "b"})).await.expect("create");

	let mut batch = adapter.batch().await.expect("batch");
	assert!(batch.is_empty());
	batch.update(&format!("{}/{}", path, m1), json!({"read": true})).await.expect("update");
	batch.update(&format!("{}/{}", path, m2), json!({"read": true})).await.expect("update");
	assert_eq!(batch.len(), 2);

	let count = batch.commit().await.expect("commit");
	assert_eq!(count, 2);

	for id in [&m1, &m2] {
		let doc = adapter.get(&format!("{}/{}", path, id)).await.expect("get").expect("exists");
		assert_eq!(doc["read"], true);
		assert!(doc["content"].is_string(), "unrelated fields survive");
	}
}

#[tokio::test]
async fn test_batch_is_atomic_on_missing_document() {
	let (adapter, _temp) = create_test_adapter().await;
	let path = "rooms/r1/messages";

	let m1 = adapter.create(path, json!({"read": false})).await.expect("create");

	let mut batch = adapter.batch().await.expect("batch");
	batch.update(&format!("{}/{}", path, m1), json!({"read": true})).await.expect("update");
	batch.update(&format!("{}/missing", path), json!({"read": true})).await.expect("update");

	let res = batch.commit().await;
	assert!(matches!(res, Err(Error::NotFound)));

	let doc = adapter.get(&format!("{}/{}", path, m1)).await.expect("get").expect("exists");
	assert_eq!(doc["read"], false, "no update may be applied when the batch fails");
}

#[tokio::test]
async fn test_empty_batch_commits_nothing() {
	let (adapter, _temp) = create_test_adapter().await;

	let mut batch = adapter.batch().await.expect("batch");
	assert_eq!(batch.commit().await.expect("commit"), 0);
}

#[tokio::test]
async fn test_reopen_keeps_documents() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let db_path = temp_dir.path().join("docs.redb");

	{
		let adapter = StoreAdapterRedb::new(db_path.clone()).await.expect("open");
		adapter.set("rooms/r1", json!({"lastMessage": "kept"})).await.expect("set");
	}

	let adapter = StoreAdapterRedb::new(db_path.clone()).await.expect("reopen");
	assert_eq!(adapter.db_path(), db_path.as_path());
	let doc = adapter.get("rooms/r1").await.expect("get").expect("exists");
	assert_eq!(doc["lastMessage"], "kept");
}

// vim: ts=4
