//! Tests for the document store's path and value helpers

use chatpush_store_adapter_redb::storage::*;
use serde_json::{json, Value};
use std::cmp::Ordering;

#[test]
fn test_validate_document_path() {
	assert!(validate_document_path("rooms/r1").is_ok());
	assert!(validate_document_path("rooms/r1/messages/m1").is_ok());

	assert!(validate_document_path("rooms").is_err(), "collection is not a document");
	assert!(validate_document_path("rooms/r1/messages").is_err());
	assert!(validate_document_path("").is_err(), "empty path");
	assert!(validate_document_path("rooms//m1/x").is_err(), "empty segment");
}

#[test]
fn test_validate_collection_path() {
	assert!(validate_collection_path("rooms").is_ok());
	assert!(validate_collection_path("rooms/r1/messages").is_ok());

	assert!(validate_collection_path("rooms/r1").is_err());
	assert!(validate_collection_path("").is_err());
	assert!(validate_collection_path("rooms/").is_err(), "trailing slash");
}

#[test]
fn test_parse_path() {
	let (collection, doc_id) = parse_path("rooms/r1").expect("Failed to parse path");
	assert_eq!(collection, "rooms");
	assert_eq!(doc_id, "r1");

	let (collection, doc_id) =
		parse_path("rooms/r1/messages/m1").expect("Failed to parse path");
	assert_eq!(collection, "rooms/r1/messages");
	assert_eq!(doc_id, "m1");

	assert!(parse_path("rooms").is_err());
	assert!(parse_path("").is_err());
}

#[test]
fn test_inject_and_strip_doc_id() {
	let mut doc = json!({"content": "hi"});
	inject_doc_id(&mut doc, "m1");
	assert_eq!(doc["id"], "m1");

	// an existing id is kept
	inject_doc_id(&mut doc, "other");
	assert_eq!(doc["id"], "m1");

	strip_doc_id(&mut doc);
	assert!(doc.get("id").is_none());
	assert_eq!(doc["content"], "hi");
}

#[test]
fn test_merge_fields_keeps_unrelated_fields() {
	let mut doc = json!({"content": "hi", "read": false, "meta": {"a": 1}});
	merge_fields(&mut doc, &json!({"read": true, "meta": {"b": 2}})).expect("merge");

	assert_eq!(doc["content"], "hi");
	assert_eq!(doc["read"], true);
	// nested objects are replaced, not merged
	assert_eq!(doc["meta"], json!({"b": 2}));
}

#[test]
fn test_merge_fields_rejects_non_object_patch() {
	let mut doc = json!({"read": false});
	assert!(merge_fields(&mut doc, &json!(true)).is_err());
	assert_eq!(doc["read"], false);
}

#[test]
fn test_merge_fields_replaces_non_object_target() {
	let mut doc = Value::Null;
	merge_fields(&mut doc, &json!({"lastMessage": "hi"})).expect("merge");
	assert_eq!(doc, json!({"lastMessage": "hi"}));
}

#[test]
fn test_compare_values() {
	assert_eq!(compare_values(Some(&json!(1)), Some(&json!(2))), Ordering::Less);
	assert_eq!(compare_values(Some(&json!("b")), Some(&json!("a"))), Ordering::Greater);
	assert_eq!(compare_values(Some(&json!(false)), Some(&json!(true))), Ordering::Less);
	assert_eq!(compare_values(None, Some(&json!(0))), Ordering::Less);
	assert_eq!(compare_values(None, None), Ordering::Equal);
}

// vim: ts=4
