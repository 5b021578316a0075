//! Document Store Adapter
//!
//! Trait and types for pluggable document database backends that store JSON
//! documents using hierarchical path-based access (e.g. `rooms/abc123` or
//! `rooms/abc123/messages/xyz789`).
//!
//! Single-document writes (create, set, merge) go directly through the adapter.
//! Multi-document updates go through a [`WriteBatch`], which applies all of its
//! updates atomically on commit or none of them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Query filter for selecting documents.
///
/// A document matches if ALL specified conditions are satisfied (AND logic).
/// Equality and inequality constraints may be combined freely in one filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilter {
	/// Field equality constraints: field_name -> expected_value
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub equals: HashMap<String, Value>,

	/// Field not-equal constraints: field_name -> excluded_value
	#[serde(default, skip_serializing_if = "HashMap::is_empty", rename = "notEquals")]
	pub not_equals: HashMap<String, Value>,
}

impl QueryFilter {
	/// Create a new empty filter (matches all documents).
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an equality constraint to this filter (builder pattern).
	pub fn with_equals(mut self, field: impl Into<String>, value: Value) -> Self {
		self.equals.insert(field.into(), value);
		self
	}

	/// Add a not-equal constraint to this filter (builder pattern).
	pub fn with_not_equals(mut self, field: impl Into<String>, value: Value) -> Self {
		self.not_equals.insert(field.into(), value);
		self
	}

	/// Check if this filter is empty (matches all documents).
	pub fn is_empty(&self) -> bool {
		self.equals.is_empty() && self.not_equals.is_empty()
	}

	/// Check whether a document satisfies every constraint.
	///
	/// Missing fields never equal anything, and are therefore always "not equal".
	pub fn matches(&self, doc: &Value) -> bool {
		for (field, expected) in &self.equals {
			match doc.get(field) {
				Some(actual) if actual == expected => continue,
				_ => return false,
			}
		}

		for (field, excluded) in &self.not_equals {
			if doc.get(field) == Some(excluded) {
				return false;
			}
		}

		true
	}
}

/// Sort order for a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortField {
	pub field: String,
	/// true for ascending, false for descending
	pub ascending: bool,
}

impl SortField {
	pub fn asc(field: impl Into<String>) -> Self {
		Self { field: field.into(), ascending: true }
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self { field: field.into(), ascending: false }
	}
}

/// Options for querying documents (filter, sort, limit).
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
	pub filter: Option<QueryFilter>,
	pub sort: Option<Vec<SortField>>,
	pub limit: Option<u32>,
}

impl QueryOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_filter(mut self, filter: QueryFilter) -> Self {
		self.filter = Some(filter);
		self
	}

	pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
		self.sort = Some(sort);
		self
	}

	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);
		self
	}
}

/// Atomic multi-document write.
///
/// Updates are buffered until [`WriteBatch::commit`]. A commit applies every
/// buffered update or none of them.
#[async_trait]
pub trait WriteBatch: Send + Sync {
	/// Queue a partial update of an existing document. Only the given top-level
	/// fields are overwritten. Committing fails with `NotFound` if the document
	/// does not exist at commit time.
	async fn update(&mut self, path: &str, fields: Value) -> ClResult<()>;

	/// Number of queued updates.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Apply all queued updates atomically. Returns the number of documents written.
	async fn commit(&mut self) -> ClResult<usize>;
}

/// Document Store Adapter trait.
///
/// Query results carry their document id in an injected `id` field, so callers
/// can build the document path as `{collection}/{id}`.
#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	/// Get a document at a specific path. Returns None if not found.
	async fn get(&self, path: &str) -> ClResult<Option<Value>>;

	/// Query the direct children of a collection path.
	async fn query(&self, path: &str, opts: QueryOptions) -> ClResult<Vec<Value>>;

	/// Create a new document in a collection with an auto-generated id.
	/// Returns the generated id.
	async fn create(&self, path: &str, data: Value) -> ClResult<Box<str>>;

	/// Write a document, replacing whatever was stored at the path.
	async fn set(&self, path: &str, data: Value) -> ClResult<()>;

	/// Merge top-level fields into a document, creating it if missing.
	async fn set_merge(&self, path: &str, data: Value) -> ClResult<()>;

	/// Start a new atomic write batch.
	async fn batch(&self) -> ClResult<Box<dyn WriteBatch>>;
}


// vim: ts=4
