use chatpush_types::store_adapter::{QueryOptions, SortField};
use redb::{ReadableDatabase, ReadableTable};
use serde_json::Value;
use std::cmp::Ordering;

use crate::error::{from_redb_error, Error};
use crate::storage;

/// Execute a query against a collection.
///
/// Scans the direct children of `path` inside a single read transaction and
/// evaluates the whole filter on each document, so equality and inequality
/// constraints are answered from one consistent snapshot.
pub fn execute_query(
	db: &redb::Database,
	path: &str,
	opts: &QueryOptions,
) -> Result<Vec<Value>, Error> {
	storage::validate_collection_path(path)?;

	let tx = db.begin_read().map_err(from_redb_error)?;
	let doc_table = tx.open_table(storage::TABLE_DOCUMENTS).map_err(from_redb_error)?;

	let prefix = format!("{}/", path);
	let mut results = Vec::new();
	let range = doc_table.range(prefix.as_str()..).map_err(from_redb_error)?;

	for item in range {
		let (key, value) = item.map_err(from_redb_error)?;
		let key_str = key.value();

		let Some(doc_id) = key_str.strip_prefix(&prefix) else {
			break;
		};

		// Direct children only, not nested sub-collections
		if doc_id.contains('/') {
			continue;
		}

		let mut doc: Value = serde_json::from_str(value.value())?;

		if let Some(ref filter) = opts.filter {
			if !filter.matches(&doc) {
				continue;
			}
		}

		storage::inject_doc_id(&mut doc, doc_id);
		results.push(doc);
	}

	Ok(apply_sort_limit(results, opts))
}

/// Apply sorting and limit to results
fn apply_sort_limit(mut docs: Vec<Value>, opts: &QueryOptions) -> Vec<Value> {
	if let Some(ref sort_fields) = opts.sort {
		docs.sort_by(|a, b| compare_documents(a, b, sort_fields));
	}

	if let Some(limit) = opts.limit {
		docs.truncate(limit as usize);
	}

	docs
}

/// Compare two documents for sorting
fn compare_documents(a: &Value, b: &Value, sort_fields: &[SortField]) -> Ordering {
	for field in sort_fields {
		let ord = storage::compare_values(a.get(&field.field), b.get(&field.field));
		let ord = if field.ascending { ord } else { ord.reverse() };

		if ord != Ordering::Equal {
			return ord;
		}
	}

	Ordering::Equal
}

// vim: ts=4
