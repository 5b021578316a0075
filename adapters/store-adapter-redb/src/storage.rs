use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::error::Error;

/// Document storage table, keyed by full document path
pub const TABLE_DOCUMENTS: redb::TableDefinition<&str, &str> = redb::TableDefinition::new("docs");

fn segments(path: &str) -> Result<Vec<&str>, Error> {
	let parts: Vec<&str> = path.split('/').collect();
	if path.is_empty() || parts.iter().any(|p| p.is_empty()) {
		return Err(Error::InvalidPath(format!("empty segment in path '{}'", path)));
	}
	Ok(parts)
}

/// A document path alternates collection and id segments and ends on an id
pub fn validate_document_path(path: &str) -> Result<(), Error> {
	if segments(path)?.len() % 2 != 0 {
		return Err(Error::InvalidPath(format!("'{}' is not a document path", path)));
	}
	Ok(())
}

/// A collection path ends on a collection segment
pub fn validate_collection_path(path: &str) -> Result<(), Error> {
	if segments(path)?.len() % 2 != 1 {
		return Err(Error::InvalidPath(format!("'{}' is not a collection path", path)));
	}
	Ok(())
}

/// Parse path into collection and doc_id
pub fn parse_path(path: &str) -> Result<(&str, &str), Error> {
	match path.rsplit_once('/') {
		Some((collection, doc_id)) if !collection.is_empty() && !doc_id.is_empty() => {
			Ok((collection, doc_id))
		}
		_ => Err(Error::InvalidPath(format!("Invalid path: {}", path))),
	}
}

/// Inject the `id` field into a document if it doesn't already have one.
///
/// Documents are stored without an `id` field (the key is the source of truth),
/// so this must be called at read time.
pub fn inject_doc_id(doc: &mut Value, doc_id: &str) {
	if let Value::Object(obj) = doc {
		obj.entry("id").or_insert_with(|| Value::String(doc_id.to_string()));
	}
}

/// Remove a stored `id` field; the key carries the id.
pub fn strip_doc_id(doc: &mut Value) {
	if let Value::Object(obj) = doc {
		obj.remove("id");
	}
}

/// Merge top-level fields of `patch` into `target`.
///
/// Fields not in the patch are kept. Nested objects are replaced, not merged.
/// A non-object target is replaced by the patch.
pub fn merge_fields(target: &mut Value, patch: &Value) -> Result<(), Error> {
	let Value::Object(patch_obj) = patch else {
		return Err(Error::JsonError("merge patch must be an object".into()));
	};

	match target {
		Value::Object(target_obj) => {
			for (key, value) in patch_obj {
				target_obj.insert(key.clone(), value.clone());
			}
		}
		_ => {
			*target = Value::Object(Map::clone(patch_obj));
		}
	}
	Ok(())
}

/// Compare two JSON values for sorting
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	match (a, b) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(Some(Value::Number(a)), Some(Value::Number(b))) => {
			a.as_f64().partial_cmp(&b.as_f64()).unwrap_or(Ordering::Equal)
		}
		(Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
		(Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
		(Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
	}
}

// vim: ts=4
