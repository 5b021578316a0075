use async_trait::async_trait;
use chatpush_types::prelude::*;
use chatpush_types::store_adapter::WriteBatch;
use redb::ReadableTable;
use serde_json::Value;
use std::sync::Arc;

use crate::error::from_redb_error;
use crate::storage;

/// Write batch for the redb adapter.
///
/// Updates are buffered in memory and applied inside one redb write
/// transaction on commit. If any document is missing the transaction is
/// dropped without committing, so nothing is written.
pub struct RedbWriteBatch {
	db: Arc<redb::Database>,
	updates: Vec<(String, Value)>,
}

impl RedbWriteBatch {
	pub fn new(db: Arc<redb::Database>) -> Self {
		Self { db, updates: Vec::new() }
	}
}

/// Apply all updates in a single write transaction
fn apply_updates(db: &redb::Database, updates: &[(String, Value)]) -> Result<usize, crate::Error> {
	let tx = db.begin_write().map_err(from_redb_error)?;
	{
		let mut table = tx.open_table(storage::TABLE_DOCUMENTS).map_err(from_redb_error)?;

		for (path, fields) in updates {
			let current: Option<String> =
				table.get(path.as_str()).map_err(from_redb_error)?.map(|v| v.value().to_string());
			let Some(current) = current else {
				return Err(crate::Error::NotFound(path.clone()));
			};

			let mut doc: Value = serde_json::from_str(&current)?;
			storage::merge_fields(&mut doc, fields)?;
			storage::strip_doc_id(&mut doc);

			let json = serde_json::to_string(&doc)?;
			table.insert(path.as_str(), json.as_str()).map_err(from_redb_error)?;
		}
	}
	tx.commit().map_err(from_redb_error)?;

	Ok(updates.len())
}

#[async_trait]
impl WriteBatch for RedbWriteBatch {
	async fn update(&mut self, path: &str, fields: Value) -> ClResult<()> {
		storage::validate_document_path(path)?;
		if !fields.is_object() {
			return Err(Error::ValidationError("batch update fields must be an object".into()));
		}
		self.updates.push((path.to_string(), fields));
		Ok(())
	}

	fn len(&self) -> usize {
		self.updates.len()
	}

	async fn commit(&mut self) -> ClResult<usize> {
		if self.updates.is_empty() {
			return Ok(0);
		}

		let db = Arc::clone(&self.db);
		let updates = std::mem::take(&mut self.updates);

		let count =
			tokio::task::spawn_blocking(move || apply_updates(&db, &updates)).await??;
		debug!(count = count, "Committed write batch");
		Ok(count)
	}
}

// vim: ts=4
