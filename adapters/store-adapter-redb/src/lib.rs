#![forbid(unsafe_code)]

mod batch;
mod error;
mod query;
pub mod storage;

use async_trait::async_trait;
use redb::{ReadableDatabase, ReadableTable};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use batch::RedbWriteBatch;
pub use error::Error;

use chatpush_types::prelude::*;
use chatpush_types::store_adapter::{QueryOptions, StoreAdapter, WriteBatch};
use chatpush_types::utils::random_id;

/// redb-based implementation of StoreAdapter.
///
/// All documents live in one table keyed by their full path
/// (`rooms/r1`, `rooms/r1/messages/m1`).
#[derive(Debug)]
pub struct StoreAdapterRedb {
	db_path: PathBuf,
	db: Arc<redb::Database>,
}

impl StoreAdapterRedb {
	/// Open or create the database file at `db_path`.
	pub async fn new(db_path: impl Into<PathBuf>) -> ClResult<Self> {
		let db_path = db_path.into();
		if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let path = db_path.clone();
		let db = tokio::task::spawn_blocking(move || -> Result<redb::Database, Error> {
			let db = if path.exists() {
				redb::Database::open(&path).map_err(error::from_redb_error)?
			} else {
				redb::Database::create(&path).map_err(error::from_redb_error)?
			};

			let tx = db.begin_write().map_err(error::from_redb_error)?;
			let _ = tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;
			tx.commit().map_err(error::from_redb_error)?;

			Ok(db)
		})
		.await??;

		info!(path = %db_path.display(), "Opened document store");
		Ok(Self { db_path, db: Arc::new(db) })
	}

	pub fn db_path(&self) -> &Path {
		&self.db_path
	}

	/// Run a write against the documents table in its own transaction
	async fn write<F>(&self, f: F) -> ClResult<()>
	where
		F: FnOnce(&mut redb::Table<'_, &'static str, &'static str>) -> Result<(), Error> + Send + 'static,
	{
		let db = Arc::clone(&self.db);

		tokio::task::spawn_blocking(move || -> Result<(), Error> {
			let tx = db.begin_write().map_err(error::from_redb_error)?;
			{
				let mut table =
					tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;
				f(&mut table)?;
			}
			tx.commit().map_err(error::from_redb_error)?;
			Ok(())
		})
		.await??;

		Ok(())
	}
}

/// Read a document's stored JSON from an open table
fn read_doc<T: ReadableTable<&'static str, &'static str>>(
	table: &T,
	path: &str,
) -> Result<Option<Value>, Error> {
	let json: Option<String> =
		table.get(path).map_err(error::from_redb_error)?.map(|v| v.value().to_string());
	match json {
		Some(json) => Ok(Some(serde_json::from_str(&json)?)),
		None => Ok(None),
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterRedb {
	async fn get(&self, path: &str) -> ClResult<Option<Value>> {
		storage::validate_document_path(path)?;
		let db = Arc::clone(&self.db);
		let path = path.to_string();

		let doc = tokio::task::spawn_blocking(move || -> Result<Option<Value>, Error> {
			let tx = db.begin_read().map_err(error::from_redb_error)?;
			let table = tx.open_table(storage::TABLE_DOCUMENTS).map_err(error::from_redb_error)?;

			let mut doc = read_doc(&table, &path)?;
			if let (Some(doc), Ok((_, doc_id))) = (doc.as_mut(), storage::parse_path(&path)) {
				storage::inject_doc_id(doc, doc_id);
			}
			Ok(doc)
		})
		.await??;

		Ok(doc)
	}

	async fn query(&self, path: &str, opts: QueryOptions) -> ClResult<Vec<Value>> {
		let db = Arc::clone(&self.db);
		let path = path.to_string();

		let docs =
			tokio::task::spawn_blocking(move || query::execute_query(&db, &path, &opts)).await??;
		Ok(docs)
	}

	async fn create(&self, path: &str, mut data: Value) -> ClResult<Box<str>> {
		storage::validate_collection_path(path)?;
		if !data.is_object() {
			return Err(Error::InvalidPath(format!("document at '{}' must be an object", path)).into());
		}
		storage::strip_doc_id(&mut data);

		let doc_id = random_id();
		let full_path = format!("{}/{}", path, doc_id);
		let json = serde_json::to_string(&data)?;

		let key = full_path.clone();
		self.write(move |table| {
			table.insert(key.as_str(), json.as_str()).map_err(error::from_redb_error)?;
			Ok(())
		})
		.await?;

		debug!(path = %full_path, "Created document");
		Ok(doc_id.into())
	}

	async fn set(&self, path: &str, mut data: Value) -> ClResult<()> {
		storage::validate_document_path(path)?;
		storage::strip_doc_id(&mut data);
		let json = serde_json::to_string(&data)?;
		let key = path.to_string();

		self.write(move |table| {
			table.insert(key.as_str(), json.as_str()).map_err(error::from_redb_error)?;
			Ok(())
		})
		.await
	}

	async fn set_merge(&self, path: &str, data: Value) -> ClResult<()> {
		storage::validate_document_path(path)?;
		let key = path.to_string();

		self.write(move |table| {
			let mut doc =
				read_doc(&*table, &key)?.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
			storage::merge_fields(&mut doc, &data)?;
			storage::strip_doc_id(&mut doc);

			let json = serde_json::to_string(&doc)?;
			table.insert(key.as_str(), json.as_str()).map_err(error::from_redb_error)?;
			Ok(())
		})
		.await
	}

	async fn batch(&self) -> ClResult<Box<dyn WriteBatch>> {
		Ok(Box::new(RedbWriteBatch::new(Arc::clone(&self.db))))
	}
}

// vim: ts=4
