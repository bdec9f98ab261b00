use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};

use super::history_store::{HistoryEntry, HistoryStore};
use crate::error::HistoryError;

const COLLECTION_NAME: &str = "post_history";

pub struct MongoHistoryStore {
    collection: Collection<HistoryEntry>,
}

impl MongoHistoryStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, HistoryError> {
        let client = mongodb::Client::with_uri_str(uri).await?;
        Ok(Self::new(&client.database(database_name)))
    }
}

#[async_trait]
impl HistoryStore for MongoHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.collection.insert_one(entry).await?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "$natural": -1 })
            .limit(limit as i64)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.collection.delete_many(doc! {}).await?;
        Ok(())
    }
}
