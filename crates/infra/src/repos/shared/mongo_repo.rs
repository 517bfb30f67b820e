use super::repo::DeleteResult;
use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, to_bson, Document},
    options::FindOptions,
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Mapping between a domain entity and its document representation.
/// The document schema is the externally defined collection format, so
/// the two shapes are kept strictly separate.
pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": oid
    }
}

pub fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Document {
    let raw = D::from_domain(entity);
    to_bson(&raw).unwrap().as_document().unwrap().to_owned()
}

/// A document that no longer deserializes is dropped with an error log
/// rather than surfaced: the delivery job and the CRUD surface both treat
/// a corrupt row as absent.
fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Option<E> {
    match bson::from_document::<D>(doc) {
        Ok(raw) => Some(raw.to_domain()),
        Err(e) => {
            error!("Dropping document that could not be deserialized: {:?}", e);
            None
        }
    }
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity);
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    find_one_by::<E, D>(collection, filter).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc),
        Ok(None) => None,
        Err(e) => {
            error!("Error querying collection: {:?}", e);
            None
        }
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, options).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

pub async fn delete<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    match collection.find_one_and_delete(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc),
        Ok(None) => None,
        Err(e) => {
            error!("Error deleting from collection: {:?}", e);
            None
        }
    }
}

pub async fn delete_many_by(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<DeleteResult> {
    let res = collection.delete_many(filter, None).await?;
    Ok(DeleteResult {
        deleted_count: res.deleted_count as i64,
    })
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result {
            Ok(document) => {
                if let Some(entity) = persistence_to_entity::<E, D>(document) {
                    documents.push(entity);
                }
            }
            Err(e) => {
                error!("Error consuming cursor: {:?}", e);
            }
        }
    }

    documents
}
