use super::{PostFilter, PostStore, StoreError};
use crate::models::{Post, PostPatch};
use async_trait::async_trait;
use mongodb::{
    Client, Collection,
    bson::{Document, doc},
    options::ReturnDocument,
};
use tracing::info;

const DEFAULT_DATABASE: &str = "blogpostsdb";
const COLLECTION: &str = "blogposts";

/// MongoDB backed store. Posts live in the `blogposts` collection keyed by `_id`.
pub struct MongoPostStore {
    client: Client,
    posts: Collection<Post>,
}

fn query_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

impl MongoPostStore {
    /// Connects and pings the server so a bad URL fails at startup rather than
    /// on the first request. The database comes from the URL path.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!("Connected to MongoDB database {}", db.name());

        let posts = db.collection(COLLECTION);
        Ok(Self { client, posts })
    }
}

fn filter_document(filter: &PostFilter) -> Document {
    let mut document = Document::new();
    if let Some(title) = &filter.title {
        document.insert("title", title.clone());
    }
    document
}

/// `$set` body for a patch. Author parts use dotted paths so the other half of
/// the name is left alone.
fn set_document(patch: &PostPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.clone());
    }
    if let Some(content) = &patch.content {
        set.insert("content", content.clone());
    }
    if let Some(first_name) = &patch.first_name {
        set.insert("author.firstName", first_name.clone());
    }
    if let Some(last_name) = &patch.last_name {
        set.insert("author.lastName", last_name.clone());
    }
    set
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError> {
        let mut cursor = self
            .posts
            .find(filter_document(&filter))
            .await
            .map_err(query_error)?;

        let mut posts = Vec::new();
        while cursor.advance().await.map_err(query_error)? {
            posts.push(cursor.deserialize_current().map_err(query_error)?);
        }

        Ok(posts)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.posts
            .find_one(doc! { "_id": id })
            .await
            .map_err(query_error)
    }

    async fn insert(&self, post: Post) -> Result<Post, StoreError> {
        self.posts.insert_one(&post).await.map_err(query_error)?;
        Ok(post)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        // An empty `$set` is rejected by the server.
        if patch.is_empty() {
            return self.get(id).await;
        }

        self.posts
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(&patch) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(query_error)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self
            .posts
            .delete_one(doc! { "_id": id })
            .await
            .map_err(query_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.client.clone().shutdown().await;
        info!("Disconnected from MongoDB");
        Ok(())
    }
}
