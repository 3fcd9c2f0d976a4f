// src/infrastructure/http_remote.rs
use crate::application::NoteRemote;
use crate::constants::POSTS_PATH;
use crate::domain::{DomainError, Note};
use crate::infrastructure::config::RemoteConfig;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Request body for create and update
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    title: &'a str,
    body: &'a str,
    user_id: i64,
}

/// Item of the remote collection; only id and title matter here
#[derive(Debug, Deserialize)]
struct Post {
    id: i64,
    #[serde(default)]
    title: String,
}

impl From<Post> for Note {
    fn from(post: Post) -> Self {
        Note::new(post.id, post.title)
    }
}

/// Notes mirrored to a `/posts` REST collection
pub struct HttpNoteRemote {
    base_url: String,
    user_id: i64,
    page_size: usize,
    client: reqwest::Client,
}

impl HttpNoteRemote {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id: config.user_id,
            page_size: config.page_size,
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, POSTS_PATH)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, POSTS_PATH, id)
    }

    fn body<'a>(&self, id: Option<i64>, text: &'a str) -> PostBody<'a> {
        PostBody {
            id,
            title: text,
            body: text,
            user_id: self.user_id,
        }
    }
}

async fn send(request: RequestBuilder, action: &str) -> Result<Response, DomainError> {
    let response = request
        .send()
        .await
        .map_err(|e| DomainError::RemoteCallFailed(format!("{} failed: {}", action, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DomainError::RemoteCallFailed(format!(
            "{} HTTP {}",
            action, status
        )));
    }
    Ok(response)
}

#[async_trait(?Send)]
impl NoteRemote for HttpNoteRemote {
    #[instrument(level = "debug", skip(self))]
    async fn list_first_page(&self) -> Result<Vec<Note>, DomainError> {
        let response = send(self.client.get(self.collection_url()), "List notes").await?;

        let posts: Vec<Post> = response
            .json()
            .await
            .map_err(|e| DomainError::RemoteCallFailed(format!("Parse notes: {}", e)))?;
        debug!(total = posts.len(), page_size = self.page_size, "Fetched remote notes");

        Ok(posts
            .into_iter()
            .take(self.page_size)
            .map(Note::from)
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    async fn create(&self, text: &str) -> Result<Note, DomainError> {
        let request = self
            .client
            .post(self.collection_url())
            .json(&self.body(None, text));
        let response = send(request, "Create note").await?;

        let post: Post = response
            .json()
            .await
            .map_err(|e| DomainError::RemoteCallFailed(format!("Parse created note: {}", e)))?;
        debug!(note_id = post.id, "Remote assigned id");

        Ok(post.into())
    }

    #[instrument(level = "debug", skip(self))]
    async fn update(&self, id: i64, text: &str) -> Result<(), DomainError> {
        let request = self
            .client
            .put(self.item_url(id))
            .json(&self.body(Some(id), text));
        let response = send(request, "Update note").await?;

        let echoed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::RemoteCallFailed(format!("Parse updated note: {}", e)))?;
        debug!(note_id = id, %echoed, "Updated post");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        send(self.client.delete(self.item_url(id)), "Delete note").await?;
        Ok(())
    }
}
