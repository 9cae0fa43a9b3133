use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::{object_key, ImageUpload, ProjectStore};
use crate::error::{AuthError, StoreError};
use crate::projects::{Project, ProjectFields};
use crate::session::{AuthSession, SessionProvider, SessionUser};

/// Client for the hosted backend: PostgREST records, object storage and the
/// password grant of its auth service.
///
/// Clones share the signed-in session, so the store and the session
/// provider can be handed to different owners.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
    bucket: String,
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl SupabaseClient {
    pub fn new(
        base_url: &str,
        anon_key: &str,
        table: &str,
        bucket: &str,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            table: table.to_string(),
            bucket: bucket.to_string(),
            session: Arc::new(RwLock::new(None)),
        })
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, key)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Adds the API key and the bearer token (user token when signed in,
    /// anon key otherwise).
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let session = self.session.read().await;
        let token = session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .unwrap_or(&self.anon_key);

        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", token))
    }

    async fn fetch_rows(&self, request: RequestBuilder) -> Result<Vec<Project>, StoreError> {
        let response = ensure_success(self.authorize(request).await.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Turns a non-2xx response into [`StoreError::Status`].
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Human-readable message from an error body.
///
/// The REST, storage and auth services each use a different field.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for field in ["error_description", "msg", "message", "error"] {
            if let Some(text) = value.get(field).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}

fn id_filter(id: &str) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

#[async_trait]
impl ProjectStore for SupabaseClient {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let request = self.client.get(self.rest_url()).query(&[("select", "*")]);
        let projects = self.fetch_rows(request).await?;
        tracing::debug!(count = projects.len(), "[list_projects] fetched");
        Ok(projects)
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let request = self
            .client
            .get(self.rest_url())
            .query(&[("select", "*")])
            .query(&id_filter(id));
        let mut rows = self.fetch_rows(request).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    async fn insert_project(&self, draft: &ProjectFields) -> Result<Project, StoreError> {
        let request = self
            .client
            .post(self.rest_url())
            .header("Prefer", "return=representation")
            .json(draft);
        let mut rows = self.fetch_rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::EmptyResponse);
        }
        let project = rows.remove(0);
        tracing::info!(id = ?project.id, title = %project.fields.title, "[insert_project] stored");
        Ok(project)
    }

    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.rest_url())
            .query(&id_filter(id))
            .header("Prefer", "return=representation")
            .json(fields);
        let rows = self.fetch_rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tracing::info!(id, "[update_project] overwritten");
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        let request = self.client.delete(self.rest_url()).query(&id_filter(id));
        ensure_success(self.authorize(request).await.send().await?).await?;
        tracing::info!(id, "[delete_project] removed");
        Ok(())
    }

    async fn upload_image(&self, file: &ImageUpload) -> Result<String, StoreError> {
        let key = object_key(&file.file_name, chrono::Utc::now().timestamp_millis());
        let request = self
            .client
            .post(self.object_url(&key))
            .header("Content-Type", &file.content_type)
            .header("x-upsert", "false")
            .body(file.bytes.clone());
        ensure_success(self.authorize(request).await.send().await?).await?;

        let url = self.public_url(&key);
        tracing::info!(%url, bytes = file.bytes.len(), "[upload_image] stored blob");
        Ok(url)
    }
}

#[async_trait]
impl SessionProvider for SupabaseClient {
    async fn current_user(&self) -> Option<SessionUser> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "[sign_in] rejected");
            return Err(AuthError::Rejected(message));
        }

        let session: AuthSession = serde_json::from_str(&body).map_err(StoreError::from)?;
        let user = session.user.clone();
        *self.session.write().await = Some(session);
        tracing::info!(email = ?user.email, "[sign_in] session started");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.session.write().await.take().map(|s| s.access_token);
        if let Some(token) = token {
            let response = self
                .client
                .post(self.auth_url("logout"))
                .header("apikey", &self.anon_key)
                .header("Authorization", format!("Bearer {}", token))
                .send()
                .await?;
            ensure_success(response).await?;
        }
        Ok(())
    }
}
