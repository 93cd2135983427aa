//! HTTP client for the pdc-server API
//!
//! Thin typed wrapper over the JSON surface: auth, inspection CRUD and the
//! temporary image upload. Implements `RecordStore` so the wizard can run
//! against a live server.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;

use crate::store::{RecordStore, StoreError, StoreResult};
use pdc_common::model::{Inspection, InspectionPatch};

/// Timeout for API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The signed-in account, as returned by the auth endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    token: String,
    user: AccountInfo,
}

#[derive(Debug, Deserialize)]
struct InspectionEnvelope {
    inspection: Inspection,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    inspections: Vec<Inspection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadEnvelope {
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// Client for the PDC Pro API
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Use an existing bearer token instead of logging in
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Register a new account; the returned token is kept for later calls
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> StoreResult<AccountInfo> {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        let response = self
            .http_client
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let auth: AuthEnvelope = parse(response).await?;
        self.set_token(auth.token);
        Ok(auth.user)
    }

    /// Sign in; the returned token is kept for later calls
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<AccountInfo> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http_client
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let auth: AuthEnvelope = parse(response).await?;
        self.set_token(auth.token);
        Ok(auth.user)
    }

    /// All inspections of the signed-in user, in storage order
    pub async fn list_inspections(&self) -> StoreResult<Vec<Inspection>> {
        let response = self
            .authorized(self.http_client.get(self.url("/api/inspections")))?
            .send()
            .await
            .map_err(transport)?;
        let list: ListEnvelope = parse(response).await?;
        Ok(list.inspections)
    }

    pub async fn get_inspection(&self, id: Uuid) -> StoreResult<Inspection> {
        let response = self
            .authorized(
                self.http_client
                    .get(self.url(&format!("/api/inspections/{}", id))),
            )?
            .send()
            .await
            .map_err(transport)?;
        let envelope: InspectionEnvelope = parse(response).await?;
        Ok(envelope.inspection)
    }

    pub async fn create_inspection(&self, draft: &InspectionPatch) -> StoreResult<Inspection> {
        let response = self
            .authorized(self.http_client.post(self.url("/api/inspections")))?
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        let envelope: InspectionEnvelope = parse(response).await?;
        Ok(envelope.inspection)
    }

    pub async fn update_inspection(
        &self,
        id: Uuid,
        patch: &InspectionPatch,
    ) -> StoreResult<Inspection> {
        let response = self
            .authorized(
                self.http_client
                    .put(self.url(&format!("/api/inspections/{}", id))),
            )?
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        let envelope: InspectionEnvelope = parse(response).await?;
        Ok(envelope.inspection)
    }

    pub async fn delete_inspection(&self, id: Uuid) -> StoreResult<()> {
        let response = self
            .authorized(
                self.http_client
                    .delete(self.url(&format!("/api/inspections/{}", id))),
            )?
            .send()
            .await
            .map_err(transport)?;
        let _: serde_json::Value = parse(response).await?;
        Ok(())
    }

    /// Upload one photo and return its hosted URL
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
    ) -> StoreResult<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| StoreError::Transport(format!("invalid content type: {}", e)))?;
        let form = Form::new().part("image", part);

        let response = self
            .authorized(
                self.http_client
                    .post(self.url("/api/inspections/temp/upload")),
            )?
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let envelope: UploadEnvelope = parse(response).await?;
        Ok(envelope.image_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> StoreResult<RequestBuilder> {
        let token = self
            .token
            .read()
            .expect("token lock poisoned")
            .clone()
            .ok_or(StoreError::Unauthorized)?;
        Ok(builder.bearer_auth(token))
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

/// Map the response onto store errors, or deserialize the success body
async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> StoreResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.map_err(transport);
    }

    let message = response
        .json::<ErrorEnvelope>()
        .await
        .map(|e| e.message)
        .unwrap_or_else(|_| status.to_string());

    Err(match status {
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
        _ => StoreError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl RecordStore for ApiClient {
    async fn create_record(&self, draft: &InspectionPatch) -> StoreResult<Inspection> {
        self.create_inspection(draft).await
    }

    async fn fetch_record(&self, id: Uuid) -> StoreResult<Inspection> {
        self.get_inspection(id).await
    }

    async fn save_record(&self, id: Uuid, patch: &InspectionPatch) -> StoreResult<Inspection> {
        self.update_inspection(id, patch).await
    }
}
