//! [`RecordStore`] over the pasajes HTTP API using [`reqwest`].

use async_trait::async_trait;
use pasajes_core::ticket::{LookupEntry, TicketInput, TicketRecord};
use pasajes_core::types::DbId;
use reqwest::header::CONTENT_DISPOSITION;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;
use crate::store::{ExportedReport, LookupList, RecordStore};

/// HTTP client for one pasajes API.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    api_url: String,
}

/// Body of `POST /pasajes`.
#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: DbId,
}

/// The `{error, code}` body sent with every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl HttpRecordStore {
    /// * `api_url` - Base URL including the `/api` prefix, e.g.
    ///   `http://localhost:3000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a
    /// [`ClientError::Remote`] built from its error body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(remote_error(status.as_u16(), &body))
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_all(&self) -> Result<Vec<TicketRecord>, ClientError> {
        let response = self.client.get(self.url("/pasajes")).send().await?;
        Self::parse_response(response).await
    }

    async fn list_by_route(&self, route_id: DbId) -> Result<Vec<TicketRecord>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/pasajes/ruta/{route_id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create(&self, input: &TicketInput) -> Result<DbId, ClientError> {
        let response = self
            .client
            .post(self.url("/pasajes"))
            .json(input)
            .send()
            .await?;
        let created: CreatedBody = Self::parse_response(response).await?;
        Ok(created.id)
    }

    async fn update(&self, id: DbId, input: &TicketInput) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/pasajes/{id}")))
            .json(input)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/pasajes/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn export_csv(&self) -> Result<ExportedReport, ClientError> {
        let response = self.client.post(self.url("/exportar")).send().await?;
        let response = Self::ensure_success(response).await?;
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name);
        let bytes = response.bytes().await?.to_vec();
        Ok(ExportedReport { file_name, bytes })
    }

    async fn list_lookup(&self, list: LookupList) -> Result<Vec<LookupEntry>, ClientError> {
        let response = self.client.get(self.url(list.path())).send().await?;
        Self::parse_response(response).await
    }
}

/// Build a [`ClientError::Remote`] from a non-2xx body.
///
/// Bodies that are not `{error, code}` JSON are kept as the message.
fn remote_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ClientError::Remote {
            status,
            code: parsed.code,
            message: parsed.error.unwrap_or_default(),
        },
        Err(_) => ClientError::Remote {
            status,
            code: None,
            message: body.trim().to_string(),
        },
    }
}

/// Extract `filename` from a `Content-Disposition: attachment` value.
fn attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
