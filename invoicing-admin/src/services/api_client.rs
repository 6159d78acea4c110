//! Client for the invoicing REST API.
//!
//! Every collection lives under the configured base URL (`/clientes`,
//! `/empresas`, `/productos`, `/documentos`, `/detalles`). Failed calls are
//! reported once; there is no retry.

use crate::config::ApiSettings;
use crate::models::{Client, Company, DetailRecord, DocumentRecord, Product};
use crate::services::metrics::{API_REQUESTS_TOTAL, API_REQUEST_DURATION};
use admin_core::error::AppError;
use admin_core::observability::TracedClientExt;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};
use validator::Validate;

/// An entity exposed as a CRUD collection by the API.
pub trait ApiResource: Serialize + DeserializeOwned + Send + Sync {
    /// Collection path under the API base URL.
    const PATH: &'static str;

    /// Reject the entity before it is sent.
    fn check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

impl ApiResource for Client {
    const PATH: &'static str = "clientes";

    fn check(&self) -> Result<(), AppError> {
        Ok(self.validate()?)
    }
}

impl ApiResource for Company {
    const PATH: &'static str = "empresas";

    fn check(&self) -> Result<(), AppError> {
        Ok(self.validate()?)
    }
}

impl ApiResource for Product {
    const PATH: &'static str = "productos";

    fn check(&self) -> Result<(), AppError> {
        Ok(self.validate()?)
    }
}

impl ApiResource for DocumentRecord {
    const PATH: &'static str = "documentos";
}

const DETAILS_PATH: &str = "detalles";

/// HTTP client bound to one API base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    pub async fn list<T: ApiResource>(&self) -> Result<Vec<T>, AppError> {
        self.request(T::PATH, Method::GET, T::PATH, None::<&()>)
            .await
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    pub async fn get<T: ApiResource>(&self, id: i64) -> Result<T, AppError> {
        let path = format!("{}/{}", T::PATH, id);
        self.request(T::PATH, Method::GET, &path, None::<&()>).await
    }

    #[instrument(skip(self, entity), fields(resource = T::PATH))]
    pub async fn create<T: ApiResource>(&self, entity: &T) -> Result<T, AppError> {
        entity.check()?;
        self.request(T::PATH, Method::POST, T::PATH, Some(entity))
            .await
    }

    #[instrument(skip(self, entity), fields(resource = T::PATH))]
    pub async fn update<T: ApiResource>(&self, id: i64, entity: &T) -> Result<T, AppError> {
        entity.check()?;
        let path = format!("{}/{}", T::PATH, id);
        self.request(T::PATH, Method::PUT, &path, Some(entity)).await
    }

    #[instrument(skip(self), fields(resource = T::PATH))]
    pub async fn delete<T: ApiResource>(&self, id: i64) -> Result<(), AppError> {
        let path = format!("{}/{}", T::PATH, id);
        self.send(T::PATH, Method::DELETE, &path, None::<&()>)
            .await
            .map(|_| ())
    }

    /// Details of one document, in the order the API returns them.
    #[instrument(skip(self))]
    pub async fn list_details(&self, document_id: i64) -> Result<Vec<DetailRecord>, AppError> {
        let path = format!("{}/documento/{}", DETAILS_PATH, document_id);
        self.request(DETAILS_PATH, Method::GET, &path, None::<&()>)
            .await
    }

    #[instrument(skip(self, detail), fields(product_ref = %detail.product_ref))]
    pub async fn create_detail(&self, detail: &DetailRecord) -> Result<DetailRecord, AppError> {
        self.request(DETAILS_PATH, Method::POST, DETAILS_PATH, Some(detail))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_detail(&self, id: i64) -> Result<(), AppError> {
        let path = format!("{}/{}", DETAILS_PATH, id);
        self.send(DETAILS_PATH, Method::DELETE, &path, None::<&()>)
            .await
            .map(|_| ())
    }

    async fn request<B, T>(
        &self,
        resource: &'static str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(resource, method, path, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send<B>(
        &self,
        resource: &'static str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, AppError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        let mut request = self.client.traced(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let timer = API_REQUEST_DURATION
            .with_label_values(&[resource])
            .start_timer();
        let result = request.send().await;
        timer.observe_duration();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                API_REQUESTS_TOTAL
                    .with_label_values(&[resource, method.as_str(), "error"])
                    .inc();
                error!(url = %url, error = %e, "Invoicing API request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        API_REQUESTS_TOTAL
            .with_label_values(&[resource, method.as_str(), status.as_str()])
            .inc();

        let text = response.text().await?;
        debug!(status = %status, url = %url, "Invoicing API response");

        if status.is_success() {
            Ok(text)
        } else if status == StatusCode::NOT_FOUND {
            Err(AppError::NotFound(anyhow::anyhow!(
                "{} not found at {}",
                resource,
                path
            )))
        } else {
            error!(status = %status, url = %url, body = %text, "Invoicing API returned an error");
            Err(AppError::Upstream {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
