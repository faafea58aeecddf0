//! HTTP client for the REST surface, used by the `storelane` admin binary.

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Product, ProductDetail, ProductWithImages, ReferenceRow, Store};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status; `message` is the plain-text
    /// error body (e.g. "Name is required", "Unauthorized", "Internal error").
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Reads STORELANE_API_URL (default http://127.0.0.1:3000) and
    /// STORELANE_TOKEN from the environment.
    pub fn from_env() -> Self {
        let base_url = std::env::var("STORELANE_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        let token = std::env::var("STORELANE_TOKEN").ok();
        Self::new(base_url, token)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ClientError> {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }
        Ok(resp.json::<T>().await?)
    }

    // Stores

    pub async fn create_store(&self, body: &Value) -> Result<Store, ClientError> {
        self.request(Method::POST, "/api/stores", Some(body)).await
    }

    pub async fn update_store(&self, id: Uuid, body: &Value) -> Result<Store, ClientError> {
        self.request(Method::PATCH, &format!("/api/stores/{id}"), Some(body))
            .await
    }

    pub async fn delete_store(&self, id: Uuid) -> Result<Store, ClientError> {
        self.request(Method::DELETE, &format!("/api/stores/{id}"), None)
            .await
    }

    // Reference entities

    pub async fn list_references(
        &self,
        store_id: Uuid,
        entity: &str,
    ) -> Result<Vec<ReferenceRow>, ClientError> {
        self.request(Method::GET, &format!("/api/{store_id}/{entity}"), None)
            .await
    }

    pub async fn get_reference(
        &self,
        store_id: Uuid,
        entity: &str,
        id: Uuid,
    ) -> Result<Option<ReferenceRow>, ClientError> {
        self.request(Method::GET, &format!("/api/{store_id}/{entity}/{id}"), None)
            .await
    }

    pub async fn create_reference(
        &self,
        store_id: Uuid,
        entity: &str,
        body: &Value,
    ) -> Result<ReferenceRow, ClientError> {
        self.request(Method::POST, &format!("/api/{store_id}/{entity}"), Some(body))
            .await
    }

    pub async fn update_reference(
        &self,
        store_id: Uuid,
        entity: &str,
        id: Uuid,
        body: &Value,
    ) -> Result<ReferenceRow, ClientError> {
        self.request(
            Method::PATCH,
            &format!("/api/{store_id}/{entity}/{id}"),
            Some(body),
        )
        .await
    }

    pub async fn delete_reference(
        &self,
        store_id: Uuid,
        entity: &str,
        id: Uuid,
    ) -> Result<ReferenceRow, ClientError> {
        self.request(Method::DELETE, &format!("/api/{store_id}/{entity}/{id}"), None)
            .await
    }

    // Products

    pub async fn list_products(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<ProductWithImages>, ClientError> {
        self.request(Method::GET, &format!("/api/{store_id}/products"), None)
            .await
    }

    pub async fn get_product(
        &self,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ProductDetail>, ClientError> {
        self.request(Method::GET, &format!("/api/{store_id}/products/{id}"), None)
            .await
    }

    pub async fn create_product(
        &self,
        store_id: Uuid,
        body: &Value,
    ) -> Result<ProductWithImages, ClientError> {
        self.request(Method::POST, &format!("/api/{store_id}/products"), Some(body))
            .await
    }

    pub async fn update_product(
        &self,
        store_id: Uuid,
        id: Uuid,
        body: &Value,
    ) -> Result<ProductWithImages, ClientError> {
        self.request(
            Method::PATCH,
            &format!("/api/{store_id}/products/{id}"),
            Some(body),
        )
        .await
    }

    pub async fn delete_product(&self, store_id: Uuid, id: Uuid) -> Result<Product, ClientError> {
        self.request(Method::DELETE, &format!("/api/{store_id}/products/{id}"), None)
            .await
    }
}

/// Date column formatting shared by every table, e.g. "Aug 29, 2026".
pub fn format_created(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Fixed-width text table for list output.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    let line = |cells: Vec<String>, widths: &[usize]| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    out.push_str(&line(
        headers.iter().map(|h| h.to_string()).collect(),
        &widths,
    ));
    out.push('\n');
    out.push_str(&line(
        widths.iter().map(|w| "-".repeat(*w)).collect(),
        &widths,
    ));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.clone(), &widths));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn table_pads_to_widest_cell() {
        let table = render_table(
            &["Name", "Id"],
            &[
                vec!["Diesel".into(), "1".into()],
                vec!["LPG".into(), "22".into()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Name    Id");
        assert_eq!(lines[1], "------  --");
        assert_eq!(lines[2], "Diesel  1");
        assert_eq!(lines[3], "LPG     22");
    }

    #[test]
    fn created_date_is_short_form() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        assert_eq!(format_created(&ts), "Aug 29, 2026");
    }
}
