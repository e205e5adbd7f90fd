// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use fieldops_app::{
    ActivityEvent, CompletedOrder, Contractor, Dataset, PartsOrder, Recommendation,
    TechnicianRetention, ViewKind,
};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Blocking client for the dashboard's REST backend.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection.trim_matches('/'))
    }

    /// `GET {base}/{collection}`, decoded as a JSON array of records.
    pub fn fetch_records<R: DeserializeOwned>(&self, collection: &str) -> Result<Vec<R>> {
        let url = self.collection_url(collection);
        tracing::debug!(%url, "fetching collection");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let records: Vec<R> = response
            .json()
            .with_context(|| format!("decode {collection} response from {url}"))?;
        tracing::debug!(%url, records = records.len(), "fetched collection");
        Ok(records)
    }

    pub fn fetch_dataset(&self, kind: ViewKind) -> Result<Dataset> {
        let collection = kind.collection();
        let dataset = match kind {
            ViewKind::Orders => self.fetch_records::<CompletedOrder>(collection)?.into(),
            ViewKind::Contractors => self.fetch_records::<Contractor>(collection)?.into(),
            ViewKind::Parts => self.fetch_records::<PartsOrder>(collection)?.into(),
            ViewKind::Coaching => self.fetch_records::<Recommendation>(collection)?.into(),
            ViewKind::Activity => self.fetch_records::<ActivityEvent>(collection)?.into(),
            ViewKind::Retention => self.fetch_records::<TechnicianRetention>(collection)?.into(),
        };
        Ok(dataset)
    }

    /// `POST {base}/{collection}` with a JSON body. Returns the decoded
    /// response body, or `Value::Null` when the server sends none.
    pub fn post<B: Serialize + ?Sized>(&self, collection: &str, body: &B) -> Result<Value> {
        let url = self.collection_url(collection);
        tracing::debug!(%url, "posting mutation");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        let text = response
            .text()
            .with_context(|| format!("read response from {url}"))?;
        if !status.is_success() {
            return Err(clean_error_response(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).with_context(|| format!("decode response from {url}"))
    }

    /// Posts to the collection behind `kind`.
    pub fn submit<B: Serialize + ?Sized>(&self, kind: ViewKind, body: &B) -> Result<Value> {
        self.post(kind.collection(), body)
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- check [api].base_url in your config ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            let message = match fields.get(key) {
                Some(Value::String(text)) => Some(text.as_str()),
                Some(Value::Object(nested)) => nested.get("message").and_then(Value::as_str),
                _ => None,
            };
            if let Some(message) = message.filter(|text| !text.is_empty()) {
                return anyhow!("server error ({}): {}", status.as_u16(), message);
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() && body.len() < 100 && !body.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), body);
    }

    anyhow!("server returned {}", status.as_u16())
}
