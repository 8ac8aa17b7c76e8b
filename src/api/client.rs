//! Blocking HTTP client for the Notion API.
//!
//! The tool is strictly sequential, so requests block; there is no
//! async runtime anywhere in the crate. Every list endpoint is drained
//! through cursor pagination before returning.

use std::thread;
use std::time::Duration;

use serde_json::{Value, json};

use crate::api::{ApiError, Source, wire};
use crate::domain::{Block, Database, DatabaseRow, Page};

const BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: usize = 100;

/// The authenticated integration's identity, from `/users/me`.
#[derive(Debug, Clone)]
pub struct BotUser {
    pub name: String,
    pub kind: String,
}

/// HTTP-backed [`Source`] implementation.
pub struct NotionClient {
    token: String,
    agent: ureq::Agent,
    base_url: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Fetches the integration's own identity; backs the `check` command.
    pub fn whoami(&self) -> Result<BotUser, ApiError> {
        let response = self.get("/users/me", &[])?;
        Ok(BotUser {
            name: response["name"].as_str().unwrap_or("unknown").to_string(),
            kind: response["type"].as_str().unwrap_or("unknown").to_string(),
        })
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let mut request = self
            .agent
            .get(&format!("{}{path}", self.base_url))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", NOTION_VERSION);
        for (key, value) in query {
            request = request.query(key, value);
        }
        execute(request, None)
    }

    fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let request = self
            .agent
            .post(&format!("{}{path}", self.base_url))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", NOTION_VERSION);
        execute(request, Some(body))
    }

    /// Drains a paginated POST endpoint, collecting every result item.
    fn post_paginated(&self, path: &str, mut body: Value) -> Result<Vec<Value>, ApiError> {
        let mut results = Vec::new();
        body["page_size"] = json!(PAGE_SIZE);

        loop {
            let response = self.post(path, body.clone())?;
            if let Some(items) = response["results"].as_array() {
                results.extend(items.iter().cloned());
            }
            if !response["has_more"].as_bool().unwrap_or(false) {
                break;
            }
            match response["next_cursor"].as_str() {
                Some(cursor) => body["start_cursor"] = json!(cursor),
                None => break,
            }
        }

        Ok(results)
    }
}

/// Sends a request, retrying once after a 429 with the advertised delay.
fn execute(request: ureq::Request, body: Option<Value>) -> Result<Value, ApiError> {
    let send = |request: ureq::Request| match &body {
        Some(body) => request.send_json(body.clone()),
        None => request.call(),
    };

    match send(request.clone()) {
        Ok(response) => decode(response),
        Err(ureq::Error::Status(429, response)) => {
            let wait = response
                .header("Retry-After")
                .and_then(|value| value.parse().ok())
                .unwrap_or(1);
            thread::sleep(Duration::from_secs(wait));
            match send(request) {
                Ok(response) => decode(response),
                Err(err) => Err(status_error(err)),
            }
        }
        Err(err) => Err(status_error(err)),
    }
}

fn decode(response: ureq::Response) -> Result<Value, ApiError> {
    response
        .into_json()
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn status_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(401, _) => ApiError::InvalidToken,
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|body| body["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| "no error detail".to_string());
            ApiError::Http { status, message }
        }
        other => ApiError::Transport(other.to_string()),
    }
}

impl Source for NotionClient {
    fn get_page(&self, id: &str) -> Result<Page, ApiError> {
        // A child_database node resolves through the databases endpoint;
        // try the page endpoint first and fall back on a 404.
        match self.get(&format!("/pages/{id}"), &[]) {
            Ok(response) => Ok(wire::parse_page(&response)),
            Err(ApiError::Http { status: 404, .. }) => {
                let response = self.get(&format!("/databases/{id}"), &[])?;
                Ok(wire::parse_page(&response))
            }
            Err(err) => Err(err),
        }
    }

    fn get_block_children(&self, id: &str) -> Result<Vec<Block>, ApiError> {
        let mut results = Vec::new();
        let mut cursor: Option<String> = None;
        let page_size = PAGE_SIZE.to_string();

        loop {
            let mut query = vec![("page_size", page_size.as_str())];
            if let Some(cursor) = cursor.as_deref() {
                query.push(("start_cursor", cursor));
            }

            let response = self.get(&format!("/blocks/{id}/children"), &query)?;
            if let Some(items) = response["results"].as_array() {
                results.extend(items.iter().map(wire::parse_block));
            }
            if !response["has_more"].as_bool().unwrap_or(false) {
                break;
            }
            match response["next_cursor"].as_str() {
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
        }

        Ok(results)
    }

    fn search_pages(&self) -> Result<Vec<Page>, ApiError> {
        let body = json!({
            "filter": {"property": "object", "value": "page"}
        });
        let results = self.post_paginated("/search", body)?;
        Ok(results.iter().map(wire::parse_page).collect())
    }

    fn get_database(&self, id: &str) -> Result<Database, ApiError> {
        let response = self.get(&format!("/databases/{id}"), &[])?;
        Ok(wire::parse_database(&response))
    }

    fn query_database(&self, id: &str) -> Result<Vec<DatabaseRow>, ApiError> {
        let results = self.post_paginated(&format!("/databases/{id}/query"), json!({}))?;
        Ok(results.iter().map(wire::parse_database_row).collect())
    }
}
