//! Demo API client
//!
//! Best-effort, read-only integration with a public placeholder endpoint.
//! Nothing here is part of the durable data path: failures surface as
//! `Network` errors and degrade to empty results, never blocking core CRUD.

pub mod search;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::{ApiConfig, SearchConfig};
use crate::error::Result;
use crate::types::{Category, Source, Status, TechnologyRecord};

/// How many placeholder posts to turn into technology records
const FETCH_LIMIT: usize = 10;

/// A post from the placeholder API
#[derive(Debug, Clone, Deserialize)]
struct Post {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

/// An ephemeral hit from the external search endpoint
///
/// Not a stored record: ids are synthetic strings and nothing is persisted
/// unless the user explicitly imports the hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: Status,
    pub source: Source,
}

/// A link offered for a technology
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLink {
    pub title: &'static str,
    pub url: &'static str,
}

/// Curated resource sets for one technology
#[derive(Debug, Clone, Default, Serialize)]
pub struct TechResources {
    pub documentation: Vec<ResourceLink>,
    pub tutorials: Vec<ResourceLink>,
    pub community: Vec<ResourceLink>,
}

/// Seam for the debounced search driver: anything that can look up hits
#[async_trait]
pub trait TechSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Client for the placeholder API
#[derive(Clone)]
pub struct DemoApiClient {
    client: Arc<Client>,
    base_url: String,
    max_results: usize,
}

impl DemoApiClient {
    pub fn new(api: &ApiConfig, search: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: api.base_url.trim_end_matches('/').to_string(),
            max_results: search.max_results,
        })
    }

    /// Pull placeholder posts and shape them into technology records
    ///
    /// The records are for display and hand-picking; they are not persisted.
    pub async fn fetch_technologies(&self) -> Result<Vec<TechnologyRecord>> {
        let url = format!("{}/posts", self.base_url);
        debug!("Fetching technologies from {}", url);
        let posts: Vec<Post> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let now = Utc::now();
        Ok(posts
            .into_iter()
            .take(FETCH_LIMIT)
            .enumerate()
            .map(|(index, post)| TechnologyRecord {
                id: post.id,
                title: non_empty(post.title, || format!("Technology {}", index + 1)),
                description: non_empty(post.body, || "No description".to_string()),
                notes: String::new(),
                category: match index % 3 {
                    0 => Category::Frontend,
                    1 => Category::Backend,
                    _ => Category::Other,
                },
                status: Status::NotStarted,
                source: Source::Api,
                created_at: Some(now),
                imported_at: None,
            })
            .collect())
    }

    /// Fetch curated resource links for a technology
    ///
    /// The endpoint only proves the id resolves; the link sets are fixed.
    pub async fn fetch_resources(&self, tech_id: i64) -> Result<TechResources> {
        let url = format!("{}/posts/{}", self.base_url, tech_id);
        debug!("Fetching resources via {}", url);
        self.client.get(&url).send().await?.error_for_status()?;

        Ok(TechResources {
            documentation: vec![
                ResourceLink { title: "Official documentation", url: "https://example.com/docs" },
                ResourceLink { title: "Beginner's guide", url: "https://example.com/guide" },
            ],
            tutorials: vec![
                ResourceLink { title: "Video course", url: "https://example.com/video" },
                ResourceLink { title: "Interactive lessons", url: "https://example.com/interactive" },
            ],
            community: vec![
                ResourceLink { title: "Forum", url: "https://example.com/forum" },
                ResourceLink { title: "Discord community", url: "https://example.com/discord" },
            ],
        })
    }
}

#[async_trait]
impl TechSearch for DemoApiClient {
    /// Search the placeholder API; an empty query yields no hits
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/posts", self.base_url);
        debug!("Searching {} for '{}'", url, query);
        let posts: Vec<Post> = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(posts
            .into_iter()
            .take(self.max_results)
            .enumerate()
            .map(|(index, post)| SearchHit {
                id: format!("search-{}-{}", post.id, index),
                title: non_empty(post.title, || format!("Search result {}", index + 1)),
                description: non_empty(post.body, || "No description".to_string()),
                category: Category::Custom("search".to_string()),
                status: Status::NotStarted,
                source: Source::ExternalApi,
            })
            .collect())
    }
}

fn non_empty(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() {
        fallback()
    } else {
        value
    }
}
