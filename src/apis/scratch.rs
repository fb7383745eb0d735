use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use tracing::{debug, info};

const API_BASE_URL: &str = "https://api.scratch.mit.edu";

/// Failure of a single catalog call.
#[derive(Debug)]
pub enum ScratchApiError {
    /// The catalog answered with a non-2xx status.
    Remote { status: u16 },
    /// The request never produced a usable response (network, TLS,
    /// JSON decode).
    Transport(String),
}

impl fmt::Display for ScratchApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScratchApiError::Remote { status } => write!(f, "scratch api status {status}"),
            ScratchApiError::Transport(message) => write!(f, "transport error: {message}"),
        }
    }
}

impl std::error::Error for ScratchApiError {}

impl From<reqwest::Error> for ScratchApiError {
    fn from(err: reqwest::Error) -> Self {
        ScratchApiError::Transport(err.to_string())
    }
}

/// A project as returned by the Scratch catalog. Read-only after fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct ScratchProject {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    // pub visibility: String,
    // pub public: bool,
    // pub creator: Creator,
    // pub stats: Stats,
    // pub history: History,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    projects: Vec<ScratchProject>,
    // pub total: u32,
}

#[derive(Debug, Deserialize)]
struct FeaturedResponse {
    community_featured_projects: Vec<ScratchProject>,
}

/// Client for the public Scratch project catalog.
///
/// Busy state is an in-flight counter, not a single shared flag: a
/// completing call only clears its own contribution, so `is_busy` stays
/// true while any call is still running. Clones share the counter.
#[derive(Clone)]
pub struct ScratchClient {
    client: ReqwestClient,
    base_url: String,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when a call completes, including
/// early `?` returns.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScratchClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Client against a non-default catalog endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: ReqwestClient::new(),
            base_url: base_url.into(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// True while any catalog call is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Search projects by keyword.
    pub async fn search_projects(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ScratchProject>, ScratchApiError> {
        let _guard = InFlightGuard::enter(&self.in_flight);
        debug!("Searching scratch projects: {}", query);

        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search/projects", self.base_url))
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        let results: SearchResults = response.json().await?;
        info!("Search returned {} projects", results.projects.len());
        Ok(results.projects)
    }

    /// Fetch a single project by its catalog id.
    pub async fn get_project_by_id(&self, id: u64) -> Result<ScratchProject, ScratchApiError> {
        let _guard = InFlightGuard::enter(&self.in_flight);
        debug!("Fetching scratch project {}", id);

        let response = self
            .client
            .get(format!("{}/projects/{}", self.base_url, id))
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        Ok(response.json().await?)
    }

    /// Fetch the community featured projects.
    ///
    /// The endpoint takes no limit parameter, so the list is truncated
    /// client-side.
    pub async fn get_featured_projects(
        &self,
        limit: u32,
    ) -> Result<Vec<ScratchProject>, ScratchApiError> {
        let _guard = InFlightGuard::enter(&self.in_flight);
        debug!("Fetching featured scratch projects");

        let response = self
            .client
            .get(format!("{}/proxy/featured", self.base_url))
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        let featured: FeaturedResponse = response.json().await?;
        let mut projects = featured.community_featured_projects;
        projects.truncate(limit as usize);
        Ok(projects)
    }

    /// Fetch a user's shared projects.
    pub async fn get_user_projects(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<ScratchProject>, ScratchApiError> {
        let _guard = InFlightGuard::enter(&self.in_flight);
        debug!("Fetching projects of user {}", username);

        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/users/{}/projects", self.base_url, username))
            .query(&[("limit", limit.as_str())])
            .send()
            .await?;
        let response = Self::ensure_success(response)?;

        Ok(response.json().await?)
    }

    fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ScratchApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ScratchApiError::Remote {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_detail() {
        let remote = ScratchApiError::Remote { status: 404 };
        assert_eq!(remote.to_string(), "scratch api status 404");

        let transport = ScratchApiError::Transport("connection refused".to_string());
        assert_eq!(transport.to_string(), "transport error: connection refused");
    }

    #[test]
    fn deserializes_search_results() {
        let json = r#"{
            "projects": [
                {
                    "id": 42,
                    "title": "Кот-платформер",
                    "description": "Собери все монеты",
                    "instructions": "Стрелки для движения",
                    "thumbnail_url": "https://cdn2.scratch.mit.edu/get_image/project/42_480x360.png"
                }
            ],
            "total": 1
        }"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.projects.len(), 1);
        assert_eq!(results.projects[0].id, 42);
        assert_eq!(results.projects[0].title, "Кот-платформер");
    }

    #[test]
    fn deserializes_featured_entries_with_missing_fields() {
        // Featured entries omit description/instructions.
        let json = r#"{
            "community_featured_projects": [
                { "id": 7, "title": "Pong", "thumbnail_url": null },
                { "id": 8, "title": "Maze" }
            ]
        }"#;
        let featured: FeaturedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(featured.community_featured_projects.len(), 2);
        assert_eq!(featured.community_featured_projects[1].description, "");
        assert!(featured.community_featured_projects[0]
            .thumbnail_url
            .is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let client = ScratchClient::with_base_url("http://127.0.0.1:9");
        let result = client.search_projects("кот", 10).await;
        assert!(matches!(result, Err(ScratchApiError::Transport(_))));
        // The guard must have cleared the counter on the error path.
        assert!(!client.is_busy());
    }

    #[tokio::test]
    async fn clones_share_the_in_flight_counter() {
        let client = ScratchClient::with_base_url("http://127.0.0.1:9");
        let clone = client.clone();
        let _ = clone.get_project_by_id(1).await;
        assert!(!client.is_busy());
    }
}
