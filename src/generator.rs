use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::apis::{ScratchClient, ScratchProject};
use crate::resolver::classify;
use crate::structs::{short_title, GeneratedProject, GenerationRequest};
use crate::templates::{apply_options, template_url};

/// How many catalog results to ask for per attempt.
const SEARCH_LIMIT: u32 = 10;

/// Why a generation attempt was not carried out.
#[derive(Debug)]
pub enum GenerateError {
    /// The request carried no free text.
    EmptyPrompt,
    /// Another attempt is still in flight.
    Busy,
    /// The attempt started but failed; no record was published.
    Internal(anyhow::Error),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::EmptyPrompt => write!(f, "prompt is empty"),
            GenerateError::Busy => write!(f, "a generation attempt is already in flight"),
            GenerateError::Internal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Coordinates one generation attempt at a time.
///
/// An attempt searches the catalog for the prompt, builds the card from
/// the first hit, and falls back to a static template when the search
/// comes back empty or fails. The previous card stays published until a
/// new attempt succeeds.
pub struct Generator {
    client: ScratchClient,
    generating: AtomicBool,
    current: Mutex<Option<GeneratedProject>>,
}

impl Generator {
    pub fn new() -> Self {
        Self::with_client(ScratchClient::new())
    }

    pub fn with_client(client: ScratchClient) -> Self {
        Self {
            client,
            generating: AtomicBool::new(false),
            current: Mutex::new(None),
        }
    }

    /// True while an attempt is in flight.
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// The card published by the last successful attempt.
    pub async fn last_generated(&self) -> Option<GeneratedProject> {
        self.current.lock().await.clone()
    }

    /// Run one generation attempt.
    ///
    /// Rejected up front (no network call) when the prompt is empty or
    /// an attempt is already running.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedProject, GenerateError> {
        if request.free_text.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        if self
            .generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(GenerateError::Busy);
        }

        let result = self.run(request).await;
        self.generating.store(false, Ordering::SeqCst);

        match result {
            Ok(project) => {
                *self.current.lock().await = Some(project.clone());
                info!("Generated project card: {}", project.url);
                Ok(project)
            }
            Err(e) => Err(GenerateError::Internal(e)),
        }
    }

    async fn run(&self, request: &GenerationRequest) -> Result<GeneratedProject> {
        // Try to seed the card with a real catalog project first.
        match self
            .client
            .search_projects(&request.free_text, SEARCH_LIMIT)
            .await
        {
            Ok(projects) if !projects.is_empty() => Ok(Self::from_remote(request, &projects[0])),
            Ok(_) => {
                info!("No catalog results, using a template");
                Self::from_template(request)
            }
            Err(e) => {
                // A failed search is not fatal: the template covers it,
                // the error only gets logged.
                warn!("Catalog search failed ({}), using a template", e);
                Self::from_template(request)
            }
        }
    }

    fn from_remote(request: &GenerationRequest, source: &ScratchProject) -> GeneratedProject {
        GeneratedProject {
            title: short_title(&request.free_text),
            description: format!(
                "Проект {} создан на основе «{}»",
                request.platform, source.title
            ),
            url: request.platform.project_url(source.id),
            image_url: source.thumbnail_url.clone(),
        }
    }

    fn from_template(request: &GenerationRequest) -> Result<GeneratedProject> {
        let category = classify(&request.free_text);
        let template = template_url(category, request.platform);
        let url = apply_options(template, request)?;
        Ok(GeneratedProject {
            title: short_title(&request.free_text),
            description: format!(
                "Проект {} создан на основе запроса: {}",
                request.platform, request.free_text
            ),
            url,
            image_url: None,
        })
    }
}
