//! Grounded web search during generation, as a provider-neutral capability.
//!
//! Vendors expose "search the web while answering" with different request
//! shapes. The analyzer only depends on this trait; [`crate::gemini`] holds
//! one implementation.

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::model::ImageInput;

/// One grounded generation request: instruction plus image, web search on.
#[derive(Debug, Clone, Copy)]
pub struct GroundedRequest<'a> {
    pub prompt: &'a str,
    pub image: &'a ImageInput,
    pub temperature: f32,
}

/// Generated text and the citations the model grounded it on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundedResponse {
    pub text: Option<String>,
    pub citations: Vec<Citation>,
}

/// A grounding citation. Only citations with a web source are usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Citation {
    pub web: Option<WebSource>,
}

impl Citation {
    pub fn web(uri: impl Into<String>, title: Option<String>) -> Self {
        Self {
            web: Some(WebSource {
                uri: uri.into(),
                title,
                snippet: None,
            }),
        }
    }
}

/// A web resource a citation points at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebSource {
    pub uri: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

/// A hosted model that can answer with web grounding enabled.
///
/// Each call must issue exactly one upstream request and must not retry.
#[async_trait]
pub trait GroundedSearch: Send + Sync {
    async fn generate(&self, request: &GroundedRequest<'_>) -> Result<GroundedResponse, UpstreamError>;

    /// Name used in logs.
    fn provider_name(&self) -> &str;
}
