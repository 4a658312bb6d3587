//! Gemini `generateContent` client with Google Search grounding.
//!
//! Sends the image inline next to the instruction, enables the
//! `googleSearch` tool, and maps the first candidate's grounding chunks
//! into provider-neutral [`Citation`]s.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CoreConfig;
use crate::error::UpstreamError;
use crate::search::{Citation, GroundedRequest, GroundedResponse, GroundedSearch, WebSource};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Generative Language REST API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
    #[serde(default)]
    grounding_supports: Vec<GroundingSupport>,
    #[serde(default)]
    web_search_queries: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Deserialize, Debug, Default)]
struct WebChunk {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingSupport {
    #[serde(default)]
    segment: Option<Segment>,
    #[serde(default)]
    grounding_chunk_indices: Vec<usize>,
}

#[derive(Deserialize, Debug, Default)]
struct Segment {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client against a non-default API endpoint.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::with_base_url(&config.api_key, &config.model, &config.base_url)
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GroundedSearch for GeminiClient {
    async fn generate(&self, request: &GroundedRequest<'_>) -> Result<GroundedResponse, UpstreamError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &request.image.mime_type,
                            data: request.image.to_base64(),
                        },
                    },
                    Part::Text { text: request.prompt },
                ],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        debug!(
            model = %self.model,
            mime_type = %request.image.mime_type,
            size = request.image.bytes.len(),
            "Calling Gemini generateContent"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        parse_response(&text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

/// Map a raw `generateContent` response body to a [`GroundedResponse`].
fn parse_response(body: &str) -> Result<GroundedResponse, UpstreamError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or(UpstreamError::NoCandidates)?;

    let text = candidate.content.and_then(|c| {
        let joined: String = c.parts.into_iter().filter_map(|p| p.text).collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    });

    let metadata = candidate.grounding_metadata.unwrap_or_default();
    if !metadata.web_search_queries.is_empty() {
        debug!(queries = ?metadata.web_search_queries, "Grounding search queries");
    }

    let citations = metadata
        .grounding_chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| Citation {
            web: chunk.web.and_then(|web| {
                Some(WebSource {
                    uri: web.uri?,
                    title: web.title,
                    snippet: snippet_for(&metadata.grounding_supports, index),
                })
            }),
        })
        .collect();

    Ok(GroundedResponse { text, citations })
}

/// Text of the first supported segment that cites chunk `index`.
fn snippet_for(supports: &[GroundingSupport], index: usize) -> Option<String> {
    supports
        .iter()
        .filter(|s| s.grounding_chunk_indices.contains(&index))
        .find_map(|s| s.segment.as_ref().and_then(|seg| seg.text.clone()))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageInput;

    #[test]
    fn test_request_shape() {
        let image = ImageInput::new(b"hello".to_vec(), "image/png");
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: image.to_base64(),
                        },
                    },
                    Part::Text { text: "find it" },
                ],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig { temperature: 0.1 },
        };

        let json = serde_json::to_value(&body).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[1]["text"], "find it");
        assert!(json["tools"][0]["googleSearch"].is_object());
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::with_base_url("k", "gemini-3-pro-preview", "http://localhost:9/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn test_parse_grounded_response() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Found "}, {"text": "two posts."}]},
                "groundingMetadata": {
                    "webSearchQueries": ["photo profile"],
                    "groundingChunks": [
                        {"web": {"uri": "https://www.facebook.com/somepage", "title": "Some Page"}},
                        {"web": {"uri": "https://example.com/x"}},
                        {"retrievedContext": {"uri": "gs://bucket/doc"}}
                    ],
                    "groundingSupports": [
                        {"segment": {"text": "Seen on a page"}, "groundingChunkIndices": [0]},
                        {"segment": {"text": "Also here"}, "groundingChunkIndices": [0, 1]}
                    ]
                }
            }]
        }"#;

        let response = parse_response(body).unwrap();
        assert_eq!(response.text.as_deref(), Some("Found two posts."));
        assert_eq!(response.citations.len(), 3);

        let first = response.citations[0].web.as_ref().unwrap();
        assert_eq!(first.uri, "https://www.facebook.com/somepage");
        assert_eq!(first.title.as_deref(), Some("Some Page"));
        assert_eq!(first.snippet.as_deref(), Some("Seen on a page"));

        let second = response.citations[1].web.as_ref().unwrap();
        assert_eq!(second.title, None);
        assert_eq!(second.snippet.as_deref(), Some("Also here"));

        assert!(response.citations[2].web.is_none());
    }

    #[test]
    fn test_parse_without_grounding() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "Nothing."}]}}]}"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response.text.as_deref(), Some("Nothing."));
        assert!(response.citations.is_empty());
    }

    #[test]
    fn test_parse_no_candidates() {
        let err = parse_response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, UpstreamError::NoCandidates));
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Port 1 on loopback refuses connections.
        let client = GeminiClient::with_base_url("k", "m", "http://127.0.0.1:1");
        let image = ImageInput::new(vec![1, 2, 3], "image/jpeg");
        let request = GroundedRequest {
            prompt: "p",
            image: &image,
            temperature: 0.1,
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
