//! Client for the external image-synthesis API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::constants::{IMAGE_QUALITY, IMAGE_SIZE, IMAGE_STYLE};

/// Errors returned by an [`ImageGenerator`].
#[derive(Debug)]
pub enum GenerationError {
    /// The configured API base URL could not be turned into an endpoint.
    InvalidEndpoint(url::ParseError),
    /// Transport failure, including timeouts.
    Request(reqwest::Error),
    /// The provider answered with a non-success status.
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// The response body was not the expected JSON.
    Decode(serde_json::Error),
    /// The response carried no image URL.
    MissingImage,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEndpoint(err) => write!(f, "Invalid images API endpoint: {err}"),
            Self::Request(err) if err.is_timeout() => {
                write!(f, "Request to images API timed out: {err}")
            }
            Self::Request(err) => write!(f, "Request to images API failed: {err}"),
            Self::Api { status, body } => write!(f, "Images API error {status}: {body}"),
            Self::Decode(err) => write!(f, "Failed to parse images API response: {err}"),
            Self::MissingImage => write!(f, "Images API response did not include an image URL"),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEndpoint(err) => Some(err),
            Self::Request(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Api { .. } | Self::MissingImage => None,
        }
    }
}

/// A successfully generated image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Provider-hosted image URL
    pub image_url: String,
    /// The provider's rewrite of the prompt, or the submitted prompt when it sent none
    pub revised_prompt: String,
}

/// Something that turns a prompt into an image.
#[async_trait]
pub trait ImageGenerator: std::fmt::Debug + Send + Sync {
    /// Requests a single image for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError>;
}

/// Request body for POST /images/generations
#[derive(Serialize, Debug)]
struct ImagesGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    style: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImagesGenerateResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// OpenAI images API client.
#[derive(Clone, Debug)]
pub struct OpenAiImageClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiImageClient {
    /// Builds a client against `base_url` (eg `https://api.openai.com/v1`).
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let endpoint = Url::parse(&format!(
            "{}/images/generations",
            base_url.trim_end_matches('/')
        ))
        .map_err(GenerationError::InvalidEndpoint)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerationError::Request)?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// The full generations endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        let req_body = ImagesGenerateRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
            style: IMAGE_STYLE,
        };
        debug!("Requesting image from {} with model {}", self.endpoint, self.model);

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = resp.status();
        let resp_bytes = resp.bytes().await.map_err(GenerationError::Request)?;
        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&resp_bytes).into_owned(),
            });
        }

        let parsed: ImagesGenerateResponse =
            serde_json::from_slice(&resp_bytes).map_err(GenerationError::Decode)?;

        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or(GenerationError::MissingImage)?;

        let image_url = first
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or(GenerationError::MissingImage)?;

        let revised_prompt = match first.revised_prompt {
            Some(revised) if !revised.trim().is_empty() => {
                info!("Revised prompt from provider: {revised}");
                revised
            }
            _ => prompt.to_string(),
        };

        Ok(GeneratedImage {
            image_url,
            revised_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct FakeProvider {
        status: StatusCode,
        body: Value,
        delay: Duration,
        seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn images_handler(
        State(provider): State<FakeProvider>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        provider.seen.lock().await.push((auth, body));
        tokio::time::sleep(provider.delay).await;
        (provider.status, Json(provider.body.clone()))
    }

    async fn spawn_provider(
        status: StatusCode,
        body: Value,
        delay: Duration,
    ) -> (String, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = FakeProvider {
            status,
            body,
            delay,
            seen: seen.clone(),
        };
        let app = Router::new()
            .route(
                "/v1/images/generations",
                axum::routing::post(images_handler),
            )
            .with_state(provider);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind provider");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}/v1"), seen)
    }

    fn client(base: &str, timeout: Duration) -> OpenAiImageClient {
        OpenAiImageClient::new(base, "sk-test", "dall-e-3", timeout).expect("build client")
    }

    #[test]
    fn endpoint_keeps_version_path() {
        let client = client("https://api.openai.com/v1/", Duration::from_secs(5));
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.openai.com/v1/images/generations"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = OpenAiImageClient::new("not a url", "k", "m", Duration::from_secs(1))
            .expect_err("should fail");
        assert!(matches!(err, GenerationError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn sends_square_hd_vivid_request() {
        let (base, seen) = spawn_provider(
            StatusCode::OK,
            json!({"data": [{"url": "https://img.example/a.png", "revised_prompt": "a nicer prompt"}]}),
            Duration::ZERO,
        )
        .await;

        let image = client(&base, Duration::from_secs(5))
            .generate("a prompt")
            .await
            .expect("generate");
        assert_eq!(image.image_url, "https://img.example/a.png");
        assert_eq!(image.revised_prompt, "a nicer prompt");

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "dall-e-3");
        assert_eq!(body["prompt"], "a prompt");
        assert_eq!(body["n"], 1);
        assert_eq!(body["size"], "1024x1024");
        assert_eq!(body["quality"], "hd");
        assert_eq!(body["style"], "vivid");
    }

    #[tokio::test]
    async fn missing_revised_prompt_falls_back_to_original() {
        let (base, _) = spawn_provider(
            StatusCode::OK,
            json!({"data": [{"url": "https://img.example/b.png"}]}),
            Duration::ZERO,
        )
        .await;

        let image = client(&base, Duration::from_secs(5))
            .generate("original words")
            .await
            .expect("generate");
        assert_eq!(image.revised_prompt, "original words");
    }

    #[tokio::test]
    async fn missing_url_is_missing_image() {
        let (base, _) = spawn_provider(
            StatusCode::OK,
            json!({"data": [{"b64_json": "AAAA"}]}),
            Duration::ZERO,
        )
        .await;
        let err = client(&base, Duration::from_secs(5))
            .generate("x")
            .await
            .expect_err("no url");
        assert!(matches!(err, GenerationError::MissingImage));

        let (base, _) = spawn_provider(StatusCode::OK, json!({"data": []}), Duration::ZERO).await;
        let err = client(&base, Duration::from_secs(5))
            .generate("x")
            .await
            .expect_err("no data");
        assert!(matches!(err, GenerationError::MissingImage));
    }

    #[tokio::test]
    async fn provider_error_status_is_reported() {
        let (base, _) = spawn_provider(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "content policy"}}),
            Duration::ZERO,
        )
        .await;
        let err = client(&base, Duration::from_secs(5))
            .generate("x")
            .await
            .expect_err("api error");
        match err {
            GenerationError::Api { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("content policy"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let (base, _) = spawn_provider(
            StatusCode::OK,
            json!({"data": [{"url": "https://img.example/slow.png"}]}),
            Duration::from_secs(5),
        )
        .await;
        let err = client(&base, Duration::from_millis(100))
            .generate("x")
            .await
            .expect_err("timeout");
        match err {
            GenerationError::Request(inner) => assert!(inner.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
