use async_trait::async_trait;
use phrasebook_config::translator::TranslatorConfig;
use phrasebook_translator::{ProviderMetadata, TranslateError, TranslateResult, Translator, validate_input};
use phrasebook_types::Language;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a professional Chinese-Korean translation assistant.
Rules:
- Return only the translation, without explanations
- Preserve the tone and politeness level of the original
- When translating into Korean, use natural Korean expressions
- When translating into Chinese, use idiomatic Chinese expressions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: std::borrow::Cow<'a, str>,
}

// Only the fields we read; `usage` and the rest are ignored
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// DeepSeek chat-completions client
#[derive(Clone)]
pub struct DeepSeekTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl DeepSeekTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        let defaults = TranslatorConfig::default();
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model: defaults.model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }

    /// Client with the configured model, sampling and request timeout
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.trim().to_string(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body<'a>(&'a self, text: &'a str, to: Language) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Translate into {}: {}", to.english_name(), text).into(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

fn transport_error(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::NetworkTimeout
    } else {
        TranslateError::Unknown(format!("Request failed: {e}"))
    }
}

/// Map a non-success HTTP status to the error taxonomy
pub(crate) fn classify_status(status: u16, message: &str) -> TranslateError {
    match status {
        401 | 403 => TranslateError::ProviderUnauthorized,
        429 => TranslateError::ProviderRateLimited,
        500 => TranslateError::ProviderServerError,
        other => TranslateError::Unknown(format!("HTTP {other}: {message}")),
    }
}

/// Provider's own error message, or the raw body when it has none
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().chars().take(200).collect(),
    }
}

/// Trimmed `choices[0].message.content` of a chat-completions body
pub(crate) fn extract_translation(body: &str) -> TranslateResult<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::ProviderMalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(TranslateError::EmptyTranslation)
}

#[async_trait]
impl Translator for DeepSeekTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> TranslateResult<String> {
        validate_input(text)?;

        if self.api_key.is_empty() {
            return Err(TranslateError::ProviderUnauthorized);
        }

        tracing::debug!("DeepSeek request {} -> {} ({} chars)", from, to, text.chars().count());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text, to))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!("DeepSeek returned HTTP {}: {}", status.as_u16(), message);
            return Err(classify_status(status.as_u16(), &message));
        }

        extract_translation(&body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepSeek".to_string(),
            requires_api_key: true,
            free_tier_available: false,
        }
    }
}
