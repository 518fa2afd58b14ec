use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::ClipscribeError;

/// Client for the public translate endpoint (automatic source detection).
///
/// Callers treat every error here as recoverable: a failed translation is
/// reported and skipped, it never aborts the pipeline.
pub struct Translator {
    client: reqwest::Client,
    endpoint: String,
}

impl Translator {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Translate text into the target language, auto-detecting the source
    pub async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            anyhow::bail!(ClipscribeError::TranslationFailed(
                "nothing to translate".to_string()
            ));
        }

        tracing::debug!("Translating {} characters to {}", trimmed.len(), target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", trimmed),
            ])
            .send()
            .await
            .context("Translation request failed")?;

        if !response.status().is_success() {
            anyhow::bail!(ClipscribeError::TranslationFailed(format!(
                "service returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        collect_segments(&body)
            .ok_or_else(|| anyhow!("Unexpected translation response shape"))
    }
}

/// The endpoint answers with nested arrays; the first element holds the
/// translated chunks as `[translated, original, ...]` pairs.
fn collect_segments(body: &Value) -> Option<String> {
    let chunks = body.get(0)?.as_array()?;

    let mut translated = String::new();
    for chunk in chunks {
        if let Some(piece) = chunk.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }

    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}
