use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Free-text business advice given a question and the metrics the
    /// dashboard already computed. Failures propagate to the caller.
    async fn advise(&self, question: &str, metrics: &serde_json::Value) -> anyhow::Result<String>;
}

pub struct ChatCompletionProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ChatCompletionProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl InsightProvider for ChatCompletionProvider {
    async fn advise(&self, question: &str, metrics: &serde_json::Value) -> anyhow::Result<String> {
        let system_prompt = format!(
            "You are a business advisor for an appointment-booking platform. \
             Answer briefly and concretely. Current metrics for this business: {metrics}"
        );

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": question },
            ],
            "temperature": 0.7,
        });

        let resp = self
            .client
            .post("https://api.groq.com/openai/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call insights API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse insights response")?;

        if !status.is_success() {
            anyhow::bail!("insights API error ({status}): {data}");
        }

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing content in insights response"))
    }
}
