use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temp_f: f64,
    pub condition: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> anyhow::Result<WeatherReport>;
}

/// Non-critical data: callers are expected to degrade to this payload
/// instead of failing the request when the lookup errors out.
pub fn fallback_report(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        temp_f: 72.0,
        condition: "Sunny".to_string(),
    }
}

pub struct HttpWeatherProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWeatherProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn current(&self, city: &str) -> anyhow::Result<WeatherReport> {
        let url = format!("{}/{}?format=j1", self.base_url, city);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to call weather service")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse weather response")?;

        if !status.is_success() {
            anyhow::bail!("weather service error ({status}): {data}");
        }

        let current = &data["current_condition"][0];
        let temp_f = current["temp_F"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow::anyhow!("missing temp_F in weather response"))?;
        let condition = current["weatherDesc"][0]["value"]
            .as_str()
            .unwrap_or("Unknown")
            .to_string();

        Ok(WeatherReport {
            city: city.to_string(),
            temp_f,
            condition,
        })
    }
}
