//! HTTP client for the grove server API.

use anyhow::Result;
use grove_core::{EstateStats, PlotCoord};
use serde::Deserialize;

/// Client for the grove server REST API.
pub struct GroveClient {
    base_url: String,
    client: reqwest::Client,
}

/// Response to a create/plant request.
#[derive(Debug, Deserialize)]
pub struct Created {
    pub id: String,
}

/// Response to a drone-plan request.
#[derive(Debug, Deserialize)]
pub struct DronePlan {
    pub distance: u64,
    #[serde(default)]
    pub rest: Option<PlotCoord>,
}

impl GroveClient {
    /// Create a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new estate of `width` x `length` plots.
    pub async fn create_estate(&self, width: u32, length: u32) -> Result<Created> {
        let url = format!("{}/v1/estates", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "width": width, "length": length }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("create estate failed: {}", response.text().await?);
        }
        Ok(response.json().await?)
    }

    /// Plant a tree at `(x, y)` in an estate.
    pub async fn plant_tree(&self, estate_id: &str, x: u32, y: u32, height: u8) -> Result<Created> {
        let url = format!("{}/v1/estates/{}/trees", self.base_url, estate_id);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "x": x, "y": y, "height": height }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("plant tree failed: {}", response.text().await?);
        }
        Ok(response.json().await?)
    }

    /// Fetch the aggregate tree statistics of an estate.
    pub async fn estate_stats(&self, estate_id: &str) -> Result<EstateStats> {
        let url = format!("{}/v1/estates/{}/stats", self.base_url, estate_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("stats request failed: {}", response.text().await?);
        }
        Ok(response.json().await?)
    }

    /// Request a drone survey plan, optionally capped to a travel budget.
    pub async fn drone_plan(&self, estate_id: &str, max_distance: Option<u64>) -> Result<DronePlan> {
        let mut url = format!("{}/v1/estates/{}/drone-plan", self.base_url, estate_id);
        if let Some(max) = max_distance {
            url.push_str(&format!("?max_distance={}", max));
        }
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("drone plan request failed: {}", response.text().await?);
        }
        Ok(response.json().await?)
    }
}
