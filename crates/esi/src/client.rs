//! HTTP client for ESI and the image server.

use std::path::PathBuf;
use std::time::Duration;

use evecfg_cache::{CacheManager, EntityKind};

use crate::EsiError;
use crate::types::{Character, Corporation};

/// Base URL of the ESI API.
pub const ESI_BASE: &str = "https://esi.evetech.net/latest/";

/// Base URL of the EVE image server.
pub const IMAGE_BASE: &str = "https://images.evetech.net/";

/// Per-request timeout. No retries on top.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cache-first client for character/corporation metadata and images.
pub struct EsiClient {
    http: reqwest::Client,
    cache: CacheManager,
}

impl EsiClient {
    /// Creates a client over the given content cache.
    pub fn new(cache: CacheManager) -> Result<Self, EsiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, cache })
    }

    /// Returns the underlying content cache.
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Fetches public character information, cache-first.
    pub async fn character(&self, character_id: u64) -> Result<Character, EsiError> {
        let doc = self
            .entity_json(
                character_id,
                EntityKind::Character,
                &format!("{ESI_BASE}characters/{character_id}"),
            )
            .await?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Fetches public corporation information, cache-first.
    pub async fn corporation(&self, corporation_id: u64) -> Result<Corporation, EsiError> {
        let doc = self
            .entity_json(
                corporation_id,
                EntityKind::Corporation,
                &format!("{ESI_BASE}corporations/{corporation_id}"),
            )
            .await?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Downloads a character portrait, cache-first. Returns the cached
    /// file's path.
    pub async fn character_portrait(
        &self,
        character_id: u64,
        size: u32,
    ) -> Result<PathBuf, EsiError> {
        self.entity_image(
            character_id,
            EntityKind::Character,
            &format!("{IMAGE_BASE}characters/{character_id}/portrait?size={size}"),
        )
        .await
    }

    /// Downloads a corporation logo, cache-first. Returns the cached
    /// file's path.
    pub async fn corporation_logo(
        &self,
        corporation_id: u64,
        size: u32,
    ) -> Result<PathBuf, EsiError> {
        self.entity_image(
            corporation_id,
            EntityKind::Corporation,
            &format!("{IMAGE_BASE}corporations/{corporation_id}/logo?size={size}"),
        )
        .await
    }

    async fn entity_json(
        &self,
        id: u64,
        kind: EntityKind,
        url: &str,
    ) -> Result<serde_json::Value, EsiError> {
        let key = id.to_string();
        if let Some(cached) = self.cache.load_json(&key, kind) {
            return Ok(cached);
        }

        tracing::info!(id, kind = %kind, url, "fetching from ESI");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EsiError::Status(status.as_u16(), url.to_string()));
        }

        let doc: serde_json::Value = resp.json().await?;
        self.cache.save_json(&key, kind, &doc)?;
        Ok(doc)
    }

    async fn entity_image(
        &self,
        id: u64,
        kind: EntityKind,
        url: &str,
    ) -> Result<PathBuf, EsiError> {
        let key = id.to_string();
        if let Some(path) = self.cache.load_image(&key, kind) {
            return Ok(path);
        }

        tracing::info!(id, kind = %kind, url, "fetching image");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EsiError::Status(status.as_u16(), url.to_string()));
        }

        let bytes = resp.bytes().await?;
        Ok(self.cache.save_image_bytes(&key, kind, &bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_tmp_cache() -> (tempfile::TempDir, EsiClient) {
        let tmp = tempfile::tempdir().unwrap();
        let cache = CacheManager::with_base(tmp.path().join("cache")).unwrap();
        (tmp, EsiClient::new(cache).unwrap())
    }

    #[tokio::test]
    async fn character_cache_hit_needs_no_network() {
        let (_tmp, client) = client_with_tmp_cache();
        let doc = serde_json::json!({"name": "Cached Pilot", "corporation_id": 98000001});
        client
            .cache()
            .save_json("90001", EntityKind::Character, &doc)
            .unwrap();

        let c = client.character(90001).await.unwrap();
        assert_eq!(c.name, "Cached Pilot");
        assert_eq!(c.corporation_id, Some(98000001));
    }

    #[tokio::test]
    async fn corporation_cache_hit_needs_no_network() {
        let (_tmp, client) = client_with_tmp_cache();
        let doc = serde_json::json!({"name": "Cached Corp", "ticker": "CC"});
        client
            .cache()
            .save_json("98000001", EntityKind::Corporation, &doc)
            .unwrap();

        let c = client.corporation(98000001).await.unwrap();
        assert_eq!(c.ticker.as_deref(), Some("CC"));
    }

    #[tokio::test]
    async fn portrait_cache_hit_returns_path() {
        let (_tmp, client) = client_with_tmp_cache();
        let saved = client
            .cache()
            .save_image_bytes("90001", EntityKind::Character, b"png")
            .unwrap();

        let path = client.character_portrait(90001, 64).await.unwrap();
        assert_eq!(path, saved);
    }
}
