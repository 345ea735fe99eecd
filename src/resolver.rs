//! Link identity resolution.
//!
//! Recognized store pages and video links can supply the title and header
//! image an LFG post needs without the caller typing them. Recognition is
//! pure string work; only the store metadata lookup touches the network,
//! behind the [`IdentityResolver`] trait so routing stays testable.

use crate::errors::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

static STEAM_URL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"store\.steampowered\.com/app/(\d+)(?:/([^/?#]+))?").unwrap()
});

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{6,})").unwrap()
});

/// Title and image derived from a submitted url.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedMedia {
    /// Canonical title, when the url identifies the game itself
    pub title: Option<String>,
    /// Header or thumbnail image url
    pub image_url: Option<String>,
}

/// Resolves a submitted url into whatever identity it can supply.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves `url`. Unrecognized urls yield an empty [`ResolvedMedia`];
    /// lookup failures degrade to whatever could be derived offline.
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia>;
}

/// The Steam app id embedded in a store page url.
#[must_use]
pub fn steam_app_id(url: &str) -> Option<&str> {
    Some(STEAM_URL.captures(url)?.get(1)?.as_str())
}

/// The title slug of a store page url, with underscores restored to spaces.
#[must_use]
pub fn steam_title_from_url(url: &str) -> Option<String> {
    let slug = STEAM_URL.captures(url)?.get(2)?.as_str();
    Some(slug.replace('_', " "))
}

/// The video id of a watch or short link.
#[must_use]
pub fn youtube_id(url: &str) -> Option<&str> {
    Some(YOUTUBE_URL.captures(url)?.get(1)?.as_str())
}

/// The highest-resolution thumbnail for a video id.
#[must_use]
pub fn youtube_thumbnail(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}

#[derive(Debug, Deserialize)]
struct SteamAppEntry {
    success: bool,
    data: Option<SteamAppData>,
}

#[derive(Debug, Deserialize)]
struct SteamAppData {
    name: Option<String>,
    header_image: Option<String>,
}

/// Resolver backed by the public Steam storefront API.
#[derive(Debug)]
pub struct HttpResolver {
    client: reqwest::Client,
}

impl HttpResolver {
    /// Creates a resolver with a dedicated HTTP client.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Looks up a Steam app's name and header image. Any failure degrades
    /// to the url-derived title so the command can still go through.
    async fn resolve_steam(&self, url: &str, app_id: &str) -> ResolvedMedia {
        let fallback = ResolvedMedia {
            title: steam_title_from_url(url),
            image_url: None,
        };

        let request = self
            .client
            .get("https://store.steampowered.com/api/appdetails")
            .query(&[("appids", app_id)])
            .send();
        let response = match request.await.and_then(reqwest::Response::error_for_status) {
            Ok(response) => response,
            Err(error) => {
                warn!(app_id, %error, "steam appdetails request failed");
                return fallback;
            }
        };

        let body: HashMap<String, SteamAppEntry> = match response.json().await {
            Ok(body) => body,
            Err(error) => {
                warn!(app_id, %error, "steam appdetails body was not parseable");
                return fallback;
            }
        };

        let Some(data) = body
            .get(app_id)
            .filter(|entry| entry.success)
            .and_then(|entry| entry.data.as_ref())
        else {
            warn!(app_id, "steam appdetails lookup returned no data");
            return fallback;
        };

        ResolvedMedia {
            title: data.name.clone().or(fallback.title),
            image_url: data.header_image.clone(),
        }
    }
}

#[async_trait]
impl IdentityResolver for HttpResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia> {
        if let Some(app_id) = steam_app_id(url) {
            return Ok(self.resolve_steam(url, app_id).await);
        }
        if let Some(video_id) = youtube_id(url) {
            return Ok(ResolvedMedia {
                title: None,
                image_url: Some(youtube_thumbnail(video_id)),
            });
        }
        Ok(ResolvedMedia::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_steam_app_id_extraction() {
        assert_eq!(
            steam_app_id("https://store.steampowered.com/app/427520/Factorio/"),
            Some("427520")
        );
        assert_eq!(
            steam_app_id("https://store.steampowered.com/app/427520"),
            Some("427520")
        );
        assert_eq!(steam_app_id("https://example.com/app/1"), None);
    }

    #[test]
    fn test_steam_title_slug_restores_spaces() {
        assert_eq!(
            steam_title_from_url(
                "https://store.steampowered.com/app/1086940/Baldurs_Gate_3/"
            ),
            Some("Baldurs Gate 3".to_string())
        );
        assert_eq!(
            steam_title_from_url("https://store.steampowered.com/app/427520"),
            None
        );
    }

    #[test]
    fn test_youtube_id_extraction() {
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_id("https://vimeo.com/123"), None);
    }

    #[test]
    fn test_youtube_thumbnail_url() {
        assert_eq!(
            youtube_thumbnail("abc123xyz"),
            "https://img.youtube.com/vi/abc123xyz/maxresdefault.jpg"
        );
    }
}
