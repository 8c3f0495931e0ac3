//! Catalog query client.
//!
//! Read-only lookups against the track catalog: free-text search per
//! category, and detail lookups by source id (albums carry a nested track
//! list, artists a nested album list).  The response shapes below are the
//! service's contract; anything that fails — transport, status, or body —
//! collapses into one generic user-facing message upstream, with the real
//! cause logged here.

use serde::Deserialize;
use thiserror::Error;

use crate::surface::{Category, ResultNode};

/// The one message users ever see for a failed catalog query.
pub const USER_FACING_ERROR: &str = "Woah! Something went wrong!";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed catalog response: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ── Response shapes ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    name: String,
    href: String,
    #[serde(default)]
    artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct TrackSearchResponse {
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct AlbumEntry {
    name: String,
    href: String,
    #[serde(default)]
    artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct AlbumSearchResponse {
    albums: Vec<AlbumEntry>,
}

#[derive(Debug, Deserialize)]
struct ArtistEntry {
    name: String,
    href: String,
}

#[derive(Debug, Deserialize)]
struct ArtistSearchResponse {
    artists: Vec<ArtistEntry>,
}

#[derive(Debug, Deserialize)]
struct AlbumLookupResponse {
    album: AlbumDetail,
}

/// Album detail: header info plus the full track list.
#[derive(Debug, Deserialize)]
pub struct AlbumDetail {
    pub artist: String,
    pub name: String,
    #[serde(default)]
    tracks: Vec<TrackEntry>,
}

impl AlbumDetail {
    pub fn header(&self) -> String {
        format!("{} - {}", self.artist, self.name)
    }

    pub fn track_nodes(&self) -> Vec<ResultNode> {
        self.tracks
            .iter()
            .map(|t| ResultNode {
                category: Category::Tracks,
                source: t.href.clone(),
                label: track_label(t),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ArtistLookupResponse {
    artist: ArtistDetail,
}

#[derive(Debug, Deserialize)]
struct AlbumWrap {
    album: AlbumRef,
}

#[derive(Debug, Deserialize)]
struct AlbumRef {
    artist: String,
    name: String,
    href: String,
}

/// Artist detail: name plus the artist's albums.
#[derive(Debug, Deserialize)]
pub struct ArtistDetail {
    pub name: String,
    #[serde(default)]
    albums: Vec<AlbumWrap>,
}

impl ArtistDetail {
    pub fn album_nodes(&self) -> Vec<ResultNode> {
        self.albums
            .iter()
            .map(|w| ResultNode {
                category: Category::Albums,
                source: w.album.href.clone(),
                label: format!("{} - {}", w.album.artist, w.album.name),
            })
            .collect()
    }
}

fn track_label(track: &TrackEntry) -> String {
    match track.artists.first() {
        Some(artist) => format!("{} - {}", artist.name, track.name),
        None => track.name.clone(),
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

async fn get_json(url: &str) -> Result<String, CatalogError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status()));
    }

    Ok(response.text().await?)
}

/// Free-text search in one category.  The three categories of a submission
/// run as independent requests and may complete in any order.
pub async fn search(
    base_url: &str,
    category: Category,
    term: &str,
) -> Result<Vec<ResultNode>, CatalogError> {
    let kind = match category {
        Category::Tracks => "track",
        Category::Albums => "album",
        Category::Artists => "artist",
    };
    let url = format!(
        "{}/search/1/{}.json?q={}",
        base_url,
        kind,
        urlencoding::encode(term)
    );
    tracing::debug!(%category, %url, "catalog search");
    let body = get_json(&url).await?;

    let nodes = match category {
        Category::Tracks => {
            let parsed: TrackSearchResponse = serde_json::from_str(&body)?;
            parsed
                .tracks
                .iter()
                .map(|t| ResultNode {
                    category,
                    source: t.href.clone(),
                    label: track_label(t),
                })
                .collect()
        }
        Category::Albums => {
            let parsed: AlbumSearchResponse = serde_json::from_str(&body)?;
            parsed
                .albums
                .into_iter()
                .map(|a| ResultNode {
                    category,
                    source: a.href,
                    label: match a.artists.first() {
                        Some(artist) => format!("{} - {}", artist.name, a.name),
                        None => a.name,
                    },
                })
                .collect()
        }
        Category::Artists => {
            let parsed: ArtistSearchResponse = serde_json::from_str(&body)?;
            parsed
                .artists
                .into_iter()
                .map(|a| ResultNode {
                    category,
                    source: a.href,
                    label: a.name,
                })
                .collect()
        }
    };

    Ok(nodes)
}

/// Album detail by source id, including the track list.
pub async fn lookup_album(base_url: &str, source: &str) -> Result<AlbumDetail, CatalogError> {
    let url = format!(
        "{}/lookup/1/.json?uri={}&extras=track",
        base_url,
        urlencoding::encode(source)
    );
    tracing::debug!(%url, "catalog album lookup");
    let body = get_json(&url).await?;
    let parsed: AlbumLookupResponse = serde_json::from_str(&body)?;
    Ok(parsed.album)
}

/// Artist detail by source id, including the album list.
pub async fn lookup_artist(base_url: &str, source: &str) -> Result<ArtistDetail, CatalogError> {
    let url = format!(
        "{}/lookup/1/.json?uri={}&extras=album",
        base_url,
        urlencoding::encode(source)
    );
    tracing::debug!(%url, "catalog artist lookup");
    let body = get_json(&url).await?;
    let parsed: ArtistLookupResponse = serde_json::from_str(&body)?;
    Ok(parsed.artist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_search_response_shape() {
        let body = r#"{
            "tracks": [
                {"name": "Olson", "href": "spotify:track:abc",
                 "artists": [{"name": "Boards of Canada"}]},
                {"name": "Untitled", "href": "spotify:track:def", "artists": []}
            ]
        }"#;
        let parsed: TrackSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.tracks.len(), 2);
        assert_eq!(track_label(&parsed.tracks[0]), "Boards of Canada - Olson");
        // A track without artist credits falls back to the bare name.
        assert_eq!(track_label(&parsed.tracks[1]), "Untitled");
    }

    #[test]
    fn test_album_lookup_response_shape() {
        let body = r#"{
            "album": {
                "artist": "Burial", "name": "Untrue",
                "tracks": [
                    {"name": "Archangel", "href": "spotify:track:a1",
                     "artists": [{"name": "Burial"}]}
                ]
            }
        }"#;
        let parsed: AlbumLookupResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.album.header(), "Burial - Untrue");
        let nodes = parsed.album.track_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].category, Category::Tracks);
        assert_eq!(nodes[0].label, "Burial - Archangel");
    }

    #[test]
    fn test_artist_lookup_response_shape() {
        let body = r#"{
            "artist": {
                "name": "Arovane",
                "albums": [
                    {"album": {"artist": "Arovane", "name": "Tides",
                               "href": "spotify:album:x1"}}
                ]
            }
        }"#;
        let parsed: ArtistLookupResponse = serde_json::from_str(body).unwrap();
        let nodes = parsed.artist.album_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].category, Category::Albums);
        assert_eq!(nodes[0].label, "Arovane - Tides");
        assert_eq!(nodes[0].source, "spotify:album:x1");
    }

    #[test]
    fn test_malformed_body_is_its_own_error() {
        let err = serde_json::from_str::<TrackSearchResponse>("{\"nope\": 1}")
            .map_err(CatalogError::from)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }
}
