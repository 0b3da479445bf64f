use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::video::Video;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
/// Maximum page size the search endpoint accepts
const PAGE_SIZE: u32 = 50;

/// One page of the paginated search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: ItemId,
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemId {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub published_at: String,
}

/// Fetch the complete video list for the configured channel.
pub fn fetch_all(config: &ApiConfig) -> anyhow::Result<Vec<Video>> {
    let client = reqwest::blocking::Client::new();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} fetching page {msg}")
            .unwrap(),
    );

    let mut page = 0u32;
    let videos = collect_pages(|token| {
        page += 1;
        pb.set_message(page.to_string());
        pb.tick();
        request_page(&client, config, token)
    })?;

    pb.finish_and_clear();
    Ok(videos)
}

/// Drive the page chain: each request carries the previous page's
/// continuation token, so pages are strictly sequential. Stops when the API
/// returns no further token; any page error aborts the whole fetch.
fn collect_pages<F>(mut next_page: F) -> anyhow::Result<Vec<Video>>
where
    F: FnMut(Option<&str>) -> anyhow::Result<SearchResponse>,
{
    let mut videos = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = next_page(token.as_deref())?;

        for item in page.items {
            let published: DateTime<Utc> = item
                .snippet
                .published_at
                .parse()
                .with_context(|| format!("invalid publishedAt for video {}", item.id.video_id))?;
            videos.push(Video::new(item.id.video_id, item.snippet.title, published));
        }

        match page.next_page_token {
            Some(t) => token = Some(t),
            None => break,
        }
    }

    Ok(videos)
}

fn request_page(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    token: Option<&str>,
) -> anyhow::Result<SearchResponse> {
    let mut query: Vec<(&str, String)> = vec![
        ("key", config.api_key.clone()),
        ("channelId", config.channel_id.clone()),
        ("part", "snippet".to_string()),
        ("type", "video".to_string()),
        ("maxResults", PAGE_SIZE.to_string()),
        ("order", "date".to_string()),
    ];
    if let Some(token) = token {
        query.push(("pageToken", token.to_string()));
    }

    let response = client
        .get(SEARCH_URL)
        .query(&query)
        .send()
        .context("search request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        bail!("YouTube API error ({}): {}", status, body);
    }

    response.json().context("failed to decode search response")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, published: &str) -> SearchItem {
        SearchItem {
            id: ItemId {
                video_id: id.to_string(),
            },
            snippet: Snippet {
                title: title.to_string(),
                published_at: published.to_string(),
            },
        }
    }

    #[test]
    fn test_decode_search_response() {
        let raw = r#"{
            "kind": "youtube#searchListResponse",
            "nextPageToken": "CAUQAA",
            "pageInfo": { "totalResults": 123, "resultsPerPage": 50 },
            "items": [
                {
                    "kind": "youtube#searchResult",
                    "id": { "kind": "youtube#video", "videoId": "dQw4w9WgXcQ" },
                    "snippet": {
                        "publishedAt": "2023-09-05T10:00:00Z",
                        "channelId": "UCabc",
                        "title": "Intro to Goroutines",
                        "description": ""
                    }
                }
            ]
        }"#;

        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.next_page_token.as_deref(), Some("CAUQAA"));
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.items[0].id.video_id, "dQw4w9WgXcQ");
        assert_eq!(resp.items[0].snippet.title, "Intro to Goroutines");
        assert_eq!(resp.items[0].snippet.published_at, "2023-09-05T10:00:00Z");
    }

    #[test]
    fn test_decode_last_page_without_token() {
        let resp: SearchResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(resp.next_page_token.is_none());
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_page_chain_threads_tokens() {
        let mut seen = Vec::new();
        let videos = collect_pages(|token| {
            seen.push(token.map(str::to_string));
            Ok(match token {
                None => SearchResponse {
                    items: vec![item("a1", "First", "2023-09-05T10:00:00Z")],
                    next_page_token: Some("t1".to_string()),
                },
                Some("t1") => SearchResponse {
                    items: vec![item("b2", "Second", "2023-02-01T09:00:00Z")],
                    next_page_token: None,
                },
                Some(other) => panic!("unexpected token {}", other),
            })
        })
        .unwrap();

        assert_eq!(seen, vec![None, Some("t1".to_string())]);
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "a1");
        assert_eq!(videos[0].year, 2023);
        assert_eq!(videos[1].id, "b2");
    }

    #[test]
    fn test_page_error_aborts_fetch() {
        let mut calls = 0;
        let result = collect_pages(|token| {
            calls += 1;
            match token {
                None => Ok(SearchResponse {
                    items: vec![item("a1", "First", "2023-09-05T10:00:00Z")],
                    next_page_token: Some("t1".to_string()),
                }),
                Some(_) => bail!("quota exceeded"),
            }
        });

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_bad_timestamp_is_fatal() {
        let result = collect_pages(|_| {
            Ok(SearchResponse {
                items: vec![item("a1", "First", "yesterday")],
                next_page_token: None,
            })
        });

        let err = result.unwrap_err().to_string();
        assert!(err.contains("a1"), "unexpected error: {}", err);
    }
}
