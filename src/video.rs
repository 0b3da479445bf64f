use chrono::{DateTime, Datelike, Utc};

/// Embed URL for a video, derived from its platform id.
pub fn embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", id)
}

#[derive(Debug, Clone)]
pub struct Video {
    /// Platform-assigned video identifier
    pub id: String,
    /// Display title as returned by the API
    pub title: String,
    /// Publish instant, full precision
    pub published: DateTime<Utc>,
    /// Embed URL, always re-derivable from the id
    pub url: String,
    /// Publish year, the grouping key
    pub year: i32,
}

impl Video {
    pub fn new(id: String, title: String, published: DateTime<Utc>) -> Self {
        let url = embed_url(&id);
        let year = published.year();
        Self {
            id,
            title,
            published,
            url,
            year,
        }
    }
}
