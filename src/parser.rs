use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::catalog::{LABEL_ID, LABEL_PUBLISHED, LABEL_URL, VIDEO_HEADING, YEAR_HEADING};

/// One video as recovered from the document. Fields the document lacked
/// stay empty instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedVideo {
    pub title: String,
    pub id: String,
    pub published: String,
    pub url: String,
}

/// Year groups in descending year order, the shape consumed by the site's
/// data layer.
#[derive(Debug, Serialize)]
pub struct ParsedCatalog {
    pub years: Vec<YearGroup>,
}

#[derive(Debug, Serialize)]
pub struct YearGroup {
    pub year: i32,
    pub videos: Vec<ParsedVideo>,
}

/// Parser position: before any year section, inside one, or mid-video.
enum State {
    NoYear,
    InYear { year: i32 },
    InVideo { year: i32, video: ParsedVideo },
}

impl State {
    /// Push any in-progress video into its year bucket. Called on every
    /// section transition and at end of input, so a video is always filed
    /// under the year that was current when its heading appeared.
    fn flush(self, buckets: &mut BTreeMap<i32, Vec<ParsedVideo>>) -> State {
        match self {
            State::InVideo { year, video } => {
                buckets.entry(year).or_default().push(video);
                State::InYear { year }
            }
            other => other,
        }
    }
}

/// Recover the year groups from the document text.
///
/// Line-oriented state machine; lines matching no heading or label prefix
/// (blank separators, the document header, stray text) are skipped. Nothing
/// here fails: malformed input degrades to missing fields or dropped
/// entries.
pub fn parse(text: &str) -> ParsedCatalog {
    let mut buckets: BTreeMap<i32, Vec<ParsedVideo>> = BTreeMap::new();
    let mut state = State::NoYear;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(label) = line.strip_prefix(YEAR_HEADING) {
            // A heading whose label is not an integer is treated as stray
            // text rather than opening a bucket that could never be sorted.
            if let Ok(year) = label.trim().parse::<i32>() {
                state = state.flush(&mut buckets);
                buckets.insert(year, Vec::new());
                state = State::InYear { year };
            }
        } else if let Some(title) = line.strip_prefix(VIDEO_HEADING) {
            // Before any year section a video has no bucket to land in, so
            // its heading is dropped like any other unrecognized line.
            state = match state.flush(&mut buckets) {
                State::InYear { year } => State::InVideo {
                    year,
                    video: ParsedVideo {
                        title: title.to_string(),
                        ..Default::default()
                    },
                },
                other => other,
            };
        } else if let Some(value) = line.strip_prefix(LABEL_ID) {
            if let State::InVideo { video, .. } = &mut state {
                video.id = value.to_string();
            }
        } else if let Some(value) = line.strip_prefix(LABEL_PUBLISHED) {
            if let State::InVideo { video, .. } = &mut state {
                video.published = value.to_string();
            }
        } else if let Some(value) = line.strip_prefix(LABEL_URL) {
            if let State::InVideo { video, .. } = &mut state {
                video.url = value.to_string();
            }
        }
    }

    state.flush(&mut buckets);

    let years = buckets
        .into_iter()
        .rev()
        .map(|(year, videos)| YearGroup { year, videos })
        .collect();

    ParsedCatalog { years }
}

/// Serialize the parsed catalog as pretty JSON, creating parent directories
/// as needed.
pub fn write_json(catalog: &ParsedCatalog, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(catalog).context("failed to serialize catalog")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
