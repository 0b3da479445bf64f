use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::catalog::{
    Catalog, DOC_INTRO, DOC_TITLE, LABEL_ID, LABEL_PUBLISHED, LABEL_URL, VIDEO_HEADING,
    YEAR_HEADING,
};

/// Render the catalog document. Deterministic: the same catalog always
/// produces byte-identical output.
pub fn render(catalog: &Catalog) -> String {
    let mut doc = String::new();
    doc.push_str(DOC_TITLE);
    doc.push_str("\n\n");
    doc.push_str(DOC_INTRO);
    doc.push_str("\n\n");

    for (year, videos) in &catalog.years {
        doc.push_str(&format!("{}{}\n\n", YEAR_HEADING, year));
        for video in videos {
            doc.push_str(&format!("{}{}\n", VIDEO_HEADING, video.title));
            doc.push_str(&format!("{}{}\n", LABEL_ID, video.id));
            // Day precision only; sub-day precision is dropped on purpose
            doc.push_str(&format!(
                "{}{}\n",
                LABEL_PUBLISHED,
                video.published.format("%Y-%m-%d")
            ));
            doc.push_str(&format!("{}{}\n\n", LABEL_URL, video.url));
        }
    }

    doc
}

/// Write the rendered document, creating parent directories as needed.
pub fn write_markdown(catalog: &Catalog, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, render(catalog)).with_context(|| format!("failed to write {}", path.display()))
}
