use crate::video::Video;

/// Header lines emitted ahead of the year sections. The parser skips them
/// as unrecognized text.
pub const DOC_TITLE: &str = "# Go Meetup Prague Videos";
pub const DOC_INTRO: &str =
    "Auto-generated list of all videos from the Go Meetup Prague YouTube channel.";

/// Heading and label literals shared by the writer and the parser. These
/// form the document's format contract; changing one side without the other
/// breaks round-tripping.
pub const YEAR_HEADING: &str = "## ";
pub const VIDEO_HEADING: &str = "### ";
pub const LABEL_ID: &str = "- **Video ID**: ";
pub const LABEL_PUBLISHED: &str = "- **Published**: ";
pub const LABEL_URL: &str = "- **URL**: ";

/// Videos grouped by publish year, newest first on both levels.
pub struct Catalog {
    /// (year, videos) pairs in descending year order
    pub years: Vec<(i32, Vec<Video>)>,
}

impl Catalog {
    /// Sort newest-first and bucket by year. The sort is stable, so videos
    /// sharing a timestamp keep their fetched order.
    pub fn from_videos(mut videos: Vec<Video>) -> Self {
        videos.sort_by(|a, b| b.published.cmp(&a.published));

        // Years are contiguous after the sort and first seen in descending
        // order, so a new bucket starts whenever the year changes.
        let mut years: Vec<(i32, Vec<Video>)> = Vec::new();
        for video in videos {
            if let Some((year, bucket)) = years.last_mut() {
                if *year == video.year {
                    bucket.push(video);
                    continue;
                }
            }
            years.push((video.year, vec![video]));
        }

        Self { years }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str, published: &str) -> Video {
        Video::new(id.to_string(), title.to_string(), published.parse().unwrap())
    }

    #[test]
    fn test_groups_descending_by_year_and_date() {
        let catalog = Catalog::from_videos(vec![
            video("c3", "Kickoff", "2022-01-01T09:00:00Z"),
            video("a1", "Intro to Goroutines", "2023-09-05T10:00:00Z"),
            video("b2", "Panel", "2023-02-01T09:00:00Z"),
        ]);

        assert_eq!(catalog.years.len(), 2);

        let (year, videos) = &catalog.years[0];
        assert_eq!(*year, 2023);
        assert_eq!(videos[0].id, "a1");
        assert_eq!(videos[1].id, "b2");

        let (year, videos) = &catalog.years[1];
        assert_eq!(*year, 2022);
        assert_eq!(videos[0].id, "c3");
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let catalog = Catalog::from_videos(vec![
            video("a1", "First", "2023-09-05T10:00:00Z"),
            video("b2", "Second", "2023-09-05T10:00:00Z"),
        ]);

        let (_, videos) = &catalog.years[0];
        assert_eq!(videos[0].id, "a1");
        assert_eq!(videos[1].id, "b2");
    }

    #[test]
    fn test_dates_non_increasing_within_year() {
        let catalog = Catalog::from_videos(vec![
            video("b2", "Panel", "2023-02-01T09:00:00Z"),
            video("a1", "Intro to Goroutines", "2023-09-05T10:00:00Z"),
            video("d4", "Workshop", "2023-09-05T09:59:00Z"),
        ]);

        let (_, videos) = &catalog.years[0];
        for pair in videos.windows(2) {
            assert!(pair[0].published >= pair[1].published);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_catalog() {
        let catalog = Catalog::from_videos(Vec::new());
        assert!(catalog.years.is_empty());
    }
}
