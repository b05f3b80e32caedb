//! Query service - the read side of the content API
//!
//! Each call loads the collection fresh from the store, so results always
//! reflect the current file set.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::content::{BlogEntry, ContentStore, LoadError, ResumeItem, ResumeKind};
use crate::helpers;

/// Projection of a blog post returned by `/api/posts`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub collection: String,
    pub slug: String,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "helpers::json_date::serialize")]
    pub pub_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl From<BlogEntry> for PostSummary {
    fn from(entry: BlogEntry) -> Self {
        let url = entry.url();
        Self {
            collection: entry.collection,
            slug: entry.slug,
            url,
            title: entry.data.title,
            description: entry.data.description,
            pub_date: entry.data.pub_date,
            tags: entry.data.tags,
        }
    }
}

/// List blog posts, newest first, optionally filtered by tag
pub fn list_posts(store: &ContentStore, tag: Option<&str>) -> Result<Vec<PostSummary>, LoadError> {
    let entries = store.load_blog()?;
    Ok(select_posts(entries, tag))
}

/// Sort, filter and project already-loaded posts
pub fn select_posts(mut entries: Vec<BlogEntry>, tag: Option<&str>) -> Vec<PostSummary> {
    sort_newest_first(&mut entries);

    let tag = tag.filter(|t| !t.is_empty());
    entries
        .into_iter()
        .filter(|entry| match tag {
            Some(tag) => matches_tag(entry.data.tags.as_deref(), tag),
            None => true,
        })
        .map(PostSummary::from)
        .collect()
}

/// Order posts by publication date descending, then slug ascending
pub fn sort_newest_first(entries: &mut [BlogEntry]) {
    entries.sort_by(|a, b| {
        b.data
            .pub_date
            .cmp(&a.data.pub_date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Tag filter used by the posts endpoint
///
/// The filter is matched as a substring of the tags joined by single spaces,
/// so `script` matches `javascript` and `blog test` matches `["blog", "test"]`.
/// Posts without a tags field never match.
pub fn matches_tag(tags: Option<&[String]>, filter: &str) -> bool {
    match tags {
        Some(tags) => tags.join(" ").contains(filter),
        None => false,
    }
}

/// Count posts per tag, most used first (ties by name)
pub fn tag_counts(entries: &[BlogEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in entries.iter().flat_map(|e| e.data.tags.iter().flatten()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// One row of a resume timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub title: String,
    pub subtitle: String,
    pub start_year: String,
    pub end_year: String,
    pub url: String,
}

/// Academic history: degree over school
pub fn academic_timeline(items: &[ResumeItem]) -> Vec<TimelineItem> {
    timeline(items, ResumeKind::Academic, |item| {
        (item.degree.as_deref(), item.school.as_deref())
    })
}

/// Work history: position over employer
pub fn work_timeline(items: &[ResumeItem]) -> Vec<TimelineItem> {
    timeline(items, ResumeKind::Work, |item| {
        (item.position.as_deref(), item.employer.as_deref())
    })
}

fn timeline<F>(items: &[ResumeItem], kind: ResumeKind, labels: F) -> Vec<TimelineItem>
where
    F: Fn(&ResumeItem) -> (Option<&str>, Option<&str>),
{
    items
        .iter()
        .filter(|item| item.kind == kind)
        .map(|item| {
            let (title, subtitle) = labels(item);
            TimelineItem {
                title: title.unwrap_or_default().to_string(),
                subtitle: subtitle.unwrap_or_default().to_string(),
                start_year: item.start.clone(),
                end_year: item.end.clone(),
                url: item.url.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlogData;
    use crate::test_support::{post, write_file};
    use std::path::PathBuf;

    fn entry(slug: &str, date: &str, tags: Option<&[&str]>) -> BlogEntry {
        BlogEntry {
            collection: "blog".to_string(),
            slug: slug.to_string(),
            source: PathBuf::from(format!("{}.md", slug)),
            data: BlogData {
                title: format!("Title {}", slug),
                description: format!("Description {}", slug),
                pub_date: helpers::parse_date_string(date).unwrap(),
                updated_date: None,
                hero_image: None,
                tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
            },
        }
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    fn dataset() -> Vec<BlogEntry> {
        vec![
            entry("one", "2021-01-01", None),
            entry("two", "2021-01-02", Some(&["test", "blog"])),
            entry("three", "2021-01-03", Some(&["test", "blog"])),
        ]
    }

    #[test]
    fn test_sorted_newest_first() {
        let posts = select_posts(dataset(), None);
        assert_eq!(slugs(&posts), vec!["three", "two", "one"]);
        let dates: Vec<_> = posts.iter().map(|p| helpers::date_json(&p.pub_date)).collect();
        assert_eq!(
            dates,
            vec![
                "2021-01-03T00:00:00.000Z",
                "2021-01-02T00:00:00.000Z",
                "2021-01-01T00:00:00.000Z"
            ]
        );
    }

    #[test]
    fn test_equal_dates_break_ties_by_slug() {
        let entries = vec![
            entry("b", "2021-01-01", None),
            entry("c", "2021-01-02", None),
            entry("a", "2021-01-01", None),
        ];
        assert_eq!(slugs(&select_posts(entries, None)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_filter_excludes_untagged() {
        let posts = select_posts(dataset(), Some("blog"));
        assert_eq!(slugs(&posts), vec!["three", "two"]);
    }

    #[test]
    fn test_filter_matches_any_position() {
        let entries = vec![entry("x", "2021-01-01", Some(&["test", "blog", "integration"]))];
        assert_eq!(select_posts(entries.clone(), Some("blog")).len(), 1);
        assert_eq!(select_posts(entries, Some("integration")).len(), 1);
    }

    #[test]
    fn test_filter_is_substring_of_joined_tags() {
        let tags = vec!["javascript".to_string()];
        assert!(matches_tag(Some(tags.as_slice()), "script"));

        let tags = vec!["blog".to_string(), "test".to_string()];
        assert!(matches_tag(Some(tags.as_slice()), "blog test"));
        assert!(!matches_tag(Some(tags.as_slice()), "test blog"));

        let empty: Vec<String> = Vec::new();
        assert!(!matches_tag(Some(empty.as_slice()), "blog"));
        assert!(!matches_tag(None, "blog"));
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(select_posts(dataset(), Some("not-a-tag")).is_empty());
    }

    #[test]
    fn test_empty_filter_is_no_filter() {
        assert_eq!(select_posts(dataset(), Some("")).len(), 3);
    }

    #[test]
    fn test_projection_shape() {
        let posts = select_posts(dataset(), Some("test"));
        let json = serde_json::to_value(&posts[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "collection": "blog",
                "slug": "three",
                "url": "/blog/three",
                "title": "Title three",
                "description": "Description three",
                "pubDate": "2021-01-03T00:00:00.000Z",
                "tags": ["test", "blog"]
            })
        );

        let untagged = select_posts(dataset(), None).pop().unwrap();
        let json = serde_json::to_value(&untagged).unwrap();
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_list_posts_from_store() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "blog/test-1.md", &post("Test Blog 1", "2021-01-01", None));
        write_file(
            dir.path(),
            "blog/test-2.md",
            &post("Test Blog 2", "2021-01-02", Some(&["test", "blog"])),
        );
        write_file(
            dir.path(),
            "blog/test-3.md",
            &post("Test Blog 3", "2021-01-03", Some(&["test", "blog"])),
        );

        let store = ContentStore::new(dir.path());
        let all = list_posts(&store, None).unwrap();
        assert_eq!(slugs(&all), vec!["test-3", "test-2", "test-1"]);

        let tagged = list_posts(&store, Some("blog")).unwrap();
        assert_eq!(slugs(&tagged), vec!["test-3", "test-2"]);
    }

    #[test]
    fn test_tag_counts() {
        let mut entries = dataset();
        entries.push(entry("four", "2021-01-04", Some(&["rust"])));
        assert_eq!(
            tag_counts(&entries),
            vec![
                ("blog".to_string(), 2),
                ("test".to_string(), 2),
                ("rust".to_string(), 1)
            ]
        );
    }

    fn resume_item(kind: ResumeKind, a: Option<&str>, b: Option<&str>) -> ResumeItem {
        let (school, degree, position, employer) = match kind {
            ResumeKind::Academic => (b, a, None, None),
            ResumeKind::Work => (None, None, a, b),
        };
        ResumeItem {
            kind,
            school: school.map(String::from),
            degree: degree.map(String::from),
            position: position.map(String::from),
            employer: employer.map(String::from),
            start: "2016".to_string(),
            end: "2020".to_string(),
            url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn test_timelines_split_by_kind() {
        let items = vec![
            resume_item(ResumeKind::Work, Some("Engineer"), Some("Acme")),
            resume_item(ResumeKind::Academic, Some("BSc"), Some("State University")),
            resume_item(ResumeKind::Work, None, Some("Initech")),
        ];

        let academic = academic_timeline(&items);
        assert_eq!(academic.len(), 1);
        assert_eq!(academic[0].title, "BSc");
        assert_eq!(academic[0].subtitle, "State University");

        let work = work_timeline(&items);
        assert_eq!(work.len(), 2);
        assert_eq!(work[0].title, "Engineer");
        assert_eq!(work[1].title, "");
        assert_eq!(work[1].subtitle, "Initech");
        assert_eq!(work[1].start_year, "2016");

        let json = serde_json::to_value(&work[0]).unwrap();
        assert_eq!(json["startYear"], "2016");
        assert_eq!(json["endYear"], "2020");
    }
}
