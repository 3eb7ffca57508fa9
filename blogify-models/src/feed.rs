//! Search and tag filtering of a list of posts, as done by the feed, the
//! dashboard and profile pages.

use blogify_api::posts::{Post, PostStatus};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Posts whose title or raw content contains `search` (ignoring case) and,
/// when `tag` is given and not empty, that are tagged with it.
///
/// Input order is preserved.
pub fn filter_posts<'p>(posts: &'p [Post], search: &str, tag: Option<&str>) -> Vec<&'p Post> {
    let search = search.to_lowercase();
    let tag = tag.filter(|t| !t.is_empty());
    posts
        .iter()
        .filter(|post| matches_search(post, &search) && tag.map_or(true, |t| has_tag(post, t)))
        .collect()
}

fn matches_search(post: &Post, search: &str) -> bool {
    post.title.to_lowercase().contains(search) || post.content.to_lowercase().contains(search)
}

fn has_tag(post: &Post, tag: &str) -> bool {
    post.tags.iter().any(|t| t == tag)
}

/// Every tag used by at least one post, once, in alphabetical order
pub fn collect_tags(posts: &[Post]) -> BTreeSet<String> {
    posts.iter().flat_map(|p| p.tags.iter().cloned()).collect()
}

/// What the reader typed in the search box and picked in the tag list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub search: String,
    pub tag: Option<String>,
}

impl FeedFilter {
    pub fn new(search: impl Into<String>, tag: Option<String>) -> FeedFilter {
        FeedFilter {
            search: search.into(),
            tag: tag.filter(|t| !t.is_empty()),
        }
    }

    pub fn apply<'p>(&self, posts: &'p [Post]) -> Vec<&'p Post> {
        filter_posts(posts, &self.search, self.tag.as_deref())
    }

    /// Whether any criterion would hide some posts
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.tag.is_some()
    }
}

/// Publication status filter of the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Published,
    Draft,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    pub fn matches(self, post: &Post) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => post.status == PostStatus::Published,
            StatusFilter::Draft => post.status == PostStatus::Draft,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Published => "published",
            StatusFilter::Draft => "draft",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "all" => Ok(StatusFilter::All),
            "published" => Ok(StatusFilter::Published),
            "draft" => Ok(StatusFilter::Draft),
            _ => Err(()),
        }
    }
}

pub fn filter_by_status(posts: &[Post], filter: StatusFilter) -> Vec<&Post> {
    posts.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub(crate) fn post(id: &str, title: &str, content: &str, tags: &[&str]) -> Post {
        Post {
            id: id.to_owned(),
            title: title.to_owned(),
            content: content.to_owned(),
            author: None,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            category: None,
            cover_image: None,
            status: PostStatus::Published,
            views: 0,
            likes: 0,
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
        }
    }

    fn posts() -> Vec<Post> {
        vec![
            post("1", "Learning Rust", "<p>Ownership and borrowing</p>", &["rust", "programming"]),
            post("2", "Travel notes", "<p>Lisbon in <b>spring</b></p>", &["travel"]),
            post("3", "Async in practice", "<p>Futures, RUST and tokio</p>", &["rust", "async"]),
            post("4", "Untagged", "Nothing to see", &[]),
        ]
    }

    fn ids(posts: Vec<&Post>) -> Vec<&str> {
        posts.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let posts = posts();
        let filtered = filter_posts(&posts, "", None);
        assert_eq!(filtered.into_iter().cloned().collect::<Vec<_>>(), posts);
        assert_eq!(ids(filter_posts(&posts, "", Some(""))), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let posts = posts();
        assert_eq!(ids(filter_posts(&posts, "rust", None)), vec!["1", "3"]);
        assert_eq!(ids(filter_posts(&posts, "LISBON", None)), vec!["2"]);
        assert!(filter_posts(&posts, "python", None).is_empty());
    }

    #[test]
    fn search_looks_at_raw_content() {
        let posts = posts();
        // markup is part of the searched content
        assert_eq!(ids(filter_posts(&posts, "<b>", None)), vec!["2"]);
    }

    #[test]
    fn tag_must_match_exactly() {
        let posts = posts();
        assert_eq!(ids(filter_posts(&posts, "", Some("rust"))), vec!["1", "3"]);
        assert!(filter_posts(&posts, "", Some("Rust")).is_empty());
        assert!(filter_posts(&posts, "", Some("rus")).is_empty());
    }

    #[test]
    fn both_criteria_apply() {
        let posts = posts();
        assert_eq!(ids(filter_posts(&posts, "tokio", Some("rust"))), vec!["3"]);
        assert!(filter_posts(&posts, "lisbon", Some("rust")).is_empty());
    }

    #[test]
    fn results_match_their_criteria() {
        let posts = posts();
        for search in &["", "rust", "in", "o", "zzz"] {
            for tag in &[None, Some("rust"), Some("travel"), Some("async")] {
                let filtered = filter_posts(&posts, search, *tag);
                for p in filtered {
                    assert!(posts.contains(p));
                    assert!(
                        p.title.to_lowercase().contains(search)
                            || p.content.to_lowercase().contains(search)
                    );
                    if let Some(tag) = tag {
                        assert!(p.tags.iter().any(|t| t == tag));
                    }
                }
            }
        }
    }

    #[test]
    fn no_posts() {
        assert!(filter_posts(&[], "rust", Some("rust")).is_empty());
        assert!(collect_tags(&[]).is_empty());
    }

    #[test]
    fn tags_are_deduplicated() {
        let posts = vec![post("a", "A", "", &["a", "b"]), post("b", "B", "", &["b", "c", "b"])];
        let tags = collect_tags(&posts);
        assert_eq!(tags.len(), 3);
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn tags_are_sorted() {
        let tags = collect_tags(&posts());
        assert_eq!(
            tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["async", "programming", "rust", "travel"]
        );
    }

    #[test]
    fn feed_filter() {
        let posts = posts();
        let filter = FeedFilter::new("", Some(String::new()));
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&posts).len(), 4);
        let filter = FeedFilter::new("spring", Some("travel".to_owned()));
        assert!(filter.is_active());
        assert_eq!(ids(filter.apply(&posts)), vec!["2"]);
    }

    #[test]
    fn status_filter() {
        let mut posts = posts();
        posts[1].status = PostStatus::Draft;
        posts[3].status = PostStatus::Draft;
        assert_eq!(ids(filter_by_status(&posts, StatusFilter::All)), vec!["1", "2", "3", "4"]);
        assert_eq!(ids(filter_by_status(&posts, StatusFilter::Published)), vec!["1", "3"]);
        assert_eq!(ids(filter_by_status(&posts, StatusFilter::Draft)), vec!["2", "4"]);
        assert_eq!("draft".parse::<StatusFilter>(), Ok(StatusFilter::Draft));
        assert_eq!("drafts".parse::<StatusFilter>(), Err(()));
    }
}
