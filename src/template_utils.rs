use blogify_api::{comments::Comment, posts::Post};
use blogify_common::utils::{
    estimate_read_minutes, format_date, strip_tags, truncate_to_plain_text,
};
use blogify_models::{comments::CommentList, Error};
use std::fmt;
use std::io;

/// Tags shown on a post card before collapsing the rest
const CARD_TAGS: usize = 3;

/// An action that could not be completed, with the message for the reader
#[derive(Debug)]
pub struct Failure(pub String);

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "✗ {}", self.0)
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Failure(format!("Could not read your answer: {}", err))
    }
}

/// Turns an error into the notification shown when `action` failed
pub fn failed(action: &'static str) -> impl Fn(Error) -> Failure {
    move |err| Failure(err.user_message(action))
}

pub fn success(message: &str) {
    eprintln!("✓ {}", message);
}

/// `#rust #web #cli +2 more`
pub fn tag_list(tags: &[String], max: usize) -> String {
    let mut out = tags
        .iter()
        .take(max)
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    if tags.len() > max {
        out.push_str(&format!(" +{} more", tags.len() - max));
    }
    out
}

/// What the feed shows when no post is left to list
pub fn empty_feed(filtered: bool) -> String {
    let hint = if filtered {
        "Try adjusting your search or filter"
    } else {
        "Be the first to share your story!"
    };
    format!("No posts found\n{}", hint)
}

pub fn read_time(content: &str) -> String {
    format!("{} min read", estimate_read_minutes(content))
}

/// A post as listed in the feed, dashboard and profile pages
pub fn post_card(post: &Post, preview_length: usize, show_status: bool) -> String {
    let mut card = post.title.clone();
    if show_status {
        card.push_str(&format!(" [{}]", post.status));
    }
    card.push_str(&format!(
        "\n  by {} · {} · {} · {} views\n",
        post.author_name(),
        format_date(&post.created_at, false),
        read_time(&post.content),
        post.views,
    ));
    let preview = truncate_to_plain_text(&post.content, preview_length);
    if !preview.is_empty() {
        card.push_str(&format!("  {}\n", preview));
    }
    if !post.tags.is_empty() {
        card.push_str(&format!("  {}\n", tag_list(&post.tags, CARD_TAGS)));
    }
    card.push_str(&format!("  blogify show {}\n", post.id));
    card
}

/// Full page of a post, without its comments
pub fn post_page(post: &Post) -> String {
    let mut page = format!("{}\n{}\n", post.title, "=".repeat(post.title.chars().count()));
    page.push_str(&format!(
        "by {} · {} · {}\n",
        post.author_name(),
        format_date(&post.created_at, true),
        read_time(&post.content),
    ));
    if let Some(category) = post.category.as_deref().filter(|c| !c.is_empty()) {
        page.push_str(&format!("in {}\n", category));
    }
    if let Some(cover) = post.cover() {
        page.push_str(&format!("cover: {}\n", cover));
    }
    page.push('\n');
    page.push_str(strip_tags(&post.content).trim());
    page.push_str("\n\n");
    if !post.tags.is_empty() {
        page.push_str(&tag_list(&post.tags, post.tags.len()));
        page.push('\n');
    }
    page.push_str(&format!("{} views\n", post.views));
    page
}

pub fn comment_line(comment: &Comment) -> String {
    format!(
        "{} ({}) [{}]\n  {}\n",
        comment.author_name(),
        format_date(&comment.created_at, false),
        comment.id,
        comment.comment,
    )
}

pub fn comment_list(comments: &CommentList) -> String {
    let mut out = format!("Comments ({})\n", comments.len());
    if comments.is_empty() {
        out.push_str("No comments yet. Be the first to comment!\n");
    }
    for comment in comments.iter() {
        out.push_str(&comment_line(comment));
    }
    out
}
