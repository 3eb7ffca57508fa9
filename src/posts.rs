use clap::{App, Arg, ArgGroup, ArgMatches, SubCommand};
use futures::StreamExt;
use std::fs;
use tracing::warn;

use crate::session::{gate, page_id, Terminal};
use crate::template_utils::{comment_list, failed, post_page, success, Failure};
use crate::{ask_for, confirmed, Context, Outcome};
use blogify_api::posts::PostStatus;
use blogify_models::{
    comments::CommentList,
    likes::LikeState,
    posts::{self, DetailPart, PostForm, CATEGORIES},
    routes::Route,
    session::Navigator,
};

pub fn show_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("show")
        .about("Read a post and its comments")
        .arg(
            Arg::with_name("id")
                .required(true)
                .help("Id of the post, or the path of its page"),
        )
        .arg(
            Arg::with_name("like")
                .short("l")
                .long("like")
                .help("Like the post (or unlike it)"),
        )
}

fn editor<'a, 'b>(name: &str, about: &'static str) -> App<'a, 'b> {
    SubCommand::with_name(name)
        .about(about)
        .arg(
            Arg::with_name("title")
                .short("T")
                .long("title")
                .takes_value(true)
                .help("Title of the post"),
        )
        .arg(
            Arg::with_name("content")
                .short("c")
                .long("content")
                .takes_value(true)
                .help("Content of the post, as HTML"),
        )
        .arg(
            Arg::with_name("content-file")
                .short("f")
                .long("content-file")
                .takes_value(true)
                .conflicts_with("content")
                .help("Reads the content of the post from a file"),
        )
        .arg(
            Arg::with_name("tags")
                .short("t")
                .long("tags")
                .takes_value(true)
                .help("Comma separated tags"),
        )
        .arg(
            Arg::with_name("category")
                .long("category")
                .takes_value(true)
                .possible_values(&CATEGORIES)
                .help("Category of the post"),
        )
        .arg(
            Arg::with_name("cover")
                .long("cover")
                .takes_value(true)
                .help("URL of the cover image"),
        )
        .arg(Arg::with_name("publish").long("publish").help("Publish the post"))
        .arg(
            Arg::with_name("draft")
                .long("draft")
                .help("Save the post as a draft"),
        )
        .group(ArgGroup::with_name("status").args(&["publish", "draft"]))
}

pub fn new_command<'a, 'b>() -> App<'a, 'b> {
    editor("new", "Write a new post")
}

pub fn edit_command<'a, 'b>() -> App<'a, 'b> {
    editor("edit", "Edit one of your posts")
        .arg(
            Arg::with_name("id")
                .required(true)
                .help("Id of the post, or the path of its page"),
        )
}

pub fn delete_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("delete")
        .about("Delete one of your posts")
        .arg(
            Arg::with_name("id")
                .required(true)
                .help("Id of the post, or the path of its page"),
        )
        .arg(
            Arg::with_name("yes")
                .short("y")
                .long("yes")
                .help("Don't ask for confirmation"),
        )
}

pub async fn show(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let id = page_id(args, "id");
    let id = id.as_str();
    let mut parts = posts::fetch_detail(&ctx.client, id);
    let mut post = None;
    let mut post_error = None;
    while let Some(part) = parts.next().await {
        match part {
            DetailPart::Post(Ok(p)) => {
                println!("{}", post_page(&p));
                post = Some(p);
            }
            DetailPart::Post(Err(e)) => post_error = Some(e),
            DetailPart::Comments(Ok(comments)) => {
                println!("{}", comment_list(&CommentList::new(comments)))
            }
            DetailPart::Comments(Err(e)) => {
                warn!("Could not fetch the comments of {}: {}", id, e);
                eprintln!("{}", failed("Failed to fetch comments")(e));
            }
        }
    }

    let post = match (post, post_error) {
        (Some(post), _) => post,
        (None, Some(e)) => return Err(failed("Failed to fetch post")(e)),
        (None, None) => return Err(Failure("Post not found".into())),
    };

    let mut like = LikeState::new(&post);
    if args.is_present("like") {
        like.toggle(&ctx.session)
            .map_err(|_| Failure("Please login to like posts".into()))?;
        success(if like.liked() { "Liked" } else { "Unliked" });
    }
    if like.liked() {
        println!("{} likes, yours included", like.likes());
    } else {
        println!("{} likes", like.likes());
    }

    if let Some(user) = ctx.session.user() {
        if post.is_author(&user.id) {
            println!(
                "This is your post: blogify edit {0} / blogify delete {0}",
                post.id
            );
        }
    }
    Ok(())
}

fn read_content(args: &ArgMatches<'_>) -> Result<Option<String>, Failure> {
    if let Some(path) = args.value_of("content-file") {
        let content = fs::read_to_string(path)
            .map_err(|e| Failure(format!("Could not read {}: {}", path, e)))?;
        return Ok(Some(content));
    }
    Ok(args.value_of("content").map(String::from))
}

/// Applies the editor options to `form`, asking for what a new post lacks
fn fill_form(form: &mut PostForm, args: &ArgMatches<'_>, ask: bool) -> Result<(), Failure> {
    match args.value_of("title") {
        Some(title) => form.title = title.to_owned(),
        None if ask => form.title = ask_for("Title")?,
        None => {}
    }
    match read_content(args)? {
        Some(content) => form.content = content,
        None if ask => form.content = ask_for("Content")?,
        None => {}
    }
    if let Some(tags) = args.value_of("tags") {
        form.tags = tags.to_owned();
    }
    if let Some(category) = args.value_of("category") {
        form.category = category.to_owned();
    }
    if let Some(cover) = args.value_of("cover") {
        form.cover_image = cover.to_owned();
    }
    Ok(())
}

fn status(args: &ArgMatches<'_>) -> Option<PostStatus> {
    if args.is_present("publish") {
        Some(PostStatus::Published)
    } else if args.is_present("draft") {
        Some(PostStatus::Draft)
    } else {
        None
    }
}

pub async fn new(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let mut form = PostForm::default();
    fill_form(&mut form, args, true)?;
    let status = status(args).unwrap_or(PostStatus::Draft);
    let data = form
        .into_data(status)
        .map_err(failed("Failed to create post"))?;
    let post = posts::create(&ctx.client, &data)
        .await
        .map_err(failed("Failed to create post"))?;
    success(if status.is_published() {
        "Post published successfully"
    } else {
        "Draft saved successfully"
    });
    println!("{}", Route::Post(post.id));
    Terminal.redirect(Route::Dashboard);
    Ok(())
}

pub async fn edit(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let user = gate(&ctx.session)?;
    let id = page_id(args, "id");
    let post = posts::get(&ctx.client, &id)
        .await
        .map_err(failed("Failed to fetch post"))?;
    if !post.is_author(&user.id) {
        Terminal.redirect(Route::Dashboard);
        return Err(Failure("You are not authorized to edit this post".into()));
    }

    let mut form = PostForm::from_post(&post);
    fill_form(&mut form, args, false)?;
    let status = status(args).unwrap_or(form.status);
    let data = form
        .into_data(status)
        .map_err(failed("Failed to update post"))?;
    posts::update(&ctx.client, &id, &data)
        .await
        .map_err(failed("Failed to update post"))?;
    success("Post updated successfully");
    Terminal.redirect(Route::Dashboard);
    Ok(())
}

pub async fn delete(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let id = page_id(args, "id");
    let mut mine = posts::list_mine(&ctx.client)
        .await
        .map_err(failed("Failed to fetch your posts"))?;
    let title = match mine.iter().find(|p| p.id == id) {
        Some(post) => post.title.clone(),
        None => return Err(Failure("Post not found among your posts".into())),
    };
    if !confirmed(args, &format!("Are you sure you want to delete \"{}\"?", title))? {
        println!("Nothing was deleted");
        return Ok(());
    }

    posts::delete(&ctx.client, &id)
        .await
        .map_err(failed("Failed to delete post"))?;
    posts::remove_post(&mut mine, &id);
    success("Post deleted successfully");
    println!("You have {} posts left", mine.len());
    Ok(())
}
