use clap::{App, Arg, ArgMatches, SubCommand};

use crate::session::{gate, page_id};
use crate::template_utils::{comment_list, failed, success, Failure};
use crate::{confirmed, Context, Outcome};
use blogify_models::comments::{self, CommentForm, CommentList};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("comment")
        .about("Comment on a post")
        .arg(
            Arg::with_name("post")
                .required(true)
                .help("Id of the post, or the path of its page"),
        )
        .arg(Arg::with_name("text").required(true).help("Your comment"))
}

pub fn delete_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("uncomment")
        .about("Delete one of your comments")
        .arg(
            Arg::with_name("post")
                .required(true)
                .help("Id of the post, or the path of its page"),
        )
        .arg(
            Arg::with_name("comment")
                .required(true)
                .help("Id of the comment"),
        )
        .arg(
            Arg::with_name("yes")
                .short("y")
                .long("yes")
                .help("Don't ask for confirmation"),
        )
}

async fn load(ctx: &Context, post_id: &str) -> Result<CommentList, Failure> {
    comments::list_for_post(&ctx.client, post_id)
        .await
        .map(CommentList::new)
        .map_err(failed("Failed to fetch comments"))
}

pub async fn run(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    if ctx.session.user().is_none() {
        return Err(Failure("Please login to comment".into()));
    }
    let post_id = page_id(args, "post");
    let form = CommentForm::new(args.value_of("text").unwrap_or_default());

    let mut list = load(ctx, &post_id).await?;
    let comment = comments::create(&ctx.client, &ctx.session, &post_id, form)
        .await
        .map_err(failed("Failed to add comment"))?;
    list.prepend(comment);
    success("Comment added successfully");
    print!("{}", comment_list(&list));
    Ok(())
}

pub async fn delete(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let user = gate(&ctx.session)?;
    let post_id = page_id(args, "post");
    let comment_id = args.value_of("comment").unwrap_or_default();

    let mut list = load(ctx, &post_id).await?;
    match list.find(comment_id) {
        Some(comment) if comment.is_author(&user.id) => {}
        Some(_) => return Err(Failure("You can only delete your own comments".into())),
        None => return Err(Failure("Comment not found".into())),
    }
    if !confirmed(args, "Are you sure you want to delete this comment?")? {
        println!("Nothing was deleted");
        return Ok(());
    }
    comments::delete(&ctx.client, comment_id)
        .await
        .map_err(failed("Failed to delete comment"))?;
    list.remove(comment_id);
    success("Comment deleted successfully");
    print!("{}", comment_list(&list));
    Ok(())
}
