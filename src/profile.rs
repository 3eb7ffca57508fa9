use clap::{App, Arg, ArgMatches, SubCommand};

use crate::session::page_id;
use crate::template_utils::{failed, post_card};
use crate::{Context, Outcome};
use blogify_common::utils::{format_date, PREVIEW_LENGTH};
use blogify_models::{feed::filter_by_status, feed::StatusFilter, users};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("profile")
        .about("Show an author and their posts")
        .arg(
            Arg::with_name("id")
                .required(true)
                .help("Id of the user, or the path of their profile"),
        )
}

pub async fn run(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let id = page_id(args, "id");
    let users::Profile { user, posts } = users::load_profile(&ctx.client, &id)
        .await
        .map_err(failed("Failed to fetch profile"))?;
    println!("{}", user.name);
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        println!("{}", bio);
    }
    for (label, link) in user.links() {
        println!("{}: {}", label, link);
    }
    if let Some(joined) = user.created_at {
        println!("Joined {}", format_date(&joined, true));
    }

    let profile = match posts {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("{}", failed("Failed to fetch posts")(e));
            return Ok(());
        }
    };
    println!(
        "{} posts · {} views · {} likes\n",
        profile.stats.total_posts, profile.stats.total_views, profile.stats.total_likes
    );

    // drafts are only listed to their author
    let own = ctx.session.user().map_or(false, |u| u.id == user.id);
    let filter = if own {
        StatusFilter::All
    } else {
        StatusFilter::Published
    };
    let shown = filter_by_status(&profile.posts, filter);
    if shown.is_empty() {
        println!("No posts yet");
    }
    for post in shown {
        println!("{}", post_card(post, PREVIEW_LENGTH, own));
    }
    Ok(())
}
