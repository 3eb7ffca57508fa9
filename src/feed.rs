use clap::{App, Arg, ArgMatches, SubCommand};
use tracing::warn;

use crate::template_utils::{empty_feed, failed, post_card};
use crate::{Context, Outcome};
use blogify_common::utils::PREVIEW_LENGTH;
use blogify_models::{
    feed::{collect_tags, FeedFilter},
    posts,
};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("feed")
        .about("List published posts")
        .arg(
            Arg::with_name("search")
                .short("s")
                .long("search")
                .takes_value(true)
                .help("Only show posts whose title or content contains this text"),
        )
        .arg(
            Arg::with_name("tag")
                .short("t")
                .long("tag")
                .takes_value(true)
                .help("Only show posts with this tag"),
        )
}

pub fn tags_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("tags").about("List the tags used in the feed")
}

pub async fn run(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let filter = FeedFilter::new(
        args.value_of("search").unwrap_or(""),
        args.value_of("tag").map(String::from),
    );
    let posts = posts::list_feed(&ctx.client)
        .await
        .map_err(failed("Failed to fetch posts"))?;

    match posts::site_stats(&ctx.client).await {
        Ok(stats) => println!(
            "{} posts · {} authors · {} tags\n",
            stats.posts, stats.authors, stats.tags
        ),
        Err(e) => warn!("Could not fetch site statistics: {}", e),
    }

    let tags = collect_tags(&posts);
    if !tags.is_empty() {
        let tags = tags.into_iter().collect::<Vec<_>>();
        println!("Tags: {}\n", tags.join(", "));
    }

    let shown = filter.apply(&posts);
    if shown.is_empty() {
        println!("{}", empty_feed(filter.is_active()));
        return Ok(());
    }
    for post in shown {
        println!("{}", post_card(post, PREVIEW_LENGTH, false));
    }
    Ok(())
}

pub async fn run_tags(ctx: &Context) -> Outcome {
    let posts = posts::list_feed(&ctx.client)
        .await
        .map_err(failed("Failed to fetch posts"))?;
    for tag in collect_tags(&posts) {
        println!("{}", tag);
    }
    Ok(())
}
