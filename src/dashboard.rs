use clap::{App, Arg, ArgMatches, SubCommand};
use tracing::warn;

use crate::session::gate;
use crate::template_utils::{failed, post_card, Failure};
use crate::{Context, Outcome};
use blogify_common::utils::DASHBOARD_PREVIEW_LENGTH;
use blogify_models::{
    feed::{filter_by_status, StatusFilter},
    posts,
};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("dashboard")
        .about("Your posts and their statistics")
        .arg(
            Arg::with_name("filter")
                .short("f")
                .long("filter")
                .takes_value(true)
                .possible_values(&["all", "published", "draft"])
                .default_value("all")
                .help("Which posts to list"),
        )
}

pub async fn run(args: &ArgMatches<'_>, ctx: &Context) -> Outcome {
    let user = gate(&ctx.session)?;
    let filter = args
        .value_of("filter")
        .unwrap_or_default()
        .parse::<StatusFilter>()
        .map_err(|_| Failure("Unknown filter".into()))?;

    let mine = posts::list_mine(&ctx.client)
        .await
        .map_err(failed("Failed to fetch your posts"))?;
    println!("Welcome back, {}!\n", user.name);
    match posts::dashboard_stats(&ctx.client).await {
        Ok(stats) => println!(
            "{} posts · {} published · {} drafts · {} views\n",
            stats.total, stats.published, stats.drafts, stats.views
        ),
        Err(e) => warn!("Could not fetch your statistics: {}", e),
    }

    let shown = filter_by_status(&mine, filter);
    if shown.is_empty() {
        match filter {
            StatusFilter::All => println!("You haven't written anything yet: blogify new"),
            _ => println!("No {} posts", filter.name()),
        }
        return Ok(());
    }
    for post in shown {
        println!("{}", post_card(post, DASHBOARD_PREVIEW_LENGTH, true));
    }
    Ok(())
}
