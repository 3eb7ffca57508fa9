use blogify_models::{session::Session, ApiClient, CONFIG};
use clap::{App, AppSettings, Arg, ArgMatches};
use std::io::{self, prelude::*};
use std::process;
use tokio::runtime;
use tracing::{debug, warn, Level};

use crate::template_utils::Failure;

mod comments;
mod dashboard;
mod feed;
mod posts;
mod profile;
mod session;
mod template_utils;

/// What every view gets to work with
pub struct Context {
    pub client: ApiClient,
    pub session: Session,
}

pub type Outcome = Result<(), Failure>;

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("Blogify")
        .bin_name("blogify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and write posts on a Blogify instance from your terminal.")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .global(true)
                .help("Logs every request sent to the API"),
        )
        .subcommand(feed::command())
        .subcommand(feed::tags_command())
        .subcommand(posts::show_command())
        .subcommand(posts::new_command())
        .subcommand(posts::edit_command())
        .subcommand(posts::delete_command())
        .subcommand(comments::command())
        .subcommand(comments::delete_command())
        .subcommand(dashboard::command())
        .subcommand(profile::command())
        .subcommand(session::login_command())
        .subcommand(session::register_command())
        .subcommand(session::logout_command())
        .subcommand(session::whoami_command())
}

fn main() {
    let mut app = app();
    let matches = app.clone().get_matches();

    tracing_subscriber::fmt()
        .with_max_level(if matches.is_present("verbose") {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(io::stderr)
        .init();

    match dotenv::dotenv() {
        Ok(path) => debug!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => debug!("no .env was found"),
        Err(e) => warn!("Could not read .env: {}", e),
    }

    if matches.subcommand_name().is_none() {
        if let Err(e) = app.print_help() {
            eprintln!("Could not print the help: {}", e);
            process::exit(1);
        }
        println!();
        return;
    }

    let rt = match runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Could not start: {}", e);
            process::exit(1);
        }
    };
    if let Err(failure) = rt.block_on(dispatch(&matches)) {
        eprintln!("{}", failure);
        process::exit(1);
    }
}

async fn dispatch(matches: &ArgMatches<'_>) -> Outcome {
    let client = ApiClient::new(&CONFIG)
        .map_err(template_utils::failed("Could not configure the API client"))?;
    let mut ctx = Context {
        client,
        session: Session::new(),
    };
    if let Err(e) = ctx.session.resolve(&mut ctx.client).await {
        warn!("Could not check who is logged in: {}", e);
    }

    if let Some(route) = session::route_of(matches) {
        debug!("Opening {}", route);
        if route.requires_auth() {
            session::gate(&ctx.session)?;
        }
    }

    match matches.subcommand() {
        ("feed", Some(args)) => feed::run(args, &ctx).await,
        ("tags", Some(_)) => feed::run_tags(&ctx).await,
        ("show", Some(args)) => posts::show(args, &ctx).await,
        ("new", Some(args)) => posts::new(args, &ctx).await,
        ("edit", Some(args)) => posts::edit(args, &ctx).await,
        ("delete", Some(args)) => posts::delete(args, &ctx).await,
        ("comment", Some(args)) => comments::run(args, &ctx).await,
        ("uncomment", Some(args)) => comments::delete(args, &ctx).await,
        ("dashboard", Some(args)) => dashboard::run(args, &ctx).await,
        ("profile", Some(args)) => profile::run(args, &ctx).await,
        ("login", Some(args)) => session::login(args, &mut ctx).await,
        ("register", Some(args)) => session::register(args, &mut ctx).await,
        ("logout", Some(_)) => session::logout(&mut ctx),
        ("whoami", Some(_)) => session::whoami(&ctx),
        _ => Ok(()),
    }
}

// prompts go to stderr so that stdout can be captured
pub fn ask_for(something: &str) -> io::Result<String> {
    eprint!("{}: ", something);
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    input.retain(|c| c != '\n' && c != '\r');
    Ok(input)
}

pub fn ask_password() -> io::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    rpassword::read_password()
}

/// Asks a yes/no question, defaulting to no
pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = ask_for(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Whether a deletion can go on, asking `question` unless `--yes` was given
pub fn confirmed(args: &ArgMatches<'_>, question: &str) -> io::Result<bool> {
    if args.is_present("yes") {
        Ok(true)
    } else {
        confirm(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_skips_the_question() {
        let tests = vec![
            vec!["blogify", "delete", "p1", "--yes"],
            vec!["blogify", "uncomment", "p1", "c1", "-y"],
        ];
        for args in tests {
            let matches = app().get_matches_from(args);
            let (_, sub) = matches.subcommand();
            assert!(confirmed(sub.unwrap(), "Delete?").unwrap());
        }
    }
}
