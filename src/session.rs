use clap::{App, Arg, ArgMatches, SubCommand};

use crate::template_utils::{failed, success, Failure};
use crate::{ask_for, ask_password, Context, Outcome};
use blogify_api::users::User;
use blogify_models::{
    routes::Route,
    session::{GateView, Navigator, Session, SessionGate},
    users::{self, LoginForm, RegisterForm},
};

/// Sends the reader to another page by telling them which command opens it
pub struct Terminal;

/// The command that opens `route`
pub fn command_for(route: &Route) -> String {
    match route {
        Route::Home => "blogify feed".to_owned(),
        Route::Login => "blogify login".to_owned(),
        Route::Register => "blogify register".to_owned(),
        Route::Post(id) => format!("blogify show {}", id),
        Route::Profile(id) => format!("blogify profile {}", id),
        Route::Dashboard => "blogify dashboard".to_owned(),
        Route::Create => "blogify new".to_owned(),
        Route::Edit(id) => format!("blogify edit {}", id),
    }
}

impl Navigator for Terminal {
    fn redirect(&mut self, to: Route) {
        eprintln!("→ {} ({})", to, command_for(&to));
    }
}

/// The logged in user, or a redirection to the login page
pub fn gate(session: &Session) -> Result<&User, Failure> {
    match SessionGate::new(Terminal).check(session.state()) {
        GateView::Render(user) => Ok(user),
        GateView::Pending => Err(Failure("Still checking who is logged in".into())),
        GateView::Redirected => Err(Failure("Please login to continue".into())),
    }
}

/// Id given to a command, either as is or as the path of its page
pub fn page_id(args: &ArgMatches<'_>, name: &str) -> String {
    let value = args.value_of(name).unwrap_or_default();
    Route::parse(value)
        .and_then(|route| route.id().map(str::to_owned))
        .unwrap_or_else(|| value.to_owned())
}

/// Page opened by the command in `matches`
pub fn route_of(matches: &ArgMatches<'_>) -> Option<Route> {
    let route = match matches.subcommand() {
        ("feed", _) | ("tags", _) => Route::Home,
        ("show", Some(args)) => Route::Post(page_id(args, "id")),
        ("comment", Some(args)) | ("uncomment", Some(args)) => {
            Route::Post(page_id(args, "post"))
        }
        ("new", _) => Route::Create,
        ("edit", Some(args)) => Route::Edit(page_id(args, "id")),
        ("delete", _) | ("dashboard", _) => Route::Dashboard,
        ("profile", Some(args)) => Route::Profile(page_id(args, "id")),
        ("login", _) => Route::Login,
        ("register", _) => Route::Register,
        _ => return None,
    };
    Some(route)
}

pub fn login_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("login")
        .about("Log in and print the token to export as BLOGIFY_TOKEN")
        .arg(
            Arg::with_name("email")
                .short("e")
                .long("email")
                .takes_value(true)
                .help("Your email address"),
        )
        .arg(
            Arg::with_name("password")
                .short("p")
                .long("password")
                .takes_value(true)
                .help("Your password (asked for if missing)"),
        )
}

pub fn register_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("register")
        .about("Create an account")
        .arg(
            Arg::with_name("name")
                .short("n")
                .long("name")
                .takes_value(true)
                .help("Name shown on your posts"),
        )
        .arg(
            Arg::with_name("email")
                .short("e")
                .long("email")
                .takes_value(true)
                .help("Email address of the new account"),
        )
        .arg(
            Arg::with_name("password")
                .short("p")
                .long("password")
                .takes_value(true)
                .help("Password of the new account (asked for if missing)"),
        )
}

pub fn logout_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("logout").about("Forget the current session")
}

pub fn whoami_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("whoami").about("Show who is logged in")
}

fn value_or_ask(args: &ArgMatches<'_>, name: &str, prompt: &str) -> Result<String, Failure> {
    match args.value_of(name) {
        Some(value) => Ok(value.to_owned()),
        None => Ok(ask_for(prompt)?),
    }
}

fn password(args: &ArgMatches<'_>) -> Result<String, Failure> {
    match args.value_of("password") {
        Some(value) => Ok(value.to_owned()),
        None => Ok(ask_password()?),
    }
}

pub async fn login(args: &ArgMatches<'_>, ctx: &mut Context) -> Outcome {
    let form = LoginForm {
        email: value_or_ask(args, "email", "Email address")?,
        password: password(args)?,
    };
    let auth = users::login(&ctx.client, form)
        .await
        .map_err(failed("Login failed"))?;
    let name = auth.user.name.clone();
    let token = ctx.session.login(&mut ctx.client, auth);
    success(&format!("Logged in as {}", name));
    println!("export BLOGIFY_TOKEN={}", token.as_str());
    Ok(())
}

pub async fn register(args: &ArgMatches<'_>, ctx: &mut Context) -> Outcome {
    let form = RegisterForm {
        name: value_or_ask(args, "name", "Name")?,
        email: value_or_ask(args, "email", "Email address")?,
        password: password(args)?,
    };
    let auth = users::register(&ctx.client, form)
        .await
        .map_err(failed("Registration failed"))?;
    let name = auth.user.name.clone();
    let token = ctx.session.login(&mut ctx.client, auth);
    success(&format!("Welcome, {}!", name));
    println!("export BLOGIFY_TOKEN={}", token.as_str());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Outcome {
    ctx.session.logout(&mut ctx.client);
    Terminal.redirect(Route::Home);
    success("Logged out");
    println!("unset BLOGIFY_TOKEN");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Outcome {
    let user = gate(&ctx.session)?;
    println!("{} ({})", user.name, user.id);
    if let Some(email) = user.email.as_deref() {
        println!("{}", email);
    }
    Ok(())
}
