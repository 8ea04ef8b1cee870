use std::sync::Arc;
use clap::{error, Parser, ArgMatches, Command};
use log::{info, warn};
use reedline::{Reedline, Signal};

mod prompt;
use prompt::MyPrompt;

mod cmds {
    pub(crate) mod contact_cmd;
}


use contacts::{
    configuration as cfg,
    setup_logger,
    APIClient,
    ContactApi,
    ContactFormView,
    ContactListView,
    Field,
    FormMode,
    QueryClient,
    Route,
};

#[derive(Parser, Debug)]
#[command(name = "contacts-shell")]
#[command(version = "1.0")]
#[command(about = "Interactive contacts shell", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Backend base url, overrides the config file and environment
    #[arg(short, long, value_name = "URL")]
    server: Option<String>,
}

struct Session {
    api     : Arc<dyn ContactApi>,
    queries : Arc<QueryClient>,
    list    : ContactListView,
}

fn build_cli() -> Command {
    let mut cmd = Command::new("contacts")
        .about("Interactive contacts shell")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(cmds::contact_cmd::list_cli())
        .subcommand(cmds::contact_cmd::new_cli())
        .subcommand(cmds::contact_cmd::edit_cli())
        .subcommand(cmds::contact_cmd::delete_cli())
        .subcommand(cmds::contact_cmd::open_cli())
        .help_template("{subcommands}");

    cmd.error(error::ErrorKind::InvalidSubcommand, "Invalid command provided");
    cmd
}

fn parse_line(cli: &Command, input: &str) -> Result<ArgMatches, String> {
    let args = shell_words::split(input)
        .map_err(|e| format!("Error: invalid command: '{}', {}", input, e))?;
    cli.clone()
        .try_get_matches_from(args)
        .map_err(|_| format!("Error: invalid command: '{}', type 'help' for usage", input))
}

fn apply_fields(form: &mut ContactFormView, m: &ArgMatches) {
    for field in Field::ALL {
        if let Some(v) = m.get_one::<String>(field.as_str()) {
            form.set(field, v);
        }
    }
}

async fn show_list(session: &Session) {
    session.list.mount().await;
    print!("{}", session.list.render());
}

async fn submit_form(session: &Session, form: &mut ContactFormView) {
    match form.submit().await {
        Some(Route::Contacts) => {
            println!("[OK] Contact saved.");
            show_list(session).await;
        },
        Some(route) => println!("Navigating to {}", route),
        None => print!("{}", form.render()),
    }
}

async fn open_form(session: &Session, mode: FormMode) -> Option<ContactFormView> {
    let mut form = ContactFormView::new(
        session.api.clone(),
        session.queries.clone(),
        mode
    );

    if let Err(e) = form.load().await {
        warn!("Opening form error: {e}");
        print!("{}", form.render());
        return None;
    }
    Some(form)
}

async fn execute_command(matches: ArgMatches, session: &mut Session) {
    match matches.subcommand() {
        Some(("list", _)) => show_list(session).await,

        Some(("new", m)) => {
            let Some(mut form) = open_form(session, FormMode::Create).await else {
                return;
            };
            apply_fields(&mut form, m);
            submit_form(session, &mut form).await;
        },

        Some(("edit", m)) => {
            let Some(id) = m.get_one::<String>("ID") else {
                println!("Error: missing contact id");
                return;
            };
            let Some(mut form) = open_form(session, FormMode::Edit(id.clone())).await else {
                return;
            };
            apply_fields(&mut form, m);
            submit_form(session, &mut form).await;
        },

        Some(("delete", m)) => {
            let Some(id) = m.get_one::<String>("ID") else {
                println!("Error: missing contact id");
                return;
            };

            println!("Deleting contact: {}", id);
            session.list.mount().await;
            match session.list.delete(id).await {
                Ok(_) => println!("Contact {} is deleted.", id),
                Err(e) => println!("Error deleting contact: {}", e),
            }
            print!("{}", session.list.render());
        },

        Some(("open", m)) => {
            let Some(path) = m.get_one::<String>("ROUTE") else {
                println!("Error: missing route");
                return;
            };
            let route = match path.parse::<Route>() {
                Ok(v) => v,
                Err(e) => {
                    println!("Error: {}", e);
                    return;
                }
            };

            match FormMode::from_route(&route) {
                None => show_list(session).await,
                Some(mode) => {
                    if let Some(form) = open_form(session, mode).await {
                        print!("{}", form.render());
                    }
                }
            }
        },

        _ => {
            println!(">>>> Unknown command");
        }
    }
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();

    let mut builder = cfg::Builder::new();
    if let Some(path) = opts.config.as_ref() {
        if let Err(e) = builder.load(path) {
            eprintln!("{e}");
            return;
        }
    }
    if let Some(url) = opts.server.as_ref() {
        builder.with_server_url(url);
    }

    let cfg = match builder.build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    if let Err(e) = setup_logger(cfg.log_level(), cfg.log_file()) {
        eprintln!("Setting up logger error: {e}");
        return;
    }

    let api: Arc<dyn ContactApi> = match APIClient::from_config(cfg.as_ref()) {
        Ok(v) => Arc::new(v),
        Err(e) => {
            eprintln!("Creating api client error: {e}");
            return;
        }
    };

    info!("Using contacts backend at {}", cfg.server_url());

    let queries = Arc::new(QueryClient::from_config(cfg.as_ref()));
    let list = ContactListView::new(api.clone(), queries.clone());
    let mut session = Session { api, queries, list };

    let mut cli = build_cli();
    let mut rl = Reedline::create();
    let prompt = MyPrompt;

    println!("Welcome to interactive contacts shell. Type 'exit' to quit.\n");

    loop {
        let Ok(sig) = rl.read_line(&prompt) else {
            println!("\n Fatal error occurred.");
            continue;
        };
        match sig {
            Signal::Success(line) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                match input {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    },
                    "help" => {
                        _ = cli.print_long_help();
                        continue;
                    }
                    _ => {}
                }

                if let Some(topic) = input.strip_prefix("help ") {
                    _ = match cli.find_subcommand_mut(topic.trim()) {
                        Some(cmd) => cmd.print_long_help(),
                        None => cli.print_long_help(),
                    };
                    continue;
                }

                match parse_line(&cli, input) {
                    Ok(matches) => execute_command(matches, &mut session).await,
                    Err(e) => println!("{}", e),
                }
            },
            Signal::CtrlC | Signal::CtrlD => {
                println!("\nGoodbye!");
                break;
            }
        }
    }
}
