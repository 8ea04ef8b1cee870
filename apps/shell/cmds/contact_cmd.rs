use clap::{Command, Arg};

fn field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(
            Arg::new("name")
                .long("name")
                .required(required)
                .help("Contact name"),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .required(required)
                .help("Email address, like ilham@email.com"),
        )
        .arg(
            Arg::new("phone")
                .long("phone")
                .required(required)
                .help("Phone number, 10 to 15 digits"),
        )
}

pub(crate) fn list_cli() -> Command {
    Command::new("list")
        .about("List all contacts")
}

pub(crate) fn new_cli() -> Command {
    field_args(
        Command::new("new").about("Create a new contact"),
        false
    )
}

pub(crate) fn edit_cli() -> Command {
    field_args(
        Command::new("edit")
            .about("Edit an existing contact")
            .arg(
                Arg::new("ID")
                    .required(true)
                    .help("Contact ID"),
            ),
        false
    )
}

pub(crate) fn delete_cli() -> Command {
    Command::new("delete")
        .about("Delete a contact")
        .arg(
            Arg::new("ID")
                .required(true)
                .help("Contact ID"),
        )
}

pub(crate) fn open_cli() -> Command {
    Command::new("open")
        .about("Open a screen by route: /contacts, / or /contacts/edit/<id>")
        .arg(
            Arg::new("ROUTE")
                .required(true)
                .help("Route path"),
        )
}
