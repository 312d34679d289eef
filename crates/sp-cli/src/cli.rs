//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser};

use crate::config::OutputFormat;

const OVERVIEW: &str = "\
Overview of Commands:
    account list|create|update|delete|find|group-add|send-password-reset|authenticate
    group list|create|delete
    directory list|create|delete
    application list|create|delete

Account Command Details:
    List all accounts in an application, directory or group:
        account list -a APPLICATION|-d DIRECTORY|-g GROUP
    Create an account in a directory:
        account create -d DIRECTORY -e EMAIL -u USERNAME -p PASSWORD -f FIRSTNAME -s SURNAME [-t STATUS]
    Update an account by email:
        account update -a APPLICATION|-d DIRECTORY|-g GROUP -e EMAIL [-u USERNAME] [-p PASSWORD] [-f FIRSTNAME] [-s SURNAME] [-t STATUS]
    Delete an account:
        account delete -a APPLICATION|-d DIRECTORY|-g GROUP -e EMAIL
    Find an account by email:
        account find -a APPLICATION|-d DIRECTORY|-g GROUP -e EMAIL
    Add an account by email from a directory|application to a group:
        account group-add -g GROUP -e EMAIL [-a APPLICATION|-d DIRECTORY]
    Send password reset email to an account:
        account send-password-reset -a APPLICATION -e EMAIL
    Authenticate an account by username and password:
        account authenticate -a APPLICATION -u USERNAME -p PASSWORD

Group Command Details:
    List all groups in a directory:   group list -d DIRECTORY
    Create a group:                   group create -d DIRECTORY -n NAME --description DESCRIPTION
    Delete a group:                   group delete -d DIRECTORY -g GROUP

Directory Command Details:
    List all directories:             directory list
    Create a directory:               directory create -n NAME --description DESCRIPTION
    Delete a directory:               directory delete -d DIRECTORY

Application Command Details:
    List all applications:            application list
    Create an application:            application create -n NAME --description DESCRIPTION
    Delete an application:            application delete -a APPLICATION

Example:
    stormpath account find -d \"https://api.stormpath.com/v1/directories/1UjvZW6oLfCn7uVdrhzQ0V\" -e \"email@domain.com\"";

/// Identity service CLI - manage applications, directories, groups and accounts.
#[derive(Debug, Parser)]
#[command(name = "stormpath")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "stormpath OBJECT ACTION [OPTIONS]")]
#[command(after_help = OVERVIEW)]
pub struct Cli {
    /// Resource kind: account, group, directory or application.
    #[arg(value_name = "OBJECT")]
    pub object: Option<String>,

    /// Action to perform on the resource kind.
    #[arg(value_name = "ACTION")]
    pub action: Option<String>,

    /// Resource options.
    #[command(flatten)]
    pub options: Options,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// REST API base URL (overrides config).
    #[arg(long, env = "STORMPATH_BASE_URL")]
    pub base_url: Option<String>,

    /// API key properties file (overrides config).
    #[arg(long, env = "STORMPATH_API_KEY_FILE")]
    pub api_key_file: Option<PathBuf>,
}

impl Cli {
    /// Resolves the object token, if it names a known resource kind.
    pub fn object(&self) -> Option<Object> {
        self.object.as_deref().and_then(Object::parse)
    }

    /// Renders the full help text.
    pub fn help_text() -> String {
        Cli::command().render_help().to_string()
    }
}

/// Options shared by every command, each holding one string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct Options {
    /// The application href.
    #[arg(short = 'a', long, value_name = "APPLICATION")]
    pub application: Option<String>,

    /// The group href.
    #[arg(short = 'g', long, value_name = "GROUP")]
    pub group: Option<String>,

    /// The directory href.
    #[arg(short = 'd', long, value_name = "DIRECTORY")]
    pub directory: Option<String>,

    /// The name of the application|directory|group.
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// The description of the application|directory|group.
    #[arg(long, value_name = "DESCRIPTION")]
    pub description: Option<String>,

    /// The email.
    #[arg(short = 'e', long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// The username.
    #[arg(short = 'u', long, value_name = "USERNAME")]
    pub username: Option<String>,

    /// The password.
    #[arg(short = 'p', long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// The first name.
    #[arg(short = 'f', long, value_name = "FIRSTNAME")]
    pub firstname: Option<String>,

    /// The surname.
    #[arg(short = 's', long, value_name = "SURNAME")]
    pub surname: Option<String>,

    /// The status of the account; possible values: 'enabled', 'disabled'.
    #[arg(short = 't', long, value_name = "STATUS")]
    pub status: Option<String>,
}

impl Options {
    /// Returns the value of a field, if present.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Application => &self.application,
            Field::Group => &self.group,
            Field::Directory => &self.directory,
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Email => &self.email,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::FirstName => &self.firstname,
            Field::Surname => &self.surname,
            Field::Status => &self.status,
        };
        value.as_deref()
    }

    /// Whether a field is present.
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }
}

/// Named option fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `-a/--application`
    Application,
    /// `-g/--group`
    Group,
    /// `-d/--directory`
    Directory,
    /// `-n/--name`
    Name,
    /// `--description`
    Description,
    /// `-e/--email`
    Email,
    /// `-u/--username`
    Username,
    /// `-p/--password`
    Password,
    /// `-f/--firstname`
    FirstName,
    /// `-s/--surname`
    Surname,
    /// `-t/--status`
    Status,
}

impl Field {
    /// Flag spelling shown to users.
    pub fn flag(self) -> &'static str {
        match self {
            Field::Application => "-a/--application",
            Field::Group => "-g/--group",
            Field::Directory => "-d/--directory",
            Field::Name => "-n/--name",
            Field::Description => "--description",
            Field::Email => "-e/--email",
            Field::Username => "-u/--username",
            Field::Password => "-p/--password",
            Field::FirstName => "-f/--firstname",
            Field::Surname => "-s/--surname",
            Field::Status => "-t/--status",
        }
    }
}

/// Top-level resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    /// Accounts.
    Account,
    /// Groups.
    Group,
    /// Directories.
    Directory,
    /// Applications.
    Application,
}

impl Object {
    /// Parses an object token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "account" => Some(Object::Account),
            "group" => Some(Object::Group),
            "directory" => Some(Object::Directory),
            "application" => Some(Object::Application),
            _ => None,
        }
    }

    /// Token naming this object on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Object::Account => "account",
            Object::Group => "group",
            Object::Directory => "directory",
            Object::Application => "application",
        }
    }
}
