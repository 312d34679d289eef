//! Two-level command dispatch: object, then action.

use std::io::Write;

use crate::cli::{Cli, Field, Object, Options};
use crate::commands::{
    run_account, run_application, run_directory, run_group, AccountAction, ApplicationAction,
    DirectoryAction, GroupAction,
};
use crate::config::{CliConfig, OutputFormat};
use crate::error::{EXIT_OK, EXIT_USAGE};
use crate::output;
use crate::service::IdentityService;
use crate::{CliError, CliResult};

/// A required option, or a set of options of which at least one is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The field must be present.
    Field(Field),
    /// At least one of the fields must be present.
    AnyOf(&'static [Field]),
}

impl Requirement {
    fn is_met(self, options: &Options) -> bool {
        match self {
            Requirement::Field(field) => options.has(field),
            Requirement::AnyOf(fields) => fields.iter().any(|f| options.has(*f)),
        }
    }

    fn describe(self) -> String {
        match self {
            Requirement::Field(field) => field.flag().to_string(),
            Requirement::AnyOf(fields) => {
                let flags: Vec<&str> = fields.iter().map(|f| f.flag()).collect();
                format!("one of {}", flags.join("|"))
            }
        }
    }
}

/// Lists the requirements the options don't meet.
pub fn missing_arguments(options: &Options, requirements: &[Requirement]) -> Vec<String> {
    requirements
        .iter()
        .filter(|r| !r.is_met(options))
        .map(|r| r.describe())
        .collect()
}

/// A resolved (object, action) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Account command.
    Account(AccountAction),
    /// Group command.
    Group(GroupAction),
    /// Directory command.
    Directory(DirectoryAction),
    /// Application command.
    Application(ApplicationAction),
}

impl Command {
    /// Looks up the action under an object.
    pub fn resolve(object: Object, action: &str) -> CliResult<Self> {
        let command = match object {
            Object::Account => AccountAction::parse(action).map(Command::Account),
            Object::Group => GroupAction::parse(action).map(Command::Group),
            Object::Directory => DirectoryAction::parse(action).map(Command::Directory),
            Object::Application => ApplicationAction::parse(action).map(Command::Application),
        };

        command.ok_or_else(|| CliError::InvalidAction {
            object: object.as_str().to_string(),
        })
    }

    /// Options the command cannot run without.
    pub fn requirements(self) -> &'static [Requirement] {
        match self {
            Command::Account(action) => action.requirements(),
            Command::Group(action) => action.requirements(),
            Command::Directory(action) => action.requirements(),
            Command::Application(action) => action.requirements(),
        }
    }
}

/// Everything a handler needs for one invocation.
pub struct Context<'a> {
    /// Remote service handle.
    pub service: &'a dyn IdentityService,
    /// Parsed options.
    pub options: &'a Options,
    /// Output format for listings.
    pub format: OutputFormat,
}

impl<'a> Context<'a> {
    /// Creates a context.
    pub fn new(service: &'a dyn IdentityService, options: &'a Options, format: OutputFormat) -> Self {
        Self {
            service,
            options,
            format,
        }
    }

    /// Gets a field the command declared as required.
    pub fn require(&self, field: Field) -> CliResult<&'a str> {
        self.options
            .get(field)
            .ok_or_else(|| CliError::MissingArguments(vec![field.flag().to_string()]))
    }
}

/// Resolves the action, validates required options and runs the handler.
pub async fn dispatch(
    ctx: &Context<'_>,
    object: Object,
    action: Option<&str>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let command = Command::resolve(object, action.unwrap_or_default())?;

    let missing = missing_arguments(ctx.options, command.requirements());
    if !missing.is_empty() {
        tracing::debug!(?command, ?missing, "required options absent");
        return Err(CliError::MissingArguments(missing));
    }

    tracing::info!(?command, "running command");
    match command {
        Command::Account(action) => run_account(action, ctx, out).await,
        Command::Group(action) => run_group(action, ctx, out).await,
        Command::Directory(action) => run_directory(action, ctx, out).await,
        Command::Application(action) => run_application(action, ctx, out).await,
    }
}

/// Prints the outcome and maps it to an exit code.
///
/// Usage, not-found and service errors go to `out`; transport and local errors go to stderr.
pub fn report(result: CliResult<()>, out: &mut dyn Write) -> i32 {
    let Err(err) = result else {
        return EXIT_OK;
    };

    let written = match &err {
        CliError::Remote(remote) => output::write_remote_error(out, remote),
        CliError::MissingArguments(_) | CliError::InvalidAction { .. } | CliError::AccountNotFound => {
            writeln!(out, "{err}")
        }
        _ => {
            output::error(&err.to_string());
            Ok(())
        }
    };
    if let Err(e) = written {
        tracing::warn!("failed to write output: {e}");
    }

    err.exit_code()
}

/// Runs one invocation: help for unknown objects, otherwise configure, connect and dispatch.
///
/// `load_config` and `connect` are only called once the object is known. The
/// command-line overrides in `cli` are applied to the loaded configuration.
pub async fn run<L, F>(cli: &Cli, load_config: L, connect: F, out: &mut dyn Write) -> i32
where
    L: FnOnce() -> CliResult<CliConfig>,
    F: FnOnce(&CliConfig) -> CliResult<Box<dyn IdentityService>>,
{
    let Some(object) = cli.object() else {
        tracing::debug!(object = ?cli.object, "no known object, printing help");
        if let Err(e) = write!(out, "{}", Cli::help_text()) {
            tracing::warn!("failed to write help: {e}");
        }
        return EXIT_USAGE;
    };

    let config = match load_config() {
        Ok(config) => config.with_overrides(
            cli.base_url.as_deref(),
            cli.api_key_file.as_deref(),
            cli.output,
        ),
        Err(err) => return report(Err(err), out),
    };

    let service = match connect(&config) {
        Ok(service) => service,
        Err(err) => return report(Err(err), out),
    };

    let ctx = Context::new(service.as_ref(), &cli.options, config.output_format);
    let result = dispatch(&ctx, object, cli.action.as_deref(), out).await;
    report(result, out)
}
