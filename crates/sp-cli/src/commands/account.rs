//! Account management commands.

use std::io::Write;

use crate::cli::{Field, Options};
use crate::dispatch::{Context, Requirement};
use crate::model::{Account, AccountUpdate, NewAccount, Status, UsernamePasswordRequest};
use crate::output::{output, output_single, warning};
use crate::service::{accounts, collect_all, find_account};
use crate::{CliError, CliResult};

use super::{account_collection, ACCOUNT_SCOPES};

const SCOPE: Requirement = Requirement::AnyOf(ACCOUNT_SCOPES);

/// Account actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    /// List accounts of an application, directory or group.
    List,
    /// Create an account in a directory.
    Create,
    /// Update an account found by email.
    Update,
    /// Delete an account found by email.
    Delete,
    /// Show an account found by email.
    Find,
    /// Add an account found by email to a group.
    GroupAdd,
    /// Send a password reset email.
    SendPasswordReset,
    /// Check a username and password.
    Authenticate,
}

impl AccountAction {
    /// Parses an action token.
    pub fn parse(token: &str) -> Option<Self> {
        let action = match token {
            "list" => AccountAction::List,
            "create" => AccountAction::Create,
            "update" => AccountAction::Update,
            "delete" => AccountAction::Delete,
            "find" => AccountAction::Find,
            "group-add" => AccountAction::GroupAdd,
            "send-password-reset" => AccountAction::SendPasswordReset,
            "authenticate" => AccountAction::Authenticate,
            _ => return None,
        };
        Some(action)
    }

    /// Required options.
    pub fn requirements(self) -> &'static [Requirement] {
        use Requirement::Field as F;

        match self {
            AccountAction::List => &[SCOPE],
            AccountAction::Create => &[
                F(Field::Directory),
                F(Field::Email),
                F(Field::Username),
                F(Field::Password),
                F(Field::FirstName),
                F(Field::Surname),
            ],
            AccountAction::Update | AccountAction::Delete | AccountAction::Find => {
                &[SCOPE, F(Field::Email)]
            }
            AccountAction::GroupAdd => &[F(Field::Group), F(Field::Email)],
            AccountAction::SendPasswordReset => &[F(Field::Application), F(Field::Email)],
            AccountAction::Authenticate => &[
                F(Field::Application),
                F(Field::Username),
                F(Field::Password),
            ],
        }
    }
}

/// Runs an account command.
pub async fn run_account(
    action: AccountAction,
    ctx: &Context<'_>,
    out: &mut dyn Write,
) -> CliResult<()> {
    match action {
        AccountAction::List => list_accounts(ctx, out).await,
        AccountAction::Create => create_account(ctx, out).await,
        AccountAction::Update => update_account(ctx, out).await,
        AccountAction::Delete => delete_account(ctx, out).await,
        AccountAction::Find => {
            let account = lookup(ctx).await?;
            output_single(out, &account, ctx.format)
        }
        AccountAction::GroupAdd => group_add(ctx, out).await,
        AccountAction::SendPasswordReset => send_password_reset(ctx, out).await,
        AccountAction::Authenticate => authenticate(ctx, out).await,
    }
}

/// Finds the account named by `-e` in the selected scope.
async fn lookup(ctx: &Context<'_>) -> CliResult<Account> {
    let email = ctx.require(Field::Email)?;
    let href = account_collection(ctx).await?;

    find_account(ctx.service, &href, email)
        .await?
        .ok_or(CliError::AccountNotFound)
}

/// Lists accounts.
async fn list_accounts(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let href = account_collection(ctx).await?;
    let accounts = collect_all(accounts(ctx.service, &href)).await?;
    tracing::debug!(count = accounts.len(), "fetched accounts");
    output(out, &accounts, ctx.format)
}

/// Creates an account.
async fn create_account(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let directory = ctx
        .service
        .get_directory(ctx.require(Field::Directory)?)
        .await?;

    let request = NewAccount {
        given_name: ctx.require(Field::FirstName)?.to_string(),
        surname: ctx.require(Field::Surname)?.to_string(),
        email: ctx.require(Field::Email)?.to_string(),
        username: ctx.require(Field::Username)?.to_string(),
        password: ctx.require(Field::Password)?.to_string(),
        status: Status::from_option(ctx.options.get(Field::Status)),
    };

    ctx.service.create_account(&directory, &request).await?;
    writeln!(out, "Account created.")?;
    Ok(())
}

/// Computes the fields that `-f`, `-s`, `-u`, `-p` and `-t` change on an account.
fn account_changes(account: &Account, options: &Options) -> AccountUpdate {
    let changed = |field: Field, current: &str| {
        options
            .get(field)
            .filter(|value| *value != current)
            .map(str::to_string)
    };

    AccountUpdate {
        given_name: changed(Field::FirstName, &account.given_name),
        surname: changed(Field::Surname, &account.surname),
        username: changed(Field::Username, &account.username),
        password: options.get(Field::Password).map(str::to_string),
        status: options
            .get(Field::Status)
            .map(|value| Status::from_option(Some(value)))
            .filter(|status| *status != account.status),
    }
}

/// Updates an account.
async fn update_account(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let account = lookup(ctx).await?;
    let update = account_changes(&account, ctx.options);
    if update.is_empty() {
        warning("No account fields changed.");
    }

    ctx.service.update_account(&account, &update).await?;
    writeln!(out, "Account updated.")?;
    Ok(())
}

/// Deletes an account.
async fn delete_account(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let account = lookup(ctx).await?;
    ctx.service.delete(&account.href).await?;
    writeln!(out, "Account deleted.")?;
    Ok(())
}

/// Adds an account to a group.
///
/// The account is looked up in the application or directory when one is
/// given, otherwise among the group's own members.
async fn group_add(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let group = ctx.service.get_group(ctx.require(Field::Group)?).await?;
    let account = if ctx.options.has(Field::Application) || ctx.options.has(Field::Directory) {
        lookup(ctx).await?
    } else {
        find_account(ctx.service, &group.accounts.href, ctx.require(Field::Email)?)
            .await?
            .ok_or(CliError::AccountNotFound)?
    };

    ctx.service.add_account_to_group(&account, &group).await?;
    writeln!(out, "Account added to group.")?;
    Ok(())
}

/// Sends a password reset email.
async fn send_password_reset(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let application = ctx
        .service
        .get_application(ctx.require(Field::Application)?)
        .await?;

    ctx.service
        .send_password_reset_email(&application, ctx.require(Field::Email)?)
        .await?;
    writeln!(out, "Account password request sent.")?;
    Ok(())
}

/// Authenticates an account against an application.
async fn authenticate(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let application = ctx
        .service
        .get_application(ctx.require(Field::Application)?)
        .await?;
    let request = UsernamePasswordRequest::new(
        ctx.require(Field::Username)?,
        ctx.require(Field::Password)?,
    );

    match ctx.service.authenticate_account(&application, &request).await {
        Ok(result) => {
            writeln!(out, "Authentication: SUCCESS")?;
            writeln!(out, "Account Href: {}", result.account.href)?;
            Ok(())
        }
        Err(err @ CliError::Remote(_)) => {
            // The error fields follow when the dispatcher reports the error.
            writeln!(out, "Authentication: FAILURE")?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}
