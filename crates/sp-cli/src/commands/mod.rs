//! Command implementations.

pub mod account;
pub mod application;
pub mod directory;
pub mod group;

pub use account::{run_account, AccountAction};
pub use application::{run_application, ApplicationAction};
pub use directory::{run_directory, DirectoryAction};
pub use group::{run_group, GroupAction};

use crate::cli::Field;
use crate::dispatch::Context;
use crate::model::NewResource;
use crate::{CliError, CliResult};

/// Scope options an account lookup can start from, in order of precedence.
pub(crate) const ACCOUNT_SCOPES: &[Field] = &[Field::Application, Field::Directory, Field::Group];

/// Resolves the href of the account collection selected by the scope options.
///
/// Application wins over directory, directory over group.
pub(crate) async fn account_collection(ctx: &Context<'_>) -> CliResult<String> {
    let options = ctx.options;

    if let Some(href) = options.get(Field::Application) {
        let application = ctx.service.get_application(href).await?;
        return Ok(application.accounts.href);
    }
    if let Some(href) = options.get(Field::Directory) {
        let directory = ctx.service.get_directory(href).await?;
        return Ok(directory.accounts.href);
    }
    if let Some(href) = options.get(Field::Group) {
        let group = ctx.service.get_group(href).await?;
        return Ok(group.accounts.href);
    }

    let scopes: Vec<&str> = ACCOUNT_SCOPES.iter().map(|f| f.flag()).collect();
    Err(CliError::MissingArguments(vec![format!(
        "one of {}",
        scopes.join("|")
    )]))
}

/// Builds the name/description payload shared by the create actions.
pub(crate) fn new_resource(ctx: &Context<'_>) -> CliResult<NewResource> {
    Ok(NewResource {
        name: ctx.require(Field::Name)?.to_string(),
        description: ctx.require(Field::Description)?.to_string(),
    })
}
