//! Group management commands.

use std::io::Write;

use crate::cli::Field;
use crate::dispatch::{Context, Requirement};
use crate::output::output;
use crate::service::{collect_all, paginate};
use crate::CliResult;

use super::new_resource;

/// Group actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAction {
    /// List the groups of a directory.
    List,
    /// Create a group in a directory.
    Create,
    /// Delete a group.
    Delete,
}

impl GroupAction {
    /// Parses an action token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "list" => Some(GroupAction::List),
            "create" => Some(GroupAction::Create),
            "delete" => Some(GroupAction::Delete),
            _ => None,
        }
    }

    /// Required options.
    pub fn requirements(self) -> &'static [Requirement] {
        use Requirement::Field as F;

        match self {
            GroupAction::List => &[F(Field::Directory)],
            GroupAction::Create => &[F(Field::Directory), F(Field::Name), F(Field::Description)],
            GroupAction::Delete => &[F(Field::Directory), F(Field::Group)],
        }
    }
}

/// Runs a group command.
pub async fn run_group(action: GroupAction, ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    match action {
        GroupAction::List => list_groups(ctx, out).await,
        GroupAction::Create => create_group(ctx, out).await,
        GroupAction::Delete => delete_group(ctx, out).await,
    }
}

/// Lists groups in a directory.
async fn list_groups(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let directory = ctx
        .service
        .get_directory(ctx.require(Field::Directory)?)
        .await?;

    let href = directory.groups.href.as_str();
    let service = ctx.service;
    let groups =
        collect_all(paginate(move |offset, limit| service.group_page(href, offset, limit))).await?;
    output(out, &groups, ctx.format)
}

/// Creates a group.
async fn create_group(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let directory = ctx
        .service
        .get_directory(ctx.require(Field::Directory)?)
        .await?;
    let request = new_resource(ctx)?;

    let group = ctx.service.create_group(&directory, &request).await?;
    tracing::debug!(href = %group.href, "group created");
    writeln!(out, "Group created.")?;
    Ok(())
}

/// Deletes a group.
async fn delete_group(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let group = ctx.service.get_group(ctx.require(Field::Group)?).await?;
    ctx.service.delete(&group.href).await?;
    writeln!(out, "Group deleted.")?;
    Ok(())
}
