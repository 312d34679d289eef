//! Directory management commands.

use std::io::Write;

use crate::cli::Field;
use crate::dispatch::{Context, Requirement};
use crate::output::output;
use crate::service::{collect_all, paginate};
use crate::CliResult;

use super::new_resource;

/// Directory actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryAction {
    /// List the tenant's directories.
    List,
    /// Create a directory.
    Create,
    /// Delete a directory.
    Delete,
}

impl DirectoryAction {
    /// Parses an action token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "list" => Some(DirectoryAction::List),
            "create" => Some(DirectoryAction::Create),
            "delete" => Some(DirectoryAction::Delete),
            _ => None,
        }
    }

    /// Required options.
    pub fn requirements(self) -> &'static [Requirement] {
        match self {
            DirectoryAction::List => &[],
            DirectoryAction::Create => &[
                Requirement::Field(Field::Name),
                Requirement::Field(Field::Description),
            ],
            DirectoryAction::Delete => &[Requirement::Field(Field::Directory)],
        }
    }
}

/// Runs a directory command.
pub async fn run_directory(
    action: DirectoryAction,
    ctx: &Context<'_>,
    out: &mut dyn Write,
) -> CliResult<()> {
    match action {
        DirectoryAction::List => {
            let tenant = ctx.service.current_tenant().await?;
            let href = tenant.directories.href.as_str();
            let service = ctx.service;
            let directories =
                collect_all(paginate(move |offset, limit| service.directory_page(href, offset, limit)))
                    .await?;
            output(out, &directories, ctx.format)
        }
        DirectoryAction::Create => {
            let directory = ctx.service.create_directory(&new_resource(ctx)?).await?;
            tracing::debug!(href = %directory.href, "directory created");
            writeln!(out, "Directory created.")?;
            Ok(())
        }
        DirectoryAction::Delete => {
            let directory = ctx
                .service
                .get_directory(ctx.require(Field::Directory)?)
                .await?;
            ctx.service.delete(&directory.href).await?;
            writeln!(out, "Directory deleted.")?;
            Ok(())
        }
    }
}
