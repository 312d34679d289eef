//! Application management commands.

use std::io::Write;

use crate::cli::Field;
use crate::dispatch::{Context, Requirement};
use crate::model::Application;
use crate::output::output;
use crate::service::{collect_all, paginate};
use crate::CliResult;

use super::new_resource;

/// Application actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationAction {
    /// List the tenant's applications.
    List,
    /// Create an application.
    Create,
    /// Delete an application.
    Delete,
}

impl ApplicationAction {
    /// Parses an action token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "list" => Some(ApplicationAction::List),
            "create" => Some(ApplicationAction::Create),
            "delete" => Some(ApplicationAction::Delete),
            _ => None,
        }
    }

    /// Required options.
    pub fn requirements(self) -> &'static [Requirement] {
        match self {
            ApplicationAction::List => &[],
            ApplicationAction::Create => &[
                Requirement::Field(Field::Name),
                Requirement::Field(Field::Description),
            ],
            ApplicationAction::Delete => &[Requirement::Field(Field::Application)],
        }
    }
}

/// Runs an application command.
pub async fn run_application(
    action: ApplicationAction,
    ctx: &Context<'_>,
    out: &mut dyn Write,
) -> CliResult<()> {
    match action {
        ApplicationAction::List => list_applications(ctx, out).await,
        ApplicationAction::Create => {
            let application = ctx.service.create_application(&new_resource(ctx)?).await?;
            tracing::debug!(href = %application.href, "application created");
            writeln!(out, "Application created.")?;
            Ok(())
        }
        ApplicationAction::Delete => {
            let application = ctx
                .service
                .get_application(ctx.require(Field::Application)?)
                .await?;
            ctx.service.delete(&application.href).await?;
            writeln!(out, "Application deleted.")?;
            Ok(())
        }
    }
}

/// Lists the tenant's applications.
async fn list_applications(ctx: &Context<'_>, out: &mut dyn Write) -> CliResult<()> {
    let tenant = ctx.service.current_tenant().await?;
    let href = tenant.applications.href.as_str();
    let service = ctx.service;

    let applications: Vec<Application> =
        collect_all(paginate(move |offset, limit| service.application_page(href, offset, limit)))
            .await?;
    tracing::debug!(count = applications.len(), "fetched applications");
    output(out, &applications, ctx.format)
}
