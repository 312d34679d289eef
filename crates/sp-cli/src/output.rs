//! Output formatting utilities.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;
use crate::model::{Account, Application, Directory, Group};
use crate::RemoteError;

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Writes the fields of an error document returned by the service.
pub fn write_remote_error(out: &mut dyn Write, error: &RemoteError) -> std::io::Result<()> {
    writeln!(out, "Message: {}", error.message)?;
    writeln!(out, "HTTP Status: {}", error.status)?;
    writeln!(out, "Developer Message: {}", error.developer_message)?;
    writeln!(out, "More Information: {}", error.more_info)?;
    writeln!(out, "Error Code: {}", error.code)
}

/// A resource that can be listed.
pub trait Listing: Serialize {
    /// Table row.
    type Row: Tabled;

    /// Writes the plain `Key: value` representation.
    fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()>;

    /// Converts to a table row.
    fn row(&self) -> Self::Row;
}

/// Account table row.
#[derive(Debug, Tabled)]
pub struct AccountRow {
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "First Name")]
    given_name: String,
    #[tabled(rename = "Last Name")]
    surname: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Application, directory and group table row.
#[derive(Debug, Tabled)]
pub struct ResourceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Href")]
    href: String,
}

fn description(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

impl Listing for Account {
    type Row = AccountRow;

    fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Email: {}", self.email)?;
        writeln!(out, "Username: {}", self.username)?;
        writeln!(out, "First name: {}", self.given_name)?;
        writeln!(out, "Last name: {}", self.surname)?;
        writeln!(out, "Status: {}", self.status)
    }

    fn row(&self) -> AccountRow {
        AccountRow {
            email: self.email.clone(),
            username: self.username.clone(),
            given_name: self.given_name.clone(),
            surname: self.surname.clone(),
            status: self.status.to_string(),
        }
    }
}

impl Listing for Group {
    type Row = ResourceRow;

    fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Name: {}", self.name)?;
        writeln!(out, "Description: {}", description(&self.description))?;
        writeln!(out, "Status: {}", self.status)?;
        writeln!(out, "Href: {}", self.href)
    }

    fn row(&self) -> ResourceRow {
        ResourceRow {
            name: self.name.clone(),
            description: description(&self.description).to_string(),
            status: self.status.to_string(),
            href: self.href.clone(),
        }
    }
}

impl Listing for Directory {
    type Row = ResourceRow;

    fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Directory: {}", self.name)?;
        writeln!(out, "  Description: {}", description(&self.description))?;
        writeln!(out, "  Status: {}", self.status)?;
        writeln!(out, "  Href: {}", self.href)
    }

    fn row(&self) -> ResourceRow {
        ResourceRow {
            name: self.name.clone(),
            description: description(&self.description).to_string(),
            status: self.status.to_string(),
            href: self.href.clone(),
        }
    }
}

impl Listing for Application {
    type Row = ResourceRow;

    fn write_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Application: {}", self.name)?;
        writeln!(out, "  Description: {}", description(&self.description))?;
        writeln!(out, "  Status: {}", self.status)?;
        writeln!(out, "  Href: {}", self.href)
    }

    fn row(&self) -> ResourceRow {
        ResourceRow {
            name: self.name.clone(),
            description: description(&self.description).to_string(),
            status: self.status.to_string(),
            href: self.href.clone(),
        }
    }
}

/// Outputs a list in the specified format.
pub fn output<T: Listing>(
    out: &mut dyn Write,
    items: &[T],
    format: OutputFormat,
) -> crate::CliResult<()> {
    match format {
        OutputFormat::Text => {
            for item in items {
                item.write_text(out)?;
            }
        }
        OutputFormat::Table => {
            if items.is_empty() {
                writeln!(out, "No results found.")?;
            } else {
                let table = Table::new(items.iter().map(|item| item.row()))
                    .with(Style::rounded())
                    .to_string();
                writeln!(out, "{table}")?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items)?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

/// Outputs a single item.
pub fn output_single<T: Listing>(
    out: &mut dyn Write,
    item: &T,
    format: OutputFormat,
) -> crate::CliResult<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text | OutputFormat::Table => item.write_text(out)?,
    }
    Ok(())
}
