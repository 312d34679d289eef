//! Resource representations exchanged with the identity service.

use serde::{Deserialize, Serialize};

/// Reference to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Resource href.
    pub href: String,
}

impl Link {
    /// Creates a link to the given href.
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Enabled/disabled flag carried by applications, directories, groups and accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Usable.
    #[default]
    Enabled,
    /// Not usable.
    Disabled,
    /// Account awaiting email verification.
    Unverified,
}

impl Status {
    /// Maps the `--status` option: `"disabled"` disables, anything else enables.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some("disabled") => Status::Disabled,
            _ => Status::Enabled,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Enabled => "ENABLED",
            Status::Disabled => "DISABLED",
            Status::Unverified => "UNVERIFIED",
        };
        f.write_str(s)
    }
}

/// The tenant owning the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant href.
    pub href: String,
    /// Tenant name.
    #[serde(default)]
    pub name: String,
    /// Collection of the tenant's applications.
    pub applications: Link,
    /// Collection of the tenant's directories.
    pub directories: Link,
}

/// Application resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application href.
    pub href: String,
    /// Application name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: Status,
    /// Accounts reachable through the application's account stores.
    pub accounts: Link,
}

/// Directory resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Directory href.
    pub href: String,
    /// Directory name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: Status,
    /// Accounts in the directory.
    pub accounts: Link,
    /// Groups in the directory.
    pub groups: Link,
}

/// Group resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group href.
    pub href: String,
    /// Group name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: Status,
    /// Member accounts.
    pub accounts: Link,
}

/// Account resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account href.
    pub href: String,
    /// Email address.
    pub email: String,
    /// Username.
    #[serde(default)]
    pub username: String,
    /// First name.
    #[serde(default)]
    pub given_name: String,
    /// Last name.
    #[serde(default)]
    pub surname: String,
    /// Status.
    #[serde(default)]
    pub status: Status,
}

/// One page of a collection resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page<T> {
    /// Offset of the first item.
    #[serde(default)]
    pub offset: u32,
    /// Page size requested.
    #[serde(default)]
    pub limit: u32,
    /// Total number of items in the collection. Paging stops once the offset
    /// reaches it, so a page without one is rejected.
    pub size: u32,
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Name and description for a new application, directory or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewResource {
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Fields of an account to create in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// First name.
    pub given_name: String,
    /// Last name.
    pub surname: String,
    /// Email address.
    pub email: String,
    /// Username.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Initial status.
    pub status: Status,
}

/// Changed fields of an existing account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl AccountUpdate {
    /// Whether no field changes.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Credentials checked against an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePasswordRequest {
    /// Username or email.
    pub username: String,
    /// Password.
    pub password: String,
}

impl UsernamePasswordRequest {
    /// Creates a request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticationResult {
    /// The authenticated account.
    pub account: Link,
}
