//! In-memory identity service recording every call.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sp_cli::model::{
    Account, AccountUpdate, Application, AuthenticationResult, Directory, Group, Link, NewAccount,
    NewResource, Page, Status, Tenant, UsernamePasswordRequest,
};
use sp_cli::{CliConfig, CliError, CliResult, IdentityService, RemoteError};

pub const BASE: &str = "https://api.test/v1";
pub const APP: &str = "https://api.test/v1/applications/app1";
pub const DIR: &str = "https://api.test/v1/directories/dir1";
pub const GROUP: &str = "https://api.test/v1/groups/grp1";

/// A recorded service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentTenant,
    GetApplication(String),
    GetDirectory(String),
    GetGroup(String),
    Page { href: String, offset: u32 },
    CreateApplication(NewResource),
    CreateDirectory(NewResource),
    CreateGroup { directory: String, request: NewResource },
    CreateAccount { directory: String, request: NewAccount },
    UpdateAccount { href: String, update: AccountUpdate },
    Delete(String),
    AddToGroup { account: String, group: String },
    Authenticate { application: String, username: String },
    PasswordReset { application: String, email: String },
}

impl Call {
    /// Whether the call changes remote state.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Call::CurrentTenant
                | Call::GetApplication(_)
                | Call::GetDirectory(_)
                | Call::GetGroup(_)
                | Call::Page { .. }
        )
    }
}

/// Fake service; clones share the call log.
#[derive(Clone)]
pub struct FakeService {
    pub tenant: Tenant,
    pub applications: Vec<Application>,
    pub directories: Vec<Directory>,
    pub groups: Vec<Group>,
    /// Account collections keyed by collection href.
    pub accounts: HashMap<String, Vec<Account>>,
    pub page_size: u32,
    /// `(username, password)` pairs accepted by authentication.
    pub credentials: Vec<(String, String)>,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

pub fn account(n: usize) -> Account {
    Account {
        href: format!("{BASE}/accounts/acc{n}"),
        email: format!("user{n}@example.com"),
        username: format!("user{n}"),
        given_name: format!("First{n}"),
        surname: format!("Last{n}"),
        status: Status::Enabled,
    }
}

pub fn not_found() -> CliError {
    CliError::Remote(RemoteError {
        status: 404,
        code: 404,
        message: "The requested resource does not exist.".to_string(),
        developer_message: "The requested resource does not exist.".to_string(),
        more_info: "mailto:support@stormpath.com".to_string(),
    })
}

impl FakeService {
    /// One application, directory and group. The directory and application
    /// share `count` accounts; the group holds the first three.
    pub fn seeded(count: usize, page_size: u32) -> Self {
        let accounts: Vec<Account> = (0..count).map(account).collect();

        let mut collections = HashMap::new();
        collections.insert(format!("{APP}/accounts"), accounts.clone());
        collections.insert(format!("{DIR}/accounts"), accounts.clone());
        collections.insert(
            format!("{GROUP}/accounts"),
            accounts.iter().take(3).cloned().collect(),
        );

        Self {
            tenant: Tenant {
                href: format!("{BASE}/tenants/t1"),
                name: "tenant".to_string(),
                applications: Link::new(format!("{BASE}/tenants/t1/applications")),
                directories: Link::new(format!("{BASE}/tenants/t1/directories")),
            },
            applications: vec![Application {
                href: APP.to_string(),
                name: "My App".to_string(),
                description: Some("Main application".to_string()),
                status: Status::Enabled,
                accounts: Link::new(format!("{APP}/accounts")),
            }],
            directories: vec![Directory {
                href: DIR.to_string(),
                name: "My Dir".to_string(),
                description: None,
                status: Status::Enabled,
                accounts: Link::new(format!("{DIR}/accounts")),
                groups: Link::new(format!("{DIR}/groups")),
            }],
            groups: vec![Group {
                href: GROUP.to_string(),
                name: "Admins".to_string(),
                description: Some("Administrators".to_string()),
                status: Status::Enabled,
                accounts: Link::new(format!("{GROUP}/accounts")),
            }],
            accounts: collections,
            page_size,
            credentials: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials
            .push((username.to_string(), password.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn pages_fetched(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Page { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page<T: Clone>(&self, href: &str, items: &[T], offset: u32, limit: u32) -> Page<T> {
        self.record(Call::Page {
            href: href.to_string(),
            offset,
        });
        let limit = limit.min(self.page_size);
        let start = (offset as usize).min(items.len());
        let end = (start + limit as usize).min(items.len());
        Page {
            offset,
            limit,
            size: items.len() as u32,
            items: items[start..end].to_vec(),
        }
    }
}

fn find<T: Clone>(items: &[T], href: &str, href_of: impl Fn(&T) -> &str) -> CliResult<T> {
    items
        .iter()
        .find(|item| href_of(item) == href)
        .cloned()
        .ok_or_else(not_found)
}

#[async_trait]
impl IdentityService for FakeService {
    async fn current_tenant(&self) -> CliResult<Tenant> {
        self.record(Call::CurrentTenant);
        Ok(self.tenant.clone())
    }

    async fn get_application(&self, href: &str) -> CliResult<Application> {
        self.record(Call::GetApplication(href.to_string()));
        find(&self.applications, href, |a| a.href.as_str())
    }

    async fn get_directory(&self, href: &str) -> CliResult<Directory> {
        self.record(Call::GetDirectory(href.to_string()));
        find(&self.directories, href, |d| d.href.as_str())
    }

    async fn get_group(&self, href: &str) -> CliResult<Group> {
        self.record(Call::GetGroup(href.to_string()));
        find(&self.groups, href, |g| g.href.as_str())
    }

    async fn application_page(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<Application>> {
        Ok(self.page(href, &self.applications, offset, limit))
    }

    async fn directory_page(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<Directory>> {
        Ok(self.page(href, &self.directories, offset, limit))
    }

    async fn group_page(&self, href: &str, offset: u32, limit: u32) -> CliResult<Page<Group>> {
        Ok(self.page(href, &self.groups, offset, limit))
    }

    async fn account_page(&self, href: &str, offset: u32, limit: u32) -> CliResult<Page<Account>> {
        let Some(accounts) = self.accounts.get(href) else {
            self.record(Call::Page {
                href: href.to_string(),
                offset,
            });
            return Err(not_found());
        };
        Ok(self.page(href, accounts, offset, limit))
    }

    async fn create_application(&self, request: &NewResource) -> CliResult<Application> {
        self.record(Call::CreateApplication(request.clone()));
        Ok(Application {
            href: format!("{BASE}/applications/new"),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            status: Status::Enabled,
            accounts: Link::new(format!("{BASE}/applications/new/accounts")),
        })
    }

    async fn create_directory(&self, request: &NewResource) -> CliResult<Directory> {
        self.record(Call::CreateDirectory(request.clone()));
        Ok(Directory {
            href: format!("{BASE}/directories/new"),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            status: Status::Enabled,
            accounts: Link::new(format!("{BASE}/directories/new/accounts")),
            groups: Link::new(format!("{BASE}/directories/new/groups")),
        })
    }

    async fn create_group(&self, directory: &Directory, request: &NewResource) -> CliResult<Group> {
        self.record(Call::CreateGroup {
            directory: directory.href.clone(),
            request: request.clone(),
        });
        Ok(Group {
            href: format!("{BASE}/groups/new"),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            status: Status::Enabled,
            accounts: Link::new(format!("{BASE}/groups/new/accounts")),
        })
    }

    async fn create_account(
        &self,
        directory: &Directory,
        request: &NewAccount,
    ) -> CliResult<Account> {
        self.record(Call::CreateAccount {
            directory: directory.href.clone(),
            request: request.clone(),
        });
        Ok(Account {
            href: format!("{BASE}/accounts/new"),
            email: request.email.clone(),
            username: request.username.clone(),
            given_name: request.given_name.clone(),
            surname: request.surname.clone(),
            status: request.status,
        })
    }

    async fn update_account(
        &self,
        account: &Account,
        update: &AccountUpdate,
    ) -> CliResult<Account> {
        self.record(Call::UpdateAccount {
            href: account.href.clone(),
            update: update.clone(),
        });
        Ok(account.clone())
    }

    async fn delete(&self, href: &str) -> CliResult<()> {
        self.record(Call::Delete(href.to_string()));
        Ok(())
    }

    async fn add_account_to_group(&self, account: &Account, group: &Group) -> CliResult<()> {
        self.record(Call::AddToGroup {
            account: account.href.clone(),
            group: group.href.clone(),
        });
        Ok(())
    }

    async fn authenticate_account(
        &self,
        application: &Application,
        request: &UsernamePasswordRequest,
    ) -> CliResult<AuthenticationResult> {
        self.record(Call::Authenticate {
            application: application.href.clone(),
            username: request.username.clone(),
        });

        let accepted = self
            .credentials
            .iter()
            .any(|(u, p)| *u == request.username && *p == request.password);
        if !accepted {
            return Err(CliError::Remote(RemoteError {
                status: 400,
                code: 7100,
                message: "Invalid username or password.".to_string(),
                developer_message: "Login attempt failed because the specified password is incorrect."
                    .to_string(),
                more_info: "mailto:support@stormpath.com".to_string(),
            }));
        }

        let account = self.accounts[&application.accounts.href]
            .iter()
            .find(|a| a.username == request.username || a.email == request.username)
            .ok_or_else(not_found)?;
        Ok(AuthenticationResult {
            account: Link::new(account.href.clone()),
        })
    }

    async fn send_password_reset_email(&self, application: &Application, email: &str) -> CliResult<()> {
        self.record(Call::PasswordReset {
            application: application.href.clone(),
            email: email.to_string(),
        });
        Ok(())
    }
}

/// Parses `args` and runs them against `service`, returning the exit code and stdout.
pub async fn invoke(service: &FakeService, args: &[&str]) -> (i32, String) {
    use clap::Parser;

    let mut argv = vec!["stormpath"];
    argv.extend_from_slice(args);
    let cli = sp_cli::Cli::try_parse_from(argv).expect("arguments should parse");

    let mut out = Vec::new();
    let shared = service.clone();
    let code = sp_cli::run(
        &cli,
        || Ok(CliConfig::default()),
        move |_| Ok(Box::new(shared) as Box<dyn IdentityService>),
        &mut out,
    )
    .await;

    (code, String::from_utf8(out).expect("output should be UTF-8"))
}
