//! Operations the commands need from the identity service.

use std::collections::VecDeque;
use std::pin::pin;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{self, Stream, TryStreamExt};

use crate::model::{
    Account, AccountUpdate, Application, AuthenticationResult, Directory, Group, NewAccount,
    NewResource, Page, Tenant, UsernamePasswordRequest,
};
use crate::CliResult;

/// Number of items requested per collection page.
pub const PAGE_LIMIT: u32 = 100;

/// Remote identity service.
///
/// Resources are addressed by href. Collections are fetched one page at a time.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Gets the tenant owning the API key.
    async fn current_tenant(&self) -> CliResult<Tenant>;

    /// Gets an application by href.
    async fn get_application(&self, href: &str) -> CliResult<Application>;

    /// Gets a directory by href.
    async fn get_directory(&self, href: &str) -> CliResult<Directory>;

    /// Gets a group by href.
    async fn get_group(&self, href: &str) -> CliResult<Group>;

    /// Fetches one page of an application collection.
    async fn application_page(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<Application>>;

    /// Fetches one page of a directory collection.
    async fn directory_page(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<Directory>>;

    /// Fetches one page of a group collection.
    async fn group_page(&self, href: &str, offset: u32, limit: u32) -> CliResult<Page<Group>>;

    /// Fetches one page of an account collection.
    async fn account_page(&self, href: &str, offset: u32, limit: u32) -> CliResult<Page<Account>>;

    /// Creates an application.
    async fn create_application(&self, request: &NewResource) -> CliResult<Application>;

    /// Creates a directory.
    async fn create_directory(&self, request: &NewResource) -> CliResult<Directory>;

    /// Creates a group in a directory.
    async fn create_group(&self, directory: &Directory, request: &NewResource) -> CliResult<Group>;

    /// Creates an account in a directory.
    async fn create_account(
        &self,
        directory: &Directory,
        request: &NewAccount,
    ) -> CliResult<Account>;

    /// Sends the changed fields of an account.
    async fn update_account(
        &self,
        account: &Account,
        update: &AccountUpdate,
    ) -> CliResult<Account>;

    /// Deletes any resource by href.
    async fn delete(&self, href: &str) -> CliResult<()>;

    /// Adds an account to a group.
    async fn add_account_to_group(&self, account: &Account, group: &Group) -> CliResult<()>;

    /// Checks username and password against an application.
    async fn authenticate_account(
        &self,
        application: &Application,
        request: &UsernamePasswordRequest,
    ) -> CliResult<AuthenticationResult>;

    /// Sends a password reset email through an application.
    async fn send_password_reset_email(
        &self,
        application: &Application,
        email: &str,
    ) -> CliResult<()>;
}

struct Cursor<F, T> {
    fetch: F,
    offset: u32,
    exhausted: bool,
    buffered: VecDeque<T>,
}

impl<'a, F, T> Cursor<F, T>
where
    F: Fn(u32, u32) -> BoxFuture<'a, CliResult<Page<T>>>,
{
    async fn advance(mut self) -> CliResult<Option<(T, Self)>> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Ok(Some((item, self)));
            }
            if self.exhausted {
                return Ok(None);
            }

            let page = (self.fetch)(self.offset, PAGE_LIMIT).await?;
            let received = u32::try_from(page.items.len()).unwrap_or(u32::MAX);
            self.offset = self.offset.saturating_add(received);
            self.exhausted = received == 0 || self.offset >= page.size;
            self.buffered.extend(page.items);
        }
    }
}

/// Lazily walks a paginated collection.
///
/// A page is requested only once the items of the previous one are consumed.
pub fn paginate<'a, T, F>(fetch: F) -> impl Stream<Item = CliResult<T>> + 'a
where
    T: 'a,
    F: Fn(u32, u32) -> BoxFuture<'a, CliResult<Page<T>>> + 'a,
{
    let cursor = Cursor {
        fetch,
        offset: 0,
        exhausted: false,
        buffered: VecDeque::new(),
    };

    stream::try_unfold(cursor, Cursor::advance)
}

/// Lazily walks the accounts of a collection href.
pub fn accounts<'a, S>(
    service: &'a S,
    href: &'a str,
) -> impl Stream<Item = CliResult<Account>> + 'a
where
    S: IdentityService + ?Sized,
{
    paginate(move |offset, limit| service.account_page(href, offset, limit))
}

/// Scans an account collection for the first account whose email matches exactly.
pub async fn find_account<'a, S>(
    service: &'a S,
    href: &'a str,
    email: &str,
) -> CliResult<Option<Account>>
where
    S: IdentityService + ?Sized,
{
    let mut accounts = pin!(accounts(service, href));
    while let Some(account) = accounts.try_next().await? {
        if account.email == email {
            return Ok(Some(account));
        }
    }
    Ok(None)
}

/// Collects every item of a paginated collection.
pub async fn collect_all<T>(items: impl Stream<Item = CliResult<T>>) -> CliResult<Vec<T>> {
    items.try_collect().await
}
