//! REST client for the identity service.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{
    Account, AccountUpdate, Application, AuthenticationResult, Directory, Group, Link, NewAccount,
    NewResource, Page, Tenant, UsernamePasswordRequest,
};
use crate::service::IdentityService;
use crate::{CliConfig, CliError, CliResult, RemoteError};

/// API key pair used to authenticate every request.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    /// Key id.
    pub id: String,
    /// Key secret.
    pub secret: String,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl ApiKey {
    /// Reads an `apiKey.properties` file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| CliError::Credentials(format!("{}: {e}", path.display())))
    }

    /// Parses Java properties text holding `apiKey.id` and `apiKey.secret`.
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut id = None;
        let mut secret = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(split) = line.find(['=', ':']) else {
                continue;
            };
            let (key, value) = (line[..split].trim(), line[split + 1..].trim());
            match key {
                "apiKey.id" => id = Some(value.to_string()),
                "apiKey.secret" => secret = Some(value.to_string()),
                _ => {}
            }
        }

        let id = id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| "missing apiKey.id".to_string())?;
        let secret = secret
            .filter(|v| !v.is_empty())
            .ok_or_else(|| "missing apiKey.secret".to_string())?;
        Ok(Self { id, secret })
    }
}

/// Authenticated handle to the identity service REST API.
pub struct HttpIdentityService {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl HttpIdentityService {
    /// Loads the API key named by the configuration and builds the client.
    pub fn from_config(config: &CliConfig) -> CliResult<Self> {
        let path = config.api_key_path()?;
        tracing::debug!(path = %path.display(), "loading API key");
        let api_key = ApiKey::load(&path)?;
        Self::new(config, api_key)
    }

    /// Creates a client for the configured base URL.
    pub fn new(config: &CliConfig, api_key: ApiKey) -> CliResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sp-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an href, accepting both absolute URLs and paths below the base URL.
    pub fn url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}/{}", self.base_url, href.trim_start_matches('/'))
        }
    }

    fn request(&self, method: Method, href: &str) -> reqwest::RequestBuilder {
        let url = self.url(href);
        tracing::debug!(%method, %url, "request");
        self.client
            .request(method, url)
            .basic_auth(&self.api_key.id, Some(&self.api_key.secret))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        href: &str,
        query: &[(&str, String)],
    ) -> CliResult<T> {
        let response = self.request(Method::GET, href).query(query).send().await?;
        handle_response(response).await
    }

    /// Makes a POST request.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        href: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> CliResult<T> {
        let response = self
            .request(Method::POST, href)
            .query(query)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Makes a POST request, discarding the response body.
    pub async fn post_no_response<B: Serialize + ?Sized>(
        &self,
        href: &str,
        body: &B,
    ) -> CliResult<()> {
        let response = self.request(Method::POST, href).json(body).send().await?;
        handle_empty_response(response).await
    }

    async fn page<T: DeserializeOwned>(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<T>> {
        self.get(
            href,
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }
}

/// Handles a response with a body.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> CliResult<T> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "response");

    if status.is_success() {
        response.json().await.map_err(CliError::Http)
    } else {
        Err(remote_error(response).await)
    }
}

/// Handles a response without a body.
async fn handle_empty_response(response: reqwest::Response) -> CliResult<()> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "response");

    if status.is_success() {
        Ok(())
    } else {
        Err(remote_error(response).await)
    }
}

/// Reads the service's error document, falling back to the raw body.
async fn remote_error(response: reqwest::Response) -> CliError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let error = match serde_json::from_str::<RemoteError>(&body) {
        Ok(mut error) if !error.message.is_empty() => {
            if error.status == 0 {
                error.status = status;
            }
            error
        }
        _ => RemoteError::from_status(status, body),
    };
    CliError::Remote(error)
}

#[derive(Serialize)]
struct LoginAttempt {
    #[serde(rename = "type")]
    kind: &'static str,
    value: String,
}

impl LoginAttempt {
    fn basic(request: &UsernamePasswordRequest) -> Self {
        let pair = format!("{}:{}", request.username, request.password);
        Self {
            kind: "basic",
            value: BASE64.encode(pair),
        }
    }
}

#[derive(Serialize)]
struct GroupMembership {
    account: Link,
    group: Link,
}

#[derive(Serialize)]
struct PasswordResetRequest<'a> {
    email: &'a str,
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn current_tenant(&self) -> CliResult<Tenant> {
        self.get("tenants/current", &[]).await
    }

    async fn get_application(&self, href: &str) -> CliResult<Application> {
        self.get(href, &[]).await
    }

    async fn get_directory(&self, href: &str) -> CliResult<Directory> {
        self.get(href, &[]).await
    }

    async fn get_group(&self, href: &str) -> CliResult<Group> {
        self.get(href, &[]).await
    }

    async fn application_page(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<Application>> {
        self.page(href, offset, limit).await
    }

    async fn directory_page(
        &self,
        href: &str,
        offset: u32,
        limit: u32,
    ) -> CliResult<Page<Directory>> {
        self.page(href, offset, limit).await
    }

    async fn group_page(&self, href: &str, offset: u32, limit: u32) -> CliResult<Page<Group>> {
        self.page(href, offset, limit).await
    }

    async fn account_page(&self, href: &str, offset: u32, limit: u32) -> CliResult<Page<Account>> {
        self.page(href, offset, limit).await
    }

    async fn create_application(&self, request: &NewResource) -> CliResult<Application> {
        self.post("applications", &[], request).await
    }

    async fn create_directory(&self, request: &NewResource) -> CliResult<Directory> {
        self.post("directories", &[], request).await
    }

    async fn create_group(&self, directory: &Directory, request: &NewResource) -> CliResult<Group> {
        self.post(&directory.groups.href, &[], request).await
    }

    async fn create_account(
        &self,
        directory: &Directory,
        request: &NewAccount,
    ) -> CliResult<Account> {
        self.post(
            &directory.accounts.href,
            &[("registrationWorkflowEnabled", "false".to_string())],
            request,
        )
        .await
    }

    async fn update_account(
        &self,
        account: &Account,
        update: &AccountUpdate,
    ) -> CliResult<Account> {
        self.post(&account.href, &[], update).await
    }

    async fn delete(&self, href: &str) -> CliResult<()> {
        let response = self.request(Method::DELETE, href).send().await?;
        handle_empty_response(response).await
    }

    async fn add_account_to_group(&self, account: &Account, group: &Group) -> CliResult<()> {
        let membership = GroupMembership {
            account: Link::new(account.href.as_str()),
            group: Link::new(group.href.as_str()),
        };
        self.post_no_response("groupMemberships", &membership).await
    }

    async fn authenticate_account(
        &self,
        application: &Application,
        request: &UsernamePasswordRequest,
    ) -> CliResult<AuthenticationResult> {
        let href = format!("{}/loginAttempts", application.href);
        self.post(&href, &[], &LoginAttempt::basic(request)).await
    }

    async fn send_password_reset_email(
        &self,
        application: &Application,
        email: &str,
    ) -> CliResult<()> {
        let href = format!("{}/passwordResetTokens", application.href);
        self.post_no_response(&href, &PasswordResetRequest { email })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_properties_file() {
        let key = ApiKey::parse(
            "# generated key\napiKey.id = 144JVZINOF5EBNCMG9EXAMPLE\napiKey.secret=lWxOiKqKPNwJmSldbiSkEbkNjgh2uRSNAb+AEXAMPLE\n",
        )
        .unwrap();

        assert_eq!(key.id, "144JVZINOF5EBNCMG9EXAMPLE");
        assert_eq!(key.secret, "lWxOiKqKPNwJmSldbiSkEbkNjgh2uRSNAb+AEXAMPLE");
    }

    #[test]
    fn accepts_colon_separator_and_bang_comments() {
        let key = ApiKey::parse("! comment\napiKey.id: abc\napiKey.secret: s=cr:t\n").unwrap();
        assert_eq!(key.id, "abc");
        assert_eq!(key.secret, "s=cr:t");
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            ApiKey::parse("apiKey.id = abc\n").unwrap_err(),
            "missing apiKey.secret"
        );
        assert_eq!(
            ApiKey::parse("apiKey.secret = abc\n").unwrap_err(),
            "missing apiKey.id"
        );
    }

    #[test]
    fn missing_file_is_a_credential_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ApiKey::load(&dir.path().join("apiKey.properties")).unwrap_err();
        assert!(matches!(err, CliError::Credentials(_)));
    }

    #[test]
    fn debug_output_hides_secret() {
        let key = ApiKey {
            id: "id".to_string(),
            secret: "top-secret".to_string(),
        };
        assert!(!format!("{key:?}").contains("top-secret"));
    }

    #[test]
    fn resolves_relative_and_absolute_hrefs() {
        let config =
            CliConfig::default().with_overrides(Some("http://localhost:9000/v1/"), None, None);
        let service = HttpIdentityService::new(
            &config,
            ApiKey {
                id: "id".to_string(),
                secret: "secret".to_string(),
            },
        )
        .unwrap();

        assert_eq!(service.base_url(), "http://localhost:9000/v1");
        assert_eq!(service.url("/applications"), "http://localhost:9000/v1/applications");
        assert_eq!(
            service.url("https://api.example.com/v1/groups/1"),
            "https://api.example.com/v1/groups/1"
        );
    }

    #[test]
    fn login_attempt_encodes_basic_pair() {
        let attempt = LoginAttempt::basic(&UsernamePasswordRequest::new("bob", "pw"));
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["type"], "basic");
        assert_eq!(json["value"], BASE64.encode("bob:pw"));
    }
}
