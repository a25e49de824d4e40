use crate::{Result, SourceError};
use dialbook_core::{Contact, ContactApi, ContactId, ContactRequest};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

pub const API_KEY_HEADER: &str = "ApiKey";
const USERS_PATH: &str = "api/User";
const LIST_PATH: &str = "api/User/GetAll";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default, Deserialize)]
struct Status {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    messages: Option<Vec<String>>,
}

impl Status {
    fn check(&self) -> Result<()> {
        if self.success != Some(false) {
            return Ok(());
        }
        let mut parts: Vec<&str> = Vec::new();
        if let Some(message) = self.message.as_deref() {
            parts.push(message);
        }
        if let Some(messages) = &self.messages {
            parts.extend(messages.iter().map(String::as_str));
        }
        let detail = if parts.is_empty() {
            "success=false".to_string()
        } else {
            parts.join("; ")
        };
        Err(SourceError::Api(detail))
    }
}

#[derive(Debug, Deserialize)]
struct UsersData {
    users: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: UsersData,
    #[serde(flatten)]
    status: Status,
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope {
    data: Contact,
    #[serde(flatten)]
    status: Status,
}

fn decode_list(body: &str) -> Result<Vec<Contact>> {
    let envelope: ListEnvelope = serde_json::from_str(body)?;
    envelope.status.check()?;
    Ok(envelope.data.users)
}

fn decode_single(body: &str) -> Result<Contact> {
    let envelope: SingleEnvelope = serde_json::from_str(body)?;
    envelope.status.check()?;
    Ok(envelope.data)
}

/// Delete responses are only inspected for an explicit `success: false`.
fn check_delete(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<Status>(body) {
        Ok(status) => status.check(),
        Err(_) => Ok(()),
    }
}

/// Blocking client for the remote contact endpoints.
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpContactApi {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SourceError::Parse(format!(
                "api base url must use http or https: {base_url}"
            )));
        }
        let client = Client::builder()
            .user_agent(concat!("dialbook/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn list_url(&self) -> Result<Url> {
        Ok(self.base_url.join(LIST_PATH)?)
    }

    fn users_url(&self, id: Option<&ContactId>) -> Result<Url> {
        let mut url = self.base_url.join(USERS_PATH)?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| SourceError::Parse("api base url cannot hold a path".to_string()))?
                .push(id.as_str());
        }
        Ok(url)
    }

    fn send(&self, method: Method, url: Url, body: Option<String>) -> Result<String> {
        debug!(method = method.as_str(), url = %url, "api request");
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(body) = body {
            trace!(body = %body, "api request body");
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send()?;
        debug!(status = %response.status(), "api response");
        let text = response.error_for_status()?.text()?;
        trace!(body = %text, "api response body");
        Ok(text)
    }
}

impl ContactApi for HttpContactApi {
    type Error = SourceError;

    fn list_all(&self) -> Result<Vec<Contact>> {
        let body = self.send(Method::GET, self.list_url()?, None)?;
        decode_list(&body)
    }

    fn create(&self, request: &ContactRequest) -> Result<Contact> {
        let payload = serde_json::to_string(request)?;
        let body = self.send(Method::POST, self.users_url(None)?, Some(payload))?;
        decode_single(&body)
    }

    fn update(&self, id: &ContactId, request: &ContactRequest) -> Result<Contact> {
        let payload = serde_json::to_string(request)?;
        let body = self.send(Method::PUT, self.users_url(Some(id))?, Some(payload))?;
        decode_single(&body)
    }

    fn delete(&self, id: &ContactId) -> Result<()> {
        let body = self.send(Method::DELETE, self.users_url(Some(id))?, None)?;
        check_delete(&body)
    }

    fn get_by_id(&self, id: &ContactId) -> Result<Contact> {
        let body = self.send(Method::GET, self.users_url(Some(id))?, None)?;
        decode_single(&body)
    }
}
