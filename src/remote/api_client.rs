use std::time::Duration;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::{
    Contact,
    ContactForm,
    Config,
    Error,
    error::Result,
    configuration::DEFAULT_REQUEST_TIMEOUT,
};

use super::ContactApi;

pub const PATH_ALL_CONTACTS: [&str; 2]  = ["api", "get-all-contact"];
pub const PATH_NEW_CONTACT: [&str; 2]   = ["api", "new-contact"];
pub const PATH_GET_CONTACT: [&str; 2]   = ["api", "get-contact"];
pub const PATH_UPDATE_CONTACT: [&str; 2]= ["api", "update-contact"];
pub const PATH_DELETE_CONTACT: [&str; 2]= ["api", "delete-contact"];

pub struct APIClient {
    base_url    : Url,
    client      : Client,
}

impl APIClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::State(format!("Creating http client error: {e}")))?;

        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Argument(format!("Invalid server url: {}", base_url)));
        }

        Ok(Self { base_url, client })
    }

    pub fn from_config(cfg: &dyn Config) -> Result<Self> {
        Self::with_timeout(cfg.server_url(), cfg.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base url, percent-encoding each one.
    pub(crate) fn endpoint(&self, path: &[&str], id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::Argument(format!("Invalid server url: {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(path);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn check_status(rsp: Response) -> Result<Response> {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let status = rsp.status();
        if status.is_success() {
            return Ok(rsp);
        }

        let body = rsp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|v| v.message);

        warn!("Http error: status {} from backend, message: {:?}", status.as_u16(), message);
        Err(Error::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContactApi for APIClient {
    async fn contacts(&self) -> Result<Vec<Contact>> {
        let url = self.endpoint(&PATH_ALL_CONTACTS, None)?;
        debug!("GET {}", url);

        let rsp = self.client.get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let rsp = Self::check_status(rsp).await?;
        let body = rsp.bytes().await?;
        Ok(serde_json::from_slice::<Vec<Contact>>(&body)?)
    }

    async fn contact(&self, id: &str) -> Result<Contact> {
        let url = self.endpoint(&PATH_GET_CONTACT, Some(id))?;
        debug!("GET {}", url);

        let rsp = self.client.get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let rsp = Self::check_status(rsp).await?;
        let body = rsp.bytes().await?;
        Ok(serde_json::from_slice::<Contact>(&body)?)
    }

    async fn create_contact(&self, form: &ContactForm) -> Result<Option<Contact>> {
        let url = self.endpoint(&PATH_NEW_CONTACT, None)?;
        debug!("POST {}", url);

        let rsp = self.client.post(url)
            .json(form)
            .header("Accept", "application/json")
            .send()
            .await?;

        let rsp = Self::check_status(rsp).await?;
        let body = rsp.bytes().await?;
        let created = serde_json::from_slice::<Contact>(&body).ok();
        if created.is_none() {
            debug!("Create response carried no contact record");
        }
        Ok(created)
    }

    async fn update_contact(&self, id: &str, form: &ContactForm) -> Result<()> {
        let url = self.endpoint(&PATH_UPDATE_CONTACT, Some(id))?;
        debug!("PUT {}", url);

        let rsp = self.client.put(url)
            .json(form)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::check_status(rsp).await.map(|_| ())
    }

    async fn delete_contact(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&PATH_DELETE_CONTACT, Some(id))?;
        debug!("DELETE {}", url);

        let rsp = self.client.delete(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::check_status(rsp).await.map(|_| ())
    }
}
