mod parse;

use std::time::Duration;

use reqwest::Url;

pub use self::parse::PortalValue;
use crate::prelude::*;

/// Export page of the portal's settings browser; the stack parameter is the
/// navigation path recorded from the WBB firmware.
const SETTINGS_EXPORT_STACK: &str =
    "0C00000100000000008000F9AF010002000301,0C000C1900000000000000F9AF020003000401";

/// Client for the pump's built-in web portal.
///
/// The portal speaks plain HTML only, so the values are scraped out of the
/// settings-export page. The session cookie obtained by [`Client::log_in`]
/// lives in the cookie store for the lifetime of the client.
pub struct Client {
    inner: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn new(base_url: Url) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { inner, base_url })
    }

    #[instrument(skip_all, fields(url = %self.base_url))]
    pub async fn log_in(&self, username: &str, password: &str) -> Result {
        info!("logging in…");
        let response = self
            .inner
            .post(self.base_url.join("login.html")?)
            .form(&[("user", username), ("pass", password)])
            .send()
            .await
            .context("failed to reach the login page")?;
        ensure!(response.status().is_success(), "login failed with {}", response.status());
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn get_values(&self) -> Result<Vec<PortalValue>> {
        let mut url = self.base_url.join("settings_export.html")?;
        url.set_query(Some(&format!("stack={SETTINGS_EXPORT_STACK}")));
        let body = self
            .inner
            .get(url)
            .send()
            .await
            .context("failed to request the settings export")?
            .error_for_status()?
            .text()
            .await
            .context("failed to read the settings export")?;
        let values = parse::extract_values(&body)?;
        info!(n_values = values.len(), "fetched");
        Ok(values)
    }
}
