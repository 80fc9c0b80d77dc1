use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

// Some WordPress installs answer 403 to the default reqwest agent
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:83.0) Gecko/20100101 Firefox/83.0";

pub struct Client {
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(user_agent: Option<&str>) -> Result<Client> {
        let agent = user_agent.unwrap_or(DEFAULT_USER_AGENT);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(agent)
                .with_context(|| format!("Invalid user agent {}", agent))?,
        );

        let http = reqwest::blocking::Client::builder()
            .default_headers(default_headers)
            .timeout(None::<Duration>)
            .build()
            .context("Error building the HTTP client")?;

        Ok(Client { http })
    }

    /// Issues a GET. Caller headers take precedence over the defaults.
    /// The response is returned as-is, whatever its status.
    pub fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let mut builder = self.http.get(url);

        if !params.is_empty() {
            builder = builder.query(params);
        }

        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name {}", name))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {}", name))?;
            builder = builder.header(name, value);
        }

        builder
            .send()
            .with_context(|| format!("Request to {} failed", url))
    }
}
