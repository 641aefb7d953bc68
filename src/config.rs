use crate::error::{BadEnvVarSnafu, InvalidApiUrlSnafu, ParseTimeoutSnafu, RegistrarResult};
use dotenvy::var;
use reqwest::Url;
use snafu::{ResultExt, ensure};
use std::{sync::Arc, time::Duration};

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    server_ip: Arc<str>,
}

impl RuntimeConfiguration {
    pub fn new() -> RegistrarResult<Self> {
        Ok(Self {
            api_config: Arc::new(ApiConfig::new()?),
            server_ip: server_ip(var("REGISTRAR_SERVER_IP").ok()).into(),
        })
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

fn required_var(name: &'static str) -> RegistrarResult<String> {
    var(name).context(BadEnvVarSnafu { name })
}

fn server_ip(raw: Option<String>) -> String {
    raw.unwrap_or_else(|| DEFAULT_SERVER_IP.to_string())
}

/// Whole seconds, unset means no timeout.
fn parse_timeout(raw: Option<String>) -> RegistrarResult<Option<Duration>> {
    raw.map(|secs| {
        let parsed = secs.trim().parse();
        parsed
            .map(Duration::from_secs)
            .context(ParseTimeoutSnafu { value: secs })
    })
    .transpose()
}

/// Where the records API lives and how long we are willing to wait for it.
#[derive(Debug)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new() -> RegistrarResult<Self> {
        let base_url = required_var("API_BASE_URL")?;
        let timeout = parse_timeout(var("API_TIMEOUT_SECS").ok())?;

        Self::from_parts(&base_url, timeout)
    }

    pub fn from_parts(base_url: &str, timeout: Option<Duration>) -> RegistrarResult<Self> {
        //relative endpoints only join onto a base that ends in a slash
        let with_slash = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let parsed = Url::parse(&with_slash).map_err(|e| {
            InvalidApiUrlSnafu {
                value: base_url,
                reason: e.to_string(),
            }
            .build()
        })?;
        ensure!(
            !parsed.cannot_be_a_base(),
            InvalidApiUrlSnafu {
                value: base_url,
                reason: "url cannot be used as a base"
            }
        );

        Ok(Self {
            base_url: parsed,
            timeout,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
