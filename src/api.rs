//! Thin client for the external school-records API.
//!
//! Every method maps onto exactly one HTTP request. Nothing is cached and
//! nothing is retried; a failed call surfaces as a [`RegistrarError`] whose
//! [`RegistrarError::user_message`] prefers the server's own `mensagem`.

use crate::{
    config::ApiConfig,
    error::{
        BuildClientSnafu, DecodeResponseSnafu, DotSegmentSnafu, InvalidApiUrlSnafu, NetworkSnafu,
        RegistrarError, RegistrarResult, ValidationError, ValidationSnafu,
    },
};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use snafu::{ResultExt, ensure};

/// Body of a successful create call.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    #[serde(rename = "id_criado")]
    pub id: i64,
    #[serde(rename = "mensagem", default)]
    pub message: Option<String>,
}

/// Body of a successful update or delete call.
#[derive(Debug, Clone, Deserialize)]
pub struct Confirmation {
    #[serde(rename = "mensagem", default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "mensagem")]
    message: Option<String>,
}

/// `.` and `..` are dropped or resolved by url normalisation, even percent-encoded.
fn path_segment(param: &str) -> Result<&str, ValidationError> {
    ensure!(
        !matches!(param, "." | ".."),
        DotSegmentSnafu { term: param }
    );
    Ok(param)
}

#[derive(Clone, Debug)]
pub struct RecordsApi {
    http: Client,
    base_url: Url,
}

impl RecordsApi {
    pub fn new(config: &ApiConfig) -> RegistrarResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build().context(BuildClientSnafu)?,
            base_url: config.base_url().clone(),
        })
    }

    /// `endpoint` is relative to the base url (eg. `inserir-aluno/`), `param` is
    /// appended as one percent-encoded path segment.
    fn url(&self, endpoint: &str, param: Option<&str>) -> RegistrarResult<Url> {
        let mut url = self.base_url.join(endpoint).map_err(|e| {
            InvalidApiUrlSnafu {
                value: endpoint,
                reason: e.to_string(),
            }
            .build()
        })?;

        if let Some(param) = param {
            let param = path_segment(param).context(ValidationSnafu)?;
            url.path_segments_mut()
                .map_err(|()| {
                    InvalidApiUrlSnafu {
                        value: endpoint,
                        reason: "url cannot be used as a base",
                    }
                    .build()
                })?
                .pop_if_empty()
                .push(param);
        }

        Ok(url)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        param: Option<&str>,
    ) -> RegistrarResult<Vec<T>> {
        let url = self.url(endpoint, param)?;
        self.send(self.http.get(url.clone()), &url).await
    }

    pub async fn create(&self, endpoint: &str, payload: &Value) -> RegistrarResult<Created> {
        let url = self.url(endpoint, None)?;
        self.send(self.http.post(url.clone()).json(payload), &url)
            .await
    }

    pub async fn update(
        &self,
        endpoint: &str,
        id: i64,
        payload: &Value,
    ) -> RegistrarResult<Confirmation> {
        let url = self.url(endpoint, Some(&id.to_string()))?;
        self.send(self.http.put(url.clone()).json(payload), &url)
            .await
    }

    pub async fn delete(&self, endpoint: &str, id: i64) -> RegistrarResult<Confirmation> {
        let url = self.url(endpoint, Some(&id.to_string()))?;
        self.send(self.http.delete(url.clone()), &url).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> RegistrarResult<R> {
        let endpoint = url.path().to_string();
        let response = request.send().await.context(NetworkSnafu {
            endpoint: endpoint.clone(),
        })?;

        let status = response.status();
        debug!(%status, %endpoint, "Records API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());

            warn!(%status, %endpoint, ?message, "Records API refused request");
            return Err(RegistrarError::Remote {
                status,
                endpoint,
                message,
            });
        }

        response
            .json()
            .await
            .context(DecodeResponseSnafu { endpoint })
    }
}
