use crate::data::SearchMode;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrarError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse request timeout {:?}", value))]
    ParseTimeout {
        source: ParseIntError,
        value: String,
    },
    #[snafu(display("Invalid records API url {:?}: {}", value, reason))]
    InvalidApiUrl { value: String, reason: String },
    #[snafu(display("Error building HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Unable to reach the records API at {}", endpoint))]
    Network {
        source: reqwest::Error,
        endpoint: String,
    },
    #[snafu(display("Records API answered {} for {}", status, endpoint))]
    Remote {
        status: reqwest::StatusCode,
        endpoint: String,
        message: Option<String>,
    },
    #[snafu(display("Unable to decode the response from {}", endpoint))]
    DecodeResponse {
        source: reqwest::Error,
        endpoint: String,
    },
    #[snafu(display("{}", source))]
    Validation { source: ValidationError },
    #[snafu(display("No such panel: {:?}", tab))]
    UnknownTab { tab: String },
    #[snafu(display("{} cannot be searched by {}", entity, mode.label()))]
    UnsupportedSearch {
        entity: &'static str,
        mode: SearchMode,
    },
}

impl RegistrarError {
    /// What the user sees inline: local problems verbatim, the server's own
    /// `mensagem` when it sent one, and `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation { source } => source.to_string(),
            Self::Remote {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Problems caught before the records API is ever contacted.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ValidationError {
    #[snafu(display("Please fill in the required fields: {}.", fields.join(", ")))]
    MissingFields { fields: Vec<&'static str> },
    #[snafu(display("ID is required."))]
    IdRequired,
    #[snafu(display("{:?} is not a valid ID.", raw))]
    InvalidId { source: ParseIntError, raw: String },
    #[snafu(display("{} must be a whole number, got {:?}.", field, raw))]
    InvalidNumber {
        source: ParseIntError,
        field: &'static str,
        raw: String,
    },
    #[snafu(display("{:?} is not a valid e-mail address.", raw))]
    InvalidEmail {
        source: email_address::Error,
        raw: String,
    },
    #[snafu(display("Fill in at least one field to update."))]
    NothingToUpdate,
    #[snafu(display("Select at least one course."))]
    NoCoursesSelected,
    #[snafu(display("Enter a value to search."))]
    BlankSearchTerm,
    #[snafu(display("Enter a name to search."))]
    BlankName,
    #[snafu(display("{:?} cannot be searched for.", term))]
    DotSegment { term: String },
}

impl IntoResponse for RegistrarError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //upstream broke
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Registrar Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseTimeout { .. } => ISE,
            Self::InvalidApiUrl { .. } | Self::BuildClient { .. } => ISE,
            Self::Network { .. } => BG,
            Self::Remote { .. } => BG,
            Self::DecodeResponse { .. } => BG,
            //panels render these inline, this only covers a handler that propagates one
            Self::Validation { .. } => BI,
            Self::UnknownTab { .. } | Self::UnsupportedSearch { .. } => NF,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
