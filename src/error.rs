// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use snafu::{IntoError, Snafu};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use surf::StatusCode;

/// The body of an error response from the API.
///
/// The status code is not part of the body; the client middleware fills it in from the response
/// before lifting the error into a [surf::Error].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_request_id: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::try_from(self.status).unwrap_or(StatusCode::InternalServerError)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)?;
        if let Some(id) = &self.debug_request_id {
            write!(f, " (request {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("API error: {}", source))]
    Api { source: ApiError },
    #[snafu(display("request failed with status {}: {}", status, message))]
    Transport { status: u16, message: String },
    #[snafu(display("invalid URL: {}", source))]
    InvalidUrl { source: url::ParseError },
    #[snafu(display("failed to encode request body: {}", source))]
    Json { source: serde_json::Error },
    #[snafu(display("invalid client configuration: {}", message))]
    Config { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Wrap an error which has no more specific representation.
    pub fn catch_all(status: StatusCode, message: String) -> Self {
        Error::Transport {
            status: status.into(),
            message,
        }
    }

    /// The HTTP status associated with this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { source } => Some(source.status()),
            Error::Transport { status, .. } => StatusCode::try_from(*status).ok(),
            _ => None,
        }
    }

    /// Convert from a generic client-side error.
    ///
    /// If `source` carries an [ApiError] (see [crate::client::parse_error_body]), it is
    /// downcasted. Otherwise it is converted to a [String] using [Display] and wrapped with
    /// [Error::catch_all].
    pub fn from_client_error(source: surf::Error) -> Self {
        let status = source.status();
        match source.downcast::<ApiError>() {
            Ok(err) => Error::Api { source: err },
            Err(err) => Self::catch_all(status, err.to_string()),
        }
    }
}

/// Context for embedding network client errors into [Error].
///
/// This type implements the [IntoError] trait from SNAFU, so it can be used with
/// [snafu::ResultExt::context] just like automatically generated SNAFU contexts. Calling
/// `some_result.context(ClientError)` converts a [surf::Error] using [Error::from_client_error].
pub struct ClientError;

impl IntoError<Error> for ClientError {
    type Source = surf::Error;

    fn into_error(self, source: Self::Source) -> Error {
        Error::from_client_error(source)
    }
}

/// Lift an [ApiError] into a [surf::Error] with the matching status.
///
/// This is the inverse of [Error::from_client_error], used by client middleware.
pub fn client_error(error: ApiError) -> surf::Error {
    surf::Error::new(error.status(), error)
}
