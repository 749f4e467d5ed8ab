#![warn(missing_docs, clippy::explicit_iter_loop, clippy::use_self)]

//! # influxdb2_client
//!
//! A small client for the bucket administration endpoints of the
//! [InfluxDB 2.0 API][2api], used to prepare a server before a benchmark run.
//!
//! [2api]: https://docs.influxdata.com/influxdb/v2/api/

use reqwest::Method;
use snafu::Snafu;

/// Errors that occur while making requests to the InfluxDB 2.0 API.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RequestError {
    /// The underlying `reqwest` library returned an error.
    #[snafu(display("Error while processing the HTTP request: {}", source))]
    ReqwestProcessing {
        /// The underlying error
        source: reqwest::Error,
    },

    /// The server returned a status other than the one the call expects.
    #[snafu(display("HTTP request returned an error: {}, `{}`", status, text))]
    Http {
        /// The status of the response
        status: reqwest::StatusCode,
        /// The body of the response
        text: String,
    },

    /// A request body could not be serialized.
    #[snafu(display("Error while serializing to JSON: {}", source))]
    Serializing {
        /// The underlying error
        source: serde_json::Error,
    },
}

/// Client to a server supporting the InfluxData 2.0 API.
#[derive(Debug, Clone)]
pub struct Client {
    /// The base URL this client sends requests to
    pub url: String,
    auth_header: Option<String>,
    reqwest: reqwest::Client,
}

impl Client {
    /// Create a new client pointing to the URL specified in
    /// `protocol://server:port` format and using the specified token for
    /// authorization. An empty token sends no `Authorization` header.
    ///
    /// # Example
    ///
    /// ```
    /// let client = influxdb2_client::Client::new("http://localhost:8086", "my-token");
    /// ```
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let token = auth_token.into();
        let auth_header = if token.is_empty() {
            None
        } else {
            Some(format!("Token {token}"))
        };

        Self {
            url: url.into().trim_end_matches('/').to_owned(),
            auth_header,
            reqwest: reqwest::Client::new(),
        }
    }

    /// Consolidate common request building code
    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.reqwest.request(method, url);

        if let Some(auth) = &self.auth_header {
            req = req.header("Authorization", auth);
        }

        req
    }
}

pub mod api {
    //! InfluxDB 2.0 API endpoints

    pub mod buckets;
}

pub mod models {
    //! Request and response schemas

    pub mod bucket;
    pub use bucket::{Bucket, Buckets, PostBucketRequest, RetentionRule};
}
