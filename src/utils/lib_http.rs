use std::time::Duration;

use log::warn;
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    StatusCode,
};

use crate::error::{Error, Result};

/// Request headers for the download.  The api key, if any, goes verbatim in
/// the `Authorization` header.
pub fn request_headers(api_key: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(key) = api_key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(key)?);
    }
    Ok(headers)
}

/// Download the body of `url` as text with a single GET request.
///
/// Anything other than a 200 is an error, there are no retries.  The request
/// has no timeout unless `timeout` is set.
pub fn download_text(url: &str, headers: HeaderMap, timeout: Option<Duration>) -> Result<String> {
    let client = Client::builder().timeout(timeout).build()?;
    let response = client.get(url).headers(headers).send()?;
    if response.status() != StatusCode::OK {
        warn!("Failed to download the dataset from {}", url);
        return Err(Error::Fetch(response.status()));
    }
    Ok(response.text()?)
}
