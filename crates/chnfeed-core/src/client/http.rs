//! Thin blocking HTTP helper over curl `Easy`.

use curl::easy::{Easy, List};
use std::time::Duration;
use url::Url;

use super::error::TransportError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Feed queries can return large result sets.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT: &str = concat!("chnfeed/", env!("CARGO_PKG_VERSION"));

pub(crate) struct Response {
    pub code: u32,
    pub body: Vec<u8>,
}

/// `<remote>/<path>` without doubling or dropping slashes.
pub(crate) fn endpoint_url(remote: &Url, path: &str) -> Result<Url, TransportError> {
    let base = remote.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?)
}

/// Perform a GET (when `body` is `None`) or a JSON POST.
///
/// Non-2xx responses are returned as [`TransportError::Http`].
pub(crate) fn request(
    url: &Url,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
    verify_tls: bool,
) -> Result<Response, TransportError> {
    let mut easy = Easy::new();
    easy.url(url.as_str())?;
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.timeout(REQUEST_TIMEOUT)?;
    easy.ssl_verify_peer(verify_tls)?;
    easy.ssl_verify_host(verify_tls)?;

    let mut list = List::new();
    for (name, value) in headers {
        list.append(&format!("{}: {}", name, value))?;
    }
    if let Some(data) = body {
        easy.post(true)?;
        easy.post_fields_copy(data)?;
        list.append("Content-Type: application/json")?;
        // No 100-continue round trip for large batches.
        list.append("Expect:")?;
    }
    easy.http_headers(list)?;

    let mut buf = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            buf.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransportError::Http(code));
    }
    Ok(Response { code, body: buf })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_paths() {
        let remote = Url::parse("https://cif.example.org").unwrap();
        assert_eq!(
            endpoint_url(&remote, "feed").unwrap().as_str(),
            "https://cif.example.org/feed"
        );
        let nested = Url::parse("https://chn.example.org/base/").unwrap();
        assert_eq!(
            endpoint_url(&nested, "/api/intel_feed/").unwrap().as_str(),
            "https://chn.example.org/base/api/intel_feed/"
        );
    }
}
