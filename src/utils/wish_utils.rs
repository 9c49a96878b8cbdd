#![forbid(unsafe_code)]

use path_absolutize::Absolutize;
use std::ops::Deref;
use std::path::Path;

use poem::http::header;
use poem::web::Accept;
use poem::Request;

use log::{debug, LevelFilter};

use crate::greeting::normalizer::escape_html;
use crate::utils::config::WishConfig;

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_absolute_path:
// ---------------------------------------------------------------------------
/** Replace tilde (~) and environment variable values in a path name and
 * then construct the absolute path name.  Unlike canonicalize, absolutize
 * does not care whether the file exists.  On any failure the original path
 * is returned.
 */
pub fn get_absolute_path(path: &str) -> String {
    let s = match shellexpand::full(path) {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };

    let p = Path::new(s.deref());
    let p1 = match p.absolutize() {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };
    match p1.to_str() {
        Some(x) => x.to_owned(),
        None => path.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// base_url:
// ---------------------------------------------------------------------------
/** The scheme and authority used in share links, without a trailing slash.
 * A configured public_url wins; otherwise the request's Host header is used
 * with https, since the service is expected to sit behind a TLS proxy.
 * Without either, the configured listen address is used.  The result is
 * HTML-escaped because the Host header is client controlled.
 */
pub fn base_url(http_req: &Request, cfg: &WishConfig) -> String {
    if let Some(url) = &cfg.public_url {
        return escape_html(url.trim_end_matches('/'));
    }

    match http_req.header(header::HOST) {
        Some(host) if !host.trim().is_empty() => escape_html(&format!("https://{}", host.trim())),
        _ => escape_html(&format!("{}:{}", cfg.http_addr.trim_end_matches('/'), cfg.http_port)),
    }
}

// ---------------------------------------------------------------------------
// prefers_html:
// ---------------------------------------------------------------------------
/** True when one of the accepted media types is text/html. */
pub fn prefers_html(accept: &Accept) -> bool {
    accept.0.iter().any(|mime| mime.type_() == "text" && mime.subtype() == "html")
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Check that debug or higher logging is in effect.
    if log::max_level() < LevelFilter::Debug {
        return;
    }

    // Restate the URI.
    let uri = http_req.uri();
    let mut s = format!("\n  URI: {:?}\n", uri);

    // Accumulate the headers.
    for (name, value) in http_req.headers().iter() {
        s += format!("  Header: {} = {:?} \n", name, value).as_str();
    }

    // List query parameters.
    if let Some(q) = uri.query() {
        s += format!("  Query Parameters: {:?}\n", q).as_str();
    } else {
        s += "  * No Query Parameters\n";
    }

    // Add the request's information.
    s += req.get_request_info().as_str();

    // Write the single log record.
    debug!("{}", s);
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use poem::FromRequest;

    fn request(headers: &[(&'static str, &str)]) -> Request {
        let mut builder = Request::builder().uri_str("/wish/web?name=ann");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.finish()
    }

    #[test]
    fn base_url_from_host() {
        let cfg = WishConfig::default();
        assert_eq!(base_url(&request(&[("host", "wish.example.com")]), &cfg), "https://wish.example.com");
    }

    #[test]
    fn base_url_prefers_public_url() {
        let cfg = WishConfig { public_url: Some("https://friends.example.org/".to_string()), ..WishConfig::default() };
        assert_eq!(base_url(&request(&[("host", "internal:6054")]), &cfg), "https://friends.example.org");
    }

    #[test]
    fn base_url_without_host() {
        let cfg = WishConfig::default();
        assert_eq!(base_url(&request(&[]), &cfg), "http://localhost:6054");
    }

    #[test]
    fn base_url_escapes_host() {
        let cfg = WishConfig::default();
        let url = base_url(&request(&[("host", "evil\"><x")]), &cfg);
        assert_eq!(url, "https://evil&#34;&gt;&lt;x");
    }

    async fn accepts_html(headers: &[(&'static str, &str)]) -> bool {
        let accept = Accept::from_request_without_body(&request(headers)).await.unwrap();
        prefers_html(&accept)
    }

    #[tokio::test]
    async fn accept_negotiation() {
        assert!(accepts_html(&[("accept", "text/html,application/xhtml+xml;q=0.9")]).await);
        assert!(accepts_html(&[("accept", "application/json;q=0.5, TEXT/HTML")]).await);
        assert!(!accepts_html(&[("accept", "*/*")]).await);
        assert!(!accepts_html(&[("accept", "text/plain")]).await);
        assert!(!accepts_html(&[]).await);
    }

    #[test]
    fn absolute_paths() {
        assert_eq!(get_absolute_path("/srv/wish/../wish"), "/srv/wish");
        assert!(Path::new(&get_absolute_path("relative/dir")).is_absolute());
    }
}
