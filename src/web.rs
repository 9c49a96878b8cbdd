#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result as AnyResult;
use log::{error, info, warn};
use poem::error::NotFoundError;
use poem::http::{header, StatusCode};
use poem::middleware::SetHeader;
use poem::web::Html;
use poem::{get, Endpoint, EndpointExt, IntoResponse, Request, Response, Result, Route};
use poem_openapi::OpenApiService;

use crate::utils::config::WishConfig;
use crate::utils::templates::{render_error_page, SERVER_ERR_TEMPLATE};
use crate::utils::wish_utils::RequestDebug;
use crate::v1::wish::greeting::WishApi;
use crate::v1::wish::version::VersionApi;

pub mod error_pages;
pub mod home;
pub mod wish_negotiate;
pub mod wish_text;
pub mod wish_web;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const API_TITLE: &str = "Wish Server";
const API_VERSION: &str = env!("CARGO_PKG_VERSION");
const HSTS_ONE_YEAR: &str = "max-age=31536000; includeSubDomains";

// ***************************************************************************
//                              Query Parameters
// ***************************************************************************
/// Query string accepted by every wish route.
#[derive(Debug)]
pub struct WishParams {
    pub name: Option<String>,
}

impl WishParams {
    /** Keep the first name when the parameter is repeated; other keys are
     * ignored.
     */
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let name = pairs.into_iter().find(|(key, _)| key == "name").map(|(_, value)| value);
        WishParams { name }
    }
}

// Implement the debug record trait for logging.
impl RequestDebug for WishParams {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request parameters:");
        s.push_str("\n    name: ");
        s.push_str(&format!("{:?}", self.name));
        s.push('\n');
        s
    }
}

// ***************************************************************************
//                                  Router
// ***************************************************************************
// ---------------------------------------------------------------------------
// build_app:
// ---------------------------------------------------------------------------
/** Assemble every route.  The configuration is shared read-only with all
 * handlers; nothing is mutated after this call.  Errors from any route,
 * including unmatched paths, are turned into responses before the
 * hardening headers are applied so that every response carries them.
 */
pub fn build_app(cfg: Arc<WishConfig>) -> impl Endpoint<Output = Response> {
    // JSON api and its documentation.
    let api_url = format!("{}:{}/v1", cfg.http_addr.trim_end_matches('/'), cfg.http_port);
    let api_service = OpenApiService::new((WishApi::new(cfg.clone()), VersionApi), API_TITLE, API_VERSION)
        .server(api_url);
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    let not_found_cfg = cfg.clone();
    Route::new()
        .at("/", get(home::home))
        .at("/wish", get(wish_negotiate::wish))
        .at("/wish/web", get(wish_web::wish_web))
        .at("/wish/text", get(wish_text::wish_text))
        .at("/404", get(error_pages::not_found_page))
        .at("/500", get(error_pages::server_error_page))
        .nest("/v1", api_service)
        .nest("/swagger", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .data(cfg)
        .catch_error(move |_: NotFoundError| {
            let cfg = not_found_cfg.clone();
            async move { error_pages::not_found_response(&cfg) }
        })
        .catch_all_error(|e: poem::Error| async move {
            warn!("Request failed: {}", e);
            e.into_response()
        })
        .with(hardening_headers())
        .around(access_log)
}

// ---------------------------------------------------------------------------
// hardening_headers:
// ---------------------------------------------------------------------------
fn hardening_headers() -> SetHeader {
    SetHeader::new()
        .overriding(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .overriding(header::X_FRAME_OPTIONS, "DENY")
        .overriding(header::X_XSS_PROTECTION, "1; mode=block")
        .overriding(header::STRICT_TRANSPORT_SECURITY, HSTS_ONE_YEAR)
}

// ---------------------------------------------------------------------------
// access_log:
// ---------------------------------------------------------------------------
async fn access_log<E: Endpoint>(next: E, req: Request) -> Result<Response> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    match next.call(req).await {
        Ok(resp) => {
            let resp = resp.into_response();
            info!("{} {} -> {}", method, path, resp.status().as_u16());
            Ok(resp)
        }
        Err(e) => {
            error!("{} {} -> {}", method, path, e);
            Err(e)
        }
    }
}

// ***************************************************************************
//                             Response Helpers
// ***************************************************************************
// ---------------------------------------------------------------------------
// make_http_400:
// ---------------------------------------------------------------------------
/** Plain text bad request carrying a user-facing message. */
pub fn make_http_400(msg: String) -> Response {
    (StatusCode::BAD_REQUEST, msg).into_response()
}

// ---------------------------------------------------------------------------
// make_http_500:
// ---------------------------------------------------------------------------
/** The styled 500 page, or a bare message if even that cannot render. */
pub fn make_http_500(cfg: &WishConfig) -> Response {
    match render_error_page(SERVER_ERR_TEMPLATE, cfg) {
        Ok(page) => (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string()).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// make_html:
// ---------------------------------------------------------------------------
/** Wrap a rendered page; render failures become the 500 page. */
pub fn make_html(status: StatusCode, page: AnyResult<String>, cfg: &WishConfig) -> Response {
    match page {
        Ok(page) => (status, Html(page)).into_response(),
        Err(e) => {
            error!("{}", e);
            make_http_500(cfg)
        }
    }
}
