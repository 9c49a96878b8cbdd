#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, Response};

use crate::utils::config::WishConfig;
use crate::utils::templates::{render_error_page, NOT_FOUND_TEMPLATE};
use crate::web::{make_html, make_http_500};

// ---------------------------------------------------------------------------
// not_found_page / server_error_page:
// ---------------------------------------------------------------------------
// GET /404 and GET /500 let the error styling be checked by hand.  Nothing
// routes real failures through these handlers.
#[handler]
pub fn not_found_page(cfg: Data<&Arc<WishConfig>>) -> Response {
    not_found_response(cfg.0)
}

#[handler]
pub fn server_error_page(cfg: Data<&Arc<WishConfig>>) -> Response {
    make_http_500(cfg.0)
}

// ---------------------------------------------------------------------------
// not_found_response:
// ---------------------------------------------------------------------------
/** Also used for every unmatched route. */
pub fn not_found_response(cfg: &WishConfig) -> Response {
    make_html(StatusCode::NOT_FOUND, render_error_page(NOT_FOUND_TEMPLATE, cfg), cfg)
}
