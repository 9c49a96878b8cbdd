#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, Response};

use crate::utils::config::WishConfig;
use crate::utils::templates::render_home;
use crate::web::make_html;

// ---------------------------------------------------------------------------
// home:
// ---------------------------------------------------------------------------
/** GET / - the landing page with the name form. */
#[handler]
pub fn home(cfg: Data<&Arc<WishConfig>>) -> Response {
    let cfg: &WishConfig = cfg.0;
    make_html(StatusCode::OK, render_home(cfg), cfg)
}
