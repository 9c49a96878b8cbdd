#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::{Data, Query, Redirect};
use poem::{handler, IntoResponse, Request, Response};

use crate::greeting::Wish;
use crate::utils::config::WishConfig;
use crate::utils::errors::WishError;
use crate::utils::templates::render_wish;
use crate::utils::wish_utils::{base_url, debug_request};
use crate::web::{make_html, make_http_400, WishParams};

// ---------------------------------------------------------------------------
// wish_web:
// ---------------------------------------------------------------------------
/** GET /wish/web?name= - the HTML greeting page.  A missing name either
 * redirects to the home page or is rejected, depending on configuration.
 */
#[handler]
pub fn wish_web(http_req: &Request, Query(pairs): Query<Vec<(String, String)>>,
                cfg: Data<&Arc<WishConfig>>) -> Response {
    let cfg: &WishConfig = cfg.0;
    let params = WishParams::from_pairs(pairs);
    debug_request(http_req, &params);

    let base = base_url(http_req, cfg);
    match Wish::build(params.name.as_deref(), &base, cfg) {
        Ok(wish) => html_wish(&wish, cfg),
        Err(WishError::MissingParameter) if cfg.redirect_missing_name => {
            Redirect::see_other("/").into_response()
        }
        Err(e) => make_http_400(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// html_wish:
// ---------------------------------------------------------------------------
pub fn html_wish(wish: &Wish, cfg: &WishConfig) -> Response {
    make_html(StatusCode::OK, render_wish(wish, cfg), cfg)
}
