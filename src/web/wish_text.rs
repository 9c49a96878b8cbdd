#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::web::{Data, Query};
use poem::{handler, IntoResponse, Request, Response};

use crate::greeting::Wish;
use crate::utils::config::WishConfig;
use crate::utils::wish_utils::{base_url, debug_request};
use crate::web::{make_http_400, WishParams};

// ---------------------------------------------------------------------------
// wish_text:
// ---------------------------------------------------------------------------
/** GET /wish/text?name= - the greeting as text/plain, for curl and friends. */
#[handler]
pub fn wish_text(http_req: &Request, Query(pairs): Query<Vec<(String, String)>>,
                 cfg: Data<&Arc<WishConfig>>) -> Response {
    let cfg: &WishConfig = cfg.0;
    let params = WishParams::from_pairs(pairs);
    debug_request(http_req, &params);

    let base = base_url(http_req, cfg);
    match Wish::build(params.name.as_deref(), &base, cfg) {
        Ok(wish) => wish.text_body().into_response(),
        Err(e) => make_http_400(e.to_string()),
    }
}
