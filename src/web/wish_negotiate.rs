#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::web::{Accept, Data, Query};
use poem::{handler, IntoResponse, Request, Response};

use crate::greeting::Wish;
use crate::utils::config::WishConfig;
use crate::utils::wish_utils::{base_url, debug_request, prefers_html};
use crate::web::wish_web::html_wish;
use crate::web::{make_http_400, WishParams};

const ANSI_GREEN: &str = "\x1b[1;32m";
const ANSI_CYAN : &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// wish:
// ---------------------------------------------------------------------------
/** GET /wish?name= - picks HTML or plain text from the Accept header.
 * Browsers get the web page; anything else gets text, coloured for
 * terminals when ansi_text is set.
 */
#[handler]
pub fn wish(http_req: &Request, Query(pairs): Query<Vec<(String, String)>>,
            accept: Accept, cfg: Data<&Arc<WishConfig>>) -> Response {
    let cfg: &WishConfig = cfg.0;
    let params = WishParams::from_pairs(pairs);
    debug_request(http_req, &params);

    let base = base_url(http_req, cfg);
    let built = match Wish::build(params.name.as_deref(), &base, cfg) {
        Ok(w) => w,
        Err(e) => return make_http_400(e.to_string()),
    };

    if prefers_html(&accept) {
        html_wish(&built, cfg)
    } else if cfg.ansi_text {
        ansi_body(&built).into_response()
    } else {
        built.text_body().into_response()
    }
}

// ---------------------------------------------------------------------------
// ansi_body:
// ---------------------------------------------------------------------------
fn ansi_body(w: &Wish) -> String {
    format!("{}{}{}\n\n Web View URL: {}{}{}\n\n",
            ANSI_GREEN, w.greeting, ANSI_RESET, ANSI_CYAN, w.share_url, ANSI_RESET)
}
