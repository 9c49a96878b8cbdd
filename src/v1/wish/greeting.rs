#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, payload::Json, Object, param::Query, ApiResponse};

use crate::greeting::Wish;
use crate::utils::config::WishConfig;
use crate::utils::errors::HttpResult;
use crate::utils::wish_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct WishApi {
    cfg: Arc<WishConfig>,
}

impl WishApi {
    pub fn new(cfg: Arc<WishConfig>) -> Self {
        Self { cfg }
    }
}

struct ReqWish
{
    name: Option<String>,
}

/// The display_name and greeting fields are HTML-escaped, exactly as they
/// appear on the web page.
#[derive(Object, Debug)]
pub struct RespWish
{
    result_code: String,
    result_msg: String,
    name: String,
    display_name: String,
    slug: String,
    greeting: String,
    share_url: String,
    image_url: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqWish {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request parameters:");
        s.push_str("\n    name: ");
        s.push_str(self.name.as_deref().unwrap_or("None"));
        s.push('\n');
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum WishResponse {
    #[oai(status = 200)]
    Http200(Json<RespWish>),
    #[oai(status = 400)]
    Http400(Json<HttpResult>),
}

fn make_http_200(resp: RespWish) -> WishResponse {
    WishResponse::Http200(Json(resp))
}
fn make_http_400(msg: String) -> WishResponse {
    WishResponse::Http400(Json(HttpResult::new(400.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl WishApi {
    #[oai(path = "/wish/greeting", method = "get")]
    async fn get_greeting(&self, http_req: &Request, name: Query<Option<String>>) -> WishResponse {
        let req = ReqWish { name: name.0 };
        wish_utils::debug_request(http_req, &req);

        let base = wish_utils::base_url(http_req, &self.cfg);
        match Wish::build(req.name.as_deref(), &base, &self.cfg) {
            Ok(wish) => make_http_200(RespWish::new(req.name.unwrap_or_default(), wish)),
            Err(e) => make_http_400(e.to_string()),
        }
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespWish {
    fn new(name: String, wish: Wish) -> Self {
        Self {result_code: "0".to_string(),
              result_msg: "success".to_string(),
              name,
              display_name: wish.display_name.to_string(),
              slug: wish.slug,
              greeting: wish.greeting.to_string(),
              share_url: wish.share_url,
              image_url: wish.image_url,
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;

    use super::*;
    use crate::web::build_app;

    #[tokio::test]
    async fn greeting_as_json() {
        let cli = TestClient::new(build_app(Arc::new(WishConfig::default())));
        let resp = cli.get("/v1/wish/greeting?name=John%20Doe").header("host", "wish.example.com").send().await;
        resp.assert_status_is_ok();
        resp.assert_header("x-frame-options", "DENY");
        let json = resp.json().await;
        let value = json.value().object();
        value.get("result_code").assert_string("0");
        value.get("name").assert_string("John Doe");
        value.get("display_name").assert_string("John Doe");
        value.get("slug").assert_string("john-doe");
        value.get("share_url").assert_string("https://wish.example.com/wish/web?name=john-doe");
    }

    #[tokio::test]
    async fn bad_names_as_json() {
        let cli = TestClient::new(build_app(Arc::new(WishConfig::default())));
        let resp = cli.get("/v1/wish/greeting").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let json = resp.json().await;
        json.value().object().get("result_msg").assert_string("Name is required");

        let resp = cli.get("/v1/wish/greeting?name=%07bell").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let json = resp.json().await;
        json.value().object().get("result_msg").assert_string("name contains invalid characters");
    }
}
