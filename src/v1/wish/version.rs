#![forbid(unsafe_code)]

use poem_openapi::{OpenApi, payload::Json, Object};

// From cargo.toml.
const WISH_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct VersionApi;

#[derive(Object)]
pub struct RespVersion
{
    result_code: String,
    result_msg: String,
    wish_version: String,
    git_branch: String,
    git_commit: String,
    git_dirty: String,
    source_ts: String,
    rustc_version: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl VersionApi {
    #[oai(path = "/wish/version", method = "get")]
    async fn get_version(&self) -> Json<RespVersion> {
        Json(RespVersion::process())
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespVersion {
    fn process() -> Self {
        let info = BuildInfo::current();
        Self {result_code: "0".to_string(),
              result_msg: "success".to_string(),
              wish_version: info.version.to_string(),
              git_branch: info.branch.to_string(),
              git_commit: info.commit.to_string(),
              git_dirty: info.dirty.to_string(),
              source_ts: info.source_ts.to_string(),
              rustc_version: info.rustc.to_string(),
        }
    }
}

// ***************************************************************************
//                                BuildInfo
// ***************************************************************************
/// Values captured by build.rs; also logged at startup.
pub struct BuildInfo {
    pub version: &'static str,
    pub branch: &'static str,
    pub commit: &'static str,
    pub dirty: &'static str,
    pub source_ts: &'static str,
    pub rustc: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: WISH_VERSION.unwrap_or("unknown"),
            branch: option_env!("GIT_BRANCH").unwrap_or("unknown"),
            commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
            dirty: option_env!("GIT_DIRTY").unwrap_or("unknown"),
            source_ts: option_env!("SOURCE_TIMESTAMP").unwrap_or("unknown"),
            rustc: option_env!("RUSTC_VERSION").unwrap_or("unknown"),
        }
    }
}
