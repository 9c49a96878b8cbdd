#![forbid(unsafe_code)]

// Build metadata reported at startup and by GET /v1/wish/version.  Source
// trees exported without git history still build; the values fall back to
// "unknown".
fn main() {
    set_env("GIT_BRANCH", build_data::get_git_branch());
    set_env("GIT_COMMIT_SHORT", build_data::get_git_commit_short());
    set_env("GIT_DIRTY", build_data::get_git_dirty().map(|d| d.to_string()));
    // Using the build time would make the build unreproducible.
    set_env("SOURCE_TIMESTAMP", build_data::get_source_time().map(|t| t.to_string()));
    set_env("RUSTC_VERSION", build_data::get_rustc_version());

    build_data::no_debug_rebuilds();
}

fn set_env(key: &str, value: Result<String, String>) {
    let value = value.unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env={}={}", key, value);
}
