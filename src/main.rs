#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use poem::listener::TcpListener;

// Wish Utilities
use crate::utils::config::{get_parms, init_log, WishArgs, WishConfig, WishDirs};
use crate::utils::errors::Errors;
use crate::utils::templates::init_templates;
use crate::v1::wish::version::BuildInfo;
use crate::web::build_app;

// Modules
mod greeting;
mod utils;
mod v1;
mod web;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "WishServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Wish Server ---------------
    // Announce ourselves.
    println!("Starting wish_server!");

    let args = WishArgs::parse();
    let dirs = WishDirs::new(&args);
    let config = match wish_init(&args, &dirs) {
        Ok(p) => p,
        Err(e) => {
            // Logging may not be up, so report on both channels.
            eprintln!("wish_server failed to initialize: {:#}", e);
            error!("wish_server failed to initialize: {:#}", e);
            return Err(e);
        }
    };

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    // --------------- Main Loop Set Up ---------------
    let addr = format!("0.0.0.0:{}", config.http_port);
    let app = build_app(Arc::new(config));

    // ------------------ Main Loop -------------------
    info!("Server starting on {}", addr);
    let result = poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await;
    if let Err(e) = result {
        error!("Server failed to start: {}", e);
        return Err(Errors::IOError(e).into());
    }
    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// wish_init:
// ---------------------------------------------------------------------------
/** Initialize logging, read the configuration and load the templates.  Any
 * failure here is fatal.
 */
fn wish_init(args: &WishArgs, dirs: &WishDirs) -> Result<WishConfig> {
    // Configure our log.
    init_log(dirs)?;
    info!("Data root directory: {}", dirs.root_dir);

    // Read the configuration file and apply overrides.
    let config = get_parms(dirs, args)?;
    info!("{}", Errors::InputParms(format!("{:#?}", config)));

    // Log build info.
    print_version_info();

    // Parse the embedded templates.
    init_templates()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    let info = BuildInfo::current();
    info!("\n*** Running WISH={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}.",
          info.version, info.branch, info.commit, info.dirty, info.source_ts, info.rustc);
}
