#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{info, error, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

// Wish Utilities
use crate::utils::errors::Errors;
use crate::utils::wish_utils::get_absolute_path;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_WISH_ROOT_DIR    : &str = "WISH_ROOT_DIR";
const ENV_WISH_PORT        : &str = "WISH_PORT";
const DEFAULT_ROOT_DIR     : &str = "~/.wish";
const CONFIG_DIR           : &str = "/config";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml"; // relative to config dir
const WISH_CONFIG_FILE     : &str = "/wish.toml";  // relative to config dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_HTTP_PORT    : u16  = 6054;

// External image service.
const DEFAULT_IMAGE_BASE_URL     : &str = "https://img.sanweb.info/friend/friend";
const DEFAULT_IMAGE_DOWNLOAD_URL : &str = "https://img.sanweb.info/dl/file";

// Console logging when no log4rs file is installed.
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// WishArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, Parser)]
#[command(name = "wish_server", version, about = "Friendship Day greeting server.")]
pub struct WishArgs {
    /// Specify the server's root data directory.
    ///
    /// The root directory is calculated using the following priority order:
    ///
    ///   1. If set, the value of the WISH_ROOT_DIR environment variable,
    ///
    ///   2. Otherwise, if set, the value of the --root-dir command line argument,
    ///
    ///   3. Otherwise, ~/.wish
    ///
    /// Configuration files are read from its config subdirectory.
    #[arg(short, long)]
    pub root_dir: Option<String>,

    /// Listening port; WISH_PORT takes precedence over this argument.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,
}

// ---------------------------------------------------------------------------
// WishDirs:
// ---------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct WishDirs {
    pub root_dir: String,
    pub config_dir: String,
}

impl WishDirs {
    /** Calculate the data directories.  Nothing is created; missing
     * configuration files simply mean default values are used.
     */
    pub fn new(args: &WishArgs) -> Self {
        let root_dir = get_root_dir(env::var(ENV_WISH_ROOT_DIR).ok(), args.root_dir.clone());
        let config_dir = root_dir.clone() + CONFIG_DIR;
        WishDirs { root_dir, config_dir }
    }

    pub fn config_file(&self) -> String {
        self.config_dir.clone() + WISH_CONFIG_FILE
    }

    pub fn log_config_file(&self) -> String {
        self.config_dir.clone() + LOG4RS_CONFIG_FILE
    }
}

// ---------------------------------------------------------------------------
// WishConfig:
// ---------------------------------------------------------------------------
/// Settings read from wish.toml.  Every field is optional in the file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct WishConfig {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
    /// Fixed base for share links, e.g. "https://wish.example.com".  When
    /// unset the request's Host header is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    pub image_base_url: String,
    pub image_download_url: String,
    /// /wish/web without a name redirects to the home page when true and
    /// answers 400 when false.
    pub redirect_missing_name: bool,
    /// Colour the plain text returned by the negotiated /wish route.
    pub ansi_text: bool,
}

impl WishConfig {
    pub fn new() -> Self {
        WishConfig::default()
    }
}

impl Default for WishConfig {
    fn default() -> Self {
        Self {
            title: "Happy Friendship Wishes".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            public_url: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_download_url: DEFAULT_IMAGE_DOWNLOAD_URL.to_string(),
            redirect_missing_name: true,
            ansi_text: false,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir(env_dir: Option<String>, arg_dir: Option<String>) -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env_dir.or(arg_dir).unwrap_or_else(|| DEFAULT_ROOT_DIR.to_string());

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the installed log4rs.yml or, when there is none,
 * with an INFO level console appender.  Returns a description of the source.
 */
pub fn init_log(dirs: &WishDirs) -> Result<String> {
    let logconfig = dirs.log_config_file();
    if Path::new(&logconfig).is_file() {
        if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
            return Err(anyhow!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e));
        }
        info!("Log4rs initialized using: {}", logconfig);
        return Ok(logconfig);
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|e| anyhow!("{}\n   {}", Errors::Log4rsInitialization("console defaults".to_string()), e))?;
    log4rs::init_config(config)
        .map_err(|e| anyhow!("{}\n   {}", Errors::Log4rsInitialization("console defaults".to_string()), e))?;

    let source = "console defaults".to_string();
    info!("Log4rs initialized using: {} ({} not found)", source, logconfig);
    Ok(source)
}

/// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config directory and apply the port overrides.  A missing file means
 * default values; a malformed file is an error.
 */
pub fn get_parms(dirs: &WishDirs, args: &WishArgs) -> Result<WishConfig> {
    let config_file = dirs.config_file();
    info!("{}", Errors::ReadingConfigFile(config_file.clone()));

    let mut config = match fs::read_to_string(&config_file) {
        Ok(contents) => parse_config(&contents, &config_file)?,
        Err(_) => {
            info!("Unable to read configuration at {}. Using default values.", config_file);
            WishConfig::new()
        }
    };

    apply_port_override(&mut config, env::var(ENV_WISH_PORT).ok(), args.port)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
fn parse_config(contents: &str, config_file: &str) -> Result<WishConfig> {
    match toml::from_str(contents) {
        Ok(c)  => Ok(c),
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file.to_string()), e);
            error!("{}", msg);
            Err(anyhow!(msg))
        }
    }
}

// ---------------------------------------------------------------------------
// apply_port_override:
// ---------------------------------------------------------------------------
/** The WISH_PORT environment variable wins over --port, which wins over the
 * configuration file.
 */
fn apply_port_override(config: &mut WishConfig, env_port: Option<String>, arg_port: Option<u16>) -> Result<()> {
    if let Some(p) = env_port {
        config.http_port = match p.trim().parse::<u16>() {
            Ok(port) => port,
            Err(_) => return Err(anyhow!(Errors::InvalidEnvValue(ENV_WISH_PORT.to_string(), p))),
        };
    } else if let Some(port) = arg_port {
        config.http_port = port;
    }
    Ok(())
}
