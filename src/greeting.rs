#![forbid(unsafe_code)]

use log::info;

use crate::utils::config::WishConfig;
use crate::utils::errors::WishError;

pub mod art;
pub mod normalizer;
pub mod slug;
pub mod validator;

use art::Greeting;
use normalizer::{escape_html, DisplayName};

// ***************************************************************************
//                                   Wish
// ***************************************************************************
/// Everything a wish page shows, computed once per request.  All string
/// fields are safe to place in HTML without further escaping.
#[derive(Debug, Clone)]
pub struct Wish {
    pub display_name: DisplayName,
    pub slug: String,
    pub greeting: Greeting,
    pub share_url: String,
    pub text_url: String,
    pub image_url: String,
    pub download_url: String,
}

impl Wish {
    // -----------------------------------------------------------------------
    // build:
    // -----------------------------------------------------------------------
    /** Validate the raw query value and derive the greeting, slug and links.
     * The base_url must already be HTML-escaped and carry no trailing slash.
     * An absent or empty name is reported as a missing parameter.
     */
    pub fn build(raw_name: Option<&str>, base_url: &str, cfg: &WishConfig) -> Result<Wish, WishError> {
        let raw_name = match raw_name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(WishError::MissingParameter),
        };

        let valid = match validator::validate(raw_name) {
            Ok(v) => v,
            Err(e) => {
                info!("Rejected name {:?}: {}", raw_name, e);
                return Err(e);
            }
        };

        let display_name = normalizer::normalize(valid.as_str());
        let greeting = art::render(valid.as_str(), &display_name);
        let slug = slug::slugify(display_name.as_str());

        let link_slug = slug::slug_or_fallback(&slug);
        let share_url = format!("{}/wish/web?name={}", base_url, link_slug);
        let text_url = format!("{}/wish/text", base_url);
        let image_url = format!("{}?name={}", escape_html(&cfg.image_base_url), link_slug);
        let download_url = format!("{}?url={}", escape_html(&cfg.image_download_url), image_url);

        Ok(Wish {display_name, slug, greeting, share_url, text_url, image_url, download_url})
    }

    // -----------------------------------------------------------------------
    // text_body:
    // -----------------------------------------------------------------------
    /** Plain text representation: the greeting followed by the share link. */
    pub fn text_body(&self) -> String {
        format!("{}\n\n Web View URL: {}\n\n", self.greeting, self.share_url)
    }
}
