#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use log::info;
use tera::{Context, Tera};

use crate::greeting::normalizer::escape_html;
use crate::greeting::Wish;
use crate::utils::config::WishConfig;
use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
pub const HOME_TEMPLATE      : &str = "home.html";
pub const WISH_TEMPLATE      : &str = "wish.html";
pub const NOT_FOUND_TEMPLATE : &str = "404.html";
pub const SERVER_ERR_TEMPLATE: &str = "500.html";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// The templates are compiled into the binary and parsed once.  Autoescaping
// is off: every value placed in a context is escaped before insertion.
lazy_static! {
    static ref TEMPLATES: Result<Tera, String> = load_templates();
}

// ---------------------------------------------------------------------------
// init_templates:
// ---------------------------------------------------------------------------
/** Force template parsing at startup so that a broken template stops the
 * server instead of failing requests.
 */
pub fn init_templates() -> Result<()> {
    match &*TEMPLATES {
        Ok(t) => {
            info!("Loaded HTML templates: {:?}", t.get_template_names().collect::<Vec<_>>());
            Ok(())
        }
        Err(e) => Err(anyhow!(Errors::TemplateInit(e.clone()))),
    }
}

// ---------------------------------------------------------------------------
// render_home / render_wish / render_error_page:
// ---------------------------------------------------------------------------
pub fn render_home(cfg: &WishConfig) -> Result<String> {
    render(HOME_TEMPLATE, &base_context(cfg))
}

pub fn render_wish(wish: &Wish, cfg: &WishConfig) -> Result<String> {
    let mut ctx = base_context(cfg);
    ctx.insert("display_name", wish.display_name.as_str());
    ctx.insert("slug", &wish.slug);
    ctx.insert("art", wish.greeting.as_str());
    ctx.insert("share_url", &wish.share_url);
    ctx.insert("text_url", &wish.text_url);
    ctx.insert("image_url", &wish.image_url);
    ctx.insert("download_url", &wish.download_url);
    render(WISH_TEMPLATE, &ctx)
}

pub fn render_error_page(template: &str, cfg: &WishConfig) -> Result<String> {
    render(template, &base_context(cfg))
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
fn base_context(cfg: &WishConfig) -> Context {
    let mut ctx = Context::new();
    ctx.insert("title", &escape_html(&cfg.title));
    ctx
}

fn render(template: &str, ctx: &Context) -> Result<String> {
    let tera = match &*TEMPLATES {
        Ok(t) => t,
        Err(e) => return Err(anyhow!(Errors::TemplateInit(e.clone()))),
    };
    tera.render(template, ctx)
        .map_err(|e| anyhow!("Unable to render template {}: {:?}", template, e))
}

fn load_templates() -> Result<Tera, String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(vec![
        (HOME_TEMPLATE, include_str!("../../templates/home.html")),
        (WISH_TEMPLATE, include_str!("../../templates/wish.html")),
        (NOT_FOUND_TEMPLATE, include_str!("../../templates/404.html")),
        (SERVER_ERR_TEMPLATE, include_str!("../../templates/500.html")),
    ]).map_err(|e| format!("{:?}", e))?;
    Ok(tera)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_load() {
        assert!(init_templates().is_ok());
    }

    #[test]
    fn wish_page_binds_fields() {
        let cfg = WishConfig::default();
        let wish = Wish::build(Some("John Doe"), "https://wish.example.com", &cfg).unwrap();
        let page = render_wish(&wish, &cfg).unwrap();
        assert!(page.contains("<title>John Doe : Happy Friendship Wishes</title>"));
        assert!(page.contains("wishes@John Doe:~"));
        assert!(page.contains("https://wish.example.com/wish/web?name=john-doe"));
        assert!(page.contains("https://img.sanweb.info/friend/friend?name=john-doe"));
        assert!(page.contains("curl -G --data-urlencode \"name=John Doe\" https://wish.example.com/wish/text"));
        assert!(page.contains("<form action=\"/wish/web\" method=\"get\""));
    }

    #[test]
    fn markup_in_names_stays_escaped() {
        let cfg = WishConfig::default();
        let wish = Wish::build(Some("<script>"), "https://wish.example.com", &cfg).unwrap();
        let page = render_wish(&wish, &cfg).unwrap();
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
        assert!(!page.contains("wishes@<script>"));
    }

    #[test]
    fn error_pages_render() {
        let cfg = WishConfig::default();
        assert!(render_error_page(NOT_FOUND_TEMPLATE, &cfg).unwrap().contains("404"));
        assert!(render_error_page(SERVER_ERR_TEMPLATE, &cfg).unwrap().contains("500"));
        assert!(render_home(&cfg).unwrap().contains("Create Your Personalized Greeting"));
    }
}
