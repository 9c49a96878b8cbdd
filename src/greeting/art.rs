#![forbid(unsafe_code)]

use std::fmt;

use crate::greeting::normalizer::DisplayName;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const BANNER: &str = r"
   _
 |  _|
 | |_
 |  _|
 |_|ANTASTIC FRIEND ★★★
	";

pub const QUOTES: [&str; 1] = [
    " Friendship is the compass\n that guides us\n through life's storm",
];

// ***************************************************************************
//                                 Greeting
// ***************************************************************************
/// The composed banner, name and quote.  Only contains markup-safe text as
/// long as the name it was built from was a DisplayName.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting(String);

impl Greeting {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// quote_index:
// ---------------------------------------------------------------------------
/** The quote is picked by the byte length of the raw name as it arrived on
 * the query string, before trimming or normalization.
 */
pub fn quote_index(raw_name: &str) -> usize {
    raw_name.len() % QUOTES.len()
}

// ---------------------------------------------------------------------------
// render:
// ---------------------------------------------------------------------------
/** Build the greeting shown on every wish page. */
pub fn render(raw_name: &str, display_name: &DisplayName) -> Greeting {
    let quote = QUOTES[quote_index(raw_name)];
    Greeting(format!("\n wishes@{name}:~💚${banner}\n{quote}",
                     name = display_name, banner = BANNER, quote = quote))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeting::normalizer::normalize;

    #[test]
    fn greeting_embeds_display_name() {
        let g = render("Mary-Jane", &normalize("Mary-Jane"));
        assert!(g.as_str().starts_with("\n wishes@Mary Jane:~💚$\n   _\n"));
        assert!(g.as_str().contains("|_|ANTASTIC FRIEND ★★★"));
    }

    #[test]
    fn greeting_keeps_escaping() {
        let g = render("<b>", &normalize("<b>"));
        assert!(g.as_str().contains("wishes@&lt;b&gt;:~"));
        assert!(!g.as_str().contains("<b>"));
    }

    #[test]
    fn greeting_ends_with_compass_quote() {
        let g = render("Ann", &normalize("Ann"));
        assert!(g.as_str().ends_with("\n Friendship is the compass\n that guides us\n through life's storm"));
    }

    #[test]
    fn quote_follows_raw_length() {
        // "Ann" and " Ann" normalize the same but differ in raw length.
        let display = normalize("Ann");
        let a = render("Ann", &display);
        let b = render(" Ann", &display);
        assert!(a.as_str().ends_with(QUOTES[3 % QUOTES.len()]));
        assert!(b.as_str().ends_with(QUOTES[4 % QUOTES.len()]));
    }

    #[test]
    fn quote_selection_is_deterministic() {
        for name in ["Jo", "John Doe", "李小龙", "a much longer friendly name"] {
            assert_eq!(quote_index(name), quote_index(name));
            assert_eq!(render(name, &normalize(name)), render(name, &normalize(name)));
            assert!(quote_index(name) < QUOTES.len());
        }
        // Byte length, not code points.
        assert_eq!(quote_index("é"), 2 % QUOTES.len());
    }
}
