#![forbid(unsafe_code)]

use std::fmt;

// ***************************************************************************
//                                DisplayName
// ***************************************************************************
/// A name that has been trimmed, had its hyphens turned into spaces and been
/// HTML-escaped.  It is safe to embed anywhere in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// normalize:
// ---------------------------------------------------------------------------
/** Produce the display form of a name: "  Jane-Doe " becomes "Jane Doe". */
pub fn normalize(name: &str) -> DisplayName {
    DisplayName(escape_html(&clean_name(name)))
}

// ---------------------------------------------------------------------------
// clean_name:
// ---------------------------------------------------------------------------
/** Trim surrounding whitespace and replace hyphens with spaces.  No escaping
 * is done here.
 */
pub fn clean_name(name: &str) -> String {
    name.trim().replace('-', " ")
}

// ---------------------------------------------------------------------------
// escape_html:
// ---------------------------------------------------------------------------
/** Escape the five characters that are significant in HTML text and quoted
 * attribute values.  Quotes use numeric references.
 */
pub fn escape_html(text: &str) -> String {
    let mut s = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&#34;"),
            '\'' => s.push_str("&#39;"),
            _ => s.push(c),
        }
    }
    s
}
