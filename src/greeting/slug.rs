#![forbid(unsafe_code)]

// ***************************************************************************
//                                Constants
// ***************************************************************************
/// Used in links when a name produces an empty slug, e.g. "★★★" or "日本".
pub const FALLBACK_SLUG: &str = "friend";

// Url-encoding leftovers seen in shared links, applied in order before the
// code point walk.
const REPLACEMENTS: [(&str, &str); 3] = [("%25", ""), ("%20", " "), ("+", " ")];

// ---------------------------------------------------------------------------
// slugify:
// ---------------------------------------------------------------------------
/** Derive a url-safe token from a name.
 *
 * ASCII letters and digits are lowercased and kept.  Runs of spaces and
 * hyphens become a single hyphen.  Everything else, non-ASCII letters
 * included, is dropped without ending a run of separators, so the result
 * only contains [a-z0-9-] with no leading, trailing or doubled hyphens.
 * The result may be empty.
 */
pub fn slugify(name: &str) -> String {
    let mut name = name.to_string();
    for (from, to) in REPLACEMENTS {
        name = name.replace(from, to);
    }

    let mut slug = String::with_capacity(name.len());
    let mut previous_was_hyphen = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase().filter(|l| l.is_ascii_alphanumeric()) {
                slug.push(lower);
                previous_was_hyphen = false;
            }
        } else if (c == ' ' || c == '-') && !previous_was_hyphen {
            slug.push('-');
            previous_was_hyphen = true;
        }
    }

    slug.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// slug_or_fallback:
// ---------------------------------------------------------------------------
/** Slug used in links; never empty. */
pub fn slug_or_fallback(slug: &str) -> &str {
    if slug.is_empty() {FALLBACK_SLUG} else {slug}
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(slug: &str) {
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "bad character in {slug:?}");
        assert!(!slug.starts_with('-') && !slug.ends_with('-'), "edge hyphen in {slug:?}");
        assert!(!slug.contains("--"), "doubled hyphen in {slug:?}");
    }

    #[test]
    fn simple_names() {
        assert_eq!(slugify("John Doe"), "john-doe");
        assert_eq!(slugify("Mary-Jane"), "mary-jane");
        assert_eq!(slugify("  R2 D2  "), "r2-d2");
    }

    #[test]
    fn mixed_separators_collapse() {
        assert_eq!(slugify("a - -b"), "a-b");
        assert_eq!(slugify("a -.- b"), "a-b");
        assert_eq!(slugify("--a  b--"), "a-b");
    }

    #[test]
    fn other_characters_are_dropped() {
        assert_eq!(slugify("O'Brien!"), "obrien");
        assert_eq!(slugify("Tom & Jerry"), "tom-jerry");
        assert_eq!(slugify("Zoë"), "zo");
    }

    #[test]
    fn entities_keep_their_letters() {
        assert_eq!(slugify("Tom &amp; Jerry"), "tom-amp-jerry");
        assert_eq!(slugify("O&#39;Brien"), "o39brien");
        assert_eq!(slugify("&lt;script&gt;"), "ltscriptgt");
    }

    #[test]
    fn url_encoding_leftovers() {
        assert_eq!(slugify("John+Doe"), "john-doe");
        assert_eq!(slugify("John%20Doe"), "john-doe");
        assert_eq!(slugify("100%25"), "100");
    }

    #[test]
    fn unsluggable_names_are_empty() {
        assert_eq!(slugify("★★★"), "");
        assert_eq!(slugify("日本"), "");
        assert_eq!(slugify(" - "), "");
        assert_eq!(slug_or_fallback(""), FALLBACK_SLUG);
        assert_eq!(slug_or_fallback("ann"), "ann");
    }

    #[test]
    fn idempotent_and_well_formed() {
        let samples = [
            "John Doe", "  Mary--Jane  ", "a - -b", "a -.- b", "Ünïcödé Ñame", "İstanbul",
            "x+y%20z%25", "-_-", "", "ΑΒΓ abc", "tab\tsep", "Ⅻ roman", "１２３",
        ];
        for s in samples {
            let once = slugify(s);
            assert_well_formed(&once);
            assert_eq!(slugify(&once), once, "not idempotent for {s:?}");
        }
    }
}
