//! SRT text cleanup.

use std::sync::OnceLock;

use regex::Regex;

/// `<font face="...">` wrapping a caption, optionally led by an `{\anN}`
/// alignment override.
fn font_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"<font face="[^"]+">(?:\{\\an\d\})?([^<]+)</font>"#).unwrap()
    })
}

/// Strip inline font markup and non-breaking space escapes from SRT text.
///
/// `<font face="X">{\an7}Hello</font>` becomes `Hello`. Every `\h` is
/// removed. Markup that does not wrap plain text is left as is.
pub fn sanitize_srt(srt: &str) -> String {
    let without_nbsp = srt.replace("\\h", "");
    font_tag_regex()
        .replace_all(&without_nbsp, "$1")
        .into_owned()
}
