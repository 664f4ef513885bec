//! Tag XML serialization and parsing.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::error::{TagError, TagResult};
use crate::models::Tags;

const XML_HEADER: &str = "<?xml version=\"1.0\"?>\n\
<!-- <!DOCTYPE Tags SYSTEM \"matroskatags.dtd\"> -->\n";

fn snake_case_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap())
}

/// Matroska tag name for a metadata key.
///
/// `purchase_date` becomes `PURCHASE_DATE`; `ENCODER` and `MixedCase` are
/// returned unchanged.
pub fn tag_name(key: &str) -> String {
    if snake_case_regex().is_match(key) {
        key.to_ascii_uppercase()
    } else {
        key.to_string()
    }
}

/// Serialize tags into a Matroska tag XML document.
///
/// Every entry is written, even when two keys map to the same tag name
/// (`title` and `TITLE`); Matroska allows repeated `SimpleTag` names.
pub fn serialize_tags(tags: &Tags) -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str("<Tags>\n");

    for (key, value) in tags.iter() {
        if !key.chars().chain(value.chars()).all(is_xml_char) {
            tracing::warn!("Tag {}: dropping characters XML cannot represent", key);
        }
        xml.push_str("  <Tag>\n");
        xml.push_str("    <Simple>\n");
        xml.push_str(&format!("      <Name>{}</Name>\n", escape_xml(&tag_name(key))));
        xml.push_str(&format!("      <String>{}</String>\n", escape_xml(value)));
        xml.push_str("    </Simple>\n");
        xml.push_str("  </Tag>\n");
    }

    xml.push_str("</Tags>\n");
    xml
}

/// Serialize tags and write them to `path`.
pub fn write_tags_file(tags: &Tags, path: &Path) -> TagResult<()> {
    tracing::debug!("Writing {} tag(s) to {}", tags.len(), path.display());
    std::fs::write(path, serialize_tags(tags)).map_err(|source| TagError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a Matroska tag XML document back into tags.
///
/// Only top-level `Tag/Simple` entries with a `Name` are read; names are
/// returned as written in the file. Repeated names are all kept in document
/// order, so `Tags::get` sees the first.
pub fn parse_tags_xml(xml: &str) -> TagResult<Tags> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| TagError::MalformedXml(format!("XML parse error: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "Tags" {
        return Err(TagError::MalformedXml(
            "Root element must be <Tags>".to_string(),
        ));
    }

    let mut tags = Tags::new();
    for tag in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Tag")
    {
        for simple in tag
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "Simple")
        {
            let child_text = |name: &str| {
                simple
                    .children()
                    .find(|n| n.is_element() && n.tag_name().name() == name)
                    .map(|n| n.text().unwrap_or("").to_string())
            };

            if let Some(name) = child_text("Name") {
                tags.push(name, child_text("String").unwrap_or_default());
            }
        }
    }

    Ok(tags)
}

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

/// Escape text for element content.
///
/// `\r` becomes a character reference so parsers do not fold `\r\n` into
/// `\n`. Characters XML 1.0 cannot represent (C0 controls other than tab,
/// newline and carriage return, U+FFFE, U+FFFF) are dropped.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagOverrides;

    #[test]
    fn snake_case_keys_are_uppercased() {
        assert_eq!(tag_name("purchase_date"), "PURCHASE_DATE");
        assert_eq!(tag_name("title"), "TITLE");
        assert_eq!(tag_name("handler_name"), "HANDLER_NAME");
    }

    #[test]
    fn other_keys_are_unchanged() {
        assert_eq!(tag_name("ENCODER"), "ENCODER");
        assert_eq!(tag_name("MixedCase"), "MixedCase");
        assert_eq!(tag_name("com.apple.quicktime.rating"), "com.apple.quicktime.rating");
        assert_eq!(tag_name("_private"), "_private");
    }

    #[test]
    fn serializes_expected_layout() {
        let tags: Tags = [("title", "Movie")].into_iter().collect();
        let xml = serialize_tags(&tags);

        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n"));
        assert!(xml.contains(
            "  <Tag>\n    <Simple>\n      <Name>TITLE</Name>\n      <String>Movie</String>\n    </Simple>\n  </Tag>\n"
        ));
        assert!(xml.ends_with("</Tags>\n"));
    }

    #[test]
    fn empty_tags_produce_empty_root() {
        let xml = serialize_tags(&Tags::new());
        let parsed = parse_tags_xml(&xml).unwrap();
        assert!(parsed.is_empty());
        assert!(xml.contains("<Tags>\n</Tags>"));
    }

    #[test]
    fn parse_returns_transformed_names() {
        let tags: Tags = [
            ("major_brand", "M4V "),
            ("ENCODER", "Lavf"),
            ("comment", "Tom & Jerry <live>"),
        ]
        .into_iter()
        .collect();

        let parsed = parse_tags_xml(&serialize_tags(&tags)).unwrap();

        let entries: Vec<_> = parsed.iter().collect();
        assert_eq!(
            entries,
            [
                ("MAJOR_BRAND", "M4V "),
                ("ENCODER", "Lavf"),
                ("COMMENT", "Tom & Jerry <live>"),
            ]
        );
    }

    #[test]
    fn awkward_values_survive_round_trip() {
        let values = [
            "line1\r\nline2",
            "lone\rcarriage return",
            "tab\tseparated",
            "multi\nline\n",
            "&<>\"'",
            "&amp; already escaped",
            "  padded  ",
            "",
            "Émile 東京",
        ];

        for value in values {
            let tags: Tags = [("comment", value)].into_iter().collect();
            let parsed = parse_tags_xml(&serialize_tags(&tags)).unwrap();
            assert_eq!(parsed.get("COMMENT"), Some(value), "value {:?}", value);
        }
    }

    #[test]
    fn non_xml_characters_are_dropped() {
        let tags: Tags = [("comment", "a\u{1}b\u{1f}c\u{ffff}d")].into_iter().collect();
        let xml = serialize_tags(&tags);

        let parsed = parse_tags_xml(&xml).unwrap();
        assert_eq!(parsed.get("COMMENT"), Some("abcd"));
    }

    #[test]
    fn colliding_names_are_all_kept() {
        let tags: Tags = [("title", "Movie"), ("TITLE", "Film")].into_iter().collect();
        let xml = serialize_tags(&tags);
        assert_eq!(xml.matches("<Name>TITLE</Name>").count(), 2);

        let parsed = parse_tags_xml(&xml).unwrap();
        let entries: Vec<_> = parsed.iter().collect();
        assert_eq!(entries, [("TITLE", "Movie"), ("TITLE", "Film")]);
        assert_eq!(parsed.get("TITLE"), Some("Movie"));
    }

    #[test]
    fn deleted_keys_never_reach_xml() {
        let mut tags: Tags = [("title", "Movie"), ("purchase_date", "2019-05-01")]
            .into_iter()
            .collect();
        let overrides: TagOverrides = r#"{"purchase_date": null, "creation_time": null}"#
            .parse()
            .unwrap();
        tags.apply_overrides(&overrides);

        let xml = serialize_tags(&tags);
        assert!(!xml.contains("PURCHASE_DATE"));
        assert!(!xml.contains("CREATION_TIME"));
        assert!(xml.contains("TITLE"));
    }

    #[test]
    fn rejects_wrong_root() {
        let err = parse_tags_xml("<Chapters/>").unwrap_err();
        assert!(matches!(err, TagError::MalformedXml(_)));
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.xml");
        let tags: Tags = [("title", "Movie")].into_iter().collect();

        write_tags_file(&tags, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_tags_xml(&content).unwrap().get("TITLE"), Some("Movie"));
    }
}
