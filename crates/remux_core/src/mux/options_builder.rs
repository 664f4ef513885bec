//! mkvmerge command options builder.
//!
//! Token layout:
//!
//! ```text
//! --output OUT --global-tags GLOBAL.xml [--title TITLE]
//!     [--tags ID:XML [--language ID:LANG]]... ( FILE )   (per input file)
//!     [RAW ARGS...]
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::collection::TrackCollection;

/// Path of the global tag XML written for `source`.
pub fn global_tags_path(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_owned();
    path.push(".global_tags.xml");
    PathBuf::from(path)
}

/// Builder for mkvmerge command-line options.
///
/// Generates the argument tokens only; the executable is supplied by the caller.
pub struct MkvmergeOptionsBuilder<'a> {
    output_path: &'a Path,
    global_tags: &'a Path,
    collection: &'a TrackCollection,
    title: Option<&'a str>,
    raw_args: &'a [String],
}

impl<'a> MkvmergeOptionsBuilder<'a> {
    /// Create a new options builder.
    pub fn new(
        output_path: &'a Path,
        global_tags: &'a Path,
        collection: &'a TrackCollection,
    ) -> Self {
        Self {
            output_path,
            global_tags,
            collection,
            title: None,
            raw_args: &[],
        }
    }

    /// Set the segment title.
    pub fn with_title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    /// Arguments appended verbatim after everything else.
    pub fn with_raw_args(mut self, raw_args: &'a [String]) -> Self {
        self.raw_args = raw_args;
        self
    }

    /// Build the complete mkvmerge command tokens.
    ///
    /// Paths are kept as `OsString` so they reach mkvmerge byte for byte.
    pub fn build(&self) -> Vec<OsString> {
        let mut tokens = vec![
            OsString::from("--output"),
            self.output_path.as_os_str().to_owned(),
            OsString::from("--global-tags"),
            self.global_tags.as_os_str().to_owned(),
        ];

        if let Some(title) = self.title {
            tokens.push(OsString::from("--title"));
            tokens.push(OsString::from(title));
        }

        tokens.extend(self.collection.args());
        tokens.extend(self.raw_args.iter().map(OsString::from));

        tokens
    }
}

/// Format tokens for pretty display (one option per line).
///
/// Non-UTF-8 tokens are shown lossily; this is for logs only.
pub fn format_tokens_pretty(tokens: &[OsString]) -> String {
    let tokens: Vec<_> = tokens.iter().map(|t| t.to_string_lossy()).collect();
    let mut result = String::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if token.starts_with('-') && i + 1 < tokens.len() && !tokens[i + 1].starts_with('-') {
            // Option with value
            result.push_str(&format!("{} {} \\\n", token, tokens[i + 1]));
            i += 2;
        } else {
            result.push_str(&format!("{} \\\n", token));
            i += 1;
        }
    }

    result
}
