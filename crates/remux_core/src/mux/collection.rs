//! Per-file track bookkeeping.
//!
//! Tracks taken straight from the source use the source path and their
//! stream index. Extracted subtitles each live in their own SRT file and are
//! always track 0 of that file.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Path of the tag XML written for track `track_id` of `file`.
pub fn tag_path(file: &Path, track_id: u32) -> PathBuf {
    let mut path = file.as_os_str().to_owned();
    path.push(format!(".{}.xml", track_id));
    PathBuf::from(path)
}

/// Input files in first-seen order, each with its tagged tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackCollection {
    files: Vec<(PathBuf, BTreeMap<u32, Option<String>>)>,
}

impl TrackCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `track_id` of `file` has a tag file, with an optional language.
    ///
    /// Recording the same track twice replaces its language.
    pub fn record(&mut self, file: &Path, track_id: u32, language: Option<&str>) {
        let language = language.map(str::to_string);
        match self.files.iter_mut().find(|(path, _)| path == file) {
            Some((_, tracks)) => {
                tracks.insert(track_id, language);
            }
            None => {
                let mut tracks = BTreeMap::new();
                tracks.insert(track_id, language);
                self.files.push((file.to_path_buf(), tracks));
            }
        }
    }

    /// Files in the order they were first recorded.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|(path, _)| path.as_path())
    }

    /// Tracks recorded for `file`, ascending by id.
    pub fn tracks(&self, file: &Path) -> Option<&BTreeMap<u32, Option<String>>> {
        self.files
            .iter()
            .find(|(path, _)| path == file)
            .map(|(_, tracks)| tracks)
    }

    /// mkvmerge arguments for every recorded file.
    ///
    /// Per file: `--tags id:xml` and, when known, `--language id:code` for
    /// each track, then the file itself wrapped in parentheses. Paths are
    /// passed through as-is, so non-UTF-8 names still reach mkvmerge intact.
    pub fn args(&self) -> Vec<OsString> {
        let mut tokens = Vec::new();

        for (file, tracks) in &self.files {
            for (id, language) in tracks {
                let mut tags_arg = OsString::from(format!("{}:", id));
                tags_arg.push(tag_path(file, *id));

                tokens.push(OsString::from("--tags"));
                tokens.push(tags_arg);

                if let Some(language) = language {
                    tokens.push(OsString::from("--language"));
                    tokens.push(OsString::from(format!("{}:{}", id, language)));
                }
            }

            tokens.push(OsString::from("("));
            tokens.push(file.clone().into_os_string());
            tokens.push(OsString::from(")"));
        }

        tokens
    }

    /// Every tag XML path referenced by the collection.
    pub fn tag_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .flat_map(|(file, tracks)| tracks.keys().map(move |id| tag_path(file, *id)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of recorded tracks across all files.
    pub fn track_count(&self) -> usize {
        self.files.iter().map(|(_, tracks)| tracks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_path_appends_track_id() {
        assert_eq!(
            tag_path(Path::new("/m/in.m4v"), 1),
            PathBuf::from("/m/in.m4v.1.xml")
        );
        assert_eq!(
            tag_path(Path::new("/m/in.m4v.sub_2.srt"), 0),
            PathBuf::from("/m/in.m4v.sub_2.srt.0.xml")
        );
    }

    #[test]
    fn groups_tracks_per_file() {
        let source = Path::new("/m/in.m4v");
        let subs = Path::new("/m/in.m4v.sub_2.srt");

        let mut collection = TrackCollection::new();
        collection.record(source, 0, None);
        collection.record(source, 1, Some("eng"));
        collection.record(subs, 0, Some("fra"));

        assert_eq!(
            collection.args(),
            [
                "--tags",
                "0:/m/in.m4v.0.xml",
                "--tags",
                "1:/m/in.m4v.1.xml",
                "--language",
                "1:eng",
                "(",
                "/m/in.m4v",
                ")",
                "--tags",
                "0:/m/in.m4v.sub_2.srt.0.xml",
                "--language",
                "0:fra",
                "(",
                "/m/in.m4v.sub_2.srt",
                ")",
            ]
        );
        assert_eq!(collection.track_count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_pass_through() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let source = Path::new(OsStr::from_bytes(b"/m/\xff.m4v"));
        let mut collection = TrackCollection::new();
        collection.record(source, 0, None);

        let args = collection.args();
        assert_eq!(args[1].as_os_str(), OsStr::from_bytes(b"0:/m/\xff.m4v.0.xml"));
        assert_eq!(args[3].as_os_str(), source.as_os_str());
        assert_eq!(collection.tag_files()[0].as_os_str().as_bytes(), b"/m/\xff.m4v.0.xml");
    }

    #[test]
    fn file_order_is_first_seen() {
        let mut collection = TrackCollection::new();
        collection.record(Path::new("b"), 0, None);
        collection.record(Path::new("a"), 0, None);
        collection.record(Path::new("b"), 3, None);

        let files: Vec<_> = collection.files().collect();
        assert_eq!(files, [Path::new("b"), Path::new("a")]);
        assert_eq!(collection.tracks(Path::new("b")).unwrap().len(), 2);
    }

    #[test]
    fn each_tag_file_belongs_to_one_track() {
        let mut collection = TrackCollection::new();
        collection.record(Path::new("in"), 1, None);
        collection.record(Path::new("in"), 1, Some("eng"));
        collection.record(Path::new("in"), 0, None);

        assert_eq!(
            collection.tag_files(),
            [PathBuf::from("in.0.xml"), PathBuf::from("in.1.xml")]
        );
        assert_eq!(
            collection.tracks(Path::new("in")).unwrap().get(&1),
            Some(&Some("eng".to_string()))
        );
    }

    #[test]
    fn empty_collection_has_no_args() {
        let collection = TrackCollection::new();
        assert!(collection.is_empty());
        assert!(collection.args().is_empty());
        assert!(collection.tag_files().is_empty());
    }
}
