//! Matroska tag XML.
//!
//! Serializes tag maps into the simple-tag XML format accepted by
//! `mkvmerge --tags` and `mkvmerge --global-tags`:
//!
//! ```xml
//! <?xml version="1.0"?>
//! <!-- <!DOCTYPE Tags SYSTEM "matroskatags.dtd"> -->
//! <Tags>
//!   <Tag>
//!     <Simple>
//!       <Name>TITLE</Name>
//!       <String>Some Movie</String>
//!     </Simple>
//!   </Tag>
//! </Tags>
//! ```
//!
//! Keys written in lowercase snake case (the ffprobe convention) are
//! upper-cased to match the Matroska tag naming convention.

mod error;
mod xml;

pub use error::{TagError, TagResult};
pub use xml::{parse_tags_xml, serialize_tags, tag_name, write_tags_file};
