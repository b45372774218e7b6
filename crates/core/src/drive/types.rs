//! Types for the drive module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A file entry from a Drive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Drive file ID.
    pub id: String,
    /// File name.
    pub name: String,
    /// MIME type as recorded by Drive.
    pub mime_type: String,
    /// Last modification time (RFC 3339, as returned by Drive).
    pub modified_time: String,
}

/// A downloaded file: Drive metadata plus content.
#[derive(Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub mime_type: String,
    /// Kept verbatim; it is written to the sheet as-is.
    pub modified_time: String,
    pub bytes: Vec<u8>,
}

impl FileRecord {
    pub fn from_download(file: DriveFile, bytes: Vec<u8>) -> Self {
        Self {
            name: file.name,
            mime_type: file.mime_type,
            modified_time: file.modified_time,
            bytes,
        }
    }

    /// Content length in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRecord")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("modified_time", &self.modified_time)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// How to choose one file when several share the requested name.
///
/// Drive does not enforce unique names, so a lookup can be ambiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Take the first entry in the order Drive returned them.
    #[default]
    FirstReturned,
    /// Take the most recently modified entry; ties keep Drive's order.
    NewestModified,
}

impl MatchPolicy {
    /// Pick one file out of a listing, or `None` for an empty listing.
    pub fn select(&self, files: Vec<DriveFile>) -> Option<DriveFile> {
        match self {
            MatchPolicy::FirstReturned => files.into_iter().next(),
            // RFC 3339 UTC timestamps from Drive order lexicographically.
            MatchPolicy::NewestModified => files.into_iter().reduce(|best, candidate| {
                if candidate.modified_time > best.modified_time {
                    candidate
                } else {
                    best
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str, modified: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: "cat.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            modified_time: modified.to_string(),
        }
    }

    #[test]
    fn test_drive_file_deserializes_camel_case() {
        let json = r#"{"id": "1x", "name": "cat.jpg", "mimeType": "image/jpeg", "modifiedTime": "2021-01-01T00:00:00.000Z"}"#;
        let file: DriveFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.modified_time, "2021-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_first_returned_policy() {
        let files = vec![
            file("a", "2020-01-01T00:00:00Z"),
            file("b", "2022-01-01T00:00:00Z"),
        ];
        let chosen = MatchPolicy::FirstReturned.select(files).unwrap();
        assert_eq!(chosen.id, "a");
    }

    #[test]
    fn test_newest_modified_policy() {
        let files = vec![
            file("a", "2020-01-01T00:00:00Z"),
            file("b", "2022-01-01T00:00:00Z"),
            file("c", "2021-06-01T00:00:00Z"),
        ];
        let chosen = MatchPolicy::NewestModified.select(files).unwrap();
        assert_eq!(chosen.id, "b");
    }

    #[test]
    fn test_newest_modified_tie_keeps_first() {
        let files = vec![
            file("a", "2021-01-01T00:00:00Z"),
            file("b", "2021-01-01T00:00:00Z"),
        ];
        let chosen = MatchPolicy::NewestModified.select(files).unwrap();
        assert_eq!(chosen.id, "a");
    }

    #[test]
    fn test_empty_listing_selects_nothing() {
        assert!(MatchPolicy::FirstReturned.select(vec![]).is_none());
        assert!(MatchPolicy::NewestModified.select(vec![]).is_none());
    }

    #[test]
    fn test_file_record_debug_omits_bytes() {
        let record = FileRecord::from_download(file("a", "t"), vec![0u8; 2000]);
        let debug = format!("{:?}", record);
        assert!(debug.contains("size: 2000"));
        assert_eq!(record.size(), 2000);
    }
}
