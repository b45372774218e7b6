use serde::Serialize;

use crate::drive::FileRecord;
use crate::storage::StorageRef;
use crate::vision::LabelSummary;

/// One row of the results sheet, in column order:
/// folder, link, MIME type, modified time, size, labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub folder: String,
    pub link: String,
    pub mime_type: String,
    pub modified_time: String,
    pub size: String,
    pub labels: String,
}

impl ReportRow {
    /// Assemble the row for a fully processed file.
    pub fn new(
        folder: &str,
        file: &FileRecord,
        stored: &StorageRef,
        labels: &LabelSummary,
    ) -> Self {
        Self {
            folder: folder.to_string(),
            link: hyperlink_formula(&stored.browser_url(), &file.name),
            mime_type: file.mime_type.clone(),
            modified_time: file.modified_time.clone(),
            size: kilobytes(file.size()),
            labels: labels.as_str().to_string(),
        }
    }

    /// Cells in sheet column order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.folder.clone(),
            self.link.clone(),
            self.mime_type.clone(),
            self.modified_time.clone(),
            self.size.clone(),
            self.labels.clone(),
        ]
    }
}

/// Byte count as decimal kilobytes, right-aligned to six characters:
/// 2000 -> `"  2.00K"`.
pub fn kilobytes(bytes: usize) -> String {
    format!("{:6.2}K", bytes as f64 / 1000.0)
}

/// `=HYPERLINK("url", "label")` with embedded quotes doubled.
pub fn hyperlink_formula(url: &str, label: &str) -> String {
    format!(
        "=HYPERLINK(\"{}\", \"{}\")",
        url.replace('"', "\"\""),
        label.replace('"', "\"\"")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::Label;

    #[test]
    fn test_kilobytes() {
        assert_eq!(kilobytes(2000), "  2.00K");
        assert_eq!(kilobytes(0), "  0.00K");
        assert_eq!(kilobytes(1234), "  1.23K");
        assert_eq!(kilobytes(123_456_789), "123456.79K");
    }

    #[test]
    fn test_hyperlink_formula() {
        assert_eq!(
            hyperlink_formula("storage.cloud.google.com/b/folder/cat.jpg", "cat.jpg"),
            "=HYPERLINK(\"storage.cloud.google.com/b/folder/cat.jpg\", \"cat.jpg\")"
        );
    }

    #[test]
    fn test_hyperlink_formula_escapes_quotes() {
        assert_eq!(
            hyperlink_formula("u", "say \"cheese\".jpg"),
            "=HYPERLINK(\"u\", \"say \"\"cheese\"\".jpg\")"
        );
    }

    #[test]
    fn test_report_row_cells_order() {
        let file = FileRecord {
            name: "cat.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            modified_time: "2021-01-01T00:00:00Z".to_string(),
            bytes: vec![0u8; 2000],
        };
        let stored = StorageRef {
            bucket: "bucket".to_string(),
            object_name: "folder/cat.jpg".to_string(),
        };
        let labels = LabelSummary::from_labels(&[Label::new("Cat", 0.98)], 5).unwrap();

        let row = ReportRow::new("folder", &file, &stored, &labels);
        assert_eq!(
            row.cells(),
            vec![
                "folder".to_string(),
                "=HYPERLINK(\"storage.cloud.google.com/bucket/folder/cat.jpg\", \"cat.jpg\")"
                    .to_string(),
                "image/jpeg".to_string(),
                "2021-01-01T00:00:00Z".to_string(),
                "  2.00K".to_string(),
                "(98.00%) Cat".to_string(),
            ]
        );
    }
}
