//! Testing utilities and mock implementations of the service traits.
//!
//! The mocks let the whole pipeline run without network access or
//! credentials.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gsimg_core::pipeline::ImagePipeline;
//! use gsimg_core::testing::{fixtures, MockDrive, MockLabelDetector, MockObjectStore, MockSheetWriter};
//!
//! let drive = Arc::new(MockDrive::new());
//! drive.add_file(fixtures::drive_file("f1", "cat.jpg"), fixtures::image_bytes(2000)).await;
//!
//! let detector = Arc::new(MockLabelDetector::new());
//! detector.set_labels(fixtures::cat_labels()).await;
//!
//! let pipeline = ImagePipeline::new(
//!     drive.clone(),
//!     Arc::new(MockObjectStore::new()),
//!     detector.clone(),
//!     Arc::new(MockSheetWriter::new()),
//! );
//! let report = pipeline.run(&fixtures::request("cat.jpg")).await?;
//! ```

mod mock_drive;
mod mock_label_detector;
mod mock_object_store;
mod mock_sheet_writer;

pub use mock_drive::MockDrive;
pub use mock_label_detector::{MockLabelDetector, RecordedDetection};
pub use mock_object_store::{MockObjectStore, RecordedUpload};
pub use mock_sheet_writer::{MockSheetWriter, RecordedAppend};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::drive::DriveFile;
    use crate::pipeline::PipelineRequest;
    use crate::vision::Label;

    /// A JPEG Drive entry modified at the start of 2021.
    pub fn drive_file(id: &str, name: &str) -> DriveFile {
        drive_file_modified(id, name, "2021-01-01T00:00:00Z")
    }

    /// A JPEG Drive entry with an explicit modification time.
    pub fn drive_file_modified(id: &str, name: &str, modified_time: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            modified_time: modified_time.to_string(),
        }
    }

    /// Fake image content of the given size.
    pub fn image_bytes(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i % 251) as u8).collect()
    }

    /// Labels a detector would plausibly report for a cat photo.
    pub fn cat_labels() -> Vec<Label> {
        vec![
            Label::new("Cat", 0.98),
            Label::new("Pet", 0.91),
            Label::new("Animal", 0.80),
            Label::new("Whiskers", 0.75),
            Label::new("Felidae", 0.7),
        ]
    }

    /// A request into `bucket`/`folder` for `sheet`, keeping three labels.
    pub fn request(file_name: &str) -> PipelineRequest {
        PipelineRequest {
            file_name: file_name.to_string(),
            bucket: "bucket".to_string(),
            folder: "folder".to_string(),
            sheet_id: "sheet".to_string(),
            top: 3,
        }
    }
}
