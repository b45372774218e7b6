use serde::{Deserialize, Serialize};

/// Location of an archived object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRef {
    pub bucket: String,
    #[serde(rename = "name")]
    pub object_name: String,
}

impl StorageRef {
    /// Browser URL of the object (without scheme, as Sheets accepts it).
    pub fn browser_url(&self) -> String {
        format!("storage.cloud.google.com/{}/{}", self.bucket, self.object_name)
    }
}

/// Object name for a file archived under `prefix`: always `{prefix}/{name}`.
pub fn object_name(prefix: &str, file_name: &str) -> String {
    format!("{}/{}", prefix, file_name)
}
