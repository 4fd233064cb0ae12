use serde::{Deserialize, Serialize};

/// One entry from the external major-list directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorListing {
    pub college: String,
    pub major_id: String,
    pub name: String,
    pub url: String,
}
