use serde::{Deserialize, Serialize};

/// Fields of the contact form, echoed back and mailed verbatim.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}
