use serde::{Deserialize, Serialize};

// ========== USER ==========
// Missing fields decode as "" so validation can reject them with a 400
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    #[serde(rename = "emailAddress")]
    pub email_address: String,
}

impl User {
    /// Every field must be non-empty before a user is written
    pub fn is_complete(&self) -> bool {
        [
            &self.user_id,
            &self.first_name,
            &self.last_name,
            &self.address,
            &self.mobile_number,
            &self.email_address,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}
