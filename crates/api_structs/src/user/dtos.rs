use glucomate_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub timezone: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone.to_string(),
            timezone: user.timezone.to_string(),
        }
    }
}
