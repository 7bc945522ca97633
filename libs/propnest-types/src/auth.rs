use serde::{Deserialize, Serialize};

use crate::{Role, UserRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: String,
}

/// Successful OTP verification: exactly one token and one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRoleRequest {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectRoleResponse {
    pub user: UserRecord,
}

/// Acknowledgement returned by endpoints without a payload.
///
/// Every field is optional; an empty body is a valid ack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    /// An ack is rejected only when the server says so explicitly.
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}
