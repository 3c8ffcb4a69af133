//! # User API
//!
//! Identity and profile endpoints. All require a stored token.
//!
//! ## Endpoints
//!
//! - `GET /user/current` - Current user
//! - `GET /user/info` - Profile details
//! - `PUT /user/info` - Update profile
//! - `POST /user/avatar` - Upload avatar (multipart)
//! - `POST /user/change-password` - Change password

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::attachment::Attachment;
use crate::api::client::{ApiClient, ApiError, ApiRequest};
use crate::api::transport::FormPart;

/// Profile fields accepted by `PUT /user/info`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.gender.is_none() && self.age.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl ApiClient {
    pub async fn get_current_user(&self) -> Result<Value, ApiError> {
        self.execute(ApiRequest::get("/user/current")).await
    }

    pub async fn get_user_info(&self) -> Result<Value, ApiError> {
        self.execute(ApiRequest::get("/user/info")).await
    }

    /// Update profile fields; any serializable object is passed through.
    pub async fn update_user_info<T: Serialize + ?Sized>(
        &self,
        profile: &T,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put("/user/info").json(profile)?;
        self.execute(request).await
    }

    /// Upload a new avatar under the `avatar` form field.
    pub async fn upload_avatar(&self, avatar: Attachment) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post("/user/avatar").multipart(vec![FormPart::file("avatar", avatar)]);
        self.execute(request).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/user/change-password").json(change)?;
        self.execute(request).await
    }
}
