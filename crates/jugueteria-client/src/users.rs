// User management endpoints (admin) and own-profile updates

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreateRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserUpdateRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    /// Omitted to leave the password unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdateRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("users").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.get(&format!("users/{id}")).await
    }

    pub async fn create_user(&self, request: &UserCreateRequest) -> Result<User, ApiError> {
        self.post("users", request).await
    }

    pub async fn update_user(&self, id: i64, request: &UserUpdateRequest) -> Result<User, ApiError> {
        self.put(&format!("users/{id}"), request).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("users/{id}")).await
    }

    /// Update the authenticated user's own profile.
    pub async fn update_profile(&self, request: &ProfileUpdateRequest) -> Result<User, ApiError> {
        self.put("users/me", request).await
    }
}
