//! 사용자 응답 DTO

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::{Role, StripeSession, User};
use crate::domain::models::payments::ConnectedAccount;
use crate::utils::date_utils::to_rfc3339;

/// 클라이언트에 노출되는 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
    pub role: Vec<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_seller: Option<ConnectedAccount>,
    #[serde(rename = "stripeSession", skip_serializing_if = "Option::is_none")]
    pub stripe_session: Option<StripeSession>,
    pub courses: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            picture,
            role,
            stripe_account_id,
            stripe_seller,
            stripe_session,
            courses,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            picture,
            role,
            stripe_account_id,
            stripe_seller,
            stripe_session,
            courses: courses.iter().map(|id| id.to_hex()).collect(),
            created_at: to_rfc3339(&created_at),
            updated_at: to_rfc3339(&updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_password_is_never_serialized() {
        let mut user = User::new("Ryan".into(), "ryan@example.com".into(), "$2b$hash".into());
        user.id = Some(ObjectId::new());
        user.password_reset_code = "ABC123".into();

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("passwordResetCode").is_none());
        assert_eq!(json["role"][0], "Subscriber");
        assert_eq!(json["_id"].as_str().map(str::len), Some(24));
    }
}
