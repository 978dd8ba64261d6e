//! User Entity Implementation
//!
//! `users` 컬렉션 문서. 구독자, 강사, 관리자 역할을 집합으로 가지며
//! 결제 프로세서 연결 계정과 수강 중인 강의 목록을 함께 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::payments::ConnectedAccount;

/// 사용자 역할. 문자열(`"Subscriber"` 등)로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Subscriber,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subscriber => "Subscriber",
            Role::Instructor => "Instructor",
            Role::Admin => "Admin",
        }
    }
}

/// 결제 대기 중인 체크아웃 세션과 결제 대상 강의
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripeSession {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt 해시
    pub password: String,
    #[serde(default = "default_picture")]
    pub picture: String,
    #[serde(default = "default_roles")]
    pub role: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_seller: Option<ConnectedAccount>,
    #[serde(rename = "stripeSession", default, skip_serializing_if = "Option::is_none")]
    pub stripe_session: Option<StripeSession>,
    #[serde(rename = "passwordResetCode", default)]
    pub password_reset_code: String,
    #[serde(default)]
    pub courses: Vec<ObjectId>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

fn default_picture() -> String {
    "/avatar.png".to_string()
}

fn default_roles() -> Vec<Role> {
    vec![Role::Subscriber]
}

impl User {
    /// 새 구독자 계정을 만듭니다. `password_hash`는 이미 해시된 값이어야 합니다.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password: password_hash,
            picture: default_picture(),
            role: default_roles(),
            stripe_account_id: None,
            stripe_seller: None,
            stripe_session: None,
            password_reset_code: String::new(),
            courses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 비밀번호 해시와 재설정 코드를 비운 사본. id 조회 결과와 캐시에 사용합니다.
    pub fn without_secrets(self) -> Self {
        Self {
            password: String::new(),
            password_reset_code: String::new(),
            ..self
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role.contains(&role)
    }

    pub fn is_instructor(&self) -> bool {
        self.has_role(Role::Instructor)
    }

    pub fn is_enrolled_in(&self, course_id: &ObjectId) -> bool {
        self.courses.contains(course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("Ryan".into(), "ryan@example.com".into(), "hash".into());

        assert_eq!(user.picture, "/avatar.png");
        assert_eq!(user.role, vec![Role::Subscriber]);
        assert!(!user.is_instructor());
        assert!(user.password_reset_code.is_empty());
        assert!(user.courses.is_empty());
    }

    #[test]
    fn test_role_serialized_as_string() {
        let json = serde_json::to_string(&vec![Role::Subscriber, Role::Instructor]).unwrap();
        assert_eq!(json, r#"["Subscriber","Instructor"]"#);
        assert_eq!(Role::Admin.as_str(), "Admin");
    }

    #[test]
    fn test_enrollment_lookup() {
        let course_id = ObjectId::new();
        let mut user = User::new("Ryan".into(), "ryan@example.com".into(), "hash".into());
        assert!(!user.is_enrolled_in(&course_id));

        user.courses.push(course_id);
        assert!(user.is_enrolled_in(&course_id));
    }

    #[test]
    fn test_without_secrets_clears_credentials() {
        let mut user = User::new("Ryan".into(), "ryan@example.com".into(), "$2b$12$hash".into());
        user.password_reset_code = "ABC123".into();
        user.courses.push(ObjectId::new());

        let stripped = user.without_secrets();
        assert!(stripped.password.is_empty());
        assert!(stripped.password_reset_code.is_empty());
        assert_eq!(stripped.email, "ryan@example.com");
        assert_eq!(stripped.courses.len(), 1);

        let cached = serde_json::to_string(&stripped).unwrap();
        assert!(!cached.contains("$2b$12$hash"));
        assert!(!cached.contains("ABC123"));
    }

    #[test]
    fn test_bson_field_names() {
        let user = User::new("Ryan".into(), "ryan@example.com".into(), "hash".into());
        let doc = mongodb::bson::to_document(&user).unwrap();

        assert!(doc.contains_key("passwordResetCode"));
        assert!(doc.contains_key("createdAt"));
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("stripeSession"));
    }
}
