use serde::{Deserialize, Serialize};

/// User object returned by the store at login. Only the commonly present
/// fields are typed; everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Authenticated admin credential, attached as a bearer token to every admin request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    #[serde(default)]
    pub user: AdminUser,
}

impl AdminSession {
    pub fn display_name(&self) -> Option<&str> {
        self.user.name.as_deref().or(self.user.email.as_deref())
    }
}
