//! 用户实体
//!
//! 只读目录，由外部维护；服务只负责列出，供调用方选择操作人 ID

use serde::{Deserialize, Serialize};
use tankfarm_common::UserId;
use tankfarm_domain_core::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_directory_entry() {
        let user: User = serde_json::from_str(r#"{"id":"u-1","name":"Dana"}"#).unwrap();
        assert_eq!(user, User::new("u-1", "Dana"));
    }
}
