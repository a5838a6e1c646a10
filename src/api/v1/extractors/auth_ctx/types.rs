/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use uuid::Uuid;

use crate::services::auth::Roles;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は access token の `sub` (UUID)
/// - `roles` は coarse-grained な権限情報
/// - `jti` は監査/相関用
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub roles: Roles,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, roles: Roles) -> Self {
        Self {
            user_id,
            roles,
            jti: None,
        }
    }

    pub fn with_jti(mut self, jti: Option<String>) -> Self {
        self.jti = jti;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jti_is_carried_for_admin_audit_logs() {
        let ctx = AuthCtx::new(Uuid::new_v4(), Roles::ADMIN).with_jti(Some("jti-1".into()));

        assert!(ctx.is_admin());
        assert_eq!(ctx.jti.as_deref(), Some("jti-1"));

        let user = AuthCtx::new(Uuid::new_v4(), Roles::USER);
        assert!(!user.is_admin());
        assert!(user.jti.is_none());
    }
}
