use crate::domain::entities::Role;

/// 요구되는 역할 정보
///
/// 목록의 역할 중 하나라도 있으면 허용합니다 (OR 조건).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRole {
    allowed: Vec<Role>,
}

impl RequiredRole {
    /// 관리자 목록 조회에 필요한 역할 (`admin` 또는 `superadmin`)
    pub fn administrators() -> Self {
        Self {
            allowed: vec![Role::Admin, Role::Superadmin],
        }
    }

    /// 사용자 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}
