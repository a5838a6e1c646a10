use std::{
    fmt::Display,
    ops::{BitOr, BitOrAssign},
};

use tracing::warn;

/// Coarse-grained roles carried in the access token `roles` claim, stored as bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Roles(u8);

impl Roles {
    pub const NONE: Roles = Roles(0);
    pub const USER: Roles = Roles(1);
    pub const ADMIN: Roles = Roles(2);

    /// Accepts both `ADMIN` and the `ROLE_ADMIN` spelling. Unknown roles are ignored.
    pub fn parse(raw: &str) -> Roles {
        let name = raw.trim().trim_matches('"');
        let name = name.strip_prefix("ROLE_").unwrap_or(name);
        match name.to_ascii_uppercase().as_str() {
            "ADMIN" => Roles::ADMIN,
            "USER" => Roles::USER,
            other => {
                warn!("Unknown role: {other}. Ignoring");
                Roles::NONE
            }
        }
    }

    pub fn contains(&self, other: Roles) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_admin(&self) -> bool {
        self.contains(Roles::ADMIN)
    }
}

impl Display for Roles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = Vec::new();
        if self.contains(Roles::USER) {
            names.push("USER");
        }
        if self.contains(Roles::ADMIN) {
            names.push("ADMIN");
        }
        write!(f, "[{}]", names.join(","))
    }
}

impl BitOr for Roles {
    type Output = Roles;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Roles {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = Self(self.0 | rhs.0);
    }
}
