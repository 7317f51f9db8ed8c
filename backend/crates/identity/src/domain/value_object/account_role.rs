use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
///
/// Immutable from this subsystem's point of view; within this core the
/// role drives token lifetime policy only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum AccountRole {
    #[default]
    Member = 0,
    Administrator = 1,
}

impl AccountRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AccountRole::Member => "member",
            AccountRole::Administrator => "administrator",
        }
    }

    #[inline]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, AccountRole::Administrator)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(AccountRole::Member),
            1 => Some(AccountRole::Administrator),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "member" => Some(AccountRole::Member),
            "administrator" => Some(AccountRole::Administrator),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
