//! Explicit authorization context
//!
//! Every entry point that changes data receives the acting user as an
//! argument. Nothing here reads ambient session state.

use serde::{Deserialize, Serialize};

/// Role granted to an application user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Viewer => write!(f, "viewer"),
        }
    }
}

/// The user on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Fail with [`Forbidden`] unless the actor holds `role`
    pub fn require(&self, role: Role) -> Result<(), Forbidden> {
        if self.role == role {
            Ok(())
        } else {
            log::warn!(
                "User '{}' ({}) denied an action requiring {}",
                self.username,
                self.role,
                role
            );
            Err(Forbidden {
                username: self.username.clone(),
                required: role,
            })
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new("admin", Role::Admin)
    }
}

/// The actor lacks the role an operation requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forbidden {
    pub username: String,
    pub required: Role,
}

impl std::fmt::Display for Forbidden {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Forbidden (viewer cannot perform this action)")
    }
}

impl std::error::Error for Forbidden {}
