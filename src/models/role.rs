use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::entities::{roles, user_roles};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub access_lvl: i32,
    pub desc: Option<String>,
}

impl From<roles::Model> for Role {
    fn from(model: roles::Model) -> Self {
        Self {
            name: model.name,
            access_lvl: model.access_lvl,
            desc: model.desc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub access_lvl: i32,
    pub desc: Option<String>,
}

impl NewRole {
    #[must_use]
    pub fn new(name: impl Into<String>, access_lvl: i32, desc: Option<String>) -> Self {
        Self {
            name: name.into(),
            access_lvl,
            desc,
        }
    }
}

impl IntoActiveModel<roles::ActiveModel> for NewRole {
    fn into_active_model(self) -> roles::ActiveModel {
        roles::ActiveModel {
            name: Set(self.name),
            access_lvl: Set(self.access_lvl),
            desc: Set(self.desc),
        }
    }
}

/// One row of the `user_roles` association table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: i32,
    pub role_id: String,
}

impl From<user_roles::Model> for RoleAssignment {
    fn from(model: user_roles::Model) -> Self {
        Self {
            user_id: model.user_id,
            role_id: model.role_id,
        }
    }
}
