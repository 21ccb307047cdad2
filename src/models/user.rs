use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::entities::users;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub fullname: Option<String>,
    pub nickname: Option<String>,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            fullname: model.fullname,
            nickname: model.nickname,
            created_at: model.created_at,
        }
    }
}

/// Input for a user that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub fullname: Option<String>,
    pub nickname: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        fullname: Option<String>,
        nickname: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fullname,
            nickname,
        }
    }
}

impl IntoActiveModel<users::ActiveModel> for NewUser {
    fn into_active_model(self) -> users::ActiveModel {
        users::ActiveModel {
            name: Set(self.name),
            fullname: Set(self.fullname),
            nickname: Set(self.nickname),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
    }
}
