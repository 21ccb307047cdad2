pub mod prelude;

pub mod emails;
pub mod roles;
pub mod user_roles;
pub mod users;
