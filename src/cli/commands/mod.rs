mod add;
mod email;
mod info;
mod list;
mod remove;
mod role;

pub use add::cmd_add_user;
pub use email::{cmd_email_add, cmd_email_list, cmd_email_remove};
pub use info::cmd_user_info;
pub use list::cmd_list_users;
pub use remove::cmd_remove_user;
pub use role::{
    cmd_role_add, cmd_role_assign, cmd_role_list, cmd_role_members, cmd_role_remove,
    cmd_role_revoke,
};
