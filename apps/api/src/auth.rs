mod password;
mod session;

pub use password::{change_password_handler, login_handler};
pub use session::{logout_handler, me_handler};

pub const SESSION_USER_KEY: &str = "admin_identity";
