pub mod app;
pub mod dev_users;

pub use app::AppConfig;
pub use dev_users::DevUser;
