pub mod app;
pub mod db;

pub use app::{AppConfig, AppEnv, ServerConfig};
pub use db::DbKind;
