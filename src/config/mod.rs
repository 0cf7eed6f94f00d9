pub mod loader;
pub mod schema;

pub use loader::{load, load_from_path, load_from_str, ConfigError, CONFIG_FILE_NAME};
pub use schema::{MotionConfig, ValidationError, ValidationIssue};
