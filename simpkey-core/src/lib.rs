pub mod config;
pub mod error;
pub mod layers;
pub mod models;
pub mod permissions;
pub mod prelude;
pub mod secure_headers;
pub mod session;

pub use config::{AppConfig, ConfigError, ConfigValue, FromConfigValue, LogFormat, SimpkeyConfig};
pub use error::{die, error_response, AppError};
pub use layers::{catch_panic_layer, default_trace, init_tracing};
pub use models::{ClientData, Identity, Meta, Note, Notification, SignIn, User, Visibility};
pub use permissions::{can_react, can_react_single, can_renote, NotePermissions};
pub use secure_headers::SecureHeaders;
pub use session::{Session, SessionCookies, SessionState};
