mod app;
mod remote;

pub use app::{resolve_path, TestApp, TestRequest, TestResponse};
pub use remote::{MockRemote, RecordedCall};
