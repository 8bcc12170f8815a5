pub mod app;
pub mod controllers;
pub mod dispatcher;
pub mod orchestrator;
pub mod state;
pub mod views;

pub use app::{build_router, serve};
pub use dispatcher::{dispatch, ActionRequest, CreateNote, DispatchOutcome};
pub use orchestrator::{Acct, ResourceFetcher, Timeline};
pub use state::AppState;
