mod client;
mod error;
mod misskey;

pub use client::RemoteClient;
pub use error::ClientError;
pub use misskey::MisskeyClient;
