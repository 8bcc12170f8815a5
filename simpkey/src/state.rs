use simpkey_core::SessionCookies;

/// Shared handler state: the remote client and the cookie writer.
#[derive(Clone)]
pub struct AppState<C> {
    pub client: C,
    pub cookies: SessionCookies,
}

impl<C> AppState<C> {
    pub fn new(client: C, cookies: SessionCookies) -> Self {
        Self { client, cookies }
    }
}
