use simpkey::{build_router, serve, AppState};
use simpkey_client::MisskeyClient;
use simpkey_core::{init_tracing, AppConfig, SecureHeaders, SessionCookies, SimpkeyConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // SIMPKEY_PROFILE overrides the default profile.
    let config = SimpkeyConfig::load("dev")?;
    let app_config = AppConfig::from_config(&config)?;

    init_tracing(app_config.log_format);
    tracing::info!(profile = %config.profile(), "configuration loaded");

    let client = MisskeyClient::from_config(&app_config)?;
    let state = AppState::new(client, SessionCookies::new(app_config.session_secure));

    let headers = SecureHeaders::from_config(&app_config);

    serve(build_router(state, headers), &app_config.addr).await?;
    Ok(())
}
