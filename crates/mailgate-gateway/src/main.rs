//! mailgate host
//!
//! - Loads `mailgate.yaml` (or the path in `MAILGATE_CONFIG`)
//! - Compiles the domain policy and binds it to the auth interception points
//! - Serves `POST /api/auth/...` and `/healthz`

use tracing_subscriber::{fmt, EnvFilter};

use mailgate_core::error::{MailgateError, Result};
use mailgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("MAILGATE_CONFIG").unwrap_or_else(|_| "mailgate.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.host.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "mailgate starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MailgateError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MailgateError::Internal(format!("server failed: {e}")))
}
