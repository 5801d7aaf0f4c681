//! Axum router wiring.
//!
//! One `POST` route per interception point under `/api/auth`, plus `/healthz`.

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::hooks::InterceptionPoint;
use crate::transport::http::{self, AUTH_PREFIX};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new().route("/healthz", get(http::healthz));

    for point in InterceptionPoint::ALL {
        let path = format!("{AUTH_PREFIX}{}", point.path());
        router = router.route(
            &path,
            post(move |state: State<AppState>, raw: Bytes| http::handle_point(state, point, raw)),
        );
    }

    router.with_state(state)
}
