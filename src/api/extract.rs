//! Request extractors shared by handlers.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::application::services::ClickContext;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Client metadata recorded with a click.
///
/// The peer address comes from [`ConnectInfo`] when the server was started
/// with `into_make_service_with_connect_info`; forwarded headers are only
/// consulted when [`AppState::behind_proxy`] is set. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct ClientContext(pub ClickContext);

impl FromRequestParts<AppState> for ClientContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let ip = client_ip(&parts.headers, peer, state.behind_proxy);

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(Self(ClickContext { ip, user_agent }))
    }
}
