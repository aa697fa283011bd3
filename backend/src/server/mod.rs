//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use user_api::Trace;
#[cfg(debug_assertions)]
use user_api::doc::ApiDoc;
use user_api::inbound::http::configure;
use user_api::inbound::http::health::HealthState;
use user_api::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// Built-in signal handling is off; [`drain_on`] stops the server.
///
/// # Errors
/// Propagates [`std::io::Error`] when state construction or binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `signal`, fail liveness probes, then stop the server gracefully.
pub async fn drain_on(
    signal: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    signal.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

/// Resolves on Ctrl-C, or on SIGTERM where supported.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}
