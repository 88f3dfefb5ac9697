use actix_web::{web, App, HttpServer};
use api_starter::config::AppConfig;
use api_starter::infra::state::build_state;
use api_starter::middleware::request_trace::RequestTrace;
use api_starter::middleware::structured_logger::StructuredLogger;
use api_starter::middleware::trace_span::TraceSpan;
use api_starter::routes;
use tracing::{error, info};

mod telemetry;

const SHUTDOWN_GRACE_SECS: u64 = 30;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = config.env.as_str(),
        host = %config.server.host,
        port = config.server.port,
        "starting api-starter"
    );

    let app_state = match build_state()
        .with_security(config.security.clone())
        .with_db(config.database_url.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .shutdown_timeout(SHUTDOWN_GRACE_SECS)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    info!("server stopped");
    Ok(())
}
