use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use backend::config::AppConfig;
use backend::context::AppContext;
use backend::routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    dotenv::dotenv().ok();

    let config = AppConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    log::info!("Configuration: {:?}", config);

    let context = AppContext::from_config(&config).map_err(|e| {
        log::error!(
            "Failed to open history directory {}: {}",
            config.history_dir.display(),
            e
        );
        std::io::Error::other(e.to_string())
    })?;

    if context.model_error().is_some() {
        log::warn!("Starting without a model, /api/detect will answer 503");
    }

    let context = web::Data::new(context);
    let bind_address = config.bind_address();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(context.clone())
            .configure(|cfg| configure_routes(cfg, &config))
    })
    .bind(&bind_address)?
    .run()
    .await
}
