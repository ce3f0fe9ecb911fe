use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gradekeeper::api::routes::api_routes;
use gradekeeper::config::Config;
use gradekeeper::notify::LogNotifier;
use gradekeeper::settings::{SettingStore, SettingsService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // 连接数据库并完成首次初始化；种子集合是后续所有请求的前提，
    // 初始化失败时进程拒绝启动
    let store = match SettingStore::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect database: {}", e);
            eprintln!("{}", e.format_colored());
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    if let Err(e) = store.ensure_provisioned().await {
        error!("Failed to provision settings: {}", e);
        eprintln!("{}", e.format_colored());
        return Err(std::io::Error::other(e.to_string()));
    }

    let service = web::Data::new(SettingsService::new(store, Arc::new(LogNotifier)));

    let bind_address = config.bind_address();
    info!("Starting server at http://{}", bind_address);

    let dashboard_origin = config.dashboard_origin.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&dashboard_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(service.clone())
            .service(api_routes())
    })
    .bind(bind_address)?
    .run()
    .await
}
