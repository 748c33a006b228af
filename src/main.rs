use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use taskdesk::{config::Config, routes, TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let users = web::Data::new(UserStore::new(
        config.jwt_secret.as_bytes(),
        config.token_expiration,
    ));
    let tasks = web::Data::new(TaskStore::new());

    log::info!("Starting TaskDesk server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(users.clone())
            .app_data(tasks.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
