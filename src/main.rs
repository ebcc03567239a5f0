use actix_web::{App, HttpServer, middleware, web};

use zokal_booking_api::clients::{Mailer, SheetsClient, StripeClient};
use zokal_booking_api::config::AppConfig;
use zokal_booking_api::handlers::booking_handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let port = config.port;

    // One connection pool shared by every outbound client.
    let http = reqwest::Client::new();
    let sheets = SheetsClient::new(&config.booking_api_url, http.clone());
    let stripe = StripeClient::new(&config.stripe_secret, http.clone());
    let mailer = Mailer::new(&config, http);

    log::info!("Starting server at http://0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(sheets.clone()))
            .app_data(web::Data::new(stripe.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .route(
                "/processPayment",
                web::post().to(booking_handlers::process_payment),
            )
            .route(
                "/hireEquipment",
                web::post().to(booking_handlers::hire_equipment),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
