// server/src/web/routes.rs

use actix_web::{error, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{account_handlers, auth_handlers, cart_handlers, listing_handlers, support_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Malformed bodies and ids (including negative numbers) are client errors.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid request body: {}", err)).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid path parameter: {}", err)).into()
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/auth")
            .route("/login", web::post().to(auth_handlers::login_handler))
            .route("/logout", web::post().to(auth_handlers::logout_handler))
            .route("/me", web::get().to(auth_handlers::me_handler)),
        )
        .service(
          web::scope("/listings")
            .route("", web::get().to(listing_handlers::list_listings_handler))
            .route("", web::post().to(listing_handlers::add_listing_handler))
            .route("/{product_id}", web::get().to(listing_handlers::get_listing_handler))
            .route("/{product_id}", web::patch().to(listing_handlers::update_listing_handler))
            .route("/{product_id}", web::delete().to(listing_handlers::delete_listing_handler))
            .route("/{product_id}/purchase", web::post().to(listing_handlers::purchase_handler)),
        )
        .service(
          web::scope("/crops")
            .route("", web::get().to(listing_handlers::crops_handler))
            .route("/listings", web::post().to(listing_handlers::list_crop_handler)),
        )
        .service(
          web::scope("/cart")
            .route("", web::get().to(cart_handlers::view_cart_handler))
            .route("/add", web::post().to(cart_handlers::add_to_cart_handler))
            .route("/checkout", web::post().to(cart_handlers::checkout_handler))
            .route("/{product_id}", web::delete().to(cart_handlers::remove_from_cart_handler)),
        )
        .route("/orders", web::get().to(cart_handlers::orders_handler))
        .service(
          web::scope("/tickets")
            .route("", web::get().to(support_handlers::list_tickets_handler))
            .route("", web::post().to(support_handlers::submit_ticket_handler)),
        )
        .service(
          web::scope("/alerts")
            .route("", web::get().to(support_handlers::list_alerts_handler))
            .route("", web::post().to(support_handlers::send_alert_handler)),
        )
        .service(
          web::scope("/profile")
            .route("", web::get().to(account_handlers::get_profile_handler))
            .route("", web::put().to(account_handlers::save_profile_handler)),
        )
        .service(
          web::scope("/users")
            .route("", web::get().to(account_handlers::list_users_handler))
            .route("/{user_id}", web::put().to(account_handlers::save_user_handler)),
        )
        .service(
          web::scope("/farmers")
            .route("", web::get().to(account_handlers::list_farmers_handler))
            .route("/{user_id}/review", web::post().to(account_handlers::review_farmer_handler)),
        )
        .route("/dashboard", web::get().to(account_handlers::dashboard_handler)),
    );
}
