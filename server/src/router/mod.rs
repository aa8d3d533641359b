use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use axum::Router;

use crate::controller::{address::AddressController, auth::AuthController};
use crate::middleware::auth_guard;

pub fn routers() -> Router {
    let auth = Router::new()
        .route("/api/auth/login", post(AuthController::login))
        .route("/api/auth/register", post(AuthController::register));

    let address = Router::new()
        .route(
            "/api/addresses",
            get(AddressController::list_address).post(AddressController::create_address),
        )
        .route(
            "/api/addresses/:id",
            put(AddressController::update_address).delete(AddressController::delete_address),
        )
        .route_layer(from_fn(auth_guard));

    Router::new().merge(auth).merge(address)
}
