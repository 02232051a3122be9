use crate::server::{ServerError, ServerRouter, json::Json};
use anonboard_common::{
    lifetime::DeletionWindow,
    model::post::{PostAge, PostLifetime},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use time::UtcDateTime;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_post(get_post_lifetime)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/lifetime", rejection(ServerError))]
struct PostLifetimePath();

async fn get_post_lifetime(
    PostLifetimePath(): PostLifetimePath,
    State(window): State<DeletionWindow>,
    Json(age): Json<PostAge>,
) -> Json<PostLifetime> {
    Json(PostLifetime::new(window, age, UtcDateTime::now()))
}
