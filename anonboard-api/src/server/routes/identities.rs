use crate::server::{ServerError, ServerRouter, json::Json};
use anonboard_common::{identity::AnonymousIdentity, model::post::PostId};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(get_identity)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/identities/{post_id}", rejection(ServerError))]
struct GetIdentityPath {
    post_id: PostId,
}

async fn get_identity(GetIdentityPath { post_id }: GetIdentityPath) -> Json<AnonymousIdentity> {
    Json(AnonymousIdentity::for_post(&post_id))
}
