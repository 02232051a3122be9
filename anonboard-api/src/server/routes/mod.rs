use crate::server::ServerRouter;

mod content;
mod identities;
mod posts;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(content::routes())
        .merge(identities::routes())
        .merge(posts::routes())
}
