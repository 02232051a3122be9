use crate::server::{Result, ServerError, ServerRouter, json::Json};
use anonboard_common::content::{ContentDraft, ValidationReport, filter::ContentFilter};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(validate_content)
        .typed_post(filter_content)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/content/validate", rejection(ServerError))]
struct ValidateContentPath();

async fn validate_content(
    ValidateContentPath(): ValidateContentPath,
    Json(draft): Json<ContentDraft>,
) -> Json<ValidationReport> {
    let violations = draft.validate();
    debug!(violations = violations.len(), "Validated content");

    Json(ValidationReport::from(&violations))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/content/filter", rejection(ServerError))]
struct FilterContentPath();

#[axum::debug_handler(state = crate::server::ServerState)]
async fn filter_content(
    FilterContentPath(): FilterContentPath,
    State(filter): State<Arc<ContentFilter>>,
    Json(draft): Json<ContentDraft>,
) -> Result<Json<ContentDraft>> {
    let content = filter.accept(&draft.content)?;

    Ok(Json(ContentDraft::new(content)))
}

#[cfg(test)]
mod tests {
    use crate::server::test_util::send;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn validate_reports_violations() {
        let (status, body) = send(
            Method::POST,
            "/content/validate",
            Some(json!({ "content": "call me at 555-123-4567" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "valid": false,
                "violations": [
                    { "kind": "phone_not_allowed", "message": "Phone numbers are not allowed" },
                ],
            })
        );
    }

    #[tokio::test]
    async fn validate_accepts_clean_content() {
        let (status, body) = send(
            Method::POST,
            "/content/validate",
            Some(json!({ "content": "just a normal sentence." })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "valid": true, "violations": [] }));
    }

    #[tokio::test]
    async fn filter_masks_words() {
        let (status, body) = send(
            Method::POST,
            "/content/filter",
            Some(json!({ "content": "Well, DAMN." })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "content": "Well, d**n." }));
    }

    #[tokio::test]
    async fn filter_rejects_prohibited_content() {
        let (status, body) = send(
            Method::POST,
            "/content/filter",
            Some(json!({ "content": "follow @someone" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "status": 422,
                "violations": [
                    { "kind": "handle_not_allowed", "message": "Social media handles are not allowed" },
                ],
            })
        );
    }

    #[tokio::test]
    async fn filter_rejects_blank_content() {
        let (status, body) =
            send(Method::POST, "/content/filter", Some(json!({ "content": "  " }))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["violations"][0]["kind"], "empty_content");
    }
}
