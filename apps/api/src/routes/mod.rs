pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::matching::handlers as matching;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route(
            "/api/v1/userinfo",
            get(profiles::handle_get_user_info).post(profiles::handle_create_user_info),
        )
        .route("/api/v1/userinfo/goal", put(profiles::handle_update_goal))
        .route(
            "/api/v1/userinfo/pronouns",
            put(profiles::handle_update_pronouns),
        )
        .route(
            "/api/v1/userinfo/imagelink",
            put(profiles::handle_update_image_link),
        )
        .route(
            "/api/v1/userinfo/resume",
            post(profiles::handle_upload_resume),
        )
        .route("/api/v1/userinfo/photo", post(profiles::handle_upload_photo))
        // Matching
        .route(
            "/api/v1/matches",
            get(matching::handle_get_matches).post(matching::handle_create_match),
        )
        .route("/api/v1/matches/rank", post(matching::handle_rank))
        .route("/api/v1/roster", get(matching::handle_get_roster))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn record(role: &str, level: &str, skills: &[&str]) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "name": format!("{role} {level}"),
            "primary_role": role,
            "experience_level": level,
            "primary_skills": skills,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "hackmatch-api");
    }

    #[tokio::test]
    async fn test_rank_returns_all_four_buckets() {
        let (status, body) = send(post_json(
            "/api/v1/matches/rank",
            json!({
                "requester": record("back-end", "expert", &["python", "sql"]),
                "candidates": [
                    record("back-end", "beginner", &["python"]),
                    record("back-end", "expert", &["python", "sql"]),
                    record("front-end", "intermediate", &["react"]),
                    {"primary_role": "business"}
                ]
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        for key in ["data science", "back-end", "front-end", "business"] {
            assert!(body[key].is_array(), "missing bucket {key}");
        }
        assert_eq!(body["back-end"].as_array().unwrap().len(), 2);
        assert_eq!(body["front-end"].as_array().unwrap().len(), 1);
        // The id-less business record is dropped.
        assert!(body["business"].as_array().unwrap().is_empty());

        let back_end = body["back-end"].as_array().unwrap();
        let first = back_end[0]["similarity"].as_f64().unwrap();
        let second = back_end[1]["similarity"].as_f64().unwrap();
        assert!(first <= second);
        assert_eq!(back_end[1]["name"], "back-end expert");
    }

    #[tokio::test]
    async fn test_rank_with_no_candidates_is_four_empty_lists() {
        let (status, body) = send(post_json(
            "/api/v1/matches/rank",
            json!({ "requester": record("data science", "beginner", &[]) }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"data science": [], "back-end": [], "front-end": [], "business": []})
        );
    }

    #[tokio::test]
    async fn test_rank_rejects_requester_without_id() {
        let (status, body) = send(post_json(
            "/api/v1/matches/rank",
            json!({ "requester": {"user_id": Uuid::new_v4()}, "candidates": [] }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_self_match_is_rejected_before_touching_the_database() {
        let me = Uuid::new_v4();
        let (status, body) = send(post_json(
            "/api/v1/matches",
            json!({ "user_id": me, "target_user_id": me }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Cannot match with yourself");
    }
}
