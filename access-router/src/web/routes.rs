//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, error, info};

use crate::accessibility::UnknownRequirement;
use crate::domain::{InvalidStopId, StopId};
use crate::graph::{GraphError, NetworkSummary};
use crate::planner::SearchError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/requirements", get(list_requirements))
        .route("/stops", get(list_stops))
        .route("/stops/:id", get(get_stop))
        .route("/network/summary", get(network_summary))
        .route("/route", post(find_route))
        .route("/outages", post(report_outage))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the requirement names the planner accepts.
async fn list_requirements(State(state): State<AppState>) -> Json<RequirementsResponse> {
    let requirements = state
        .registry
        .supported()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(RequirementsResponse { requirements })
}

/// List stops usable under the requested requirements.
async fn list_stops(
    State(state): State<AppState>,
    Query(query): Query<StopsQuery>,
) -> Result<Json<StopsResponse>, AppError> {
    let requirements = state.registry.resolve(query.requirement_names())?;
    let stops = state
        .graph
        .accessible_stops(&requirements)
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    Ok(Json(StopsResponse {
        requirements: requirements.names().map(str::to_string).collect(),
        stops,
    }))
}

/// Current attributes of one stop.
async fn get_stop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StopResponse>, AppError> {
    let id = StopId::parse(&id)?;
    let stop = state.graph.get_stop(&id)?;
    Ok(Json(StopResponse::from_stop(&stop)))
}

/// Counts and travel time statistics for the loaded network.
async fn network_summary(State(state): State<AppState>) -> Json<NetworkSummary> {
    Json(state.graph.summary())
}

/// Find the fastest route satisfying the requested requirements.
async fn find_route(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Json(req) = payload?;
    let from = StopId::parse(&req.from)?;
    let to = StopId::parse(&req.to)?;

    let path = state.planner().find_path(&from, &to, &req.requirements)?;

    debug!(
        from = %from,
        to = %to,
        requirements = ?req.requirements,
        total_time = path.total_time(),
        "Found route"
    );

    Ok(Json(RouteResponse::from_path(&path)))
}

/// Record an elevator outage or repair.
async fn report_outage(
    State(state): State<AppState>,
    payload: Result<Json<OutageRequest>, JsonRejection>,
) -> Result<Json<OutageResponse>, AppError> {
    let Json(req) = payload?;
    let stop = StopId::parse(&req.stop)?;
    let previous = state.updates.set_elevator_status(&stop, req.working)?;
    let changed = previous != req.working;

    if changed {
        info!(stop = %stop, working = req.working, "Elevator status changed");
    } else {
        debug!(stop = %stop, working = req.working, "Repeated elevator report");
    }

    Ok(Json(OutageResponse {
        stop: stop.to_string(),
        working: req.working,
        previous,
        changed,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { kind: &'static str, message: String },
    NotFound { kind: &'static str, message: String },
    Unprocessable { kind: &'static str, message: String },
    Internal { message: String },
}

/// Bodies that are not valid JSON, lack the content type, or have the wrong
/// shape are all reported as `invalid_body`.
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            kind: "invalid_body",
            message: e.body_text(),
        }
    }
}

impl From<InvalidStopId> for AppError {
    fn from(e: InvalidStopId) -> Self {
        AppError::BadRequest {
            kind: "invalid_id",
            message: e.to_string(),
        }
    }
}

impl From<UnknownRequirement> for AppError {
    fn from(e: UnknownRequirement) -> Self {
        AppError::BadRequest {
            kind: "unknown_requirement",
            message: e.to_string(),
        }
    }
}

impl From<GraphError> for AppError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownStop(_) => AppError::NotFound {
                kind: "unknown_stop",
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::UnknownStop(_) => AppError::NotFound {
                kind: "unknown_stop",
                message,
            },
            SearchError::UnknownRequirement(_) => AppError::BadRequest {
                kind: "unknown_requirement",
                message,
            },
            SearchError::NoPath { .. } => AppError::Unprocessable {
                kind: "no_path",
                message,
            },
            SearchError::NoAccessiblePath { .. } => AppError::Unprocessable {
                kind: "no_accessible_path",
                message,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::BadRequest { kind, message } => (StatusCode::BAD_REQUEST, kind, message),
            AppError::NotFound { kind, message } => (StatusCode::NOT_FOUND, kind, message),
            AppError::Unprocessable { kind, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, kind, message)
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
        };

        if status.is_server_error() {
            error!(status = %status, error = %message, "Request failed");
        } else {
            debug!(status = %status, kind, error = %message, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            kind,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::accessibility::RequirementRegistry;
    use crate::domain::{RouteId, StopAttributes};
    use crate::graph::TransitGraph;

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    /// A→X→C (fast, X has an elevator), A→Y→C (slow), A→B where B is not
    /// wheelchair accessible, and an isolated stop D.
    fn test_app() -> Router {
        let mut graph = TransitGraph::new();
        graph
            .add_stop_with_name(id("A"), Some("Alpha".to_string()), StopAttributes::step_free())
            .unwrap();
        graph.add_stop(id("X"), StopAttributes::with_elevator()).unwrap();
        graph.add_stop(id("Y"), StopAttributes::step_free()).unwrap();
        graph.add_stop(id("C"), StopAttributes::step_free()).unwrap();
        graph.add_stop(id("B"), StopAttributes::inaccessible()).unwrap();
        graph.add_stop(id("D"), StopAttributes::step_free()).unwrap();

        let fast = RouteId::parse("fast").unwrap();
        let slow = RouteId::parse("slow").unwrap();
        graph.add_segment(&id("A"), &id("X"), fast.clone(), 2.0, true).unwrap();
        graph.add_segment(&id("X"), &id("C"), fast.clone(), 2.0, true).unwrap();
        graph.add_segment(&id("A"), &id("Y"), slow.clone(), 5.0, true).unwrap();
        graph.add_segment(&id("Y"), &id("C"), slow, 5.0, true).unwrap();
        graph.add_segment(&id("A"), &id("B"), fast, 1.0, true).unwrap();

        create_router(AppState::new(graph, RequirementRegistry::standard()))
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_check() {
        let app = test_app();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn lists_requirements() {
        let app = test_app();
        let (status, body) = get_json(&app, "/requirements").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["requirements"],
            json!(["no_stairs", "wheelchair_accessible", "working_elevator"])
        );
    }

    #[tokio::test]
    async fn route_without_requirements() {
        let app = test_app();
        let (status, body) = post_json(&app, "/route", json!({ "from": "A", "to": "C" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stops"], json!(["A", "X", "C"]));
        assert_eq!(body["total_time"], json!(4.0));
        assert_eq!(body["transfers"], json!(0));
        assert_eq!(body["legs"][0]["route_id"], json!("fast"));
    }

    #[tokio::test]
    async fn outage_reroutes_next_query() {
        let app = test_app();

        let (status, body) =
            post_json(&app, "/outages", json!({ "stop": "X", "working": false })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["previous"], json!(true));
        assert_eq!(body["changed"], json!(true));

        let (status, body) = post_json(
            &app,
            "/route",
            json!({ "from": "A", "to": "C", "requirements": ["no_stairs"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stops"], json!(["A", "Y", "C"]));

        // Repeating the report changes nothing.
        let (_, body) = post_json(&app, "/outages", json!({ "stop": "X", "working": false })).await;
        assert_eq!(body["changed"], json!(false));
    }

    #[tokio::test]
    async fn unknown_requirement_is_bad_request() {
        let app = test_app();
        let (status, body) = post_json(
            &app,
            "/route",
            json!({ "from": "A", "to": "C", "requirements": ["jetpack"] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("unknown_requirement"));
        assert_eq!(
            body["error"],
            json!("unknown accessibility requirement: jetpack")
        );
    }

    #[tokio::test]
    async fn invalid_stop_id_is_bad_request() {
        let app = test_app();
        let (status, body) = post_json(&app, "/route", json!({ "from": "", "to": "C" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_id"));
    }

    #[tokio::test]
    async fn unknown_stop_is_not_found() {
        let app = test_app();
        let (status, body) = post_json(&app, "/route", json!({ "from": "A", "to": "Z" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], json!("unknown_stop"));

        let (status, _) =
            post_json(&app, "/outages", json!({ "stop": "Z", "working": true })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(&app, "/stops/Z").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failures_are_unprocessable_with_distinct_kinds() {
        let app = test_app();

        let (status, body) = post_json(&app, "/route", json!({ "from": "A", "to": "D" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], json!("no_path"));

        let (status, body) = post_json(
            &app,
            "/route",
            json!({ "from": "A", "to": "B", "requirements": ["wheelchair_accessible"] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], json!("no_accessible_path"));
    }

    #[tokio::test]
    async fn lists_accessible_stops() {
        let app = test_app();

        let (status, body) = get_json(&app, "/stops").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stops"], json!(["A", "X", "Y", "C", "B", "D"]));

        let (_, body) = get_json(&app, "/stops?requirements=working_elevator").await;
        assert_eq!(body["stops"], json!(["X"]));
        assert_eq!(body["requirements"], json!(["working_elevator"]));

        let (status, body) = get_json(&app, "/stops?requirements=jetpack").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("unknown_requirement"));
    }

    #[tokio::test]
    async fn stop_details_reflect_outages() {
        let app = test_app();

        let (status, body) = get_json(&app, "/stops/A").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], json!("Alpha"));
        assert_eq!(body["platform_gap"], json!("none"));

        post_json(&app, "/outages", json!({ "stop": "X", "working": false })).await;
        let (_, body) = get_json(&app, "/stops/X").await;
        assert_eq!(body["has_elevator"], json!(true));
        assert_eq!(body["elevator_working"], json!(false));
    }

    #[tokio::test]
    async fn stop_details_include_accessibility_rating() {
        let app = test_app();

        let (_, body) = get_json(&app, "/stops/X").await;
        assert_eq!(body["accessibility"]["score"], json!(1.0));
        assert_eq!(body["accessibility"]["level"], json!("excellent"));
        assert_eq!(body["accessibility"]["recommendations"], json!([]));

        post_json(&app, "/outages", json!({ "stop": "X", "working": false })).await;
        let (_, body) = get_json(&app, "/stops/X").await;
        assert_eq!(body["accessibility"]["score"], json!(0.75));
        assert_eq!(body["accessibility"]["level"], json!("good"));
        assert_eq!(
            body["accessibility"]["recommendations"],
            json!(["Repair elevator"])
        );
    }

    async fn post_raw(app: &Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn malformed_bodies_are_json_errors() {
        let app = test_app();

        let (status, body) = post_raw(&app, "/route", "{\"from\": \"A\",").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_body"));
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

        let (status, body) = post_raw(&app, "/outages", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_body"));

        // Well-formed JSON missing a required field.
        let (status, body) = post_json(&app, "/outages", json!({ "stop": "X" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_body"));
    }

    #[tokio::test]
    async fn missing_content_type_is_json_error() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/route")
            .body(Body::from(r#"{"from": "A", "to": "C"}"#))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_body"));
    }

    #[tokio::test]
    async fn network_summary_counts() {
        let app = test_app();
        let (status, body) = get_json(&app, "/network/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stops"], json!(6));
        assert_eq!(body["segments"], json!(5));
        assert_eq!(body["routes"], json!(2));
    }
}
