use crate::infra::{deserialize_optional_date, AdjustmentResponse, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use comp_adjust::error::AppError;
use comp_adjust::workflows::appraisal::{
    compute_adjustments, ConditionRating, RawComp, SubjectProperty,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct AdjustmentRequest {
    pub(crate) subject: SubjectProperty,
    pub(crate) comps: Vec<RawComp>,
    pub(crate) conditions: Vec<ConditionRating>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn appraisal_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/appraisal/adjustments",
            axum::routing::post(adjustments_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn adjustments_endpoint(
    Json(payload): Json<AdjustmentRequest>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    let AdjustmentRequest {
        subject,
        comps,
        conditions,
        as_of,
    } = payload;

    let outcome = compute_adjustments(&subject, &comps, &conditions)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(AdjustmentResponse::new(as_of, outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn subject() -> SubjectProperty {
        SubjectProperty {
            sqft: 2000,
            year: 2010,
            beds: 3,
            full: 2,
            half: 1,
            acreage: 0.5,
            finish: 50.0,
            garage: 2,
            condition: ConditionRating::Average,
        }
    }

    fn sold_comp(filename: &str) -> RawComp {
        RawComp {
            filename: filename.to_string(),
            square_footage: Some(json!("1900")),
            price: Some(json!(300_000)),
            price_source: Some("SP".to_string()),
            bedrooms: Some(json!(3)),
            bathrooms_full: Some(json!(2)),
            bathrooms_half: Some(json!(1)),
            acreage: Some(json!(0.5)),
            year_built: Some(json!(2010)),
            basement_size: Some(json!(1000)),
            finished_basement: Some(json!(500)),
            garage_spaces: Some(json!(2)),
        }
    }

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        appraisal_routes().layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn adjustments_endpoint_returns_grid_and_narrative() {
        let request = AdjustmentRequest {
            subject: subject(),
            comps: vec![sold_comp("maple.pdf")],
            conditions: vec![ConditionRating::Average],
            as_of: NaiveDate::from_ymd_opt(2026, 10, 17),
        };

        let Json(body) = adjustments_endpoint(Json(request))
            .await
            .expect("adjustments compute");

        assert_eq!(body.outcome.avg_ppsf, 158);
        assert_eq!(body.outcome.size_adj_rate, 40);
        assert_eq!(body.outcome.adjusted_comps[0].adjusted_price, 300_000.0);
        assert_eq!(body.report.table.rows[0].total_adjustment, "+$0");
        assert_eq!(
            body.report.narrative[0].text,
            "Comp 1 (maple.pdf): No adjustments. No net adjustment of $0."
        );
    }

    #[tokio::test]
    async fn adjustments_endpoint_rejects_listing_only_batches() {
        let request = AdjustmentRequest {
            subject: subject(),
            comps: vec![RawComp {
                price_source: Some("LP".to_string()),
                ..sold_comp("listing.pdf")
            }],
            conditions: vec![ConditionRating::Average],
            as_of: None,
        };

        let err = adjustments_endpoint(Json(request))
            .await
            .expect_err("no sold comps");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn router_serves_adjustments_as_json() {
        let payload = json!({
            "subject": subject(),
            "comps": [sold_comp("maple.pdf"), {
                "filename": "oak.pdf",
                "square_footage": "2,250",
                "price": "360,000",
                "price_source": "SP",
                "bedrooms": "4"
            }],
            "conditions": [2, 3],
            "as_of": "2026-10-17"
        });

        let response = app(true)
            .oneshot(
                Request::post("/api/v1/appraisal/adjustments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["as_of"], "2026-10-17");
        assert_eq!(body["adjusted_comps"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["adjusted_comps"][1]["filename"], "oak.pdf");
        assert_eq!(body["adjusted_comps"][1]["condition"], 3);
        assert_eq!(body["table"]["columns"][0], "File");
        assert_eq!(body["narrative"].as_array().map(Vec::len), Some(2));
        assert!(body["warnings"]
            .as_array()
            .is_some_and(|warnings| !warnings.is_empty()));
    }

    #[tokio::test]
    async fn router_reports_batch_errors_as_bad_request() {
        let payload = json!({
            "subject": subject(),
            "comps": [sold_comp("maple.pdf"), sold_comp("oak.pdf")],
            "conditions": [2]
        });

        let response = app(true)
            .oneshot(
                Request::post("/api/v1/appraisal/adjustments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(
            body["error"],
            "appraisal error: 1 condition rating(s) supplied for 2 comp(s)"
        );
    }

    #[tokio::test]
    async fn readiness_tracks_startup() {
        let response = app(false)
            .oneshot(
                Request::get("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
