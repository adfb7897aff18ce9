//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router with all endpoints under `/api/`.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

/// Build router from a pre-constructed `ApiContext` (e.g. with a pinned
/// "today").
pub fn api_router_with_ctx(ctx: ApiContext) -> Router {
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/subjects", post(endpoints::subjects::create))
        .route("/subjects/:id", get(endpoints::subjects::get))
        .route(
            "/subjects/:id/days",
            post(endpoints::days::record).get(endpoints::days::history),
        )
        .route("/subjects/:id/days/:date", delete(endpoints::days::remove))
        .route("/subjects/:id/moods", get(endpoints::analysis::moods))
        .route("/subjects/:id/smoothed", get(endpoints::analysis::smoothed))
        .route("/subjects/:id/outliers", get(endpoints::analysis::outliers))
        .route("/subjects/:id/report", get(endpoints::analysis::report))
        .route("/subjects/:id/checkin", get(endpoints::analysis::check_in))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use crate::config::DEFAULT_ANALYSIS_WINDOW;

    struct TestApp {
        router: Router,
        _dir: tempfile::TempDir,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 10, 18).unwrap()
    }

    fn test_app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let core = Arc::new(CoreState::new(
            dir.path().join("moods.db"),
            DEFAULT_ANALYSIS_WINDOW,
        ));
        let ctx = ApiContext::new(core).with_today(today());
        TestApp {
            router: api_router_with_ctx(ctx),
            _dir: dir,
        }
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_subject(router: &Router) -> i64 {
        let (status, json) = send(
            router,
            "POST",
            "/api/subjects",
            Some(serde_json::json!({ "display_name": "not_pigeon" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_i64().unwrap()
    }

    /// Logs consecutive days starting on 2016-10-01.
    async fn log_moods(router: &Router, subject: i64, moods: &[Option<i32>]) {
        let start = NaiveDate::from_ymd_opt(2016, 10, 1).unwrap();
        for (date, mood) in start.iter_days().zip(moods) {
            let (status, _) = send(
                router,
                "POST",
                &format!("/api/subjects/{subject}/days"),
                Some(serde_json::json!({ "date": date, "overall_mood": mood })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
    }

    fn ys(json: &serde_json::Value) -> Vec<i64> {
        json["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["y"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_app();
        let (status, json) = send(&app.router, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["subjects"], 0);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = test_app();
        let (status, _) = send(&app.router, "GET", "/api/nothing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn subject_roundtrip() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        let (status, json) = send(&app.router, "GET", &format!("/api/subjects/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["display_name"], "not_pigeon");
    }

    #[tokio::test]
    async fn blank_subject_name_is_bad_request() {
        let app = test_app();
        let (status, json) = send(
            &app.router,
            "POST",
            "/api/subjects",
            Some(serde_json::json!({ "display_name": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn missing_subject_returns_404() {
        let app = test_app();
        for uri in [
            "/api/subjects/42",
            "/api/subjects/42/days",
            "/api/subjects/42/smoothed",
            "/api/subjects/42/outliers",
            "/api/subjects/42/checkin",
        ] {
            let (status, _) = send(&app.router, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn record_list_and_delete_days() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        log_moods(&app.router, id, &[Some(3), None, Some(-2)]).await;

        let (status, json) =
            send(&app.router, "GET", &format!("/api/subjects/{id}/days"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["days"].as_array().unwrap().len(), 3);

        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/days?from=2016-10-02&to=2016-10-03"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["days"].as_array().unwrap().len(), 2);

        let (status, _) = send(
            &app.router,
            "DELETE",
            &format!("/api/subjects/{id}/days/2016-10-02"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app.router,
            "DELETE",
            &format!("/api/subjects/{id}/days/2016-10-02"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn out_of_range_mood_is_bad_request() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        let (status, _) = send(
            &app.router,
            "POST",
            &format!("/api/subjects/{id}/days"),
            Some(serde_json::json!({ "date": "2016-10-01", "overall_mood": 51 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn smoothed_mean_follows_trailing_window() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        let mut moods = vec![Some(5); 13];
        moods.push(Some(20));
        log_moods(&app.router, id, &moods).await;

        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/smoothed?window=5&statistic=mean"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let values = ys(&json);
        assert_eq!(values.len(), 14);
        assert_eq!(values[13], 8);
        assert_eq!(json["points"][13]["x"], "2016-10-14");
        assert_eq!(json["statistic"], "mean");
    }

    #[tokio::test]
    async fn invalid_window_and_statistic_are_bad_requests() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        for query in ["window=0", "window=-3", "statistic=median"] {
            let (status, _) = send(
                &app.router,
                "GET",
                &format!("/api/subjects/{id}/smoothed?{query}"),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        }
    }

    #[tokio::test]
    async fn global_outliers_flag_extreme_day() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        log_moods(&app.router, id, &[Some(0), Some(0), Some(0), Some(0), Some(50)]).await;

        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/outliers?mode=global"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ys(&json), vec![50]);
        assert_eq!(json["points"][0]["x"], "2016-10-05");
    }

    fn xs(json: &serde_json::Value) -> Vec<String> {
        json["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["x"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn local_outliers_use_fixed_baseline() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        let moods = [0, 0, 0, 10, 0, 0].map(Some);
        log_moods(&app.router, id, &moods).await;

        // Baseline is the mean of days 3..6 (2.5). The flat first window has
        // zero spread, so its 0 is flagged alongside the spike.
        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/outliers?mode=local&window=3"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "local");
        assert_eq!(json["window"], 3);
        assert_eq!(xs(&json), vec!["2016-10-03", "2016-10-04"]);
        assert_eq!(ys(&json), vec![0, 10]);

        // Global mode on the same days only sees the spike.
        let (_, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/outliers?mode=global"),
            None,
        )
        .await;
        assert_eq!(ys(&json), vec![10]);
    }

    #[tokio::test]
    async fn smoothed_stddev_trims_trailing_placeholders() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        let moods = [Some(2), Some(4), Some(9), Some(1), Some(7), Some(3), None, None, None];
        log_moods(&app.router, id, &moods).await;

        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/smoothed?window=3&statistic=stddev"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["statistic"], "stddev");
        // Two raw warm-up days, then truncated sample deviations of
        // [2,4,9], [4,9,1], [9,1,7], [1,7,3].
        assert_eq!(ys(&json), vec![2, 4, 3, 4, 4, 3]);
        assert_eq!(ys(&json).len(), moods.len() - 3);
        assert_eq!(xs(&json).last().unwrap(), "2016-10-06");
    }

    #[tokio::test]
    async fn smoothed_skips_interior_and_trailing_placeholders() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        log_moods(
            &app.router,
            id,
            &[Some(4), None, Some(6), Some(8), None, None, None],
        )
        .await;

        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/smoothed?window=2&statistic=mean"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(xs(&json), vec!["2016-10-01", "2016-10-04"]);
        assert_eq!(ys(&json), vec![4, 7]);
    }

    #[tokio::test]
    async fn unknown_outlier_mode_is_bad_request() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        let (status, _) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/outliers?mode=zscore"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn month_chart_skips_placeholders() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        log_moods(&app.router, id, &[Some(1), None, Some(3)]).await;

        let (status, json) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/moods?window=month"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ys(&json), vec![1, 3]);
        assert_eq!(json["min_date"], "2016-10-01");
        assert_eq!(json["max_date"], "2016-10-31");

        let (status, _) = send(
            &app.router,
            "GET",
            &format!("/api/subjects/{id}/moods?window=month&offset=1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn out_of_range_chart_offset_is_bad_request() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        for offset in ["-400000000", "-2147483648"] {
            let (status, json) = send(
                &app.router,
                "GET",
                &format!("/api/subjects/{id}/moods?window=year&offset={offset}"),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{offset}");
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
        }
    }

    #[tokio::test]
    async fn report_uses_configured_window() {
        let app = test_app();
        let id = create_subject(&app.router).await;
        log_moods(&app.router, id, &[Some(2); 3]).await;

        let (status, json) =
            send(&app.router, "GET", &format!("/api/subjects/{id}/report"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["window"], DEFAULT_ANALYSIS_WINDOW);
        assert_eq!(json["mean"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn checkin_nudges_after_silence() {
        let app = test_app();
        let id = create_subject(&app.router).await;

        let (_, json) =
            send(&app.router, "GET", &format!("/api/subjects/{id}/checkin"), None).await;
        assert_eq!(json["kind"], "first_entry");

        log_moods(&app.router, id, &[Some(4)]).await;
        let (status, json) =
            send(&app.router, "GET", &format!("/api/subjects/{id}/checkin"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["should_nudge"], true);
        assert_eq!(json["kind"], "daily_check_in");
        assert_eq!(json["days_since_last_rating"], 17);
    }
}
