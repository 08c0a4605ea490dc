//! Tests for the sheet server
//!
//! Property tests over the engine's parser and layout heuristic, plus
//! handler tests against an in-process test server.

mod property_tests {
    use proptest::prelude::*;

    use sheet_engine::layout::{row_height_for, COLUMN_PERCENTS};
    use sheet_engine::parse_roster;

    /// A well-formed roster line: number, period, name.
    fn valid_line() -> impl Strategy<Value = (u32, String)> {
        (1u32..1000, "[A-Za-z][A-Za-z ]{0,18}")
    }

    /// A line with no period at all, which the parser must skip.
    fn junk_line() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ]{0,20}"
    }

    proptest! {
        /// Property: parsed count equals the number of well-formed lines;
        /// junk lines never crash parsing.
        #[test]
        fn parsed_count_matches_valid_lines(
            lines in prop::collection::vec(
                prop_oneof![
                    valid_line().prop_map(|(n, name)| (true, format!("{}. {}", n, name))),
                    junk_line().prop_map(|line| (false, line)),
                ],
                0..40,
            )
        ) {
            let text = lines
                .iter()
                .map(|(_, line)| line.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let expected = lines.iter().filter(|(valid, _)| *valid).count();

            prop_assert_eq!(parse_roster(&text).len(), expected);
        }

        /// Property: entries come back in input order with trimmed fields.
        #[test]
        fn parsed_entries_preserve_order(rows in prop::collection::vec(valid_line(), 1..30)) {
            let text = rows
                .iter()
                .map(|(n, name)| format!("{}. {}", n, name))
                .collect::<Vec<_>>()
                .join("\n");

            let entries = parse_roster(&text);
            prop_assert_eq!(entries.len(), rows.len());
            for (entry, (n, name)) in entries.iter().zip(&rows) {
                prop_assert_eq!(&entry.index, &n.to_string());
                prop_assert_eq!(entry.name.as_str(), name.trim());
            }
        }

        /// Property: the row height always lands in [12, 25] points.
        #[test]
        fn row_height_in_range(n in 0usize..100_000) {
            let h = row_height_for(n);
            prop_assert!((12.0..=25.0).contains(&h), "n={} h={}", n, h);
        }

        /// Property: fewer rows never get a shorter row height.
        #[test]
        fn row_height_non_increasing(n in 0usize..10_000) {
            prop_assert!(row_height_for(n + 1) <= row_height_for(n));
        }

        /// Property: the column fractions cover the usable width exactly,
        /// for any page width.
        #[test]
        fn column_widths_cover_usable_width(width in 1.0f64..10_000.0) {
            let total: f64 = COLUMN_PERCENTS
                .iter()
                .map(|p| width * f64::from(*p) / 100.0)
                .sum();
            prop_assert!((total - width).abs() < 1e-6 * width);
        }
    }
}

mod handler_tests {
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use crate::{router, AppState};

    #[derive(Serialize)]
    struct FormBody {
        text: String,
    }

    fn test_server() -> TestServer {
        let state = AppState { timeout_ms: 30_000 };
        TestServer::new(router(state)).expect("test server should build")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = test_server();

        let res = server.get("/health").await;
        res.assert_status_ok();

        let body: serde_json::Value = res.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "mabar-server");
    }

    #[tokio::test]
    async fn index_serves_form_page() {
        let server = test_server();

        let res = server.get("/").await;
        res.assert_status_ok();
        assert!(res.text().contains("convertForm"));
    }

    #[tokio::test]
    async fn convert_acknowledges_roster() {
        let server = test_server();

        let res = server
            .post("/convert")
            .form(&FormBody {
                text: "1. Alice\n2. Bob".to_string(),
            })
            .await;
        res.assert_status_ok();

        let body: serde_json::Value = res.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["page_count"], 1);
    }

    #[tokio::test]
    async fn download_streams_pdf_attachment() {
        let server = test_server();

        let res = server
            .post("/download")
            .form(&FormBody {
                text: "1. Alice".to_string(),
            })
            .await;
        res.assert_status_ok();

        assert_eq!(res.headers()["content-type"], "application/pdf");

        let disposition = res.headers()["content-disposition"]
            .to_str()
            .expect("ascii header")
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Daftar Pemain Mabar "));
        assert!(disposition.ends_with(".pdf\""));

        assert!(res.as_bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn convert_without_text_field_is_client_error() {
        let server = test_server();

        let res = server.post("/convert").await;
        assert!(res.status_code().is_client_error());
    }
}

mod error_mapping {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use sheet_engine::compiler::Diagnostic;
    use sheet_engine::EngineError;

    use crate::error::ServerError;

    #[test]
    fn compile_failure_maps_to_bad_request() {
        let err = ServerError::from(EngineError::Compile(vec![Diagnostic::new("bad geometry")]));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn timeout_maps_to_request_timeout() {
        let res = ServerError::from(EngineError::Timeout(5000)).into_response();
        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn other_engine_errors_map_to_internal() {
        let res = ServerError::from(EngineError::Internal("boom".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
