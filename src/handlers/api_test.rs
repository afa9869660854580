#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::{TestServer, TestServerConfig};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::error::LeadError;
    use crate::handlers::api::AppState;
    use crate::models::payload::Endpoint;
    use crate::routes::create_router;
    use crate::services::sessions::SessionLimits;
    use crate::services::transport::MockLeadTransport;

    // Helper function to set up a test server around a mock transport
    fn setup_test_server(transport: MockLeadTransport, is_production: bool) -> TestServer {
        let app_state = Arc::new(AppState::new(Arc::new(transport)));
        let router = create_router(app_state, is_production);

        let config = TestServerConfig::builder().mock_transport().build();
        TestServer::new_with_config(router, config).unwrap()
    }

    fn setup_limited_server(limits: SessionLimits) -> TestServer {
        let app_state = Arc::new(AppState::with_session_limits(
            Arc::new(MockLeadTransport::new()),
            limits,
        ));
        let config = TestServerConfig::builder().mock_transport().build();
        TestServer::new_with_config(create_router(app_state, false), config).unwrap()
    }

    async fn open_form(server: &TestServer, kind: &str) -> String {
        let response = server.post("/forms").json(&json!({ "kind": kind })).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let view: Value = response.json();
        view["id"].as_str().unwrap().to_string()
    }

    async fn set_fields(server: &TestServer, id: &str, fields: &[(&str, &str)]) -> Value {
        let mut view = Value::Null;
        for (name, value) in fields {
            let response = server
                .put(&format!("/forms/{}/fields", id))
                .json(&json!({ "name": name, "value": value }))
                .await;
            assert_eq!(response.status_code(), StatusCode::OK);
            view = response.json();
        }
        view
    }

    const ADA: &[(&str, &str)] = &[
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("phone", "+2348000000000"),
        ("location", ""),
    ];

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = setup_test_server(MockLeadTransport::new(), false);
        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_confirmation_page() {
        let server = setup_test_server(MockLeadTransport::new(), true);
        let body: Value = server.get("/success").await.json();
        assert_eq!(body["title"], "Successfully submitted!");
        assert_eq!(body["continue_to"], "/");
    }

    #[tokio::test]
    async fn test_open_form_starts_blank() {
        let server = setup_test_server(MockLeadTransport::new(), false);
        let response = server.post("/forms").json(&json!({ "kind": "waitlist" })).await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let view: Value = response.json();
        assert_eq!(view["kind"], "waitlist");
        assert_eq!(view["state"]["name"], "");
        assert_eq!(view["in_flight"], false);
        assert_eq!(view["fields"]["required"], json!(["name", "email", "phone"]));
    }

    #[tokio::test]
    async fn test_unknown_form_kind_is_rejected() {
        let server = setup_test_server(MockLeadTransport::new(), false);
        let response = server.post("/forms").json(&json!({ "kind": "newsletter" })).await;
        assert!(response.status_code().is_client_error());
    }

    #[tokio::test]
    async fn test_field_policy_follows_facility_type() {
        let server = setup_test_server(MockLeadTransport::new(), false);
        let id = open_form(&server, "provider").await;

        let view = set_fields(&server, &id, &[("facilityType", "hospital")]).await;
        let visible = view["fields"]["visible"].as_array().unwrap();
        assert!(visible.contains(&json!("hospitalName")));
        assert!(!visible.contains(&json!("labName")));

        let view = set_fields(&server, &id, &[("facilityType", "diagnostic")]).await;
        let visible = view["fields"]["visible"].as_array().unwrap();
        assert!(visible.contains(&json!("labName")));
        assert!(!visible.contains(&json!("hospitalName")));
    }

    #[tokio::test]
    async fn test_waitlist_submit_success() {
        let mut transport = MockLeadTransport::new();
        transport
            .expect_submit()
            .withf(|payload| {
                payload.endpoint() == Endpoint::WaitlistUser
                    && serde_json::to_value(payload).unwrap()
                        == json!({
                            "full_name": "Ada Lovelace",
                            "designation": "no-context",
                            "phone": "+2348000000000",
                            "email": "ada@example.com"
                        })
            })
            .times(1)
            .returning(|_| Ok(()));

        let server = setup_test_server(transport, false);
        let id = open_form(&server, "waitlist").await;
        set_fields(&server, &id, ADA).await;

        let response = server.post(&format!("/forms/{}/submit", id)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body, json!({ "success": true, "redirect": "/success" }));

        let view: Value = server.get(&format!("/forms/{}", id)).await.json();
        assert_eq!(view["state"]["name"], "");
        assert_eq!(view["state"]["email"], "");
    }

    #[tokio::test]
    async fn test_upstream_500_keeps_values() {
        let mut transport = MockLeadTransport::new();
        transport
            .expect_submit()
            .times(1)
            .returning(|_| Err(LeadError::Request { status: 500 }));

        let server = setup_test_server(transport, false);
        let id = open_form(&server, "waitlist").await;
        set_fields(&server, &id, ADA).await;

        let response = server.post(&format!("/forms/{}/submit", id)).await;
        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body.get("redirect").is_none());
        assert_eq!(body["toast"]["level"], "error");
        assert!(body["toast"]["message"].as_str().unwrap().contains("500"));

        let view: Value = server.get(&format!("/forms/{}", id)).await.json();
        assert_eq!(view["state"]["name"], "Ada Lovelace");
        assert_eq!(view["state"]["phone"], "+2348000000000");
    }

    #[tokio::test]
    async fn test_provider_without_facility_type() {
        let mut transport = MockLeadTransport::new();
        transport.expect_submit().times(0);

        let server = setup_test_server(transport, false);
        let id = open_form(&server, "provider").await;
        set_fields(
            &server,
            &id,
            &[
                ("name", "Ngozi Okafor"),
                ("designation", "Medical Director"),
                ("phone", "+2348011111111"),
                ("email", "ngozi@stnicholas.ng"),
            ],
        )
        .await;

        let response = server.post(&format!("/forms/{}/submit", id)).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["toast"]["message"], "Please select a facility type");
    }

    #[tokio::test]
    async fn test_unknown_form_id() {
        let server = setup_test_server(MockLeadTransport::new(), false);

        let response = server.post("/forms/does-not-exist/submit").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let response = server
            .put("/forms/does-not-exist/fields")
            .json(&json!({ "name": "name", "value": "Ada" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_close_form() {
        let server = setup_test_server(MockLeadTransport::new(), true);
        let id = open_form(&server, "waitlist").await;

        let response = server.delete(&format!("/forms/{}", id)).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let response = server.delete(&format!("/forms/{}", id)).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_production_hides_inspection_routes() {
        let server = setup_test_server(MockLeadTransport::new(), true);
        let id = open_form(&server, "waitlist").await;

        let response = server.get(&format!("/forms/{}", id)).await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

        let response = server.get("/debug/forms").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_debug_counts_open_forms() {
        let server = setup_test_server(MockLeadTransport::new(), false);
        open_form(&server, "waitlist").await;
        open_form(&server, "provider").await;

        let body: Value = server.get("/debug/forms").await.json();
        assert_eq!(body["open_forms"], 2);
    }

    #[tokio::test]
    async fn test_unknown_field_name_is_rejected() {
        let server = setup_test_server(MockLeadTransport::new(), false);
        let id = open_form(&server, "waitlist").await;

        let response = server
            .put(&format!("/forms/{}/fields", id))
            .json(&json!({ "name": "not-a-field", "value": "x" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        // Provider-only fields do not belong on the waitlist form either
        let response = server
            .put(&format!("/forms/{}/fields", id))
            .json(&json!({ "name": "hospitalName", "value": "St. Nicholas" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let view: Value = server.get(&format!("/forms/{}", id)).await.json();
        let state = view["state"].as_object().unwrap();
        assert_eq!(state.len(), 4);
        assert!(state.get("not-a-field").is_none());
    }

    #[tokio::test]
    async fn test_open_form_refused_when_table_full() {
        let server = setup_limited_server(SessionLimits {
            idle_ttl: chrono::Duration::minutes(30),
            max_open: 2,
        });
        let first = open_form(&server, "waitlist").await;
        open_form(&server, "provider").await;

        let response = server.post("/forms").json(&json!({ "kind": "waitlist" })).await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["level"], "error");

        // Closing a form frees its slot
        server.delete(&format!("/forms/{}", first)).await;
        let response = server.post("/forms").json(&json!({ "kind": "waitlist" })).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_idle_forms_do_not_hold_slots() {
        let server = setup_limited_server(SessionLimits {
            idle_ttl: chrono::Duration::zero(),
            max_open: 1,
        });
        let stale = open_form(&server, "waitlist").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let fresh = open_form(&server, "waitlist").await;
        assert_ne!(stale, fresh);

        let response = server.get(&format!("/forms/{}", stale)).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
