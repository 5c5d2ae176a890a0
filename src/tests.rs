#[cfg(test)]
mod integration_tests {
    use crate::handlers::assets::{CreateAssetRequest, UpdateAssetRequest};
    use crate::handlers::bills::CreateBillRequest;
    use crate::handlers::expenses::CreateExpenseRequest;
    use crate::handlers::income::CreateIncomeRequest;
    use crate::handlers::liabilities::CreateLiabilityRequest;
    use crate::handlers::planners::CreatePlannerRequest;
    use crate::handlers::scenarios::{AddScenarioItemRequest, CreateScenarioRequest};
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;

    // The test app always holds one planner created by setup, id 1.
    const PLANNER_ID: i32 = 1;

    fn asset_request(name: &str, scenario: Option<&str>, sale_value: Decimal) -> CreateAssetRequest {
        CreateAssetRequest {
            planner_id: PLANNER_ID,
            name: name.to_string(),
            include_toggle: None,
            scenario: scenario.map(|s| s.to_string()),
            sale_value,
            notes: None,
        }
    }

    fn income_request(name: &str, scenario: Option<&str>, amount: Decimal) -> CreateIncomeRequest {
        CreateIncomeRequest {
            planner_id: PLANNER_ID,
            name: name.to_string(),
            include_toggle: None,
            scenario: scenario.map(|s| s.to_string()),
            monthly_amount: amount,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_planner() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let create_request = CreatePlannerRequest {
            name: "Household Budget".to_string(),
        };

        let response = server.post("/api/v1/planners").json(&create_request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Planner created successfully");
        assert_eq!(body.data["name"], "Household Budget");
        assert!(body.data["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_asset_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Create
        let create_response = server
            .post("/api/v1/assets")
            .json(&asset_request("Family House", None, Decimal::new(250_000, 0)))
            .await;
        create_response.assert_status(StatusCode::CREATED);
        let create_body: ApiResponse<serde_json::Value> = create_response.json();
        assert!(create_body.success);
        let asset_id = create_body.data["id"].as_i64().unwrap();
        // Omitted fields take the defaults
        assert_eq!(create_body.data["include_toggle"], "on");
        assert_eq!(create_body.data["scenario"], "ALL");
        assert_eq!(create_body.data["sale_value"], "250000");

        // Get by id
        let get_response = server.get(&format!("/api/v1/assets/{}", asset_id)).await;
        get_response.assert_status(StatusCode::OK);
        let get_body: ApiResponse<serde_json::Value> = get_response.json();
        assert_eq!(get_body.data["name"], "Family House");

        // Update: toggle it off
        let update_request = UpdateAssetRequest {
            name: None,
            include_toggle: Some("off".to_string()),
            scenario: None,
            sale_value: None,
            notes: Some("Not for sale right now".to_string()),
        };
        let update_response = server
            .put(&format!("/api/v1/assets/{}", asset_id))
            .json(&update_request)
            .await;
        update_response.assert_status(StatusCode::OK);
        let update_body: ApiResponse<serde_json::Value> = update_response.json();
        assert_eq!(update_body.data["include_toggle"], "off");
        assert_eq!(update_body.data["notes"], "Not for sale right now");

        // Delete, then the record is gone
        let delete_response = server.delete(&format!("/api/v1/assets/{}", asset_id)).await;
        delete_response.assert_status(StatusCode::NO_CONTENT);
        let gone_response = server.get(&format!("/api/v1/assets/{}", asset_id)).await;
        gone_response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_include_toggle_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut request = asset_request("Boat", None, Decimal::new(9_000, 0));
        request.include_toggle = Some("maybe".to_string());

        let response = server.post("/api/v1/assets").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bill_rejects_non_positive_interval() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let request = CreateBillRequest {
            planner_id: PLANNER_ID,
            name: "Broken Bill".to_string(),
            include_toggle: None,
            scenario: None,
            bill_amount: Decimal::new(100, 0),
            interval_months: 0,
            category_id: None,
            linked_asset_id: None,
            linked_liability_id: None,
            notes: None,
        };

        let response = server.post("/api/v1/bills").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bill_reports_monthly_average() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let request = CreateBillRequest {
            planner_id: PLANNER_ID,
            name: "Home Insurance".to_string(),
            include_toggle: None,
            scenario: None,
            bill_amount: Decimal::new(1_200, 0),
            interval_months: 12,
            category_id: None,
            linked_asset_id: None,
            linked_liability_id: None,
            notes: None,
        };

        let response = server.post("/api/v1/bills").json(&request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["bill_amount"], "1200");
        assert_eq!(body.data["interval_months"], 12);
        assert_eq!(body.data["monthly_average"], "100");
    }

    #[tokio::test]
    async fn test_list_scenario_filter_includes_all_tagged_records() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for (name, scenario) in [
            ("Shared Asset", None),
            ("Plan A Asset", Some("A")),
            ("Plan B Asset", Some("B")),
        ] {
            let response = server
                .post("/api/v1/assets")
                .json(&asset_request(name, scenario, Decimal::new(1_000, 0)))
                .await;
            response.assert_status(StatusCode::CREATED);
        }

        // Filtering on A keeps the ALL-tagged record and drops B's
        let response = server
            .get("/api/v1/assets")
            .add_query_param("planner_id", PLANNER_ID)
            .add_query_param("scenario", "A")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        let names: Vec<&str> = body.data.iter().map(|a| a["name"].as_str().unwrap()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Shared Asset"));
        assert!(names.contains(&"Plan A Asset"));

        // No filter returns everything
        let response = server
            .get("/api/v1/assets")
            .add_query_param("planner_id", PLANNER_ID)
            .await;
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_scenario_filter_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/assets")
            .add_query_param("planner_id", PLANNER_ID)
            .add_query_param("scenario", "plan a")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_monthly_totals_worked_example() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Income 2000, expense 500, annual bill 1200 (averages to 100),
        // and a toggled-off liability that must not count.
        server
            .post("/api/v1/income")
            .json(&income_request("Salary", None, Decimal::new(2_000, 0)))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/expenses")
            .json(&CreateExpenseRequest {
                planner_id: PLANNER_ID,
                name: "Groceries".to_string(),
                include_toggle: None,
                scenario: None,
                monthly_amount: Decimal::new(500, 0),
                category_id: None,
                linked_asset_id: None,
                linked_liability_id: None,
                notes: None,
            })
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/bills")
            .json(&CreateBillRequest {
                planner_id: PLANNER_ID,
                name: "Insurance".to_string(),
                include_toggle: None,
                scenario: None,
                bill_amount: Decimal::new(1_200, 0),
                interval_months: 12,
                category_id: None,
                linked_asset_id: None,
                linked_liability_id: None,
                notes: None,
            })
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/liabilities")
            .json(&CreateLiabilityRequest {
                planner_id: PLANNER_ID,
                name: "Paused Loan".to_string(),
                include_toggle: Some("off".to_string()),
                scenario: None,
                monthly_cost: Decimal::new(300, 0),
                principal: Some(Decimal::new(5_000, 0)),
                linked_asset_id: None,
                notes: None,
            })
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/v1/kpis/monthly-totals")
            .add_query_param("planner_id", PLANNER_ID)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["scenario"], "ALL");
        let totals = &body.data["totals"];
        assert_eq!(totals["monthly_income"], "2000");
        assert_eq!(totals["monthly_expenses"], "500");
        assert_eq!(totals["monthly_bills"], "100");
        assert_eq!(totals["monthly_liabilities"], "0");
        assert_eq!(totals["total_monthly_outgoings"], "600");
        assert_eq!(totals["net_cash_flow"], "1400");
        assert_eq!(totals["liability_principal"], "0");
    }

    #[tokio::test]
    async fn test_monthly_totals_partition_by_scenario() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/v1/income")
            .json(&income_request("Base Salary", None, Decimal::new(1_000, 0)))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/income")
            .json(&income_request("Side Gig", Some("A"), Decimal::new(200, 0)))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/expenses")
            .json(&CreateExpenseRequest {
                planner_id: PLANNER_ID,
                name: "Plan B Fee".to_string(),
                include_toggle: None,
                scenario: Some("B".to_string()),
                monthly_amount: Decimal::new(50, 0),
                category_id: None,
                linked_asset_id: None,
                linked_liability_id: None,
                notes: None,
            })
            .await
            .assert_status(StatusCode::CREATED);

        let totals_for = |scenario: &'static str| {
            let server = &server;
            async move {
                let response = server
                    .get("/api/v1/kpis/monthly-totals")
                    .add_query_param("planner_id", PLANNER_ID)
                    .add_query_param("scenario", scenario)
                    .await;
                response.assert_status(StatusCode::OK);
                let body: ApiResponse<serde_json::Value> = response.json();
                body.data["totals"].clone()
            }
        };

        let totals_a = totals_for("A").await;
        assert_eq!(totals_a["monthly_income"], "1200");
        assert_eq!(totals_a["net_cash_flow"], "1200");

        let totals_b = totals_for("B").await;
        assert_eq!(totals_b["monthly_income"], "1000");
        assert_eq!(totals_b["monthly_expenses"], "50");
        assert_eq!(totals_b["net_cash_flow"], "950");
    }

    #[tokio::test]
    async fn test_monthly_totals_cache_invalidated_by_mutations() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/v1/income")
            .json(&income_request("Salary", None, Decimal::new(1_000, 0)))
            .await
            .assert_status(StatusCode::CREATED);

        // First read populates the cache
        let response = server
            .get("/api/v1/kpis/monthly-totals")
            .add_query_param("planner_id", PLANNER_ID)
            .await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["totals"]["monthly_income"], "1000");

        // A write must drop the cached totals
        server
            .post("/api/v1/income")
            .json(&income_request("Bonus", None, Decimal::new(500, 0)))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/v1/kpis/monthly-totals")
            .add_query_param("planner_id", PLANNER_ID)
            .await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["totals"]["monthly_income"], "1500");
    }

    #[tokio::test]
    async fn test_effective_status_cascades_from_asset() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let asset_response = server
            .post("/api/v1/assets")
            .json(&{
                let mut request = asset_request("Rental Flat", None, Decimal::new(120_000, 0));
                request.include_toggle = Some("off".to_string());
                request
            })
            .await;
        asset_response.assert_status(StatusCode::CREATED);
        let asset_body: ApiResponse<serde_json::Value> = asset_response.json();
        let asset_id = asset_body.data["id"].as_i64().unwrap() as i32;

        server
            .post("/api/v1/liabilities")
            .json(&CreateLiabilityRequest {
                planner_id: PLANNER_ID,
                name: "Flat Mortgage".to_string(),
                include_toggle: None,
                scenario: None,
                monthly_cost: Decimal::new(700, 0),
                principal: Some(Decimal::new(90_000, 0)),
                linked_asset_id: Some(asset_id),
                notes: None,
            })
            .await
            .assert_status(StatusCode::CREATED);

        // Its own toggle is on, but the linked asset silences it
        let response = server
            .get("/api/v1/kpis/effective-liabilities")
            .add_query_param("planner_id", PLANNER_ID)
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["liability"]["include_toggle"], "on");
        assert_eq!(body.data[0]["effective_status"], "off");

        // And the silenced liability contributes nothing to the totals
        let totals_response = server
            .get("/api/v1/kpis/monthly-totals")
            .add_query_param("planner_id", PLANNER_ID)
            .await;
        let totals_body: ApiResponse<serde_json::Value> = totals_response.json();
        assert_eq!(totals_body.data["totals"]["monthly_liabilities"], "0");
    }

    #[tokio::test]
    async fn test_scenario_code_validation() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let request = CreateScenarioRequest {
            planner_id: PLANNER_ID,
            scenario: "B".to_string(),
            display_name: Some("Sell the house".to_string()),
            sale_month: Some(3),
        };
        let response = server.post("/api/v1/scenarios").json(&request).await;
        response.assert_status(StatusCode::CREATED);

        // Duplicate code for the same planner
        let response = server.post("/api/v1/scenarios").json(&request).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // The wildcard tag is reserved
        let reserved = CreateScenarioRequest {
            planner_id: PLANNER_ID,
            scenario: "ALL".to_string(),
            display_name: None,
            sale_month: None,
        };
        let response = server.post("/api/v1/scenarios").json(&reserved).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Lowercase codes are not accepted
        let lowercase = CreateScenarioRequest {
            planner_id: PLANNER_ID,
            scenario: "b".to_string(),
            display_name: None,
            sale_month: None,
        };
        let response = server.post("/api/v1/scenarios").json(&lowercase).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // sale_month outside 0..=12
        let out_of_range = CreateScenarioRequest {
            planner_id: PLANNER_ID,
            scenario: "C".to_string(),
            display_name: None,
            sale_month: Some(13),
        };
        let response = server.post("/api/v1/scenarios").json(&out_of_range).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scenario_items_lifecycle() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let scenario_response = server
            .post("/api/v1/scenarios")
            .json(&CreateScenarioRequest {
                planner_id: PLANNER_ID,
                scenario: "A".to_string(),
                display_name: None,
                sale_month: Some(1),
            })
            .await;
        scenario_response.assert_status(StatusCode::CREATED);
        let scenario_body: ApiResponse<serde_json::Value> = scenario_response.json();
        let scenario_id = scenario_body.data["id"].as_i64().unwrap();

        let asset_response = server
            .post("/api/v1/assets")
            .json(&asset_request("Family Car", None, Decimal::new(15_000, 0)))
            .await;
        let asset_body: ApiResponse<serde_json::Value> = asset_response.json();
        let asset_id = asset_body.data["id"].as_i64().unwrap() as i32;

        // Attach the asset to the scenario
        let add_request = AddScenarioItemRequest {
            item_id: asset_id,
            item_type: "asset".to_string(),
        };
        let response = server
            .post(&format!("/api/v1/scenarios/{}/items", scenario_id))
            .json(&add_request)
            .await;
        response.assert_status(StatusCode::CREATED);

        // Attaching the same item twice is rejected
        let response = server
            .post(&format!("/api/v1/scenarios/{}/items", scenario_id))
            .json(&add_request)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Listing shows the attachment
        let response = server
            .get(&format!("/api/v1/scenarios/{}/items", scenario_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["item_type"], "asset");

        // Detach, then detaching again is a 404
        let response = server
            .delete(&format!("/api/v1/scenarios/{}/items/{}", scenario_id, asset_id))
            .add_query_param("item_type", "asset")
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
        let response = server
            .delete(&format!("/api/v1/scenarios/{}/items/{}", scenario_id, asset_id))
            .add_query_param("item_type", "asset")
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_planner_delete_cascades_to_records() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let asset_response = server
            .post("/api/v1/assets")
            .json(&asset_request("Family House", None, Decimal::new(250_000, 0)))
            .await;
        asset_response.assert_status(StatusCode::CREATED);
        let asset_body: ApiResponse<serde_json::Value> = asset_response.json();
        let asset_id = asset_body.data["id"].as_i64().unwrap();

        let response = server
            .delete(&format!("/api/v1/planners/{}", PLANNER_ID))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/v1/assets/{}", asset_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
