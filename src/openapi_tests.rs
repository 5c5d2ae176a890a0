#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        // Test that the OpenAPI schema can be generated without errors
        let openapi = ApiDoc::openapi();

        // Verify that the schema contains the expected components
        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("MonthlyTotals"));
        assert!(components.schemas.contains_key("MonthlyTotalsResponse"));

        // Verify that the schema can be serialized to JSON without errors
        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        // Verify ErrorResponse has the expected structure
        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) =
            error_response_schema
        {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_monthly_totals_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let totals_schema = components.schemas.get("MonthlyTotals").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) =
            totals_schema
        {
            let properties = &obj.properties;
            assert!(properties.contains_key("monthly_income"));
            assert!(properties.contains_key("monthly_expenses"));
            assert!(properties.contains_key("monthly_bills"));
            assert!(properties.contains_key("monthly_liabilities"));
            assert!(properties.contains_key("total_monthly_outgoings"));
            assert!(properties.contains_key("net_cash_flow"));
            assert!(properties.contains_key("asset_sales"));
            assert!(properties.contains_key("liability_principal"));
            assert!(properties.contains_key("net_value"));
        } else {
            panic!("MonthlyTotals should be an object schema");
        }
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();

        // Verify that the /health endpoint is properly defined
        assert!(openapi.paths.paths.contains_key("/health"));

        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path
            .operations
            .get(&utoipa::openapi::PathItemType::Get);
        assert!(health_get.is_some());

        let health_get_op = health_get.unwrap();

        let responses = &health_get_op.responses;
        // Check that both 200 and 500 responses are defined
        assert!(responses.responses.contains_key("200"));
        assert!(responses.responses.contains_key("500"));
    }

    #[test]
    fn test_openapi_paths_cover_all_record_collections() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        for collection in [
            "planners",
            "assets",
            "liabilities",
            "income",
            "expenses",
            "bills",
            "categories",
            "scenarios",
        ] {
            let path = format!("/api/v1/{}", collection);
            assert!(paths.contains_key(&path), "missing path {}", path);
        }

        assert!(paths.contains_key("/api/v1/kpis/monthly-totals"));
        assert!(paths.contains_key("/api/v1/kpis/effective-liabilities"));
        assert!(paths.contains_key("/api/v1/kpis/effective-expenses"));
        assert!(paths.contains_key("/api/v1/kpis/effective-bills"));
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi = ApiDoc::openapi();
        let openapi_json = serde_json::to_string(&openapi).unwrap();

        // Ensure no references to crate.schemas.ErrorResponse exist
        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));

        // Ensure proper ErrorResponse references exist
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
