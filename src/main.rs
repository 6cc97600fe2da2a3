mod db_utils;
mod handlers;
mod http;
mod models;
mod normalize;
mod plan;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_http::{Body, Request, Response, run, service_fn};
use serde_json::Value;

use handlers::handle_update_customer;
use http::{error_response, handle_options, parse_json_body, success_response};
use models::UpdateCustomerRequest;

/// Handle the Lambda event
async fn handle_lambda_event(event: Request, dynamodb_client: &DynamoDbClient) -> Response<Body> {
    // Get target table from environment
    let table_name = match std::env::var("DYNAMODB_TABLE_NAME") {
        Ok(v) => v,
        Err(_) => {
            return error_response(500, "DYNAMODB_TABLE_NAME environment variable not set.");
        }
    };

    let method = event.method().as_str();
    let path = event.uri().path();

    // Strip /Prod or /prod prefix if it exists
    let path = if path.starts_with("/Prod") || path.starts_with("/prod") {
        &path[5..]
    } else {
        path
    };

    // Handle CORS preflight requests
    if method == "OPTIONS" {
        return handle_options();
    }

    // Route based on path and method
    match (path, method) {
        ("/customer", "PUT" | "POST") => {
            let body = match parse_json_body(event.body()) {
                Ok(b) => b,
                Err(resp) => return resp,
            };

            // Required fields are checked before any storage access.
            let req = match parse_update_request(&body) {
                Ok(r) => r,
                Err(resp) => return resp,
            };

            match handle_update_customer(req, &table_name, dynamodb_client).await {
                Ok(value) => success_response(200, &value),
                Err(resp) => resp,
            }
        }
        _ => error_response(405, "You're sending a request that doesn't exist."),
    }
}

/// Extracts and validates the update payload. `customerId`, `name`, and `phone`
/// are required and must be non-empty; empty optional fields are dropped rather
/// than stored as empty attributes.
fn parse_update_request(body: &Value) -> Result<UpdateCustomerRequest, Response<Body>> {
    let mut req: UpdateCustomerRequest = match serde_json::from_value(body.clone()) {
        Ok(r) => r,
        Err(_) => return Err(error_response(400, "Missing required fields.")),
    };

    if req.customer_id.is_empty() || req.name.is_empty() || req.phone.is_empty() {
        return Err(error_response(400, "Missing required fields."));
    }

    req.address = req.address.take().filter(|s| !s.is_empty());
    req.email = req.email.take().filter(|s| !s.is_empty());

    Ok(req)
}

/// Main Lambda handler function
async fn function_handler(event: Request) -> Result<Response<Body>, lambda_http::Error> {
    // Initialize AWS config and the DynamoDB client
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let dynamodb_client = DynamoDbClient::new(&config);

    Ok(handle_lambda_event(event, &dynamodb_client).await)
}

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    lambda_http::tracing::init_default_subscriber();
    run(service_fn(function_handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::get_cors_preflight_headers;
    use serde_json::json;

    fn body_text(response: &Response<Body>) -> &str {
        match response.body() {
            Body::Text(s) => s.as_str(),
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[test]
    fn test_cors_headers() {
        let headers = get_cors_preflight_headers();
        assert_eq!(headers.len(), 4);
        assert!(headers.iter().any(|(k, _)| *k == "Access-Control-Allow-Origin"));
    }

    #[test]
    fn test_error_response_format() {
        let response = error_response(400, "Missing required fields.");
        assert_eq!(response.status(), 400);
        assert!(response.headers().contains_key("Access-Control-Allow-Origin"));
        assert!(body_text(&response).contains("Missing required fields."));
    }

    #[test]
    fn test_handle_options() {
        let response = handle_options();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_success_response() {
        let response = success_response(200, &json!({ "message": "Customer updated successfully." }));
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert!(body_text(&response).contains("Customer updated successfully."));
    }

    #[test]
    fn test_parse_update_request_valid() {
        let body = json!({
            "customerId": "C1",
            "name": "Jane Doe",
            "phone": "555-0100",
            "address": "A",
            "email": "e@x.com"
        });
        let req = parse_update_request(&body).expect("valid request");
        assert_eq!(req.customer_id, "C1");
        assert_eq!(req.address.as_deref(), Some("A"));
        assert_eq!(req.email.as_deref(), Some("e@x.com"));
    }

    #[test]
    fn test_parse_update_request_missing_phone() {
        let body = json!({ "customerId": "C1", "name": "Jane Doe" });
        let response = parse_update_request(&body).expect_err("missing phone");
        assert_eq!(response.status(), 400);
        assert!(body_text(&response).contains("Missing required fields."));
    }

    #[test]
    fn test_parse_update_request_empty_required_field() {
        let body = json!({ "customerId": "", "name": "Jane Doe", "phone": "555-0100" });
        let response = parse_update_request(&body).expect_err("empty customerId");
        assert_eq!(response.status(), 400);
    }

    #[test]
    fn test_parse_update_request_drops_empty_optionals() {
        let body = json!({
            "customerId": "C1",
            "name": "Jane Doe",
            "phone": "555-0100",
            "address": "",
            "email": ""
        });
        let req = parse_update_request(&body).expect("valid request");
        assert_eq!(req.address, None);
        assert_eq!(req.email, None);
    }
}
