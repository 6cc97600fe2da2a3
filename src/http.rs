//! HTTP utilities for request/response handling and CORS

use lambda_http::{Body, Response};
use serde_json::{Value, json};

/// CORS origin header for all responses
pub fn get_cors_origin_header() -> (&'static str, &'static str) {
    ("Access-Control-Allow-Origin", "*")
}

/// Full CORS headers for OPTIONS preflight responses only
pub fn get_cors_preflight_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Access-Control-Allow-Origin", "*"),
        (
            "Access-Control-Allow-Headers",
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token,If-Modified-Since",
        ),
        ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
        ("Access-Control-Max-Age", "86400"),
    ]
}

/// Build an error response; the body is always `{"message": ...}`
pub fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = json!({ "message": message });

    let (key, value) = get_cors_origin_header();
    Response::builder()
        .status(status)
        .header(key, value)
        .header("Content-Type", "application/json")
        .body(body.to_string().into())
        .expect("Couldn't create error response")
}

/// Build a successful response with CORS headers
pub fn success_response(status: u16, body: &Value) -> Response<Body> {
    let (key, value) = get_cors_origin_header();
    Response::builder()
        .status(status)
        .header(key, value)
        .header("Content-Type", "application/json")
        .body(body.to_string().into())
        .expect("Couldn't create success response")
}

/// Handle CORS preflight requests
pub fn handle_options() -> Response<Body> {
    let mut response = Response::builder().status(200);

    for (key, value) in get_cors_preflight_headers() {
        response = response.header(key, value);
    }

    response
        .header("Content-Type", "application/json")
        .body(Body::Empty)
        .expect("Couldn't handle CORS request")
}

pub fn parse_json_body(body: &Body) -> Result<Value, Response<Body>> {
    let body_str = match body {
        Body::Empty => "{}",
        Body::Text(s) => s.as_str(),
        Body::Binary(b) => {
            match std::str::from_utf8(b) {
                Ok(s) => s,
                Err(_) => return Err(error_response(400, "Could not parse request body as UTF-8.")),
            }
        },
        _ => "{}",
    };

    let json: Value = match serde_json::from_str(body_str) {
        Ok(v) => v,
        Err(_) => return Err(error_response(400, "Could not parse request body as JSON."))
    };

    Ok(json)
}
