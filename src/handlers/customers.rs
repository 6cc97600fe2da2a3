//! Customer update handler.
use serde_json::{Value, json};
use lambda_http::{Body, Response};
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use crate::db_utils::execute_customer_transaction;
use crate::http::error_response;
use crate::models::{CustomerRecord, UpdateCustomerRequest};
use crate::plan::plan_update;

/// Updates a customer and keeps the phone lock and lookup index in step.
///
/// # Database Interactions
/// - **`GetItem`** on `(PK = "CUSTOMER", SK = customerId)` to fetch the stored record.
/// - **`TransactWriteItems`** with the planned conditional puts/deletes.
///
/// # Logic
/// - 404 if the customer does not exist; no transaction is attempted.
/// - The write set is computed by `plan_update` from the old and new fields.
/// - A condition failure inside the transaction surfaces as 400
///   "Phone number already exists." (see `execute_customer_transaction`).
pub async fn handle_update_customer(
    req: UpdateCustomerRequest,
    table_name: &str,
    client: &Client,
) -> Result<Value, Response<Body>> {
    let output = client.get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S("CUSTOMER".to_string()))
        .key("SK", AttributeValue::S(req.customer_id.clone()))
        .send()
        .await
        .map_err(|e| error_response(400, &format!("Failed to get customer: {:?}", e)))?;

    let item = output.item
        .ok_or_else(|| error_response(404, "Customer not found."))?;

    let old: CustomerRecord = serde_dynamo::from_item(item)
        .map_err(|e| error_response(400, &format!("Failed to deserialize customer: {:?}", e)))?;

    let ops = plan_update(&old, &req);
    execute_customer_transaction(ops, table_name, client).await?;

    Ok(json!({ "message": "Customer updated successfully." }))
}
