//! Transaction execution against DynamoDB.
use std::collections::HashMap;

use aws_sdk_dynamodb::{
    Client as DynamoDbClient,
    types::{AttributeValue, Delete, Put, TransactWriteItem},
};
use lambda_http::{Body, Response};

use crate::http::error_response;
use crate::models::TableRow;
use crate::plan::WriteOp;

/// Lowers planned write ops into SDK transaction items for one table.
///
/// `OverwriteIfExists` and `InsertIfAbsent` become `Put`s with
/// `attribute_exists(PK)` / `attribute_not_exists(PK)` condition expressions;
/// `DeleteUnconditional` becomes a bare `Delete`.
pub fn to_transact_items(
    table_name: &str,
    ops: Vec<WriteOp>,
) -> Result<Vec<TransactWriteItem>, Response<Body>> {
    let mut txn_items = Vec::with_capacity(ops.len());

    for op in ops {
        let item = match op {
            WriteOp::OverwriteIfExists(row) => {
                build_conditional_put(table_name, &row, "attribute_exists(PK)")?
            }
            WriteOp::InsertIfAbsent(row) => {
                build_conditional_put(table_name, &row, "attribute_not_exists(PK)")?
            }
            WriteOp::DeleteUnconditional(key) => {
                let delete = Delete::builder()
                    .table_name(table_name)
                    .key("PK", AttributeValue::S(key.pk))
                    .key("SK", AttributeValue::S(key.sk))
                    .build()
                    .map_err(|e| error_response(400, &format!("Failed to build Delete item: {:?}", e)))?;
                TransactWriteItem::builder().delete(delete).build()
            }
        };
        txn_items.push(item);
    }

    Ok(txn_items)
}

fn build_conditional_put(
    table_name: &str,
    row: &TableRow,
    condition: &str,
) -> Result<TransactWriteItem, Response<Body>> {
    let attributes: HashMap<String, AttributeValue> = serde_dynamo::to_item(row)
        .map_err(|e| error_response(400, &format!("Failed to serialize item for transaction: {:?}", e)))?;
    let put = Put::builder()
        .table_name(table_name)
        .set_item(Some(attributes))
        .condition_expression(condition)
        .build()
        .map_err(|e| error_response(400, &format!("Failed to build Put item: {:?}", e)))?;
    Ok(TransactWriteItem::builder().put(put).build())
}

/// Submits the planned ops as one all-or-nothing `TransactWriteItems` call.
///
/// A `TransactionCanceledException` means some item's condition failed at
/// commit time; for this workflow that is a phone-uniqueness collision (or the
/// record vanishing between fetch and commit), reported as a conflict. Any
/// other failure surfaces the SDK error detail.
pub async fn execute_customer_transaction(
    ops: Vec<WriteOp>,
    table_name: &str,
    client: &DynamoDbClient,
) -> Result<(), Response<Body>> {
    let txn_items = to_transact_items(table_name, ops)?;

    client
        .transact_write_items()
        .set_transact_items(Some(txn_items))
        .send()
        .await
        .map_err(|e| {
            lambda_http::tracing::error!("UpdateCustomer transaction failed: {:?}", e);
            if let Some(service_err) = e.as_service_error()
                && service_err.is_transaction_canceled_exception()
            {
                return error_response(400, "Phone number already exists.");
            }
            error_response(400, &format!("{:?}", e))
        })?;

    Ok(())
}
