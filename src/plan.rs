//! Transaction planning for customer updates.
//!
//! Pure logic: given the stored record and the requested fields, decide exactly
//! which conditional writes keep the primary item, the phone lock, and the
//! lookup index consistent. No DynamoDB client involved, so every branch is
//! unit-testable.

use crate::models::{CustomerInfo, CustomerRecord, LookupEntry, PhoneLock, RowKey, TableRow, UpdateCustomerRequest};
use crate::normalize::normalize;

/// A single write intent inside the atomic transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Put guarded by `attribute_exists(PK)` — refresh an item that must
    /// already be there (the primary record, or an unchanged lookup key).
    OverwriteIfExists(TableRow),
    /// Put guarded by `attribute_not_exists(PK)` — claim a key that must be
    /// free. This is the uniqueness check for phone locks and new lookup keys.
    InsertIfAbsent(TableRow),
    /// Delete with no condition — the item is known to belong to this customer.
    DeleteUnconditional(RowKey),
}

/// Computes the ordered conditional writes for one customer update.
///
/// The first op is always the primary-record overwrite (guarded on existence,
/// in case the record was deleted between fetch and commit). The rest depends
/// on which lookup inputs changed:
///
/// 1. Phone changed: claim the new phone lock and new lookup key, then drop
///    the old lock and old lookup entry. The new-lock insert carries the
///    uniqueness condition, so a concurrent claim aborts the whole transaction.
/// 2. Phone unchanged but normalized name changed: replace just the lookup
///    entry (the lock only depends on the phone).
/// 3. Neither changed: overwrite the existing lookup entry in place to refresh
///    its denormalized snapshot.
pub fn plan_update(old: &CustomerRecord, req: &UpdateCustomerRequest) -> Vec<WriteOp> {
    let old_normalized_name = normalize(&old.name);
    let new_normalized_name = normalize(&req.name);

    let record = CustomerRecord::new(
        req.customer_id.clone(),
        req.name.clone(),
        req.address.clone(),
        req.email.clone(),
        req.phone.clone(),
    );
    let snapshot = CustomerInfo {
        customer_id: req.customer_id.clone(),
        name: req.name.clone(),
        address: req.address.clone(),
        email: req.email.clone(),
        phone: req.phone.clone(),
    };

    let mut ops = vec![WriteOp::OverwriteIfExists(TableRow::Customer(record))];

    if old.phone != req.phone {
        ops.push(WriteOp::InsertIfAbsent(TableRow::PhoneLock(PhoneLock::new(
            &req.phone,
            &req.customer_id,
        ))));
        ops.push(WriteOp::InsertIfAbsent(TableRow::Lookup(LookupEntry::new(
            snapshot,
        ))));
        ops.push(WriteOp::DeleteUnconditional(PhoneLock::key(&old.phone)));
        ops.push(WriteOp::DeleteUnconditional(LookupEntry::key(
            &old.phone,
            &old_normalized_name,
        )));
    } else if old_normalized_name != new_normalized_name {
        ops.push(WriteOp::DeleteUnconditional(LookupEntry::key(
            &req.phone,
            &old_normalized_name,
        )));
        ops.push(WriteOp::InsertIfAbsent(TableRow::Lookup(LookupEntry::new(
            snapshot,
        ))));
    } else {
        ops.push(WriteOp::OverwriteIfExists(TableRow::Lookup(
            LookupEntry::new(snapshot),
        )));
    }

    ops
}
