use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Primary customer item, stored under `(PK = "CUSTOMER", SK = customerId)`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CustomerRecord {
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(rename = "SK")]
    pub sk: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
}

impl CustomerRecord {
    pub fn new(
        customer_id: String,
        name: String,
        address: Option<String>,
        email: Option<String>,
        phone: String,
    ) -> Self {
        CustomerRecord {
            pk: "CUSTOMER".to_string(),
            sk: customer_id.clone(),
            customer_id,
            name,
            address,
            email,
            phone,
        }
    }
}

/// Marker item claiming a phone number for exactly one customer.
/// Stored under `(PK = "CUSTOMER_PHONE#<phone>", SK = "LOCK")`; inserted with
/// `attribute_not_exists(PK)` so a second claimant aborts the whole transaction.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PhoneLock {
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(rename = "SK")]
    pub sk: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
}

impl PhoneLock {
    pub fn new(phone: &str, customer_id: &str) -> Self {
        PhoneLock {
            pk: format!("CUSTOMER_PHONE#{}", phone),
            sk: "LOCK".to_string(),
            customer_id: customer_id.to_string(),
        }
    }

    pub fn key(phone: &str) -> RowKey {
        RowKey {
            pk: format!("CUSTOMER_PHONE#{}", phone),
            sk: "LOCK".to_string(),
        }
    }
}

/// Denormalized snapshot of a customer, carried inside a `LookupEntry`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CustomerInfo {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
}

/// Secondary-index item stored under
/// `(PK = "CUSTOMER_LOOKUP", SK = "<phone>#<normalizedName>")`. The sort key is a
/// function of the customer's phone and name, so a change to either means
/// delete-old + insert-new rather than an in-place update.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LookupEntry {
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(rename = "SK")]
    pub sk: String,
    #[serde(rename = "Info")]
    pub info: CustomerInfo,
}

impl LookupEntry {
    pub fn new(info: CustomerInfo) -> Self {
        let sk = format!("{}#{}", info.phone, normalize(&info.name));
        LookupEntry {
            pk: "CUSTOMER_LOOKUP".to_string(),
            sk,
            info,
        }
    }

    pub fn key(phone: &str, normalized_name: &str) -> RowKey {
        RowKey {
            pk: "CUSTOMER_LOOKUP".to_string(),
            sk: format!("{}#{}", phone, normalized_name),
        }
    }
}

/// Composite primary key of any item in the table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RowKey {
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(rename = "SK")]
    pub sk: String,
}

/// Any of the three item shapes a customer update can write. Untagged so it
/// serializes straight to the inner item's attributes.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TableRow {
    Customer(CustomerRecord),
    PhoneLock(PhoneLock),
    Lookup(LookupEntry),
}

impl TableRow {
    pub fn key(&self) -> RowKey {
        let (pk, sk) = match self {
            TableRow::Customer(c) => (&c.pk, &c.sk),
            TableRow::PhoneLock(l) => (&l.pk, &l.sk),
            TableRow::Lookup(e) => (&e.pk, &e.sk),
        };
        RowKey {
            pk: pk.clone(),
            sk: sk.clone(),
        }
    }
}

// Request Bodies
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateCustomerRequest {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: String,
}
