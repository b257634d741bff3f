use serde::{Deserialize, Serialize};

/// Catalog entry as owned by the product service. Keyed by string id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
}

/// Account as owned by the identity service.
///
/// Keys are expected to be string ids (UUIDs), matching the token's
/// `userId` claim; ObjectId-keyed accounts never resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub shop_name: Option<String>,
}
