//! Request and response bodies of the `/api/demo` endpoints.
//!
//! Field names are the camelCase names clients see on the wire. Echoed body
//! fields are kept as raw JSON values: no type is enforced and an absent field
//! stays absent in the response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body accepted by `POST /api/demo` and `PATCH /api/demo/:id`.
///
/// Neither field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_description: Option<Value>,
}

impl ItemBody {
    /// Pick the item fields out of a parsed JSON body.
    ///
    /// Keys that are present keep their value even when it is `null`; any
    /// other shape (arrays, missing keys) yields absent fields.
    pub fn from_value(body: &Value) -> Self {
        Self {
            item_name: body.get("itemName").cloned(),
            item_description: body.get("itemDescription").cloned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Response body for `GET /api/demo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// Response body for `GET /api/demo/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "getID")]
    pub get_id: String,
}

/// Response body for `DELETE /api/demo/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub delete_id: String,
}

/// Response body for `POST /api/demo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_item_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_item_description: Option<Value>,
}

impl From<ItemBody> for CreateResponse {
    fn from(body: ItemBody) -> Self {
        Self {
            new_item_name: body.item_name,
            new_item_description: body.item_description,
        }
    }
}

/// Response body for `PATCH /api/demo/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchResponse {
    pub patch_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_item_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_item_description: Option<Value>,
}

impl PatchResponse {
    pub fn new(id: String, body: ItemBody) -> Self {
        Self {
            patch_id: id,
            new_item_name: body.item_name,
            new_item_description: body.item_description,
        }
    }
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// Production error body: `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

/// Inner object of [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorMessage {
                message: message.into(),
            },
        }
    }
}

/// Development error body: the error message plus its full structure.
#[derive(Debug, Clone, Serialize)]
pub struct DebugErrorResponse {
    pub message: String,
    pub error: crate::error::ErrorDetail,
}
