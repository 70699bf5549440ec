//! REST API types for the mint page.
//!
//! Sale state and configuration are served as the `core` models themselves,
//! so the front-end deserializes them with the same types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Query of `GET /api/sale-state`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStateQuery {
    /// Candy machine to read; the configured one when absent.
    #[serde(default)]
    pub candy_machine_id: Option<String>,
}

impl SaleStateQuery {
    /// Requested id, ignoring blank values.
    pub fn requested_id(&self) -> Option<&str> {
        self.candy_machine_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_camel_case() {
        let query: SaleStateQuery =
            serde_json::from_value(json!({"candyMachineId": " cm111 "})).unwrap();
        assert_eq!(query.requested_id(), Some("cm111"));

        let blank: SaleStateQuery = serde_json::from_value(json!({"candyMachineId": ""})).unwrap();
        assert_eq!(blank.requested_id(), None);
        assert_eq!(SaleStateQuery::default().requested_id(), None);
    }

    #[test]
    fn test_error_response_shape() {
        let body = error_response("Candy machine account not found");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Candy machine account not found");
    }
}
