use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One JSON object from an array response body.
pub type JsonObject = Map<String, Value>;

/// What came back from one GET: the status, the objects of the JSON array
/// body (in server order) and the raw body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub items: Vec<JsonObject>,
    pub body: String,
    pub duration_ms: u128,
    pub size_bytes: usize,
}

impl ApiResponse {
    /// Build a response from its wire parts.
    ///
    /// A success status requires an array-of-objects body (an empty body
    /// counts as an empty array). Other statuses keep whatever objects parse
    /// and otherwise carry an empty list, so the status itself is what gets
    /// reported.
    pub fn from_parts(
        status: u16,
        body: String,
        duration_ms: u128,
    ) -> Result<Self, serde_json::Error> {
        let items = if body.trim().is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str::<Vec<JsonObject>>(&body) {
                Ok(items) => items,
                Err(err) if is_success(status) => return Err(err),
                Err(_) => Vec::new(),
            }
        };

        Ok(Self {
            status,
            items,
            size_bytes: body.len(),
            body,
            duration_ms,
        })
    }

    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Decode every object into a typed view.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        self.items
            .iter()
            .map(|item| serde_json::from_value(Value::Object(item.clone())))
            .collect()
    }

    /// Same status and equal objects; timing is ignored.
    pub fn same_payload(&self, other: &ApiResponse) -> bool {
        self.status == other.status && self.items == other.items
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
