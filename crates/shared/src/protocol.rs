//! Wire payloads for the product catalog REST backend.
//!
//! The backend's JSON field names are `_id` and `img`; the serde renames here
//! keep the wire contract intact while the rest of the client uses the domain
//! names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Product, ProductDraft, ProductId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "img")]
    pub image_url: String,
    pub price: Decimal,
}

/// Create payload. The server assigns `_id`, so the field is absent entirely
/// rather than null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(rename = "img")]
    pub image_url: String,
    pub price: Decimal,
}

impl CreateProductRequest {
    pub fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            name: draft.name.clone(),
            image_url: draft.image_url.clone(),
            price: draft.price,
        }
    }
}

impl ProductRecord {
    /// Full record for `PUT /products/{id}`: the draft's values under an
    /// already-assigned id.
    pub fn from_draft(id: ProductId, draft: &ProductDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            image_url: draft.image_url.clone(),
            price: draft.price,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            image_url: record.image_url,
            price: record.price,
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            image_url: product.image_url,
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(text: &str) -> Decimal {
        text.parse().expect("decimal literal")
    }

    #[test]
    fn record_serializes_with_backend_field_names() {
        let record = ProductRecord {
            id: ProductId(7),
            name: "Notebook".to_string(),
            image_url: "a.png".to_string(),
            price: price("9.99"),
        };

        let value = serde_json::to_value(&record).expect("serialize record");
        assert!(value.get("_id").is_some());
        assert!(value.get("img").is_some());
        assert!(value.get("id").is_none());
        assert!(value.get("image_url").is_none());
    }

    #[test]
    fn create_payload_omits_the_id_field() {
        let draft = ProductDraft {
            name: "Pen".to_string(),
            image_url: "b.png".to_string(),
            price: price("1.5"),
        };

        let value =
            serde_json::to_value(CreateProductRequest::from_draft(&draft)).expect("serialize");
        assert!(value.get("_id").is_none());
        assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Pen"));
        assert_eq!(value.get("img").and_then(|v| v.as_str()), Some("b.png"));
    }

    #[test]
    fn price_keeps_fractional_cents_through_json() {
        let raw = r#"{"_id":2,"name":"Pen","img":"b.png","price":1.999}"#;

        let record: ProductRecord = serde_json::from_str(raw).expect("deserialize record");
        assert_eq!(record.price, price("1.999"));

        let back = serde_json::to_string(&record).expect("serialize record");
        assert!(back.contains("1.999"), "price mangled in: {back}");
    }
}
