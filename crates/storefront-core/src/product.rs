//! Canonical product shape and upstream normalization.
//!
//! Catalog endpoints disagree on how a product looks. Every record goes
//! through [`normalize_product`] before anything renders it, whichever of
//! the three supported shapes it arrived in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

/// Rating used when upstream provides none.
pub const FALLBACK_RATE: f64 = 4.5;
/// Review count used when upstream provides none.
pub const FALLBACK_RATING_COUNT: u32 = 100;

/// Aggregate review score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// 0 to 5
    pub rate: f64,
    pub count: u32,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            rate: FALLBACK_RATE,
            count: FALLBACK_RATING_COUNT,
        }
    }
}

/// A product in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Primary image URL
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// 0 to 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: Rating,
}

/// Errors that can occur while normalizing an upstream record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// The record is not a JSON object
    #[error("product record is not a JSON object")]
    NotAnObject,

    /// A required field is absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field has the wrong type or breaks a range invariant
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl NormalizeError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Which upstream shape a record was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Carries a thumbnail (DummyJSON)
    Thumbnail,
    /// Carries an image gallery but no thumbnail (Platzi)
    Gallery,
    /// Already canonical (FakeStore)
    Canonical,
}

/// Classify a record. Order matters: the first matching rule wins.
pub fn detect_shape(record: &Map<String, Value>) -> RecordShape {
    let has_thumbnail = record
        .get("thumbnail")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());

    if has_thumbnail {
        RecordShape::Thumbnail
    } else if record.get("images").is_some_and(Value::is_array) {
        RecordShape::Gallery
    } else {
        RecordShape::Canonical
    }
}

/// Map an upstream record into the canonical [`Product`] shape.
///
/// Pure: the same record always yields the same product, and normalizing
/// an already-normalized product returns it unchanged.
pub fn normalize_product(record: &Value) -> Result<Product, NormalizeError> {
    let obj = record.as_object().ok_or(NormalizeError::NotAnObject)?;
    let id = id_field(obj)?;
    let shape = detect_shape(obj);
    trace!(id, ?shape, "Normalizing product record");

    let product = match shape {
        RecordShape::Thumbnail => from_thumbnail_record(id, obj)?,
        RecordShape::Gallery => from_gallery_record(id, obj)?,
        RecordShape::Canonical => serde_json::from_value::<Product>(record.clone())
            .map_err(|e| NormalizeError::invalid("record", e.to_string()))?,
    };

    validate(product)
}

fn from_thumbnail_record(id: u64, obj: &Map<String, Value>) -> Result<Product, NormalizeError> {
    let images = string_list(obj, "images")?;
    let thumbnail = text(obj, "thumbnail");
    let stock = u32_field(obj, "stock")?;

    let image = if !thumbnail.is_empty() {
        thumbnail.clone()
    } else {
        images
            .as_ref()
            .and_then(|list| list.first().cloned())
            .unwrap_or_else(|| text(obj, "image"))
    };

    // DummyJSON reports the score as a bare number
    let rate = match obj.get("rating") {
        Some(Value::Object(rating)) => number(rating, "rating.rate", "rate")?,
        Some(_) => number(obj, "rating", "rating")?,
        None => None,
    }
    .filter(|r| *r != 0.0)
    .unwrap_or(FALLBACK_RATE);

    let count = stock.filter(|s| *s != 0).unwrap_or(FALLBACK_RATING_COUNT);

    Ok(Product {
        id,
        title: text(obj, "title"),
        price: number(obj, "price", "price")?.unwrap_or(0.0),
        description: text(obj, "description"),
        category: text(obj, "category"),
        image,
        images,
        thumbnail: Some(thumbnail),
        brand: optional_text(obj, "brand"),
        stock,
        discount_percentage: number(obj, "discountPercentage", "discountPercentage")?,
        rating: Rating { rate, count },
    })
}

fn from_gallery_record(id: u64, obj: &Map<String, Value>) -> Result<Product, NormalizeError> {
    let images = string_list(obj, "images")?.unwrap_or_default();

    let category = match obj.get("category") {
        Some(Value::Object(category)) => text(category, "name"),
        Some(Value::String(name)) => name.clone(),
        _ => String::new(),
    };

    let image = images.first().cloned().unwrap_or_else(|| text(obj, "image"));

    Ok(Product {
        id,
        title: text(obj, "title"),
        price: number(obj, "price", "price")?.unwrap_or(0.0),
        description: text(obj, "description"),
        category,
        image,
        images: Some(images),
        thumbnail: None,
        brand: None,
        stock: None,
        discount_percentage: None,
        rating: Rating::default(),
    })
}

/// Check the range invariants every rendered product must hold.
pub(crate) fn validate(product: Product) -> Result<Product, NormalizeError> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(NormalizeError::invalid("price", format!("{} is negative", product.price)));
    }
    if !(0.0..=5.0).contains(&product.rating.rate) {
        return Err(NormalizeError::invalid(
            "rating.rate",
            format!("{} is outside 0..=5", product.rating.rate),
        ));
    }
    if let Some(discount) = product.discount_percentage
        && !(0.0..=100.0).contains(&discount)
    {
        return Err(NormalizeError::invalid(
            "discountPercentage",
            format!("{discount} is outside 0..=100"),
        ));
    }
    Ok(product)
}

fn id_field(obj: &Map<String, Value>) -> Result<u64, NormalizeError> {
    match obj.get("id") {
        None | Some(Value::Null) => Err(NormalizeError::MissingField("id")),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| NormalizeError::invalid("id", format!("{value} is not a non-negative integer"))),
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number(
    obj: &Map<String, Value>,
    field: &'static str,
    key: &str,
) -> Result<Option<f64>, NormalizeError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| NormalizeError::invalid(field, format!("{value} is not a number"))),
    }
}

fn u32_field(obj: &Map<String, Value>, key: &'static str) -> Result<Option<u32>, NormalizeError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| NormalizeError::invalid(key, format!("{value} is not a count"))),
    }
}

fn string_list(
    obj: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<Vec<String>>, NormalizeError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )),
        Some(other) => Err(NormalizeError::invalid(key, format!("{other} is not a list"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fakestore_record() -> Value {
        json!({
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "description": "great outerwear jackets",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/jacket.jpg",
            "rating": { "rate": 4.7, "count": 500 }
        })
    }

    #[test]
    fn test_thumbnail_record() {
        let record = json!({ "id": 1, "title": "X", "price": 10, "thumbnail": "a.jpg", "stock": 5 });
        let product = normalize_product(&record).unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.title, "X");
        assert_eq!(product.price, 10.0);
        assert_eq!(product.image, "a.jpg");
        assert_eq!(product.rating, Rating { rate: 4.5, count: 5 });
        assert_eq!(product.stock, Some(5));
    }

    #[test]
    fn test_thumbnail_record_keeps_dummyjson_fields() {
        let record = json!({
            "id": 7,
            "title": "Lipstick",
            "price": 12.5,
            "description": "red",
            "category": "beauty",
            "thumbnail": "t.jpg",
            "images": ["1.jpg", "2.jpg"],
            "brand": "Glamour",
            "stock": 0,
            "rating": 3.2,
            "discountPercentage": 15.5
        });
        let product = normalize_product(&record).unwrap();

        assert_eq!(product.image, "t.jpg");
        assert_eq!(product.images.as_deref(), Some(&["1.jpg".to_string(), "2.jpg".to_string()][..]));
        assert_eq!(product.brand.as_deref(), Some("Glamour"));
        assert_eq!(product.discount_percentage, Some(15.5));
        // zero stock falls back like an absent one
        assert_eq!(product.rating, Rating { rate: 3.2, count: 100 });
    }

    #[test]
    fn test_gallery_record() {
        let record = json!({ "id": 2, "images": ["b.jpg"], "category": { "name": "shoes" } });
        let product = normalize_product(&record).unwrap();

        assert_eq!(product.image, "b.jpg");
        assert_eq!(product.category, "shoes");
        assert_eq!(product.rating, Rating { rate: 4.5, count: 100 });
        assert_eq!(product.thumbnail, None);
    }

    #[test]
    fn test_gallery_record_with_empty_images_uses_image_field() {
        let record = json!({ "id": 4, "images": [], "image": "c.jpg", "category": "toys" });
        let product = normalize_product(&record).unwrap();
        assert_eq!(product.image, "c.jpg");
        assert_eq!(product.category, "toys");
    }

    #[test]
    fn test_canonical_record_passes_through() {
        let record = fakestore_record();
        let product = normalize_product(&record).unwrap();
        assert_eq!(product.rating, Rating { rate: 4.7, count: 500 });
        assert_eq!(serde_json::to_value(&product).unwrap(), record);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let records = [
            fakestore_record(),
            json!({ "id": 1, "title": "X", "price": 10, "thumbnail": "a.jpg", "stock": 5, "rating": 0 }),
            json!({ "id": 2, "images": ["b.jpg"], "category": { "name": "shoes" }, "price": 3 }),
        ];

        for record in records {
            let once = normalize_product(&record).unwrap();
            let again = normalize_product(&serde_json::to_value(&once).unwrap()).unwrap();
            assert_eq!(once, again);
        }
    }

    #[test]
    fn test_shape_detection_order() {
        let both = json!({ "thumbnail": "a.jpg", "images": ["b.jpg"] });
        assert_eq!(detect_shape(both.as_object().unwrap()), RecordShape::Thumbnail);

        let empty_thumb = json!({ "thumbnail": "", "images": ["b.jpg"] });
        assert_eq!(detect_shape(empty_thumb.as_object().unwrap()), RecordShape::Gallery);

        let neither = json!({ "image": "c.jpg" });
        assert_eq!(detect_shape(neither.as_object().unwrap()), RecordShape::Canonical);
    }

    #[test]
    fn test_rejects_invalid_records() {
        assert_eq!(normalize_product(&json!([1, 2])), Err(NormalizeError::NotAnObject));
        assert_eq!(
            normalize_product(&json!({ "title": "no id" })),
            Err(NormalizeError::MissingField("id"))
        );
        assert!(matches!(
            normalize_product(&json!({ "id": -1 })),
            Err(NormalizeError::InvalidField { field: "id", .. })
        ));
        assert!(matches!(
            normalize_product(&json!({ "id": 1, "price": -2.0, "thumbnail": "a.jpg" })),
            Err(NormalizeError::InvalidField { field: "price", .. })
        ));
        assert!(matches!(
            normalize_product(&json!({ "id": 1, "rating": { "rate": 7.0, "count": 1 } })),
            Err(NormalizeError::InvalidField { field: "rating.rate", .. })
        ));
        assert!(matches!(
            normalize_product(&json!({ "id": 1, "thumbnail": "a.jpg", "discountPercentage": 120 })),
            Err(NormalizeError::InvalidField { field: "discountPercentage", .. })
        ));
    }
}
