use serde_json::{Value, json};

use brandhub_brands::Brand;
use brandhub_core::ValidationErrors;

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn brand_to_json(brand: &Brand) -> Value {
    json!({
        "id": brand.id.to_string(),
        "name": brand.name,
        "createdAt": brand.created_at.to_rfc3339(),
        "updatedAt": brand.updated_at.to_rfc3339(),
    })
}

/// `{"brand": {...}}`
pub fn brand_envelope(brand: &Brand) -> Value {
    json!({ "brand": brand_to_json(brand) })
}

/// `{"brands": [...]}`
pub fn brands_envelope(brands: &[Brand]) -> Value {
    let items = brands.iter().map(brand_to_json).collect::<Vec<_>>();
    json!({ "brands": items })
}

/// `{"errors": {"<field>": [violation, ...]}}`
pub fn errors_envelope(errors: &ValidationErrors) -> Value {
    json!({ "errors": errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandhub_brands::NewBrand;
    use chrono::Utc;

    #[test]
    fn collection_is_wrapped_under_brands() {
        let brands = vec![
            Brand::create(NewBrand::new("Patagonia").unwrap(), Utc::now()),
            Brand::create(NewBrand::new("Newman's Own").unwrap(), Utc::now()),
        ];
        let body = brands_envelope(&brands);
        let items = body["brands"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Patagonia");
        assert_eq!(items[1]["id"], brands[1].id.to_string());
    }

    #[test]
    fn single_brand_is_wrapped_under_brand() {
        let brand = Brand::create(NewBrand::new("Big Dog").unwrap(), Utc::now());
        let body = brand_envelope(&brand);
        assert_eq!(body["brand"]["name"], "Big Dog");
        assert_eq!(body["brand"]["createdAt"], brand.created_at.to_rfc3339());
    }

    #[test]
    fn empty_collection_is_an_empty_array() {
        assert_eq!(brands_envelope(&[]), json!({ "brands": [] }));
    }
}
