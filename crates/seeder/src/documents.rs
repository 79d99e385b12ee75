//! Document types persisted to the petstore test database.
//!
//! Field names serialize in the camelCase form the collections store
//! (`photoUrls`, `userStatus`, `orderId`, ...), so a serialized document is
//! exactly what lands in the `doc` column.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Availability of a pet in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Pending,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
        }
    }
}

/// A descriptive tag attached to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// A pet document in the `pets` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub name: String,
    pub status: PetStatus,
    pub category: String,
    pub description: String,
    pub photo_urls: Vec<String>,
    pub tags: Vec<Tag>,
}

/// A user document in the `users` collection. `username` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub user_status: i32,
}

/// An order document in the `orders` collection. `order_id` is unique;
/// `pet_id` references a pet but is not enforced by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub pet_id: i64,
    pub quantity: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub ship_date: OffsetDateTime,
    pub status: OrderStatus,
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::format_description::well_known::Rfc3339;

    fn sample_pet() -> Pet {
        Pet {
            name: "Fluffy".to_string(),
            status: PetStatus::Available,
            category: "Cats".to_string(),
            description: "Friendly cat with long fur".to_string(),
            photo_urls: vec!["http://example.com/fluffy1.jpg".to_string()],
            tags: vec![Tag::new(1, "friendly")],
        }
    }

    #[test]
    fn pet_serializes_with_persisted_field_names() {
        let value = serde_json::to_value(sample_pet()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("photoUrls"));
        assert!(obj.contains_key("tags"));
        assert_eq!(value["status"], "available");
    }

    #[test]
    fn user_serializes_with_persisted_field_names() {
        let user = User {
            username: "testuser1".to_string(),
            email: "user1@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone: "+1234567890".to_string(),
            user_status: 1,
        };
        let value = serde_json::to_value(user).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("firstName"));
        assert!(obj.contains_key("lastName"));
        assert!(obj.contains_key("userStatus"));
    }

    #[test]
    fn order_serializes_with_rfc3339_ship_date() {
        let order = Order {
            order_id: 1,
            pet_id: 1,
            quantity: 1,
            ship_date: OffsetDateTime::now_utc(),
            status: OrderStatus::Placed,
            complete: false,
        };
        let value = serde_json::to_value(order).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("orderId"));
        assert!(obj.contains_key("petId"));
        let ship_date = value["shipDate"].as_str().unwrap();
        assert!(OffsetDateTime::parse(ship_date, &Rfc3339).is_ok());
        assert_eq!(value["status"], "placed");
    }

    #[test]
    fn status_strings_match_serialized_form() {
        for status in [PetStatus::Available, PetStatus::Pending, PetStatus::Sold] {
            let value = serde_json::to_value(status).unwrap();
            assert_eq!(value.as_str().unwrap(), status.as_str());
        }
        for status in [
            OrderStatus::Placed,
            OrderStatus::Pending,
            OrderStatus::Delivered,
        ] {
            let value = serde_json::to_value(status).unwrap();
            assert_eq!(value.as_str().unwrap(), status.as_str());
        }
    }
}
