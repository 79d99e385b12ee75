//! The fixed sample data and index definitions.
//!
//! A [`FixtureSet`] is read-only: constructed once with [`FixtureSet::sample`]
//! and never mutated. [`IndexSpec::sample_set`] carries the matching index
//! definitions.

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::documents::{Order, OrderStatus, Pet, PetStatus, Tag, User};

pub const PETS: &str = "pets";
pub const USERS: &str = "users";
pub const ORDERS: &str = "orders";

/// The sample documents for each collection, in insertion order.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub pets: Vec<Pet>,
    pub users: Vec<User>,
    pub orders: Vec<Order>,
}

/// One collection's name and its documents, ready for insertion.
#[derive(Debug, Clone)]
pub struct CollectionFixture {
    pub name: &'static str,
    pub documents: Vec<Value>,
}

impl FixtureSet {
    /// Builds the literal sample data set: 5 pets, 3 users, 3 orders.
    pub fn sample() -> Self {
        let now = OffsetDateTime::now_utc();

        let pets = vec![
            pet(
                "Fluffy",
                PetStatus::Available,
                "Cats",
                "Friendly cat with long fur",
                &[
                    "http://example.com/fluffy1.jpg",
                    "http://example.com/fluffy2.jpg",
                ],
                &[(1, "friendly"), (2, "playful")],
            ),
            pet(
                "Buddy",
                PetStatus::Available,
                "Dogs",
                "Loyal golden retriever",
                &["http://example.com/buddy1.jpg"],
                &[(3, "loyal"), (4, "trained")],
            ),
            pet(
                "Max",
                PetStatus::Pending,
                "Dogs",
                "Energetic border collie",
                &["http://example.com/max1.jpg"],
                &[(5, "energetic"), (6, "smart")],
            ),
            pet(
                "Luna",
                PetStatus::Sold,
                "Cats",
                "Graceful siamese cat",
                &["http://example.com/luna1.jpg"],
                &[(7, "graceful"), (8, "elegant")],
            ),
            pet(
                "Rex",
                PetStatus::Available,
                "Dogs",
                "Strong german shepherd",
                &["http://example.com/rex1.jpg"],
                &[(9, "strong"), (10, "protective")],
            ),
        ];

        let users = vec![
            user("testuser1", "user1@example.com", "John", "Doe", "+1234567890", 1),
            user("testuser2", "user2@example.com", "Jane", "Smith", "+0987654321", 1),
            user("testuser3", "user3@example.com", "Bob", "Johnson", "+1122334455", 0),
        ];

        let orders = vec![
            Order {
                order_id: 1,
                pet_id: 1,
                quantity: 1,
                ship_date: now,
                status: OrderStatus::Placed,
                complete: false,
            },
            Order {
                order_id: 2,
                pet_id: 2,
                quantity: 2,
                ship_date: now,
                status: OrderStatus::Delivered,
                complete: true,
            },
            Order {
                order_id: 3,
                pet_id: 3,
                quantity: 1,
                ship_date: now,
                status: OrderStatus::Pending,
                complete: false,
            },
        ];

        Self {
            pets,
            users,
            orders,
        }
    }

    /// Collection names in insertion order.
    pub fn collection_names(&self) -> [&'static str; 3] {
        [PETS, USERS, ORDERS]
    }

    /// Converts every record to its JSON document form, grouped by collection.
    pub fn collections(&self) -> Result<Vec<CollectionFixture>, serde_json::Error> {
        Ok(vec![
            CollectionFixture {
                name: PETS,
                documents: to_documents(&self.pets)?,
            },
            CollectionFixture {
                name: USERS,
                documents: to_documents(&self.users)?,
            },
            CollectionFixture {
                name: ORDERS,
                documents: to_documents(&self.orders)?,
            },
        ])
    }
}

fn to_documents<T: Serialize>(records: &[T]) -> Result<Vec<Value>, serde_json::Error> {
    records.iter().map(serde_json::to_value).collect()
}

fn pet(
    name: &str,
    status: PetStatus,
    category: &str,
    description: &str,
    photo_urls: &[&str],
    tags: &[(i64, &str)],
) -> Pet {
    Pet {
        name: name.to_string(),
        status,
        category: category.to_string(),
        description: description.to_string(),
        photo_urls: photo_urls.iter().map(|u| u.to_string()).collect(),
        tags: tags.iter().map(|(id, n)| Tag::new(*id, n)).collect(),
    }
}

fn user(
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    phone: &str,
    user_status: i32,
) -> User {
    User {
        username: username.to_string(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        phone: phone.to_string(),
        user_status,
    }
}

/// Sort direction of an indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrder {
    Ascending,
    Descending,
}

impl IndexOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            IndexOrder::Ascending => "ASC",
            IndexOrder::Descending => "DESC",
        }
    }
}

/// An index to create on a collection: indexed fields with their sort
/// direction, and whether the index enforces uniqueness.
#[derive(Debug, Clone)]
pub struct IndexSpec {
    pub collection: &'static str,
    pub fields: Vec<(&'static str, IndexOrder)>,
    pub unique: bool,
}

impl IndexSpec {
    /// Non-unique single-field ascending index.
    pub fn ascending(collection: &'static str, field: &'static str) -> Self {
        Self {
            collection,
            fields: vec![(field, IndexOrder::Ascending)],
            unique: false,
        }
    }

    /// Unique single-field ascending index.
    pub fn unique_ascending(collection: &'static str, field: &'static str) -> Self {
        Self {
            unique: true,
            ..Self::ascending(collection, field)
        }
    }

    /// Derived index name, e.g. `users_username_idx`.
    pub fn name(&self) -> String {
        let fields: Vec<&str> = self.fields.iter().map(|(field, _)| *field).collect();
        format!("{}_{}_idx", self.collection, fields.join("_"))
    }

    /// The literal index definitions for the sample data set.
    pub fn sample_set() -> Vec<IndexSpec> {
        vec![
            IndexSpec::ascending(PETS, "name"),
            IndexSpec::ascending(PETS, "status"),
            IndexSpec::ascending(PETS, "category"),
            IndexSpec::unique_ascending(USERS, "username"),
            IndexSpec::ascending(USERS, "email"),
            IndexSpec::unique_ascending(ORDERS, "orderId"),
            IndexSpec::ascending(ORDERS, "petId"),
            IndexSpec::ascending(ORDERS, "status"),
        ]
    }
}
