use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{product_images, products};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "men")]
    Men,
    #[sea_orm(string_value = "women")]
    Women,
    #[sea_orm(string_value = "kid")]
    Kid,
    #[sea_orm(string_value = "unisex")]
    Unisex,
}

/// Response shape of a product: image rows flattened to their URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlainProduct {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub price: f64,
    pub description: Option<String>,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored shape of a product with its image rows already loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithImages {
    pub product: products::Model,
    pub images: Vec<product_images::Model>,
}
