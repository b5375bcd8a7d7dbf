pub mod image_sync;
pub mod lookup;
pub mod product_service;
pub mod projection;
pub mod seed_service;
