use crate::{
    dto::products::CreateProductRequest,
    error::AppResult,
    models::Gender,
    services::product_service,
    state::AppState,
};

pub const SEED_EXECUTED: &str = "SEED EXECUTED";

/// Wipes the catalog and loads the built-in product set.
pub async fn run_seed(state: &AppState) -> AppResult<&'static str> {
    product_service::delete_all(state).await?;

    let products = initial_products();
    let total = products.len();
    for product in products {
        product_service::create(state, product).await?;
    }

    tracing::info!(products = total, "seed executed");
    Ok(SEED_EXECUTED)
}

struct SeedProduct {
    title: &'static str,
    description: &'static str,
    price: f64,
    stock: i32,
    sizes: &'static [&'static str],
    gender: Gender,
    tags: &'static [&'static str],
    images: &'static [&'static str],
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        title: "Men's Chill Crew Neck Sweatshirt",
        description: "Relaxed fit crew neck in heavyweight brushed fleece.",
        price: 75.0,
        stock: 7,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["sweatshirt"],
        images: &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Quilted Shirt Jacket",
        description: "Mid-weight quilted shell with snap front closure.",
        price: 200.0,
        stock: 5,
        sizes: &["XS", "S", "M", "XL", "XXL"],
        gender: Gender::Men,
        tags: &["jacket"],
        images: &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Cropped Puffer Jacket",
        description: "Cropped silhouette puffer with a detachable hood.",
        price: 225.0,
        stock: 85,
        sizes: &["XS", "S", "M"],
        gender: Gender::Women,
        tags: &["hoodie"],
        images: &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Kids Cybertruck Long Sleeve Tee",
        description: "Soft cotton long sleeve tee with a sketch print.",
        price: 30.0,
        stock: 10,
        sizes: &["XS", "S", "M"],
        gender: Gender::Kid,
        tags: &["shirt"],
        images: &["1742694-00-A_1_2000.jpg", "1742694-00-A_3.jpg"],
    },
    SeedProduct {
        title: "Blue Hat",
        description: "Six panel cap with an embroidered logo.",
        price: 35.0,
        stock: 12,
        sizes: &["S", "M"],
        gender: Gender::Unisex,
        tags: &["hats"],
        images: &["a.jpg", "b.jpg"],
    },
    SeedProduct {
        title: "Red Shoe",
        description: "Canvas low top with a gum sole.",
        price: 60.0,
        stock: 0,
        sizes: &["M", "L"],
        gender: Gender::Unisex,
        tags: &["shoes"],
        images: &[],
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn initial_products() -> Vec<CreateProductRequest> {
    SEED_PRODUCTS
        .iter()
        .map(|p| CreateProductRequest {
            title: p.title.to_string(),
            price: Some(p.price),
            description: Some(p.description.to_string()),
            slug: None,
            stock: Some(p.stock),
            sizes: owned(p.sizes),
            gender: p.gender,
            tags: owned(p.tags),
            images: Some(owned(p.images)),
        })
        .collect()
}
