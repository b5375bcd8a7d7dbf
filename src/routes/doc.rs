use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    models::{Gender, PlainProduct},
    response::{ApiResponse, Meta},
    routes::{health, params, products, seed},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        seed::execute_seed
    ),
    components(
        schemas(
            PlainProduct,
            Gender,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            params::Pagination,
            health::HealthData,
            Meta,
            ApiResponse<PlainProduct>,
            ApiResponse<ProductList>,
            ApiResponse<String>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Seed", description = "Catalog reset and demo data"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
