use catalog_api::{
    db::{create_orm_conn, run_migrations},
    dto::products::UpdateProductRequest,
    entity::{ProductImages, Products},
    error::AppError,
    routes::params::Pagination,
    services::{product_service, seed_service},
    state::AppState,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

// Everything here runs in one test inside its own binary: it empties the whole
// catalog and relies on exact row counts.
#[tokio::test]
async fn catalog_wide_operations_on_a_fresh_catalog() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run bulk reset tests."
            );
            return Ok(());
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let state = AppState { orm };

    delete_all_is_idempotent(&state).await?;
    seeding_replaces_the_catalog(&state).await?;
    listing_pages_in_creation_order(&state).await?;
    update_of_missing_product_writes_nothing(&state).await?;
    delete_all_leaves_no_images(&state).await?;

    Ok(())
}

async fn delete_all_is_idempotent(state: &AppState) -> anyhow::Result<()> {
    product_service::delete_all(state).await?;
    assert_eq!(product_service::delete_all(state).await?, 0);
    Ok(())
}

async fn seeding_replaces_the_catalog(state: &AppState) -> anyhow::Result<()> {
    let message = seed_service::run_seed(state).await?;
    assert_eq!(message, seed_service::SEED_EXECUTED);
    let seeded = seed_service::initial_products().len() as u64;
    assert_eq!(Products::find().count(&state.orm).await?, seeded);
    assert!(ProductImages::find().count(&state.orm).await? > 0);

    // Seeding twice replaces the catalog instead of tripping unique constraints.
    seed_service::run_seed(state).await?;
    assert_eq!(Products::find().count(&state.orm).await?, seeded);
    Ok(())
}

async fn listing_pages_in_creation_order(state: &AppState) -> anyhow::Result<()> {
    let seed = seed_service::initial_products();

    let first_page = product_service::find_all(
        state,
        Pagination {
            limit: Some(2),
            offset: None,
        },
    )
    .await?;
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].title, seed[0].title);
    assert_eq!(Some(first_page[0].images.clone()), seed[0].images);
    assert_eq!(first_page[1].title, seed[1].title);

    let everything = product_service::find_all(state, Pagination::default()).await?;
    assert_eq!(everything.len(), seed.len());

    let beyond = product_service::find_all(
        state,
        Pagination {
            limit: None,
            offset: Some(u64::MAX),
        },
    )
    .await?;
    assert!(beyond.is_empty());
    Ok(())
}

async fn update_of_missing_product_writes_nothing(state: &AppState) -> anyhow::Result<()> {
    let products_before = Products::find().count(&state.orm).await?;
    let images_before = ProductImages::find().count(&state.orm).await?;

    let err = product_service::update(
        state,
        Uuid::new_v4(),
        UpdateProductRequest {
            price: Some(1.0),
            images: Some(vec!["x.jpg".into()]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(Products::find().count(&state.orm).await?, products_before);
    assert_eq!(ProductImages::find().count(&state.orm).await?, images_before);
    Ok(())
}

async fn delete_all_leaves_no_images(state: &AppState) -> anyhow::Result<()> {
    let seeded = seed_service::initial_products().len() as u64;
    assert_eq!(product_service::delete_all(state).await?, seeded);
    assert_eq!(Products::find().count(&state.orm).await?, 0);
    assert_eq!(ProductImages::find().count(&state.orm).await?, 0);
    Ok(())
}
