use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, ModelTrait, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::{
        product_images::{Column as ImageCol, Entity as ProductImages},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult, classify_transaction_error, classify_write_error},
    models::{PlainProduct, ProductWithImages},
    routes::params::Pagination,
    services::{image_sync, lookup, projection},
    state::AppState,
};

/// Lowercases, turns spaces into `_` and drops apostrophes.
pub fn slugify(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_").replace('\'', "")
}

/// Slug for `raw`, or `None` when it is blank or normalizes to nothing.
fn usable_slug(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(slugify(raw)).filter(|slug| !slug.is_empty())
}

/// Uses the supplied slug when it survives normalization, else derives one from the title.
fn resolve_slug(slug: Option<&str>, title: &str) -> AppResult<String> {
    slug.and_then(usable_slug)
        .or_else(|| usable_slug(title))
        .ok_or_else(|| {
            AppError::BadRequest(format!("cannot derive a slug from title {title:?}"))
        })
}

pub async fn create(state: &AppState, payload: CreateProductRequest) -> AppResult<PlainProduct> {
    let CreateProductRequest {
        title,
        price,
        description,
        slug,
        stock,
        sizes,
        gender,
        tags,
        images,
    } = payload;
    let images = images.unwrap_or_default();
    let slug = resolve_slug(slug.as_deref(), &title)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        slug: Set(slug),
        price: Set(price.unwrap_or(0.0)),
        description: Set(description),
        stock: Set(stock.unwrap_or(0)),
        sizes: Set(sizes),
        gender: Set(gender),
        tags: Set(tags),
        created_at: NotSet,
    };

    let urls = images.clone();
    let product = state
        .orm
        .transaction::<_, ProductModel, DbErr>(|txn| {
            Box::pin(async move {
                let product = active.insert(txn).await?;
                image_sync::insert_images(txn, product.id, &urls).await?;
                Ok(product)
            })
        })
        .await
        .map_err(classify_transaction_error)?;

    tracing::info!(product_id = %product.id, images = images.len(), "product created");
    Ok(projection::with_images(product, images))
}

pub async fn find_all(state: &AppState, pagination: Pagination) -> AppResult<Vec<PlainProduct>> {
    let (limit, offset) = pagination.normalize();

    let products = Products::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .limit(limit)
        .offset(offset)
        .all(&state.orm)
        .await?;
    let images = products
        .load_many(ProductImages::find().order_by_asc(ImageCol::Id), &state.orm)
        .await?;

    let entries = products
        .into_iter()
        .zip(images)
        .map(|(product, images)| ProductWithImages { product, images })
        .collect();
    Ok(projection::to_plain_list(entries))
}

/// Entity form of a lookup, image rows included.
pub async fn find_one(state: &AppState, term: &str) -> AppResult<ProductWithImages> {
    load_one(&state.orm, term).await
}

pub async fn find_one_plain(state: &AppState, term: &str) -> AppResult<PlainProduct> {
    find_one(state, term).await.map(projection::to_plain)
}

async fn load_one<C>(conn: &C, term: &str) -> AppResult<ProductWithImages>
where
    C: ConnectionTrait,
{
    let mut matches = lookup::resolve(term).select().limit(2).all(conn).await?;
    if matches.len() > 1 {
        tracing::error!(term, "lookup matched more than one product");
        return Err(AppError::Internal(anyhow::anyhow!(
            "lookup term {term} matched more than one product"
        )));
    }
    let product = matches
        .pop()
        .ok_or_else(|| AppError::NotFound(term.to_string()))?;

    let images = product
        .find_related(ProductImages)
        .order_by_asc(ImageCol::Id)
        .all(conn)
        .await?;
    Ok(ProductWithImages { product, images })
}

pub async fn update(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<PlainProduct> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound(format!("id: {id}"))),
    };

    let mut active: ActiveModel = existing.into();
    let images = apply_patch(&mut active, payload);

    state
        .orm
        .transaction::<_, (), DbErr>(|txn| {
            Box::pin(async move {
                image_sync::sync(txn, id, images.as_deref()).await?;
                if active.is_changed() {
                    active.update(txn).await?;
                }
                Ok(())
            })
        })
        .await
        .map_err(classify_transaction_error)?;

    tracing::info!(product_id = %id, "product updated");

    // Image rows were rewritten with bulk statements, so read the committed state back.
    find_one_plain(state, &id.to_string()).await
}

/// Copies every present scalar of `patch` onto `active` and hands back the
/// image list, which is synchronized separately.
fn apply_patch(active: &mut ActiveModel, patch: UpdateProductRequest) -> Option<Vec<String>> {
    let UpdateProductRequest {
        title,
        price,
        description,
        slug,
        stock,
        sizes,
        gender,
        tags,
        images,
    } = patch;

    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(slug) = slug.as_deref().and_then(usable_slug) {
        active.slug = Set(slug);
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    if let Some(description) = description {
        active.description = Set(Some(description));
    }
    if let Some(stock) = stock {
        active.stock = Set(stock);
    }
    if let Some(sizes) = sizes {
        active.sizes = Set(sizes);
    }
    if let Some(gender) = gender {
        active.gender = Set(gender);
    }
    if let Some(tags) = tags {
        active.tags = Set(tags);
    }

    images
}

pub async fn remove(state: &AppState, id: Uuid) -> AppResult<()> {
    let entry = find_one(state, &id.to_string()).await?;

    Products::delete_by_id(entry.product.id)
        .exec(&state.orm)
        .await
        .map_err(classify_write_error)?;

    tracing::info!(product_id = %id, images = entry.images.len(), "product removed");
    Ok(())
}

/// Empties the catalog. Images go first so a partial run never leaves orphans.
pub async fn delete_all(state: &AppState) -> AppResult<u64> {
    let deleted = state
        .orm
        .transaction::<_, u64, DbErr>(|txn| {
            Box::pin(async move {
                ProductImages::delete_many().exec(txn).await?;
                let products = Products::delete_many().exec(txn).await?;
                Ok(products.rows_affected)
            })
        })
        .await
        .map_err(classify_transaction_error)?;

    tracing::info!(deleted, "catalog cleared");
    Ok(deleted)
}
