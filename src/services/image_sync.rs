use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entity::product_images::{
    ActiveModel as ImageActive, Column as ImageCol, Entity as ProductImages,
};

pub(crate) fn image_rows(product_id: Uuid, urls: &[String]) -> Vec<ImageActive> {
    urls.iter()
        .map(|url| ImageActive {
            id: NotSet,
            url: Set(url.clone()),
            product_id: Set(product_id),
        })
        .collect()
}

/// Inserts one image row per URL, in list order.
pub(crate) async fn insert_images<C>(
    conn: &C,
    product_id: Uuid,
    urls: &[String],
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if urls.is_empty() {
        return Ok(());
    }
    ProductImages::insert_many(image_rows(product_id, urls))
        .exec(conn)
        .await?;
    Ok(())
}

/// Replaces the image set of a product when `images` is given.
///
/// Must run on the same transaction as the scalar update so readers never see
/// the product between the delete and the insert.
pub async fn sync<C>(conn: &C, product_id: Uuid, images: Option<&[String]>) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let Some(urls) = images else {
        tracing::debug!(product_id = %product_id, "images not supplied, keeping existing set");
        return Ok(());
    };

    let removed = ProductImages::delete_many()
        .filter(ImageCol::ProductId.eq(product_id))
        .exec(conn)
        .await?;
    insert_images(conn, product_id, urls).await?;

    tracing::debug!(
        product_id = %product_id,
        removed = removed.rows_affected,
        inserted = urls.len(),
        "product images replaced"
    );
    Ok(())
}
