use chrono::Utc;

use crate::{
    entity::products::Model as ProductModel,
    models::{PlainProduct, ProductWithImages},
};

pub fn to_plain(entry: ProductWithImages) -> PlainProduct {
    let images = entry.images.into_iter().map(|image| image.url).collect();
    with_images(entry.product, images)
}

pub fn to_plain_list(entries: Vec<ProductWithImages>) -> Vec<PlainProduct> {
    entries.into_iter().map(to_plain).collect()
}

/// Builds the response shape from a product row and an already known URL list.
pub fn with_images(model: ProductModel, images: Vec<String>) -> PlainProduct {
    PlainProduct {
        id: model.id,
        title: model.title,
        slug: model.slug,
        price: model.price,
        description: model.description,
        stock: model.stock,
        sizes: model.sizes,
        gender: model.gender,
        tags: model.tags,
        images,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::{
        entity::{product_images, products},
        models::Gender,
    };

    pub fn product(title: &str) -> products::Model {
        products::Model {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "_"),
            price: 0.0,
            description: None,
            stock: 0,
            sizes: vec!["S".into(), "M".into()],
            gender: Gender::Unisex,
            tags: vec![],
            created_at: Utc::now().into(),
        }
    }

    pub fn image(id: i32, product_id: Uuid, url: &str) -> product_images::Model {
        product_images::Model {
            id,
            url: url.to_string(),
            product_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{image, product};
    use super::*;

    #[test]
    fn images_are_flattened_to_urls_in_order() {
        let model = product("Blue Hat");
        let id = model.id;
        let plain = to_plain(ProductWithImages {
            images: vec![image(1, id, "a.jpg"), image(2, id, "b.jpg")],
            product: model.clone(),
        });

        assert_eq!(plain.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(plain.id, model.id);
        assert_eq!(plain.title, model.title);
        assert_eq!(plain.slug, model.slug);
        assert_eq!(plain.sizes, model.sizes);
        assert_eq!(plain.gender, model.gender);
    }

    #[test]
    fn list_projection_is_element_wise() {
        let first = product("First");
        let second = product("Second");
        let plain = to_plain_list(vec![
            ProductWithImages {
                images: vec![image(7, first.id, "one.jpg")],
                product: first.clone(),
            },
            ProductWithImages {
                images: vec![],
                product: second.clone(),
            },
        ]);

        assert_eq!(plain.len(), 2);
        assert_eq!(plain[0].id, first.id);
        assert_eq!(plain[0].images, vec!["one.jpg"]);
        assert_eq!(plain[1].id, second.id);
        assert!(plain[1].images.is_empty());
    }
}
