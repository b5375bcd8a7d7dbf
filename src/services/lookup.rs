//! Resolves a search term into either an exact id match or a slug/title match.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, Func},
};
use uuid::Uuid;

use crate::entity::products::{Column, Entity as Products};

/// Length of the hyphenated UUID form (`8-4-4-4-12`).
const HYPHENATED_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    ById(Uuid),
    BySlugOrTitle { title: String, slug: String },
}

/// Only the canonical dash-grouped form counts as an identifier; simple,
/// braced and urn encodings are treated as free text.
pub fn is_identifier(term: &str) -> bool {
    term.len() == HYPHENATED_LEN && Uuid::try_parse(term).is_ok()
}

pub fn resolve(term: &str) -> LookupQuery {
    match Uuid::try_parse(term) {
        Ok(id) if is_identifier(term) => LookupQuery::ById(id),
        _ => LookupQuery::BySlugOrTitle {
            title: term.to_uppercase(),
            slug: term.to_lowercase(),
        },
    }
}

impl LookupQuery {
    pub fn condition(&self) -> Condition {
        match self {
            LookupQuery::ById(id) => Condition::all().add(Column::Id.eq(*id)),
            LookupQuery::BySlugOrTitle { title, slug } => Condition::any()
                .add(Expr::expr(Func::upper(Expr::col(Column::Title))).eq(title.as_str()))
                .add(Column::Slug.eq(slug.as_str())),
        }
    }

    pub fn select(&self) -> Select<Products> {
        Products::find().filter(self.condition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn hyphenated_uuid_resolves_to_id_lookup() {
        let id = Uuid::new_v4();
        assert_eq!(resolve(&id.to_string()), LookupQuery::ById(id));
        assert_eq!(
            resolve(&id.to_string().to_uppercase()),
            LookupQuery::ById(id)
        );
    }

    #[test]
    fn other_uuid_encodings_are_free_text() {
        let id = Uuid::new_v4();
        let simple = id.simple().to_string();
        assert!(!is_identifier(&simple));
        assert!(matches!(resolve(&simple), LookupQuery::BySlugOrTitle { .. }));

        let braced = id.braced().to_string();
        assert!(!is_identifier(&braced));
    }

    #[test]
    fn free_text_is_normalized_per_column() {
        assert_eq!(
            resolve("Red-Shoe"),
            LookupQuery::BySlugOrTitle {
                title: "RED-SHOE".into(),
                slug: "red-shoe".into(),
            }
        );
    }

    #[test]
    fn slug_or_title_query_combines_with_or() {
        let sql = resolve("RED-SHOE")
            .select()
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("UPPER(\"title\") = 'RED-SHOE'"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains("\"slug\" = 'red-shoe'"), "{sql}");
    }

    #[test]
    fn id_query_matches_only_the_primary_key() {
        let id = Uuid::new_v4();
        let sql = resolve(&id.to_string())
            .select()
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(&format!("\"products\".\"id\" = '{id}'")), "{sql}");
        assert!(!sql.contains("slug\" ="), "{sql}");
    }
}
