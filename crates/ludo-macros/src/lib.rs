mod entity;

/// Derives `crate::Entity` and id based `PartialEq` for a persisted record.
///
/// The table name is the lowercased struct name. One field must be marked
/// `#[spec(id)]` (type `Option<i64>`), an optional `#[spec(relation)]` field
/// (type `Option<Vec<GameRef>>`) receives eager loaded games, all other
/// fields are stored columns.
#[proc_macro_derive(Entity, attributes(spec))]
pub fn entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    entity::entity(input)
}
