use quote::quote;
use syn::{Data, Field, Fields, Ident};

const SPEC: &str = "spec";
const SPEC_ID: &str = "id";
const SPEC_RELATION: &str = "relation";

/// Links of every entity point to games, link table is `game_{table}`
const LINK_TARGET: &str = "game";

fn spec_kind(f: &Field) -> syn::Result<Option<Ident>> {
    for attr in &f.attrs {
        if attr.path().is_ident(SPEC) {
            let kind: Ident = attr.parse_args()?;
            if kind != SPEC_ID && kind != SPEC_RELATION {
                return Err(syn::Error::new(
                    kind.span(),
                    format!("Unknown spec {kind}, expected {SPEC_ID} or {SPEC_RELATION}"),
                ));
            }
            return Ok(Some(kind));
        }
    }
    Ok(None)
}

pub fn entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = input.ident.clone();
    let table_name = struct_name.to_string().to_lowercase();

    let fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return Err(syn::Error::new(
                    struct_name.span(),
                    "Entity must have named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Unexpected data type, should be struct",
            ))
        }
    };

    let mut id_field = None;
    let mut relation_field = None;
    let mut columns = Vec::new();
    for f in fields.iter() {
        let ident = f
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(struct_name.span(), "Entity field must be named"))?;
        match spec_kind(f)? {
            Some(kind) if kind == SPEC_ID => id_field = Some(ident),
            Some(_) => relation_field = Some(ident),
            None => columns.push(ident),
        }
    }

    let id_field = id_field.ok_or_else(|| {
        syn::Error::new(
            struct_name.span(),
            format!("Entity {struct_name} needs a field marked #[spec(id)]"),
        )
    })?;

    let column_names = columns.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    let id_name = id_field.to_string();

    let (relation_const, set_relations) = match relation_field {
        Some(rel) => {
            let link_table = format!("{LINK_TARGET}_{table_name}");
            let link_column = format!("{table_name}_id");
            (
                quote! {
                    const RELATION: Option<crate::Relation> = Some(crate::Relation {
                        link_table: #link_table,
                        link_column: #link_column,
                    });
                },
                quote! {
                    fn set_relations(&mut self, related: Vec<crate::GameRef>) {
                        self.#rel = Some(related);
                    }
                },
            )
        }
        None => (
            quote! {
                const RELATION: Option<crate::Relation> = None;
            },
            quote! {
                fn set_relations(&mut self, _related: Vec<crate::GameRef>) {}
            },
        ),
    };

    Ok(quote! {
        impl crate::Entity for #struct_name {
            const NAME: &'static str = #table_name;
            const TABLE: &'static str = #table_name;
            const ID: &'static str = #id_name;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
            const VALID_ORDER_FIELDS: &'static [&'static str] = &[#id_name, #(#column_names),*];
            #relation_const

            fn id(&self) -> Option<i64> {
                self.#id_field
            }

            fn bind_columns<'q>(&'q self, query: crate::EntityQuery<'q>) -> crate::EntityQuery<'q> {
                query #(.bind(&self.#columns))*
            }

            #set_relations
        }

        impl PartialEq for #struct_name {
            fn eq(&self, other: &Self) -> bool {
                match (self.#id_field, other.#id_field) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
        }
    })
}
