use crate::{crud_api, entity_router, publish_api_docs};
use ludo_dal::genero::Genero;

crud_api!(Genero, "/api/generos");

entity_router!();

publish_api_docs!();
