use crate::{crud_api, entity_router, publish_api_docs};
use ludo_dal::plataforma::Plataforma;

crud_api!(Plataforma, "/api/plataformas");

entity_router!();

publish_api_docs!();
