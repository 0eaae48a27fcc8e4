pub mod genero;
mod listing;
pub mod macros;
pub mod plataforma;

pub use listing::ListParams;
