pub mod catalog;
pub mod loader;
pub mod romanizer;
pub mod translator;

pub use catalog::{CatalogError, PhraseCatalog};
pub use loader::CatalogLoader;
pub use romanizer::HangulRomanizer;
pub use translator::DeepSeekTranslator;
