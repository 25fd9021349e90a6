pub mod cache;
pub mod error;
pub mod history;
pub mod index;
pub mod language;
pub mod matcher;
pub mod preprocess;
pub mod router;
pub mod similarity;

pub use error::RouteError;
pub use index::PhraseIndex;
pub use router::TranslationRouter;

#[cfg(test)]
pub(crate) mod fixtures;
