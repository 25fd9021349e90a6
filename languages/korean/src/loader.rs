use std::path::Path;

use crate::catalog::{CatalogError, PhraseCatalog};

const EMBEDDED_CATALOG: &str = include_str!("../data/phrases.json");

pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the phrase catalog compiled into the binary
    pub fn load_embedded() -> Result<PhraseCatalog, CatalogError> {
        tracing::info!("Loading embedded phrase catalog...");
        let catalog = PhraseCatalog::from_json(EMBEDDED_CATALOG)?;
        tracing::info!(
            "Loaded {} phrases (catalog v{})",
            catalog.entry_count(),
            catalog.version()
        );
        Ok(catalog)
    }

    /// Load a catalog from file path
    pub fn load_from_file(path: &Path) -> Result<PhraseCatalog, CatalogError> {
        tracing::info!("Loading phrase catalog from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let catalog = PhraseCatalog::from_json(&json)?;
        tracing::info!("Loaded {} phrases from file", catalog.entry_count());
        Ok(catalog)
    }

    /// Merge two catalogs (later entries override earlier ones by ID)
    pub fn merge(base: PhraseCatalog, additional: PhraseCatalog) -> PhraseCatalog {
        base.merge(additional)
    }

    /// Embedded catalog with every file in `paths` merged over it, in order
    pub fn load_with_overrides<P: AsRef<Path>>(paths: &[P]) -> Result<PhraseCatalog, CatalogError> {
        let mut catalog = Self::load_embedded()?;
        for path in paths {
            let extra = Self::load_from_file(path.as_ref())?;
            catalog = Self::merge(catalog, extra);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use phrasebook_core::matcher::{DEFAULT_THRESHOLD, fuzzy_match};
    use phrasebook_types::{Language, PhraseCategory};

    use super::*;

    #[test]
    fn test_embedded_catalog_shape() {
        let catalog = CatalogLoader::load_embedded().unwrap();
        assert_eq!(catalog.entry_count(), 175);

        let expected = [
            (PhraseCategory::Restaurant, 35),
            (PhraseCategory::Shopping, 30),
            (PhraseCategory::Transportation, 30),
            (PhraseCategory::Emergency, 25),
            (PhraseCategory::Accommodation, 30),
            (PhraseCategory::Greeting, 25),
        ];
        for (category, count) in expected {
            assert_eq!(catalog.count_by_category(category), count, "{category}");
        }
    }

    #[test]
    fn test_embedded_catalog_matches() {
        let index = CatalogLoader::load_embedded().unwrap().into_index();

        let hello = fuzzy_match(&index, "你好", Language::Chinese, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(hello.entry.id, "greeting_01");
        assert_eq!(hello.entry.secondary_text, "안녕하세요");
        assert_eq!(hello.entry.secondary_pronunciation, "annyeonghaseyo");

        let thanks = fuzzy_match(&index, "谢谢", Language::Chinese, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(thanks.entry.id, "greeting_02");

        assert!(fuzzy_match(&index, "明天我们一起去釜山看海吧", Language::Chinese, DEFAULT_THRESHOLD).is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogLoader::load_from_file(Path::new("/nonexistent/phrases.json")).unwrap_err();
        assert!(matches!(err, CatalogError::IoError(_)));

        let err = CatalogLoader::load_with_overrides(&["/nonexistent/phrases.json"]).unwrap_err();
        assert!(matches!(err, CatalogError::IoError(_)));
    }

    #[test]
    fn test_no_overrides_is_embedded() {
        let catalog = CatalogLoader::load_with_overrides::<&str>(&[]).unwrap();
        assert_eq!(catalog.entry_count(), 175);
    }
}
