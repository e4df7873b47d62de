//! Supported-language lookup with a process-lifetime cache.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("language lookup failed: {0}")]
    Lookup(String),
}

/// One-shot platform query for the recognizer's supported locales.
#[async_trait]
pub trait LanguageSource: Send + Sync {
    async fn query(&self) -> Result<Vec<String>, LanguageError>;
}

/// Fixed language list.
pub struct StaticLanguages(pub Vec<String>);

#[async_trait]
impl LanguageSource for StaticLanguages {
    async fn query(&self) -> Result<Vec<String>, LanguageError> {
        Ok(self.0.clone())
    }
}

/// Caches the first successful lookup; failures are retried on the next call.
pub struct LanguageCatalog {
    source: Arc<dyn LanguageSource>,
    cache: RwLock<Option<Vec<String>>>,
}

impl LanguageCatalog {
    pub fn new(source: Arc<dyn LanguageSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    pub async fn supported_languages(&self) -> Result<Vec<String>, LanguageError> {
        if let Some(languages) = self.cache.read().await.as_ref() {
            return Ok(languages.clone());
        }

        let mut cache = self.cache.write().await;
        if let Some(languages) = cache.as_ref() {
            return Ok(languages.clone());
        }

        let languages = self.source.query().await?;
        tracing::debug!(count = languages.len(), "supported languages loaded");
        *cache = Some(languages.clone());
        Ok(languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        queries: AtomicUsize,
        fail_first: bool,
    }

    #[async_trait]
    impl LanguageSource for CountingSource {
        async fn query(&self) -> Result<Vec<String>, LanguageError> {
            let n = self.queries.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(LanguageError::Lookup("broadcast returned no extras".to_string()));
            }
            Ok(vec!["en-US".to_string(), "de-DE".to_string()])
        }
    }

    #[tokio::test]
    async fn test_lookup_is_cached() {
        let source = Arc::new(CountingSource {
            queries: AtomicUsize::new(0),
            fail_first: false,
        });
        let catalog = LanguageCatalog::new(source.clone());

        let first = catalog.supported_languages().await.unwrap();
        let second = catalog.supported_languages().await.unwrap();

        assert_eq!(first, vec!["en-US", "de-DE"]);
        assert_eq!(first, second);
        assert_eq!(source.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = Arc::new(CountingSource {
            queries: AtomicUsize::new(0),
            fail_first: true,
        });
        let catalog = LanguageCatalog::new(source.clone());

        assert!(matches!(
            catalog.supported_languages().await,
            Err(LanguageError::Lookup(_))
        ));
        assert!(catalog.supported_languages().await.is_ok());
        assert_eq!(source.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_static_languages() {
        let catalog = LanguageCatalog::new(Arc::new(StaticLanguages(vec!["fr-FR".to_string()])));
        assert_eq!(catalog.supported_languages().await.unwrap(), vec!["fr-FR"]);
    }
}
