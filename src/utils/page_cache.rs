use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Rendered JSON bodies of public pages, keyed by request path (including
/// the query string). Mutations revalidate the paths they affect.
#[derive(Clone, Default)]
pub struct PageCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

fn path_of(key: &str) -> &str {
    key.split('?').next().unwrap_or(key)
}

fn is_under(key: &str, path: &str) -> bool {
    let key_path = path_of(key);
    let path = path.trim_end_matches('/');

    path.is_empty()
        || key_path == path
        || key_path
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    pub fn insert(&self, key: &str, body: String) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), body);
        }
    }

    /// Drops `path` and every page beneath it.
    pub fn revalidate(&self, path: &str) {
        if let Ok(mut entries) = self.entries.write() {
            let before = entries.len();
            entries.retain(|key, _| !is_under(key, path));
            tracing::debug!("Revalidated {} ({} pages)", path, before - entries.len());
        }
    }

    pub fn revalidate_all(&self, paths: &[&str]) {
        for path in paths {
            self.revalidate(path);
        }
    }

    pub fn revalidate_layout(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        tracing::debug!("Revalidated every page");
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PageCache {
        let cache = PageCache::new();
        for key in [
            "/home",
            "/products",
            "/products?sort=price-low",
            "/products/category/sofa",
            "/product/1",
            "/product/12",
            "/reviews",
        ] {
            cache.insert(key, key.to_string());
        }
        cache
    }

    #[test]
    fn revalidate_drops_path_queries_and_children() {
        let cache = filled();

        cache.revalidate("/products");

        assert_eq!(cache.get("/products"), None);
        assert_eq!(cache.get("/products?sort=price-low"), None);
        assert_eq!(cache.get("/products/category/sofa"), None);
        assert!(cache.get("/product/1").is_some());
        assert!(cache.get("/home").is_some());
    }

    #[test]
    fn revalidate_does_not_match_sibling_prefixes() {
        let cache = filled();

        cache.revalidate("/product/1");

        assert_eq!(cache.get("/product/1"), None);
        assert!(cache.get("/product/12").is_some());
    }

    #[test]
    fn layout_revalidation_clears_everything() {
        let cache = filled();

        cache.revalidate_layout();

        assert!(cache.is_empty());
    }
}
