use crate::data::errors::DataError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementBar {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromoBanner {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
}

/// A tile in the home page category grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeCategory {
    pub name: String,
    pub img: String,
    pub href: String,
}

/// Editable storefront copy. Keys this type does not know about are kept
/// as-is so a save never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteContent {
    pub announcement_bar: AnnouncementBar,
    pub promo_banner: PromoBanner,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub home_categories: Vec<HomeCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomepageSettings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub featured_title: String,
    pub featured_subtitle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoSettings {
    pub meta_title: String,
    pub meta_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub company_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub address: String,
    pub homepage: HomepageSettings,
    pub social_media: SocialMedia,
    pub seo: SeoSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single JSON document on disk.
pub struct JsonDocument<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDocument {
            path: path.into(),
            write_lock: Mutex::new(()),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<T, DataError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Missing or unreadable documents fall back to the default.
    pub async fn read_or_default(&self) -> T {
        match self.read().await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    "Failed to read {}, using defaults: {}",
                    self.path.display(),
                    e
                );
                T::default()
            }
        }
    }

    pub async fn write(&self, doc: &T) -> Result<(), DataError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(doc)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_content_keys_survive_a_round_trip() {
        let raw = r#"{"announcementBar":{"text":"Sale"},"heroVideo":"/v.mp4"}"#;
        let content: SiteContent = serde_json::from_str(raw).unwrap();

        assert_eq!(content.announcement_bar.text, "Sale");
        assert_eq!(content.promo_banner, PromoBanner::default());

        let back = serde_json::to_value(&content).unwrap();
        assert_eq!(back["heroVideo"], "/v.mp4");
    }

    #[tokio::test]
    async fn missing_document_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let doc: JsonDocument<SiteSettings> = JsonDocument::new(dir.path().join("nope.json"));

        assert_eq!(doc.read_or_default().await, SiteSettings::default());
    }
}
