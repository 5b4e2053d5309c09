//! Content shapes shared across the engine.
//!
//! Everything the content manager serves arrives as loosely-typed JSON.
//! These types are the strict internal shapes it is validated into at the
//! fetch boundary — anything that fails to deserialize here becomes a parse
//! failure there and never reaches presentation logic as an untyped value.
//!
//! ## Normalization rules
//!
//! The upstream API grew organically and is inconsistent in a few places.
//! Deserialization smooths that over so the rest of the engine sees one
//! shape:
//!
//! - Category entries arrive either as bare strings (`"Wildlife"`) or as
//!   records (`{"id": 3, "name": "Wildlife"}`). Both become plain labels,
//!   de-duplicated per image (an image's categories are a set).
//! - EXIF fields use the literal string `"Unknown"` for missing values, and
//!   ISO sometimes arrives as a bare number. `"Unknown"`, empty strings, and
//!   nulls all normalize to `None`; numbers become their decimal string.
//! - Nullable text fields (`title`, about `content`) normalize to `""`.
//! - The background resource answers either `{"background_url": …}` or
//!   `{"filename": …}` depending on which admin tool last wrote it; both are
//!   accepted.

use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog image as served by the content manager.
///
/// Immutable from the engine's perspective: a re-fetch replaces the whole
/// collection, it never edits individual records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Unique, stable identifier assigned upstream.
    pub id: u64,
    /// Asset filename, resolved against the static-asset prefix.
    #[serde(default)]
    pub filename: String,
    /// Full asset URL. When present it wins over `filename`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category labels. Order-irrelevant set; duplicates dropped on parse.
    #[serde(default, deserialize_with = "category_labels")]
    pub categories: Vec<String>,
    #[serde(default, alias = "exif_data", skip_serializing_if = "Option::is_none")]
    pub exif: Option<ExifInfo>,
}

/// Camera metadata attached to an image. Every field is optional — the
/// upstream extractor writes `"Unknown"` when a tag is missing, which
/// normalizes to `None` here so views can simply skip absent rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExifInfo {
    #[serde(deserialize_with = "exif_field")]
    pub camera: Option<String>,
    #[serde(deserialize_with = "exif_field")]
    pub lens: Option<String>,
    #[serde(deserialize_with = "exif_field")]
    pub aperture: Option<String>,
    #[serde(deserialize_with = "exif_field")]
    pub shutter_speed: Option<String>,
    #[serde(deserialize_with = "exif_field")]
    pub iso: Option<String>,
    #[serde(alias = "date", deserialize_with = "exif_field")]
    pub date_taken: Option<String>,
}

impl ExifInfo {
    /// True when no field carries a value — the featured view shows an
    /// "EXIF data not available" note instead of an empty card.
    pub fn is_empty(&self) -> bool {
        self.camera.is_none()
            && self.lens.is_none()
            && self.aperture.is_none()
            && self.shutter_speed.is_none()
            && self.iso.is_none()
            && self.date_taken.is_none()
    }
}

/// The home-view background selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    #[serde(alias = "background_url")]
    pub url: Option<String>,
    #[serde(alias = "background_image")]
    pub filename: Option<String>,
    pub title: Option<String>,
}

impl Background {
    /// A background record with neither a URL nor a filename is treated as
    /// an empty result, not a renderable value.
    pub fn is_unset(&self) -> bool {
        self.url.is_none() && self.filename.is_none()
    }
}

/// Biography content for the about view. `content` is a markdown subset
/// (bold, italic, line breaks) rendered at generation time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutContent {
    #[serde(deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(alias = "body", deserialize_with = "nullable_string")]
    pub content: String,
}

impl AboutContent {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// The weekly featured image plus its optional narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Featured {
    /// Asset filename of the featured image.
    #[serde(alias = "image")]
    pub filename: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "category_labels")]
    pub categories: Vec<String>,
    #[serde(default, alias = "exif_data")]
    pub exif: Option<ExifInfo>,
    /// "The story behind the shot" text, when the photographer wrote one.
    #[serde(default)]
    pub story: Option<String>,
}

/// A list of category labels in either upstream shape. Used when decoding
/// the standalone `/api/categories` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryList(#[serde(deserialize_with = "category_labels")] pub Vec<String>);

// ----------------------------------------------------------------------------
// Deserialization helpers
// ----------------------------------------------------------------------------

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRef {
    Label(String),
    Record { name: String },
}

fn category_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<CategoryRef>>::deserialize(deserializer)?.unwrap_or_default();
    let mut labels: Vec<String> = Vec::with_capacity(refs.len());
    for r in refs {
        let label = match r {
            CategoryRef::Label(s) => s,
            CategoryRef::Record { name } => name,
        };
        let label = label.trim().to_string();
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }
    Ok(labels)
}

fn exif_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => normalize_exif_text(&s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn normalize_exif_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_accepts_bare_string_categories() {
        let img: Image = serde_json::from_value(serde_json::json!({
            "id": 1,
            "filename": "dunes.jpg",
            "title": "Dunes",
            "categories": ["Landscape", "Travel"]
        }))
        .unwrap();
        assert_eq!(img.categories, vec!["Landscape", "Travel"]);
    }

    #[test]
    fn image_accepts_record_categories() {
        let img: Image = serde_json::from_value(serde_json::json!({
            "id": 2,
            "filename": "owl.jpg",
            "categories": [{"id": 7, "name": "Wildlife"}, {"id": 9, "name": "Night"}]
        }))
        .unwrap();
        assert_eq!(img.categories, vec!["Wildlife", "Night"]);
    }

    #[test]
    fn image_categories_are_a_set() {
        let img: Image = serde_json::from_value(serde_json::json!({
            "id": 3,
            "filename": "x.jpg",
            "categories": ["Portrait", "Portrait", {"id": 1, "name": "Portrait"}]
        }))
        .unwrap();
        assert_eq!(img.categories, vec!["Portrait"]);
    }

    #[test]
    fn image_tolerates_null_title_and_missing_categories() {
        let img: Image = serde_json::from_value(serde_json::json!({
            "id": 4,
            "filename": "y.jpg",
            "title": null
        }))
        .unwrap();
        assert_eq!(img.title, "");
        assert!(img.categories.is_empty());
    }

    #[test]
    fn exif_unknown_normalizes_to_none() {
        let exif: ExifInfo = serde_json::from_value(serde_json::json!({
            "camera": "Canon EOS R5",
            "lens": "Unknown",
            "aperture": "",
            "iso": 400
        }))
        .unwrap();
        assert_eq!(exif.camera.as_deref(), Some("Canon EOS R5"));
        assert_eq!(exif.lens, None);
        assert_eq!(exif.aperture, None);
        assert_eq!(exif.iso.as_deref(), Some("400"));
        assert!(!exif.is_empty());
    }

    #[test]
    fn exif_all_unknown_is_empty() {
        let exif: ExifInfo = serde_json::from_value(serde_json::json!({
            "camera": "Unknown",
            "lens": "unknown",
            "date_taken": null
        }))
        .unwrap();
        assert!(exif.is_empty());
    }

    #[test]
    fn exif_accepts_exif_data_alias_on_image() {
        let img: Image = serde_json::from_value(serde_json::json!({
            "id": 5,
            "filename": "z.jpg",
            "exif_data": {"camera": "Nikon Z8"}
        }))
        .unwrap();
        assert_eq!(img.exif.unwrap().camera.as_deref(), Some("Nikon Z8"));
    }

    #[test]
    fn background_accepts_both_upstream_shapes() {
        let by_url: Background =
            serde_json::from_value(serde_json::json!({"background_url": "https://cdn/x.jpg"}))
                .unwrap();
        assert_eq!(by_url.url.as_deref(), Some("https://cdn/x.jpg"));

        let by_file: Background =
            serde_json::from_value(serde_json::json!({"background_image": "mist.jpg"})).unwrap();
        assert_eq!(by_file.filename.as_deref(), Some("mist.jpg"));
        assert!(!by_file.is_unset());
        assert!(Background::default().is_unset());
    }

    #[test]
    fn featured_maps_image_field_to_filename() {
        let feat: Featured = serde_json::from_value(serde_json::json!({
            "image": "heron.jpg",
            "title": "Great Blue Heron",
            "categories": ["Wildlife"],
            "exif_data": {"aperture": "5.6", "shutter_speed": "1/1000"},
            "story": "Shot at dawn from a kayak."
        }))
        .unwrap();
        assert_eq!(feat.filename, "heron.jpg");
        assert_eq!(feat.exif.unwrap().aperture.as_deref(), Some("5.6"));
        assert_eq!(feat.story.as_deref(), Some("Shot at dawn from a kayak."));
    }

    #[test]
    fn category_list_decodes_record_shape() {
        let list: CategoryList = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Portrait"},
            {"id": 2, "name": "Wedding"}
        ]))
        .unwrap();
        assert_eq!(list.0, vec!["Portrait", "Wedding"]);
    }
}
