use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Text shown for any acquisition field that is absent or empty.
pub const PLACEHOLDER: &str = "N/A";

// ============================================================================
// Acquisition Metadata
// ============================================================================

/// The four imaging-session fields shown under every slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    Integration,
    Subs,
    GainIso,
    Bortle,
}

impl MetaField {
    /// Display order in the metadata table.
    pub const ALL: [MetaField; 4] = [
        MetaField::Integration,
        MetaField::Subs,
        MetaField::GainIso,
        MetaField::Bortle,
    ];

    /// Human-readable label for the metadata table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Integration => "Integration",
            Self::Subs => "Subs",
            Self::GainIso => "Gain/ISO",
            Self::Bortle => "Bortle",
        }
    }
}

/// Imaging-session parameters attached to a slide.
///
/// Every field is optional. Numbers in the JSON are kept as their textual
/// form; `null`, `false`, `0` and nested values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acquisition {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub subs: Option<String>,
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub gain_iso: Option<String>,
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub bortle: Option<String>,
}

impl Acquisition {
    /// Raw value of a field, if present.
    pub fn get(&self, field: MetaField) -> Option<&str> {
        let value = match field {
            MetaField::Integration => &self.integration,
            MetaField::Subs => &self.subs,
            MetaField::GainIso => &self.gain_iso,
            MetaField::Bortle => &self.bortle,
        };
        value.as_deref()
    }

    /// Value to display for a field: the raw text, or [`PLACEHOLDER`] when
    /// the field is absent or empty.
    pub fn display(&self, field: MetaField) -> &str {
        match self.get(field) {
            Some(v) if !v.is_empty() => v,
            _ => PLACEHOLDER,
        }
    }
}

// ============================================================================
// Slide and Catalog
// ============================================================================

/// One catalog entry: an image with caption, description and metadata.
///
/// JSON keys follow the catalog file (`imageUrl`, `wikiPageTitle`, ...).
/// Missing or non-string fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Slide {
    #[serde(deserialize_with = "text_or_empty")]
    pub image_url: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub description: String,
    /// Subject title used to look up the encyclopedia summary. May be empty.
    #[serde(deserialize_with = "text_or_empty")]
    pub wiki_page_title: String,
    #[serde(deserialize_with = "lenient_acquisition")]
    pub acquisition: Acquisition,
}

/// Ordered, immutable list of catalog entries. Insertion order is display
/// order.
///
/// An entry that is not a JSON object (`null`, a number, a string) keeps its
/// position but holds no slide; showing it is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Option<Slide>>,
}

impl Catalog {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self::from_entries(slides.into_iter().map(Some).collect())
    }

    pub fn from_entries(entries: Vec<Option<Slide>>) -> Self {
        Self { entries }
    }

    /// The slide at `index`, or `None` when out of range or a hole.
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// Number of entries, holes included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slides in order, skipping holes.
    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        self.entries.iter().flatten()
    }
}

impl From<Vec<Slide>> for Catalog {
    fn from(slides: Vec<Slide>) -> Self {
        Self::new(slides)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(_) => match serde_json::from_value::<Slide>(value) {
                    Ok(slide) => Some(slide),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Skipping unreadable catalog entry");
                        None
                    }
                },
                other => {
                    tracing::warn!(index, entry = %other, "Skipping non-object catalog entry");
                    None
                }
            })
            .collect();
        Ok(Self { entries })
    }
}

// ============================================================================
// Lenient Deserializers
// ============================================================================

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_acquisition<'de, D>(deserializer: D) -> Result<Acquisition, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
