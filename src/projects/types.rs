use serde::{Deserialize, Deserializer, Serialize};

use crate::content::{without_blank_blocks, ContentBlock};

/// Visual style of a technology badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Outline => "outline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    #[serde(default, rename = "color")]
    pub variant: BadgeVariant,
}

/// Every stored column of a project except `id`.
///
/// This is the payload of insert and update. Updates overwrite the whole
/// record with it, so every field must be carried from the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Short rich-text summary.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Long-form rich-text body.
    #[serde(default)]
    pub detailed_content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_blocks: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    /// Card thumbnail.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<Technology>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProjectFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Copy ready to persist: blank content blocks removed.
    pub fn for_save(&self) -> ProjectFields {
        ProjectFields {
            content_blocks: without_blank_blocks(&self.content_blocks),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the store on first insert.
    #[serde(
        default,
        deserialize_with = "id_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: ProjectFields,
}

impl Project {
    pub fn stored(id: impl Into<String>, fields: ProjectFields) -> Self {
        Self {
            id: Some(id.into()),
            fields,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }

    /// Thumbnail URL, or `placeholder` when the project has none.
    pub fn thumbnail<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.fields.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => placeholder,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("unsupported project id: {}", other))),
    }
}
