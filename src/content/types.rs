use serde::{Deserialize, Serialize};

/// Discriminant used when asking for a new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
        }
    }
}

/// One unit of a project's detailed body.
///
/// Stored as `{"id", "type", "content", "caption"?}` inside the
/// `contentBlocks` JSON column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// `content` is an HTML fragment produced by the rich-text editor.
    Text { id: String, content: String },
    /// `content` is the absolute URL of an uploaded blob.
    Image {
        id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl ContentBlock {
    pub fn id(&self) -> &str {
        match self {
            ContentBlock::Text { id, .. } | ContentBlock::Image { id, .. } => id,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ContentBlock::Text { content, .. } | ContentBlock::Image { content, .. } => content,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Text { .. } => BlockKind::Text,
            ContentBlock::Image { .. } => BlockKind::Image,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { .. } => None,
            ContentBlock::Image { caption, .. } => caption.as_deref(),
        }
    }

    /// True when the block would persist without usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            ContentBlock::Text { content, .. } => super::is_blank_rich_text(content),
            ContentBlock::Image { content, .. } => content.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_text() {
        let block = ContentBlock::Text {
            id: "block-1".to_string(),
            content: "<p>Hello</p>".to_string(),
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "text", "id": "block-1", "content": "<p>Hello</p>"})
        );
    }

    #[test]
    fn test_image_caption_omitted_when_absent() {
        let block = ContentBlock::Image {
            id: "block-2".to_string(),
            content: "https://cdn.example.com/a.png".to_string(),
            caption: None,
        };
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("caption").is_none());
        assert_eq!(value["type"], "image");
    }

    #[test]
    fn test_decode_ignores_caption_on_text() {
        let raw = r#"{"id":"b","type":"text","content":"<p>x</p>","caption":"stray"}"#;
        let block: ContentBlock = serde_json::from_str(raw).unwrap();
        assert_eq!(block.kind(), BlockKind::Text);
        assert_eq!(block.caption(), None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let raw = r#"{"id":"b","type":"video","content":"x"}"#;
        assert!(serde_json::from_str::<ContentBlock>(raw).is_err());
    }
}
