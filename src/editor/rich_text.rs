use crate::content::html_escape;

/// Which rich-text field an inline image goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichTextField {
    Description,
    DetailedContent,
    PendingTextBlock,
}

/// Hook into the rich-text editor that owns a field.
///
/// The project editor calls it once an inline image has finished uploading;
/// the handle decides where in the markup the image lands.
pub trait RichTextHandle: Send + Sync {
    fn insert_image(&self, field: RichTextField, html: &str, url: &str) -> String;
}

/// Appends the image as its own paragraph at the end of the field.
#[derive(Debug, Default)]
pub struct AppendImageTag;

impl RichTextHandle for AppendImageTag {
    fn insert_image(&self, _field: RichTextField, html: &str, url: &str) -> String {
        let base = if crate::content::is_blank_rich_text(html) {
            ""
        } else {
            html
        };
        format!("{}<p><img src=\"{}\"></p>", base, html_escape(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_existing_markup() {
        let out = AppendImageTag.insert_image(
            RichTextField::Description,
            "<p>Intro</p>",
            "https://x/a.png",
        );
        assert_eq!(out, "<p>Intro</p><p><img src=\"https://x/a.png\"></p>");
    }

    #[test]
    fn test_replaces_empty_sentinel() {
        let out = AppendImageTag.insert_image(
            RichTextField::DetailedContent,
            "<p><br></p>",
            "https://x/a.png?w=1&h=2",
        );
        assert_eq!(out, "<p><img src=\"https://x/a.png?w=1&amp;h=2\"></p>");
    }
}
