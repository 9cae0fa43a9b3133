use std::sync::LazyLock;

use regex::Regex;

use crate::content::types::*;

/// What an empty rich-text editor hands back.
pub const EMPTY_RICH_TEXT: &str = "<p><br></p>";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static tag pattern"));

static MEDIA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(img|video|iframe)\b").expect("static media pattern"));

/// Whether an HTML fragment carries no visible content.
///
/// Markup-only fragments such as `<p><br></p>` or `<p>&nbsp;</p>` count as
/// blank. Embedded media does not.
pub fn is_blank_rich_text(html: &str) -> bool {
    if html.trim().is_empty() {
        return true;
    }
    if MEDIA_RE.is_match(html) {
        return false;
    }
    strip_tags(html)
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .is_empty()
}

/// Removes every markup tag, leaving text and entities.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Time-based block id, unique within `existing`.
pub fn next_block_id(existing: &[ContentBlock]) -> String {
    let base = format!("block-{}", chrono::Utc::now().timestamp_millis());
    if !existing.iter().any(|b| b.id() == base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !existing.iter().any(|b| b.id() == candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Returns `blocks` with one new block at the end.
///
/// Blank content (including the editor's empty sentinel) leaves the sequence
/// unchanged. Captions only apply to image blocks.
pub fn append_block(
    blocks: &[ContentBlock],
    kind: BlockKind,
    content: &str,
    caption: Option<&str>,
) -> Vec<ContentBlock> {
    let mut next = blocks.to_vec();
    let content = content.trim();

    let block = match kind {
        BlockKind::Text => {
            if is_blank_rich_text(content) {
                return next;
            }
            ContentBlock::Text {
                id: next_block_id(blocks),
                content: content.to_string(),
            }
        }
        BlockKind::Image => {
            if content.is_empty() {
                return next;
            }
            ContentBlock::Image {
                id: next_block_id(blocks),
                content: content.to_string(),
                caption: caption
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from),
            }
        }
    };

    next.push(block);
    next
}

/// Returns `blocks` without the block named `id`. Unknown ids are ignored.
pub fn remove_block(blocks: &[ContentBlock], id: &str) -> Vec<ContentBlock> {
    blocks.iter().filter(|b| b.id() != id).cloned().collect()
}

/// Drops blocks that would persist empty.
pub fn without_blank_blocks(blocks: &[ContentBlock]) -> Vec<ContentBlock> {
    blocks.iter().filter(|b| !b.is_blank()).cloned().collect()
}

/// Splits blocks into text and image lanes, each keeping append order.
pub fn split_lanes(blocks: &[ContentBlock]) -> (Vec<&ContentBlock>, Vec<&ContentBlock>) {
    blocks.iter().partition(|b| b.kind() == BlockKind::Text)
}
