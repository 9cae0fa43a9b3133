//! HTML fragments for cards, content blocks and the detail page.
//!
//! Text blocks, descriptions and detailed content are rich-text HTML written
//! by the site owner and are emitted as-is. Everything else (titles, badges,
//! URLs, captions) is escaped.

use crate::content::{html_escape, split_lanes, ContentBlock};
use crate::projects::{Project, Technology};
use crate::views::list::ProjectCard;
use crate::views::route::Route;

pub const NOT_FOUND_TITLE: &str = "Projeto não encontrado";
pub const NOT_FOUND_ACTION: &str = "Voltar ao Início";

pub fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Text { id, content } => format!(
            r#"<div class="content-block content-block-text" data-block-id="{id}">{content}</div>"#,
            id = html_escape(id),
            content = content,
        ),
        ContentBlock::Image { id, content, caption } => {
            let caption_html = caption
                .as_deref()
                .map(|c| format!("<figcaption>{}</figcaption>", html_escape(c)))
                .unwrap_or_default();
            format!(
                concat!(
                    r#"<figure class="content-block content-block-image" data-block-id="{id}">"#,
                    r#"<img src="{src}" alt="{alt}" data-full-size="{src}" loading="lazy">"#,
                    "{caption}</figure>"
                ),
                id = html_escape(id),
                src = html_escape(content),
                alt = html_escape(caption.as_deref().unwrap_or("Project image")),
                caption = caption_html,
            )
        }
    }
}

fn render_badges(technologies: &[Technology]) -> String {
    technologies
        .iter()
        .map(|t| {
            format!(
                r#"<span class="badge badge-{}">{}</span>"#,
                t.variant.as_str(),
                html_escape(&t.name)
            )
        })
        .collect()
}

pub fn render_card(card: &ProjectCard) -> String {
    let mut meta = String::new();
    if !card.role.is_empty() {
        meta.push_str(&format!(
            r#"<span class="badge badge-role">{}</span>"#,
            html_escape(&card.role)
        ));
    }
    if !card.duration.is_empty() {
        meta.push_str(&format!(
            r#"<span class="badge badge-duration">{}</span>"#,
            html_escape(&card.duration)
        ));
    }

    format!(
        concat!(
            r#"<article class="project-card{expanded}" data-href="{href}">"#,
            r#"<img class="project-thumbnail" src="{thumb}" alt="{title}">"#,
            r#"<h3>{title}</h3><div class="project-meta">{meta}</div>"#,
            r#"<p class="project-summary">{summary}</p>"#,
            r#"<div class="project-technologies">{badges}</div>"#,
            "{delete}",
            "</article>"
        ),
        expanded = if card.expanded { " expanded" } else { "" },
        href = html_escape(&Route::ProjectDetail(card.id.clone()).path()),
        thumb = html_escape(&card.thumbnail),
        title = html_escape(&card.title),
        meta = meta,
        summary = html_escape(&card.summary),
        badges = render_badges(&card.technologies),
        delete = if card.deletable {
            DELETE_BUTTON_HTML
        } else {
            ""
        },
    )
}

const DELETE_BUTTON_HTML: &str = concat!(
    r#"<button class="project-delete" data-action="delete" data-stop-propagation="true">"#,
    "Excluir</button>"
);

pub fn render_not_found() -> String {
    format!(
        concat!(
            r#"<section class="project-not-found"><h1>{}</h1>"#,
            r#"<a class="button" href="/">{}</a></section>"#
        ),
        NOT_FOUND_TITLE, NOT_FOUND_ACTION
    )
}

/// Detail page body: header, rich-text fields, then the text lane and the
/// image lane, each in append order.
pub fn render_detail(project: &Project, can_edit: bool) -> String {
    let fields = &project.fields;
    let (text_lane, image_lane) = split_lanes(&fields.content_blocks);

    let mut html = String::new();
    html.push_str(r#"<article class="project-detail">"#);
    html.push_str(&format!("<h1>{}</h1>", html_escape(&fields.title)));
    if !fields.role.is_empty() || !fields.duration.is_empty() {
        html.push_str(&format!(
            concat!(
                r#"<div class="project-meta"><span class="role">{}</span>"#,
                r#"<span class="duration">{}</span></div>"#
            ),
            html_escape(&fields.role),
            html_escape(&fields.duration)
        ));
    }
    if can_edit {
        html.push_str(r#"<button class="project-edit" data-action="edit">Editar</button>"#);
    }
    html.push_str(&format!(r#"<div class="project-description">{}</div>"#, fields.description));
    if let Some(detailed) = &fields.detailed_content {
        html.push_str(&format!(r#"<div class="project-detailed">{}</div>"#, detailed));
    }
    if !fields.technologies.is_empty() {
        html.push_str(&format!(
            r#"<div class="project-technologies">{}</div>"#,
            render_badges(&fields.technologies)
        ));
    }

    html.push_str(r#"<section class="lane lane-text">"#);
    for block in text_lane {
        html.push_str(&render_block(block));
    }
    html.push_str("</section>");

    html.push_str(r#"<section class="lane lane-images">"#);
    for block in image_lane {
        html.push_str(&render_block(block));
    }
    html.push_str("</section>");

    if !fields.achievements.is_empty() {
        html.push_str(r#"<ul class="project-achievements">"#);
        for achievement in &fields.achievements {
            html.push_str(&format!("<li>{}</li>", html_escape(achievement)));
        }
        html.push_str("</ul>");
    }

    html.push_str("</article>");
    html
}

/// Full-size overlay for an opened image.
pub fn render_viewer(url: &str) -> String {
    format!(
        concat!(
            r#"<div class="image-viewer" data-action="close-viewer">"#,
            r#"<img src="{}" alt="Full size"></div>"#
        ),
        html_escape(url)
    )
}
