//! MDX body rendering: markdown, highlighted code blocks and inline components.

use minijinja::{context, Value};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;

use puzzlebox_content::{
    markdown_options, slugify, split_components, CodeBlock, MdxComponent, Segment, TocEntry,
    VideoProps,
};
use puzzlebox_scrubber::{ScrubberConfig, ScrubberView};

use crate::templates::TemplateEngine;

/// A rendered MDX body.
#[derive(Debug, Clone, Default)]
pub struct RenderedBody {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render an MDX body, expanding known components through their templates.
pub fn render_body(templates: &TemplateEngine, body: &str) -> Result<RenderedBody, minijinja::Error> {
    let mut rendered = RenderedBody::default();

    for segment in split_components(body) {
        match segment {
            Segment::Markdown(markdown) => {
                rendered
                    .html
                    .push_str(&render_markdown(&markdown, &mut rendered.toc));
            }
            Segment::Component(component) => {
                rendered
                    .html
                    .push_str(&render_component(templates, &component)?);
            }
        }
    }

    Ok(rendered)
}

/// Render markdown to HTML, giving headings anchor ids and collecting them into `toc`.
pub fn render_markdown(markdown: &str, toc: &mut Vec<TocEntry>) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut heading: Option<(HeadingLevel, Vec<Event<'_>>, String)> = None;
    let mut code: Option<(String, String)> = None; // (info, source)

    for event in Parser::new_ext(markdown, markdown_options()) {
        if code.is_some() {
            match event {
                Event::Text(text) => {
                    if let Some((_, source)) = code.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((info, source)) = code.take() {
                        events.push(Event::Html(render_code_block(&info, &source).into()));
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((info, String::new()));
            }

            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level, Vec::new(), String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, inner, title)) = heading.take() {
                    let id = slugify(&title);
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(CowStr::from(id.clone())),
                        classes: Vec::new(),
                        attrs: Vec::new(),
                    }));
                    events.extend(inner);
                    events.push(Event::End(TagEnd::Heading(level)));
                    toc.push(TocEntry {
                        title,
                        id,
                        level: level as u8,
                    });
                }
            }

            other => match heading.as_mut() {
                Some((_, inner, title)) => {
                    if let Event::Text(text) | Event::Code(text) = &other {
                        title.push_str(text);
                    }
                    inner.push(other);
                }
                None => events.push(other),
            },
        }
    }

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

/// Render a fenced code block with one span per line.
fn render_code_block(info: &str, source: &str) -> String {
    let block = CodeBlock::from_info(info, source.to_string(), 0);
    let language = block.language.as_deref().unwrap_or("text");

    let mut html = String::from("<figure class=\"code-block\">");
    if let Some(title) = &block.title {
        html.push_str("<figcaption>");
        html.push_str(&escape_html(title));
        html.push_str("</figcaption>");
    }
    html.push_str(&format!(
        "<pre data-language=\"{0}\"><code class=\"language-{0}\">",
        escape_html(language)
    ));

    for (index, line) in block.source.lines().enumerate() {
        let class = if block.is_highlighted(index + 1) {
            "line highlighted"
        } else {
            "line"
        };
        // Empty lines keep their height in grid layout
        let text = if line.is_empty() { " ".to_string() } else { escape_html(line) };
        html.push_str(&format!("<span class=\"{}\">{}</span>\n", class, text));
    }

    html.push_str("</code></pre></figure>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Template view of `<Video>` props.
#[derive(Debug, Clone, Serialize)]
struct VideoContext<'a> {
    src: &'a str,
    width: &'a str,
    height: &'a str,
    controls: bool,
    autoplay: bool,
    looping: bool,
    muted: bool,
    class_name: &'a str,
    preload: &'static str,
}

impl<'a> From<&'a VideoProps> for VideoContext<'a> {
    fn from(props: &'a VideoProps) -> Self {
        Self {
            src: &props.src,
            width: &props.width,
            height: &props.height,
            controls: props.controls,
            autoplay: props.autoplay,
            looping: props.looping,
            muted: props.muted,
            class_name: &props.class_name,
            preload: props.preload.as_str(),
        }
    }
}

fn render_component(
    templates: &TemplateEngine,
    component: &MdxComponent,
) -> Result<String, minijinja::Error> {
    match component {
        MdxComponent::Video(props) => {
            let config = ScrubberConfig {
                autoplay: props.autoplay,
                looping: props.looping,
                ..ScrubberConfig::default()
            };
            templates.render(
                "video.html",
                context! {
                    video => VideoContext::from(props),
                    view => ScrubberView::initial(&config),
                    cooldown_ms => config.transition_cooldown_ms,
                },
            )
        }
        MdxComponent::Badge { children } => {
            templates.render("badge.html", context! { children => children })
        }
        MdxComponent::Button { children, href } => templates.render(
            "button.html",
            context! { children => children, href => href },
        ),
        MdxComponent::Card { children } => {
            let content = render_markdown(children, &mut Vec::new());
            templates.render(
                "card.html",
                context! { content => Value::from_safe_string(content) },
            )
        }
    }
}
