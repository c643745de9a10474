//! Inline JSX components embedded in MDX bodies.
//!
//! Recognizes elements like `<Video src="/demo.mp4" loop={false} />` or
//! `<Badge>New</Badge>` that start on their own line outside fenced code,
//! and splits the body into markdown and component segments.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Parsed inline JSX element.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineJsx {
    /// Component name (e.g., "Video")
    pub component: String,

    /// Props as key-value pairs
    pub props: HashMap<String, PropValue>,

    /// Children content (text or nested JSX as string)
    pub children: Option<String>,

    /// Whether self-closing
    pub self_closing: bool,
}

/// A prop value from JSX.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String literal: src="/demo.mp4"
    String(String),
    /// Boolean (presence): loop
    Boolean(bool),
    /// Expression: loop={false}
    Expression(String),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret as a boolean: presence, `{true}` / `{false}`, or `"true"` / `"false"`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Boolean(b) => Some(*b),
            PropValue::Expression(e) | PropValue::String(e) => match e.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }

    /// Interpret as a CSS length: strings verbatim, `{640}` as pixels.
    pub fn as_length(&self) -> Option<String> {
        match self {
            PropValue::String(s) => Some(s.clone()),
            PropValue::Expression(e) => {
                let e = e.trim().trim_matches(|c| c == '"' || c == '\'');
                if e.parse::<f64>().is_ok() {
                    Some(format!("{}px", e))
                } else if e.is_empty() {
                    None
                } else {
                    Some(e.to_string())
                }
            }
            PropValue::Boolean(_) => None,
        }
    }
}

/// How much of the media the browser should fetch up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preload {
    Auto,
    #[default]
    Metadata,
    None,
}

impl Preload {
    pub fn from_prop(value: &str) -> Self {
        match value {
            "auto" => Self::Auto,
            "none" => Self::None,
            _ => Self::Metadata,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Metadata => "metadata",
            Self::None => "none",
        }
    }
}

/// Props of the `<Video>` component.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoProps {
    pub src: String,
    pub width: String,
    pub height: String,
    /// Show the platform's native controls in addition to the scrubber
    pub controls: bool,
    pub autoplay: bool,
    pub looping: bool,
    pub muted: bool,
    pub class_name: String,
    pub preload: Preload,
}

impl VideoProps {
    /// Props for `src` with the component defaults.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: "100%".to_string(),
            height: "auto".to_string(),
            controls: false,
            autoplay: true,
            looping: true,
            muted: true,
            class_name: String::new(),
            preload: Preload::Metadata,
        }
    }

    fn from_jsx(jsx: &InlineJsx) -> Option<Self> {
        let src = jsx.props.get("src")?.as_str()?;
        let mut props = Self::new(src);

        let flag = |name: &str, default: bool| {
            jsx.props
                .get(name)
                .and_then(PropValue::as_bool)
                .unwrap_or(default)
        };

        props.controls = flag("controls", props.controls);
        props.autoplay = flag("autoPlay", props.autoplay);
        props.looping = flag("loop", props.looping);
        props.muted = flag("muted", props.muted);

        if let Some(width) = jsx.props.get("width").and_then(PropValue::as_length) {
            props.width = width;
        }
        if let Some(height) = jsx.props.get("height").and_then(PropValue::as_length) {
            props.height = height;
        }
        if let Some(class_name) = jsx.props.get("className").and_then(PropValue::as_str) {
            props.class_name = class_name.to_string();
        }
        if let Some(preload) = jsx.props.get("preload").and_then(PropValue::as_str) {
            props.preload = Preload::from_prop(preload);
        }

        Some(props)
    }
}

/// A component the site knows how to render.
#[derive(Debug, Clone, PartialEq)]
pub enum MdxComponent {
    Video(VideoProps),
    Badge { children: String },
    Button { children: String, href: Option<String> },
    Card { children: String },
}

impl MdxComponent {
    /// Map a parsed element onto a known component.
    pub fn from_jsx(jsx: &InlineJsx) -> Option<Self> {
        let children = || jsx.children.clone().unwrap_or_default();

        match jsx.component.as_str() {
            "Video" => VideoProps::from_jsx(jsx).map(Self::Video),
            "Badge" => Some(Self::Badge {
                children: children(),
            }),
            "Button" => Some(Self::Button {
                children: children(),
                href: jsx
                    .props
                    .get("href")
                    .and_then(PropValue::as_str)
                    .map(str::to_string),
            }),
            "Card" => Some(Self::Card {
                children: children(),
            }),
            _ => None,
        }
    }
}

/// A run of an MDX body.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Markdown(String),
    Component(MdxComponent),
}

/// Split an MDX body into markdown runs and recognized components.
///
/// Unknown components and elements that never close are left as markdown.
pub fn split_components(body: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut markdown = String::new();
    let mut lines = body.lines().peekable();
    let mut in_fence = false;

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }

        if in_fence || !starts_component(trimmed) {
            markdown.push_str(line);
            markdown.push('\n');
            continue;
        }

        // Gather lines until the element closes or a blank line ends the block
        let mut element = trimmed.to_string();
        while !element_closed(&element) {
            match lines.peek() {
                Some(next) if !next.trim().is_empty() => {
                    element.push('\n');
                    element.push_str(next);
                    lines.next();
                }
                _ => break,
            }
        }

        match parse_inline_jsx(&element).and_then(|jsx| MdxComponent::from_jsx(&jsx)) {
            Some(component) => {
                if !markdown.trim().is_empty() {
                    segments.push(Segment::Markdown(std::mem::take(&mut markdown)));
                }
                markdown.clear();
                segments.push(Segment::Component(component));
            }
            None => {
                tracing::debug!("Leaving unrecognized element as markdown: {}", element);
                markdown.push_str(&element);
                markdown.push('\n');
            }
        }
    }

    if !markdown.trim().is_empty() {
        segments.push(Segment::Markdown(markdown));
    }

    segments
}

fn starts_component(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

fn element_closed(element: &str) -> bool {
    let element = element.trim_end();
    if element.ends_with("/>") {
        return true;
    }
    let name: String = element
        .chars()
        .skip(1)
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    element.ends_with(&format!("</{}>", name))
}

/// Parse inline JSX source code.
///
/// Returns the first top-level JSX element found.
pub fn parse_inline_jsx(source: &str) -> Option<InlineJsx> {
    let source = source.trim();

    // Try self-closing first: <Component prop="value" />
    if let Some(jsx) = parse_self_closing(source) {
        return Some(jsx);
    }

    // Try with children: <Component>children</Component>
    parse_with_children(source)
}

/// Props of an opening tag: bare names or `name="..."`, `name='...'`, `name={...}`.
const PROPS_PATTERN: &str = r#"((?:\s+[A-Za-z][A-Za-z0-9]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|\{[^}]*\}))?)*)"#;

/// Parse a self-closing JSX element.
fn parse_self_closing(source: &str) -> Option<InlineJsx> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(r"^<([A-Z][a-zA-Z0-9]*){}\s*/>", PROPS_PATTERN))
            .expect("Invalid self-closing regex")
    });

    let caps = RE.captures(source)?;
    let component = caps.get(1)?.as_str().to_string();
    let props_str = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    Some(InlineJsx {
        component,
        props: parse_props(props_str),
        children: None,
        self_closing: true,
    })
}

/// Find the matching closing tag position, handling nested same-name components.
fn find_matching_close_tag(source: &str, component: &str, start_pos: usize) -> Option<usize> {
    let open_pattern = format!("<{}", component);
    let close_tag = format!("</{}>", component);

    let remaining = &source[start_pos..];
    let mut depth = 1;
    let mut pos = 0;

    while pos < remaining.len() {
        let next_open = remaining[pos..].find(&open_pattern);
        let next_close = remaining[pos..].find(&close_tag)?;

        match next_open {
            Some(o) if o < next_close => {
                // Nested opening tag; self-closing ones do not change depth
                let tag_start = pos + o;
                let after_name = &remaining[tag_start + open_pattern.len()..];
                let at_boundary = after_name
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/');
                let self_closing = after_name
                    .find('>')
                    .is_some_and(|end| after_name[..end].ends_with('/'));
                if at_boundary && !self_closing {
                    depth += 1;
                }
                pos = tag_start + open_pattern.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(start_pos + pos + next_close);
                }
                pos += next_close + close_tag.len();
            }
        }
    }

    None
}

/// Parse a JSX element with children.
fn parse_with_children(source: &str) -> Option<InlineJsx> {
    static OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(r"^<([A-Z][a-zA-Z0-9]*){}\s*>", PROPS_PATTERN))
            .expect("Invalid open tag regex")
    });

    let open_caps = OPEN_RE.captures(source)?;
    let component = open_caps.get(1)?.as_str().to_string();
    let props_str = open_caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let open_len = open_caps.get(0)?.len();

    let close_pos = find_matching_close_tag(source, &component, open_len)?;

    let children = source[open_len..close_pos].trim();
    let children = if children.is_empty() {
        None
    } else {
        Some(children.to_string())
    };

    Some(InlineJsx {
        component,
        props: parse_props(props_str),
        children,
        self_closing: false,
    })
}

/// Parse props from a props string.
fn parse_props(props_str: &str) -> HashMap<String, PropValue> {
    let mut props = HashMap::new();
    let props_str = props_str.trim();

    if props_str.is_empty() {
        return props;
    }

    // Match: name="value" or name='value' or name={expr} or name (boolean)
    static PROP_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"([a-zA-Z][a-zA-Z0-9]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#)
            .expect("Invalid prop regex")
    });

    for caps in PROP_RE.captures_iter(props_str) {
        let Some(name) = caps.get(1) else {
            continue;
        };

        let value = if let Some(m) = caps.get(2).or_else(|| caps.get(3)) {
            PropValue::String(m.as_str().to_string())
        } else if let Some(m) = caps.get(4) {
            PropValue::Expression(m.as_str().to_string())
        } else {
            PropValue::Boolean(true)
        };

        props.insert(name.as_str().to_string(), value);
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_self_closing() {
        let jsx = parse_inline_jsx(r#"<Video src="/demo.mp4" />"#).unwrap();

        assert_eq!(jsx.component, "Video");
        assert!(jsx.self_closing);
        assert_eq!(
            jsx.props.get("src"),
            Some(&PropValue::String("/demo.mp4".to_string()))
        );
        assert!(jsx.children.is_none());
    }

    #[test]
    fn parses_with_children() {
        let jsx = parse_inline_jsx(r#"<Button href="/jobs">Join us</Button>"#).unwrap();

        assert_eq!(jsx.component, "Button");
        assert!(!jsx.self_closing);
        assert_eq!(jsx.children, Some("Join us".to_string()));
    }

    #[test]
    fn parses_boolean_and_expression_props() {
        let jsx = parse_inline_jsx(r#"<Video src="/a.mp4" controls loop={false} width={640} />"#)
            .unwrap();

        assert_eq!(jsx.props.get("controls"), Some(&PropValue::Boolean(true)));
        assert_eq!(
            jsx.props.get("loop"),
            Some(&PropValue::Expression("false".to_string()))
        );
        assert_eq!(
            jsx.props.get("width").and_then(PropValue::as_length),
            Some("640px".to_string())
        );
    }

    #[test]
    fn video_props_apply_defaults() {
        let jsx = parse_inline_jsx(r#"<Video src="/a.mp4" autoPlay={false} preload="auto" />"#)
            .unwrap();

        let Some(MdxComponent::Video(props)) = MdxComponent::from_jsx(&jsx) else {
            panic!("expected a video");
        };

        assert_eq!(props.src, "/a.mp4");
        assert!(!props.autoplay);
        assert!(props.looping);
        assert!(props.muted);
        assert!(!props.controls);
        assert_eq!(props.preload, Preload::Auto);
        assert_eq!(props.width, "100%");
        assert_eq!(props.height, "auto");
    }

    #[test]
    fn video_without_src_is_not_a_component() {
        let jsx = parse_inline_jsx("<Video loop />").unwrap();
        assert_eq!(MdxComponent::from_jsx(&jsx), None);
    }

    #[test]
    fn splits_body_into_segments() {
        let body = r#"Intro paragraph.

<Video
  src="/clip.mp4"
  loop={false}
/>

Outro with <em>html</em>.
"#;

        let segments = split_components(body);

        assert_eq!(segments.len(), 3);
        assert!(matches!(&segments[0], Segment::Markdown(m) if m.contains("Intro")));
        assert!(matches!(
            &segments[1],
            Segment::Component(MdxComponent::Video(v)) if v.src == "/clip.mp4" && !v.looping
        ));
        assert!(matches!(&segments[2], Segment::Markdown(m) if m.contains("Outro")));
    }

    #[test]
    fn ignores_components_inside_code_fences() {
        let body = "```tsx\n<Video src=\"/x.mp4\" />\n```\n";

        let segments = split_components(body);

        assert_eq!(segments.len(), 1);
        assert!(matches!(&segments[0], Segment::Markdown(m) if m.contains("<Video")));
    }

    #[test]
    fn leaves_unknown_components_as_markdown() {
        let segments = split_components("<Chart data={points} />\n");

        assert_eq!(
            segments,
            vec![Segment::Markdown("<Chart data={points} />\n".to_string())]
        );
    }

    #[test]
    fn parses_nested_same_name_children() {
        let jsx = parse_inline_jsx("<Card>outer <Card>inner</Card></Card>").unwrap();

        assert_eq!(jsx.children.as_deref(), Some("outer <Card>inner</Card>"));
    }
}
