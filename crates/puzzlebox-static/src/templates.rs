//! Template engine for rendering site pages and MDX components.

use minijinja::{Environment, Value};

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a template with the given context.
    pub fn render(&self, template: &str, context: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("header.html", HEADER_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
    ("card.macro.html", CONTENT_CARD_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("blog.html", BLOG_TEMPLATE),
    ("puzzle.html", PUZZLE_TEMPLATE),
    ("404.html", NOT_FOUND_TEMPLATE),
    ("video.html", VIDEO_TEMPLATE),
    ("badge.html", BADGE_TEMPLATE),
    ("button.html", BUTTON_TEMPLATE),
    ("card.html", CARD_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ meta.title }}</title>
  <meta name="description" content="{{ meta.description }}">
  <link rel="canonical" href="{{ meta.url }}">
  <meta property="og:type" content="{{ meta.og_type }}">
  <meta property="og:locale" content="{{ meta.locale }}">
  <meta property="og:url" content="{{ meta.url }}">
  <meta property="og:title" content="{{ meta.title }}">
  <meta property="og:description" content="{{ meta.description }}">
  <meta property="og:site_name" content="{{ meta.site_name }}">
  <meta property="og:image" content="{{ meta.image.url }}">
  <meta property="og:image:width" content="{{ meta.image.width }}">
  <meta property="og:image:height" content="{{ meta.image.height }}">
  <meta property="og:image:alt" content="{{ meta.image.alt }}">
  {% if meta.published_time %}<meta property="article:published_time" content="{{ meta.published_time }}">
  {% endif %}{% for author in meta.authors %}<meta property="article:author" content="{{ author }}">
  {% endfor %}<meta name="twitter:card" content="{{ meta.twitter_card }}">
  <meta name="twitter:title" content="{{ meta.title }}">
  <meta name="twitter:description" content="{{ meta.description }}">
  <meta name="twitter:image" content="{{ meta.image.url }}">
  <link rel="stylesheet" href="/assets/main.css">
</head>
<body>
  {% include "header.html" %}
  <main class="content-layout{% if wide %} content-layout-wide{% endif %}">
    {% block content %}{% endblock %}
  </main>
  {% include "footer.html" %}
  <script src="/assets/main.js"></script>
  {% if hmr %}<script src="/__hmr.js"></script>{% endif %}
</body>
</html>"##;

const HEADER_TEMPLATE: &str = r##"<header class="site-header">
  <div class="content-layout site-header-inner">
    <a href="/" class="site-logo">{{ site.site_name }}</a>
    {% if site.github %}
    <nav class="site-nav">
      <a href="{{ site.github }}" target="_blank" rel="noopener noreferrer" class="github-link" aria-label="GitHub"></a>
    </nav>
    {% endif %}
  </div>
</header>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="site-footer">
  <div class="content-layout">
    <a href="/" class="site-logo site-logo-muted">{{ site.site_name }}</a>
    <p>© Slash Financial. All rights reserved.</p>
  </div>
</footer>"##;

const CONTENT_CARD_TEMPLATE: &str = r##"{% macro content_card(card) %}
<a href="{{ card.href }}" class="content-card content-card-{{ card.kind }}">
  <span class="content-card-badge">{{ card.badge }}</span>
  <div class="content-card-body">
    <div class="content-card-image">
      <div class="content-card-image-frame"><img src="{{ card.image }}" alt="{{ card.title }}"></div>
    </div>
    <div class="content-card-text">
      <h3 class="content-card-title">{{ card.title }}</h3>
      {% if card.date and card.author %}<p class="content-card-meta">{{ card.date }} • {{ card.author }}</p>{% endif %}
      <p class="content-card-description">{{ card.description }}</p>
    </div>
    <span class="content-card-action">{{ card.action }}</span>
  </div>
</a>
{% endmacro %}"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% from "card.macro.html" import content_card %}
<section class="hero">
  <span class="badge badge-accent">Engineering at Slash</span>
  <h1>Slash Engineering: How We Build</h1>
  <p>Welcome to Puzzles, our engineering blog and showcase of challenges we find interesting. We're looking for like-minded engineers who share our enthusiasm for creative problem-solving and building systems to join us.</p>
</section>

<section id="content-grid" class="content-grid">
  {% for card in cards %}{{ content_card(card) }}{% endfor %}
</section>
{% endblock %}"##;

const BLOG_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="sticky-header" data-sticky-header>
  <div class="content-layout sticky-header-inner">
    <a href="#" class="back-to-top">↑ Back to top</a>
    <h2>{{ post.title }}</h2>
    <div></div>
  </div>
</div>

<article class="blog-post">
  <a href="/" class="back-link">← Back to Home</a>
  <header class="blog-post-header" data-sticky-title>
    <h1>{{ post.title }}</h1>
    <p class="blog-post-meta">{{ post.date }} • {{ post.author }}</p>
  </header>
  <div class="prose">
    {{ content | safe }}
  </div>
</article>

{% if toc | length > 1 %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}"><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
  {% endfor %}
  </ul>
</aside>
{% endif %}
{% endblock %}"##;

const PUZZLE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="puzzle">
  <section class="puzzle-instructions prose">
    <a href="/" class="back-link">← Back to Home</a>
    <div class="puzzle-heading">
      <h1>{{ puzzle.title }}</h1>
      <p class="muted">{{ puzzle.description }}</p>
    </div>
    {{ content | safe }}
  </section>

  <section class="puzzle-editor">
    <div class="code-editor">
      <div class="code-editor-toolbar">Editor</div>
      <div class="code-editor-mount" data-editor-mount></div>
      <script type="application/json" data-editor-config>{{ editor_config | safe }}</script>
    </div>
  </section>
</div>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="not-found">
  <h1>404</h1>
  <p>{{ message }}</p>
  <a href="/" class="back-link">← Back to Home</a>
</section>
{% endblock %}"##;

const VIDEO_TEMPLATE: &str = r##"<div class="video-container {{ video.class_name }}" data-scrubber data-autoplay="{{ video.autoplay }}" data-loop="{{ video.looping }}" data-cooldown="{{ cooldown_ms }}">
  <div class="video-frame">
    <video src="{{ video.src }}" style="width: {{ video.width }}; height: {{ video.height }}"{% if video.controls %} controls{% endif %}{% if video.autoplay %} autoplay{% endif %}{% if video.looping %} loop{% endif %}{% if video.muted %} muted playsinline{% endif %} preload="{{ video.preload }}" tabindex="0"></video>
    <div class="video-overlay">
      <div class="progress-bar" role="slider" tabindex="0" aria-valuemin="0" aria-valuemax="100" aria-valuenow="{{ view.progress_percent }}">
        <div class="progress{% if view.animate %} animate{% endif %}" style="width: {{ view.progress_percent }}%"></div>
        <div class="progress-hover" hidden></div>
        <div class="progress-knob{% if view.animate %} animate{% endif %}" style="left: {{ view.progress_percent }}%"></div>
      </div>
      <div class="video-controls">
        <div class="video-controls-start">
          <button type="button" class="video-play{% if view.playing %} playing{% endif %}" aria-label="{{ view.play_label }}"></button>
          <span class="video-time">{{ view.readout }}</span>
        </div>
        <button type="button" class="video-fullscreen" aria-label="Fullscreen"></button>
      </div>
    </div>
  </div>
</div>
"##;

const BADGE_TEMPLATE: &str = r##"<span class="badge">{{ children }}</span>
"##;

const BUTTON_TEMPLATE: &str = r##"{% if href %}<a class="button" href="{{ href }}">{{ children }}</a>{% else %}<button type="button" class="button">{{ children }}</button>{% endif %}
"##;

const CARD_TEMPLATE: &str = r##"<div class="card">{{ content }}</div>
"##;
