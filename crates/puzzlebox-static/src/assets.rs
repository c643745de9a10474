//! Asset pipeline for CSS and JavaScript processing.

use crate::theme::THEME;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file: theme variables followed by the site styles.
    pub fn generate_css() -> String {
        let mut css = THEME.to_css();
        css.push('\n');
        css.push_str(SITE_CSS);
        css
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        RUNTIME_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const SITE_CSS: &str = r#"/* Layout shell */
* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  font-size: var(--font-size-base);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}

main {
  flex: 1;
}

.content-layout {
  width: 100%;
  max-width: 1024px;
  margin: 0 auto;
  padding: 0 24px;
}

.content-layout-wide {
  max-width: 1280px;
  padding: 0;
}

/* Header and footer */
.site-header-inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding-top: 16px;
  padding-bottom: 16px;
}

.site-logo {
  font-weight: 600;
  color: var(--foreground);
  text-decoration: none;
}

.site-logo-muted {
  color: var(--muted);
  font-size: var(--font-size-sm);
}

.github-link {
  display: block;
  width: 24px;
  height: 24px;
  background: #333333;
  mask-image: url(/github-mark-white.svg);
  mask-size: contain;
  transition: var(--transition-default);
}

.github-link:hover {
  background: var(--accent);
}

.site-footer {
  border-top: 1px solid var(--border);
  padding: 48px 0;
  margin-top: 64px;
}

.site-footer p {
  margin-top: 12px;
  font-size: var(--font-size-sm);
  color: var(--muted);
}

/* Hero and content grid */
.hero {
  margin: 48px 0 96px;
}

.hero h1 {
  font-size: var(--font-size-3xl);
  font-weight: 600;
  letter-spacing: -0.02em;
  margin: 24px 0 12px;
}

.hero p {
  max-width: 42rem;
  font-size: var(--font-size-lg);
  color: var(--muted);
}

.badge {
  display: inline-block;
  padding: 2px 10px;
  font-size: var(--font-size-xs);
  font-weight: 500;
  border-radius: var(--radius-full);
  background: var(--accent);
  color: var(--accent-foreground);
}

.badge-accent {
  background: var(--accent-light);
  color: var(--accent);
}

.content-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
  gap: 16px;
}

.content-card {
  display: block;
  position: relative;
  color: inherit;
  text-decoration: none;
}

.content-card-badge {
  position: absolute;
  top: 4px;
  left: 16px;
  z-index: 10;
  padding: 2px 10px;
  font-size: var(--font-size-xs);
  font-weight: 500;
  border-radius: var(--radius-full);
}

.content-card-blog .content-card-badge {
  background: white;
  color: var(--accent);
  border: 1px solid var(--accent);
}

.content-card-puzzle .content-card-badge {
  background: var(--accent);
  color: white;
}

.content-card-body {
  display: flex;
  flex-direction: column;
  height: 100%;
  margin-top: 12px;
  padding-bottom: 8px;
  overflow: hidden;
  background: var(--card);
  border: 1px solid var(--accent-light);
  border-radius: var(--radius-xl);
  transition: var(--transition-default);
}

.content-card:hover .content-card-body {
  border-color: var(--accent);
  box-shadow: var(--shadow-md);
}

.content-card-image {
  height: 96px;
  display: flex;
  align-items: center;
  justify-content: center;
  background: var(--accent-light);
}

.content-card-image-frame {
  width: 64px;
  height: 64px;
  display: flex;
  align-items: center;
  justify-content: center;
  background: white;
  border-radius: var(--radius-md);
}

.content-card-image img {
  width: 32px;
  height: 32px;
  object-fit: contain;
}

.content-card-text {
  flex: 1;
  padding: 12px 12px 0;
}

.content-card-title {
  font-size: var(--font-size-sm);
  font-weight: 600;
  transition: var(--transition-default);
}

.content-card:hover .content-card-title {
  color: var(--accent);
}

.content-card-meta,
.content-card-description {
  font-size: var(--font-size-xs);
  color: var(--muted);
}

.content-card-action {
  padding: 0 12px;
  font-size: var(--font-size-xs);
  font-weight: 500;
  color: var(--accent);
}

.content-card-puzzle .content-card-action {
  font-weight: 700;
}

/* Blog posts */
.back-link,
.back-to-top {
  color: var(--accent);
  text-decoration: none;
  font-size: var(--font-size-sm);
}

.back-link:hover,
.back-to-top:hover {
  text-decoration: underline;
}

.blog-post {
  max-width: 42rem;
  margin: 32px auto 0;
}

.blog-post-header {
  margin: 16px 0 32px;
}

.blog-post-header h1 {
  font-size: var(--font-size-2xl);
  font-weight: 700;
}

.blog-post-meta,
.muted {
  color: var(--muted);
}

.sticky-header {
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  z-index: 50;
  background: rgba(255, 255, 255, 0.5);
  backdrop-filter: blur(4px);
  border-bottom: 1px solid var(--border);
  transform: translateY(-100%);
  transition: transform 0.2s;
}

.sticky-header.visible {
  transform: translateY(0);
}

.sticky-header-inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding-top: 16px;
  padding-bottom: 16px;
}

.sticky-header h2 {
  font-size: var(--font-size-sm);
  font-weight: 600;
  overflow: hidden;
  white-space: nowrap;
  text-overflow: ellipsis;
}

.toc {
  max-width: 42rem;
  margin: 32px auto 0;
  font-size: var(--font-size-sm);
}

.toc ul {
  list-style: none;
}

.toc a {
  color: var(--muted);
  text-decoration: none;
}

.toc-level-3 {
  padding-left: 16px;
}

/* Prose */
.prose h1 {
  margin: 40px 0 16px;
  font-size: 30px;
  font-weight: 700;
}

.prose h2 {
  margin: 32px 0 12px;
  font-size: var(--font-size-xl);
  font-weight: 600;
}

.prose h3 {
  margin: 24px 0 8px;
  font-size: 20px;
  font-weight: 600;
}

.prose p {
  margin-bottom: 16px;
  line-height: 1.5;
}

.prose ul,
.prose ol {
  margin: 0 0 16px 24px;
}

.prose li {
  margin-top: 8px;
}

.prose a {
  color: var(--accent);
  text-underline-offset: 4px;
}

.prose blockquote {
  margin-bottom: 16px;
  padding-left: 16px;
  border-left: 2px solid var(--border);
  font-style: italic;
}

.prose :not(pre) > code {
  padding: 2px 6px;
  font-size: 0.875em;
  background: var(--accent-light);
  border-radius: var(--radius-sm);
}

.code-block {
  margin-bottom: 16px;
  overflow: hidden;
  border-radius: var(--radius-lg);
  background: #24292e;
}

.code-block figcaption {
  padding: 8px 16px;
  font-size: var(--font-size-xs);
  color: #d1d5da;
  border-bottom: 1px solid #3e4451;
}

.code-block pre {
  padding: 16px 0;
  overflow-x: auto;
  font-family: 'Fira Code', 'Consolas', monospace;
  font-size: var(--font-size-sm);
  color: #e1e4e8;
}

.code-block code {
  display: grid;
}

.code-block .line {
  padding: 0 16px;
}

.code-block .line.highlighted {
  background: rgba(200, 200, 255, 0.1);
  box-shadow: inset 2px 0 0 var(--accent);
}

.card {
  margin-bottom: 16px;
  padding: 24px;
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius-xl);
  box-shadow: var(--shadow-sm);
}

.button {
  display: inline-block;
  padding: 8px 16px;
  font-size: var(--font-size-sm);
  font-weight: 500;
  color: var(--accent-foreground);
  background: var(--accent);
  border: none;
  border-radius: var(--radius-md);
  text-decoration: none;
  cursor: pointer;
  transition: var(--transition-default);
}

.button:hover {
  background: var(--accent-hover);
}

/* Puzzles */
.puzzle {
  display: flex;
  flex-direction: column;
  gap: 16px;
}

.puzzle-instructions {
  padding: 24px;
}

.puzzle-heading {
  margin-bottom: 32px;
}

.puzzle-heading h1 {
  margin-top: 8px;
  font-size: 30px;
}

.code-editor {
  border: 1px solid var(--border);
  border-radius: var(--radius-md);
}

.code-editor-toolbar {
  height: 32px;
  display: flex;
  align-items: center;
  padding: 0 12px;
  font-size: var(--font-size-xs);
  font-weight: 500;
  color: #6b7280;
  background: #f3f4f6;
  border-bottom: 1px solid var(--border);
}

.code-editor-mount {
  height: calc(100vh - 200px);
  min-height: 400px;
}

.code-editor-fallback {
  width: 100%;
  height: 100%;
  padding: 16px;
  border: none;
  resize: none;
  font-family: 'Fira Code', 'Consolas', monospace;
  font-size: var(--font-size-sm);
  tab-size: 2;
}

@media (min-width: 1024px) {
  .puzzle {
    flex-direction: row;
  }

  .puzzle-instructions {
    width: 40%;
    min-width: 500px;
  }

  .puzzle-editor {
    flex: 1;
  }
}

/* Not found */
.not-found {
  margin: 96px 0;
  text-align: center;
}

.not-found h1 {
  font-size: var(--font-size-3xl);
}

/* Video scrubber */
.video-container {
  position: relative;
  padding-bottom: 16px;
}

.video-frame {
  position: relative;
  overflow: hidden;
  border-radius: var(--radius-md);
}

.video-frame video {
  display: block;
  max-width: 100%;
  cursor: pointer;
  border-radius: var(--radius-md);
}

.video-overlay {
  position: absolute;
  left: 0;
  right: 0;
  bottom: 0;
  padding: 12px;
  background: linear-gradient(to top, rgba(0, 0, 0, 0.7), transparent);
  opacity: 0;
  transition: opacity 0.3s;
}

.video-container:hover .video-overlay,
.video-frame:fullscreen .video-overlay {
  opacity: 1;
}

.progress-bar {
  position: relative;
  height: 10px;
  margin-bottom: 8px;
  background: rgba(229, 231, 235, 0.3);
  border-radius: var(--radius-full);
  cursor: pointer;
}

.progress {
  height: 100%;
  background: #3b82f6;
  border-radius: var(--radius-full);
}

.progress-hover {
  position: absolute;
  top: 0;
  bottom: 0;
  width: 4px;
  z-index: 10;
  background: rgba(255, 255, 255, 0.7);
  border-radius: var(--radius-full);
  transform: translateX(-50%);
}

.progress-knob {
  position: absolute;
  top: 50%;
  width: 14px;
  height: 14px;
  z-index: 20;
  background: white;
  border-radius: var(--radius-full);
  box-shadow: var(--shadow-md);
  transform: translate(-50%, -50%);
}

.progress.animate,
.progress-knob.animate {
  transition: all 0.3s linear;
}

.video-controls,
.video-controls-start {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 12px;
  font-size: var(--font-size-xs);
  color: white;
}

.video-play,
.video-fullscreen {
  width: 24px;
  height: 24px;
  background: none;
  border: none;
  color: inherit;
  cursor: pointer;
}

.video-play::before {
  content: "\25B6";
}

.video-play.playing::before {
  content: "\275A\275A";
}

.video-fullscreen::before {
  content: "\26F6";
}

.video-play:hover,
.video-fullscreen:hover {
  color: #93c5fd;
}
"#;

// Browser runtime: the scrubber mirrors the controller in puzzlebox-scrubber
const RUNTIME_JS: &str = r#"// Puzzles site runtime
(function() {
  'use strict';

  function formatTime(seconds) {
    if (!isFinite(seconds) || seconds < 0) seconds = 0;
    const mins = Math.floor(seconds / 60);
    const secs = Math.floor(seconds % 60);
    return mins + ':' + (secs < 10 ? '0' : '') + secs;
  }

  function usableDuration(value) {
    return isFinite(value) && value > 0 ? value : null;
  }

  function setupScrubber(container) {
    const video = container.querySelector('video');
    const bar = container.querySelector('.progress-bar');
    const fill = container.querySelector('.progress');
    const knob = container.querySelector('.progress-knob');
    const hover = container.querySelector('.progress-hover');
    const playBtn = container.querySelector('.video-play');
    const fullscreenBtn = container.querySelector('.video-fullscreen');
    const time = container.querySelector('.video-time');
    if (!video || !bar) return;

    const looping = container.dataset.loop === 'true';
    const cooldown = Number(container.dataset.cooldown) || 50;
    const state = {
      progress: 0,
      playing: container.dataset.autoplay === 'true',
      dragging: false,
      wasPlaying: false,
      transitions: true,
      timer: null,
    };

    function render() {
      const animate = state.transitions && !state.dragging;
      fill.style.width = state.progress + '%';
      knob.style.left = state.progress + '%';
      fill.classList.toggle('animate', animate);
      knob.classList.toggle('animate', animate);
      bar.setAttribute('aria-valuenow', String(state.progress));
      playBtn.classList.toggle('playing', state.playing);
      playBtn.setAttribute('aria-label', state.playing ? 'Pause' : 'Play');
    }

    function play() {
      state.playing = true;
      const result = video.play();
      if (result && result.catch) {
        result.catch(function(err) {
          console.warn('Playback was rejected: ' + err.message);
          state.playing = false;
          render();
        });
      }
    }

    function pause() {
      video.pause();
      state.playing = false;
    }

    function percentAt(clientX) {
      const rect = bar.getBoundingClientRect();
      if (!(rect.width > 0) || !isFinite(clientX)) return 0;
      return Math.max(0, Math.min((clientX - rect.left) / rect.width, 1)) * 100;
    }

    function seekTo(percent) {
      state.transitions = false;
      clearTimeout(state.timer);
      state.timer = setTimeout(function() {
        state.transitions = true;
        render();
      }, cooldown);

      state.progress = percent;
      const duration = usableDuration(video.duration);
      if (duration !== null) video.currentTime = (percent / 100) * duration;
      render();
    }

    function onGlobalMove(e) {
      if (state.dragging) seekTo(percentAt(e.clientX));
    }

    function onGlobalUp() {
      if (!state.dragging) return;
      state.dragging = false;
      window.removeEventListener('mousemove', onGlobalMove);
      window.removeEventListener('mouseup', onGlobalUp);
      if (state.wasPlaying) play();
      render();
    }

    bar.addEventListener('mousedown', function(e) {
      if (state.dragging) {
        seekTo(percentAt(e.clientX));
        return;
      }
      state.wasPlaying = state.playing;
      if (state.playing) pause();
      state.dragging = true;
      window.addEventListener('mousemove', onGlobalMove);
      window.addEventListener('mouseup', onGlobalUp);
      seekTo(percentAt(e.clientX));
    });

    bar.addEventListener('mousemove', function(e) {
      hover.hidden = false;
      hover.style.left = percentAt(e.clientX) + '%';
      if (state.dragging) seekTo(percentAt(e.clientX));
    });

    bar.addEventListener('mouseleave', function() {
      hover.hidden = true;
    });

    video.addEventListener('timeupdate', function() {
      const duration = usableDuration(video.duration);
      if (duration === null) return;
      time.textContent = formatTime(video.currentTime) + ' / ' + formatTime(duration);
      if (state.dragging) return;
      state.progress = (video.currentTime / duration) * 100;
      render();
    });

    video.addEventListener('ended', function() {
      if (state.dragging) return;
      if (looping) {
        play();
      } else {
        pause();
      }
      render();
    });

    function togglePlay() {
      if (state.dragging) return;
      if (state.playing) {
        pause();
      } else {
        play();
      }
      render();
    }

    function toggleFullscreen() {
      if (!document.fullscreenElement) {
        video.requestFullscreen().catch(function(err) {
          console.error('Error attempting to enable fullscreen: ' + err.message);
        });
      } else {
        document.exitFullscreen();
      }
    }

    function activates(e) {
      return e.key === ' ' || e.key === 'Enter';
    }

    video.addEventListener('click', togglePlay);
    video.addEventListener('dblclick', toggleFullscreen);
    playBtn.addEventListener('click', togglePlay);
    fullscreenBtn.addEventListener('click', toggleFullscreen);
    [video, bar, playBtn].forEach(function(el) {
      el.addEventListener('keydown', function(e) {
        if (activates(e)) togglePlay();
      });
    });
    fullscreenBtn.addEventListener('keydown', function(e) {
      if (activates(e)) toggleFullscreen();
    });

    render();
  }

  function setupEditor(root) {
    const mount = root.querySelector('[data-editor-mount]');
    const configEl = root.querySelector('[data-editor-config]');
    if (!mount || !configEl) return;

    const config = JSON.parse(configEl.textContent || '{}');
    const saved = window.localStorage.getItem(config.storageKey);
    const value = saved !== null ? saved : config.defaultValue;

    if (window.monaco && window.monaco.editor) {
      const editor = window.monaco.editor.create(mount, Object.assign({
        value: value,
        language: config.language,
        theme: config.theme,
      }, config.options));
      editor.onDidChangeModelContent(function() {
        window.localStorage.setItem(config.storageKey, editor.getValue());
      });
      return;
    }

    const textarea = document.createElement('textarea');
    textarea.className = 'code-editor-fallback';
    textarea.spellcheck = false;
    textarea.value = value;
    textarea.addEventListener('input', function() {
      window.localStorage.setItem(config.storageKey, textarea.value);
    });
    mount.appendChild(textarea);
  }

  function setupStickyHeader() {
    const header = document.querySelector('[data-sticky-header]');
    const title = document.querySelector('[data-sticky-title]');
    if (!header || !title || !('IntersectionObserver' in window)) return;

    new IntersectionObserver(function(entries) {
      header.classList.toggle('visible', !entries[0].isIntersecting);
    }, { threshold: 0 }).observe(title);

    header.querySelector('.back-to-top').addEventListener('click', function(e) {
      e.preventDefault();
      window.scrollTo({ top: 0, behavior: 'smooth' });
    });
  }

  document.querySelectorAll('[data-scrubber]').forEach(setupScrubber);
  document.querySelectorAll('.code-editor').forEach(setupEditor);
  setupStickyHeader();
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(":root"));
        assert!(css.contains(".dark"));
        assert!(css.contains("--accent: rgb(124, 29, 24)"));
        assert!(css.contains(".progress-knob"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("data-scrubber"));
        assert!(js.contains("localStorage"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.content-card {
    background-color: white;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".content-card"));
    }

    #[test]
    fn minifies_generated_css() {
        assert!(AssetPipeline::minify_css(&AssetPipeline::generate_css()).is_ok());
    }
}
