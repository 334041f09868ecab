//! Floating "scroll to top" control.
//!
//! The control has two states. It is [`Visibility::Hidden`] while the page's
//! vertical scroll offset is at or below the threshold, and
//! [`Visibility::Visible`] once the offset exceeds it. There is no hysteresis.
//! Reading the offset and performing the scroll goes through [`Viewport`], which
//! the browser script implements on static pages and tests implement with a fake.

use nanceio_core::config::DEFAULT_SHOW_UNDER;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the control is currently rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// How a scroll request should move the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
}

impl ScrollBehavior {
    /// Value of the DOM `ScrollToOptions.behavior` member.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Smooth => "smooth",
        }
    }
}

/// Scroll tracking collaborator.
pub trait Viewport {
    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    /// Request a scroll to the given vertical offset.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Scroll-to-top control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollUp {
    show_under: f64,
    visibility: Visibility,
}

impl Default for ScrollUp {
    fn default() -> Self {
        Self::new(DEFAULT_SHOW_UNDER)
    }
}

impl ScrollUp {
    /// Create a hidden control that shows once the offset exceeds `show_under`.
    #[must_use]
    pub fn new(show_under: f64) -> Self {
        Self {
            show_under,
            visibility: Visibility::Hidden,
        }
    }

    /// Threshold offset in pixels.
    #[must_use]
    pub fn show_under(&self) -> f64 {
        self.show_under
    }

    /// Current state.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the control is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// State the control should be in at `offset`.
    #[must_use]
    pub fn visibility_for(&self, offset: f64) -> Visibility {
        if offset > self.show_under {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    /// Apply a scroll event. Returns the new state if it changed.
    pub fn on_scroll(&mut self, offset: f64) -> Option<Visibility> {
        let next = self.visibility_for(offset);
        if next == self.visibility {
            return None;
        }

        debug!(offset, show_under = self.show_under, ?next, "scroll-up visibility changed");
        self.visibility = next;
        Some(next)
    }

    /// Read the viewport's current offset and apply it.
    pub fn sync<V: Viewport + ?Sized>(&mut self, viewport: &V) -> Option<Visibility> {
        self.on_scroll(viewport.scroll_offset())
    }

    /// Handle a click on the control: smoothly scroll back to the top.
    pub fn activate<V: Viewport + ?Sized>(&self, viewport: &mut V) {
        debug!("scroll-up activated");
        viewport.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    /// Control markup while visible, `None` while hidden.
    #[must_use]
    pub fn view(&self) -> Option<String> {
        self.is_visible().then(control_markup)
    }

    /// Static-page embedding: styles, the control template and the client script.
    ///
    /// The control is not part of the initial document; the script inserts it
    /// while the page is scrolled past the threshold and removes it otherwise.
    #[must_use]
    pub fn mount(&self) -> String {
        format!(
            r#"<style>
    .scroll-up {{
        position: fixed;
        bottom: 10px;
        right: 10px;
        width: 40px;
        height: 40px;
        background-color: #bf79db;
        line-height: 40px;
        font-size: 25px;
        text-align: center;
        opacity: 0.5;
        cursor: pointer;
        transition: 0.2s;
    }}
    .scroll-up:hover {{ opacity: 0.75; }}
</style>
<template id="scroll-up-template">{control}</template>
<script>
    (function() {{
        const SHOW_UNDER = {show_under};
        const template = document.getElementById('scroll-up-template');
        let control = null;

        function update() {{
            const offset = window.pageYOffset || document.documentElement.scrollTop;
            if (offset > SHOW_UNDER) {{
                if (!control) {{
                    control = template.content.firstElementChild.cloneNode(true);
                    control.addEventListener('click', function() {{
                        window.scrollTo({{ top: 0, behavior: '{behavior}' }});
                    }});
                    document.body.appendChild(control);
                }}
            }} else if (control) {{
                control.remove();
                control = null;
            }}
        }}

        window.addEventListener('scroll', update, {{ passive: true }});
        update();
    }})();
</script>"#,
            control = control_markup(),
            show_under = self.show_under,
            behavior = ScrollBehavior::Smooth.as_str(),
        )
    }
}

fn control_markup() -> String {
    r#"<div class="scroll-up" role="button" aria-label="Scroll to top" title="Scroll to top">△</div>"#
        .to_string()
}
