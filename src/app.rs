//! # View Host
//!
//! The root of the focus tree: a persistent header and navigation footer
//! around a swappable body view. Every keystroke enters here, descends to
//! the focused component, and whatever bubbles back unconsumed is checked
//! against the two global bindings (`q` quits, `esc` refocuses the
//! footer) before being dropped as a defined no-op.

use anyhow::{anyhow, Result};

use crate::focus::{FocusNode, Key, Keymap, Outcome, Request, ViewParams};
use crate::views::{ViewContext, ViewFactory};
use crate::widgets::{Header, NavMenu};

/// Which of the host's two focusable regions holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFocus {
    Body,
    Nav,
}

/// The application shell. Owns the view registry, the persistent frame
/// widgets and the currently mounted body.
pub struct App {
    pub name: String,
    pub running: bool,
    pub current_view: String,
    pub status_message: Option<String>,
    ctx: ViewContext,
    registry: Vec<(String, ViewFactory)>,
    pub(crate) header: Header,
    pub(crate) nav: NavMenu,
    pub(crate) body: Box<dyn FocusNode>,
    pub(crate) focus: HostFocus,
    keymap: Keymap,
}

impl App {
    /// Build the shell and mount the first registered view. Focus starts
    /// on the navigation footer.
    pub fn new(
        name: impl Into<String>,
        registry: Vec<(String, ViewFactory)>,
        ctx: ViewContext,
        keymap: Keymap,
    ) -> Result<Self> {
        let (first, factory) = registry.first().ok_or_else(|| anyhow!("no views registered"))?;
        let body = factory(&ctx, ViewParams::default())
            .map_err(|e| anyhow!("cannot construct initial view '{}': {}", first, e))?;

        let name = name.into();
        let current_view = first.clone();
        let view_names: Vec<String> = registry.iter().map(|(n, _)| n.clone()).collect();
        Ok(Self {
            header: Header::new(name.clone(), current_view.clone()),
            nav: NavMenu::new(view_names),
            name,
            running: true,
            current_view,
            status_message: None,
            ctx,
            registry,
            body,
            focus: HostFocus::Nav,
            keymap: keymap.clone(),
        })
    }

    pub fn focus(&self) -> HostFocus {
        self.focus
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Deliver one keystroke to the focus tree. Runs to completion; never
    /// panics for any key value.
    pub fn keypress(&mut self, key: Key) {
        let outcome = match self.focus {
            HostFocus::Body => self.body.keypress(key, &self.keymap),
            HostFocus::Nav => self.nav.keypress(key, &self.keymap),
        };

        match outcome {
            Outcome::Consumed => {}
            Outcome::Request(request) => self.apply(request),
            Outcome::Pass(key) => match key {
                Key::Char('q') => self.running = false,
                Key::Esc => self.focus = HostFocus::Nav,
                _ => {} // unbound anywhere: defined no-op
            },
        }
    }

    fn apply(&mut self, request: Request) {
        match request {
            Request::SwitchView { name, params } => self.switch_view(&name, params),
            Request::Quit => self.running = false,
            Request::FocusNav => self.focus = HostFocus::Nav,
            Request::FocusBody => self.focus = HostFocus::Body,
            // nothing to do at the root; a notes body would have caught it
            Request::NoteCreated(title) => {
                tracing::debug!(title, "note created outside a notes view");
            }
        }
    }

    /// Swap the body for the named view. The header and footer instances
    /// survive; a factory failure leaves the previous view mounted and
    /// surfaces a status message.
    pub fn switch_view(&mut self, name: &str, params: ViewParams) {
        let Some((_, factory)) = self.registry.iter().find(|(n, _)| n == name) else {
            tracing::warn!(name, "switch to unregistered view");
            self.status_message = Some(format!("no such view: {}", name));
            return;
        };

        match factory(&self.ctx, params) {
            Ok(body) => {
                self.body = body;
                self.current_view = name.to_string();
                self.header.update_title(name);
                self.status_message = None;
                tracing::info!(name, "switched view");
            }
            Err(e) => {
                tracing::error!(name, error = %e, "view construction failed");
                self.status_message = Some(format!("cannot open {}: {}", name, e));
            }
        }
    }
}
