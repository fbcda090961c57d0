//! Key events and the structural-key pipeline.
//!
//! [`handle_key`] is what a host calls for every keystroke before running
//! its own default action: caret context, classification, decision and the
//! edit all happen synchronously inside this one call.

use crate::editor::{self, EditError};
use crate::markdown::{self, ContinuationDirective};
use crate::surface::Surface;

/// Keys the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    Char(char),
    Other,
}

/// Modifier state of a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Ctrl, Alt or Meta held (Shift alone does not count).
    pub const fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A host key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// An input method composition is in progress.
    pub composing: bool,
    /// Something upstream already handled this event.
    pub consumed: bool,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            composing: false,
            consumed: false,
        }
    }

    /// The key with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    #[must_use]
    pub const fn composing(mut self) -> Self {
        self.composing = true;
        self
    }

    #[must_use]
    pub const fn consumed(mut self) -> Self {
        self.consumed = true;
        self
    }

    /// The structural meaning of this event, if any.
    pub const fn structural(&self, options: &ContinuationOptions) -> Option<StructuralKey> {
        let m = self.modifiers;
        match self.key {
            Key::Enter if !m.shift && !m.has_command() => Some(StructuralKey::CommitLine),
            Key::Backspace if !m.has_command() => Some(StructuralKey::DeleteBackward),
            Key::Tab if options.tab_indent && !m.has_command() => Some(if m.shift {
                StructuralKey::Outdent
            } else {
                StructuralKey::Indent
            }),
            _ => None,
        }
    }
}

/// Keystrokes that alter document structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKey {
    CommitLine,
    DeleteBackward,
    Indent,
    Outdent,
}

/// Engine switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationOptions {
    /// Tab / Shift+Tab indent and outdent marker lines.
    pub tab_indent: bool,
}

impl Default for ContinuationOptions {
    fn default() -> Self {
        Self { tab_indent: true }
    }
}

/// What the host should do after [`handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine edited the surface; suppress the default action.
    Intercepted,
    /// Run the host's default action.
    Native,
}

/// Run the continuation pipeline for one key event.
///
/// Composition, an already consumed event, a non-structural key or a
/// missing caret all decline without looking at the text.
///
/// # Errors
///
/// Propagates [`EditError`] from the mutator. Directives are computed from
/// the same snapshot they are applied to, so this indicates a bug.
pub fn handle_key<S: Surface + ?Sized>(
    surface: &mut S,
    event: &KeyEvent,
    options: &ContinuationOptions,
) -> Result<KeyOutcome, EditError> {
    if event.composing || event.consumed {
        return Ok(KeyOutcome::Native);
    }
    let Some(key) = event.structural(options) else {
        return Ok(KeyOutcome::Native);
    };
    let _scope = crate::perf::scope("input.handle_key");

    let Some((_, ctx)) = editor::line_around(surface) else {
        tracing::trace!(?key, "no caret context");
        return Ok(KeyOutcome::Native);
    };

    let directive = decide(key, &ctx);
    crate::perf::count_structural_key(directive.is_some());
    tracing::debug!(
        ?key,
        prefix = markdown::classify(&ctx.line_text).kind(),
        line_start = ctx.line_start,
        caret = ctx.caret_offset,
        intercepted = directive.is_some(),
        "structural key"
    );
    let Some(directive) = directive else {
        return Ok(KeyOutcome::Native);
    };

    crate::perf::log_event(
        "input.directive",
        format!(
            "key={key:?} span={:?} text={:?} caret={}",
            directive.span, directive.text, directive.caret
        ),
    );
    editor::apply(surface, &directive)?;
    Ok(KeyOutcome::Intercepted)
}

/// Pure decision for a structural key on the given line.
pub fn decide(key: StructuralKey, ctx: &editor::LineContext) -> Option<ContinuationDirective> {
    match key {
        StructuralKey::CommitLine => markdown::commit_line(ctx),
        StructuralKey::DeleteBackward => markdown::delete_backward(ctx),
        StructuralKey::Indent => markdown::indent(ctx),
        StructuralKey::Outdent => markdown::outdent(ctx),
    }
}
