//! The ambient scope holding the active [`HeadContext`].
//!
//! One slot per thread. Tera renders synchronously on the calling thread with no
//! suspension points, so the thread is the logical call stack of a render:
//! concurrent renders on other threads or runtime workers each see their own slot.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::HeadContext;
use crate::core::{HeadContextError, Result};

thread_local! {
    static ACTIVE: RefCell<Option<Rc<RefCell<HeadContext>>>> = const { RefCell::new(None) };
}

/// Guard tying a render to the ambient [`HeadContext`].
///
/// [`RenderScope::enter`] installs a fresh context when none is active and marks
/// this scope as its owner; otherwise it joins the active one. Dropping the owner
/// clears the slot, on every exit path including errors and panics.
#[derive(Debug)]
pub struct RenderScope {
    context: Rc<RefCell<HeadContext>>,
    owner: bool,
}

impl RenderScope {
    /// Join the active context, or create and install one.
    pub fn enter() -> Self {
        ACTIVE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(context) = slot.as_ref() {
                tracing::trace!("Joining active head context");
                return Self {
                    context: Rc::clone(context),
                    owner: false,
                };
            }

            let context = Rc::new(RefCell::new(HeadContext::new()));
            tracing::debug!("Created head context {}", context.borrow().id());
            *slot = Some(Rc::clone(&context));
            Self {
                context,
                owner: true,
            }
        })
    }

    /// Whether this scope created the context and will tear it down.
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    /// Read the context this scope is bound to.
    ///
    /// # Panics
    ///
    /// Panics if `f` declares an asset, since the context is borrowed while it runs.
    pub fn inspect<R>(&self, f: impl FnOnce(&HeadContext) -> R) -> R {
        f(&self.context.borrow())
    }

    pub(crate) fn context(&self) -> Ref<'_, HeadContext> {
        self.context.borrow()
    }
}

impl Drop for RenderScope {
    fn drop(&mut self) {
        if !self.owner {
            return;
        }
        // The slot may already be gone during thread teardown.
        let _ = ACTIVE.try_with(|slot| {
            slot.borrow_mut().take();
        });
        tracing::debug!("Released head context {}", self.context.borrow().id());
    }
}

/// Whether a render is in progress on this thread.
pub fn is_active() -> bool {
    ACTIVE.with(|slot| slot.borrow().is_some())
}

/// Run `f` against the active context.
///
/// # Errors
///
/// Returns [`HeadContextError::NoActiveContext`] outside a render.
///
/// # Panics
///
/// Panics if `f` itself calls `with_active` (the context is already borrowed).
pub fn with_active<R>(f: impl FnOnce(&mut HeadContext) -> R) -> Result<R> {
    // Clone the handle out so the slot is not borrowed while `f` runs.
    let context = ACTIVE
        .with(|slot| slot.borrow().clone())
        .ok_or(HeadContextError::NoActiveContext)?;
    let mut context = context.borrow_mut();
    Ok(f(&mut context))
}
