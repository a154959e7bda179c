//! Registration-then-freeze lifecycle.
//!
//! Each pipeline component has a mutable registration value (rules, cases,
//! handlers) that is consumed into an immutable frozen value exposing only
//! lookups. The typestate makes late registration impossible at compile
//! time. [`Staged`] wraps the two phases behind one handle for callers that
//! register and use a component through the same value; it freezes on first
//! use and reports every later registration as an illegal-registration
//! error.

use crate::error::{Error, Result};

/// A registration value that can be frozen into its usable form.
pub trait Freeze {
    /// The immutable, usable form.
    type Frozen;

    /// Component name reported in illegal-registration errors.
    const COMPONENT: &'static str;

    /// Consumes the registration value.
    fn freeze(self) -> Self::Frozen;
}

enum Phase<B: Freeze> {
    Open(B),
    Frozen(B::Frozen),
    // Only observable if `freeze` panicked mid-transition.
    Poisoned,
}

/// A component that is open for registration until first use.
pub struct Staged<B: Freeze> {
    phase: Phase<B>,
}

impl<B: Freeze> Staged<B> {
    /// Wraps a registration value.
    pub fn new(builder: B) -> Self {
        Self {
            phase: Phase::Open(builder),
        }
    }

    /// Registers something on the open builder.
    ///
    /// # Errors
    ///
    /// Returns an illegal-registration error once the component has been
    /// used, every time it is called; otherwise whatever `f` returns.
    pub fn register<R>(
        &mut self,
        what: impl Into<String>,
        f: impl FnOnce(&mut B) -> Result<R>,
    ) -> Result<R> {
        match &mut self.phase {
            Phase::Open(builder) => f(builder),
            Phase::Frozen(_) | Phase::Poisoned => {
                Err(Error::illegal_registration(B::COMPONENT, what))
            }
        }
    }

    /// Returns the frozen component, freezing it on first call.
    pub fn frozen(&mut self) -> &B::Frozen {
        if matches!(self.phase, Phase::Open(_)) {
            if let Phase::Open(builder) = std::mem::replace(&mut self.phase, Phase::Poisoned) {
                self.phase = Phase::Frozen(builder.freeze());
            }
        }
        match &self.phase {
            Phase::Frozen(frozen) => frozen,
            Phase::Open(_) | Phase::Poisoned => {
                unreachable!("{} was not frozen after freeze", B::COMPONENT)
            }
        }
    }

    /// Returns true once the component has been used.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        !matches!(self.phase, Phase::Open(_))
    }
}

impl<B: Freeze + Default> Default for Staged<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
