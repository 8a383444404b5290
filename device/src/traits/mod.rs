pub mod bus;
pub mod timer;

/// Identifies one issued step.
///
/// The driver hands a token to the collaborator with every request; the collaborator gives the
/// same token back when reporting completion. Tokens are never reused by consecutive steps of an
/// instance, so a stale or duplicated completion is detected and rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Token(u16);

impl Token {
    pub(crate) const fn new(value: u16) -> Self {
        Self(value)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}
