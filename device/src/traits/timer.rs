use super::Token;

/// A one-shot timer.
///
/// Expiry must be reported no earlier than `duration_ms` after `start` was called, exactly once,
/// with the token passed to `start`.
pub trait OneShotTimer {
    fn start(&mut self, duration_ms: u32, token: Token);
}

impl<T: OneShotTimer + ?Sized> OneShotTimer for &mut T {
    fn start(&mut self, duration_ms: u32, token: Token) {
        T::start(self, duration_ms, token)
    }
}
