//! Gradient recording mode.
//!
//! A thread-local switch that decides whether a forward call keeps what it
//! needs for a later backward pass. [`set_grad_enabled`] returns a guard that
//! puts the previous mode back when dropped, so a scope cannot leak its mode
//! into the caller even when it exits through `?`.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = Cell::new(true);
}

/// Whether gradient recording is enabled on the current thread.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

/// Restores the previous gradient mode on drop.
#[derive(Debug)]
#[must_use = "the gradient mode is restored as soon as the guard is dropped"]
pub struct GradModeGuard {
    prev: bool,
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|flag| flag.set(self.prev));
    }
}

/// Set the gradient mode for the lifetime of the returned guard.
pub fn set_grad_enabled(enabled: bool) -> GradModeGuard {
    let prev = GRAD_ENABLED.with(|flag| flag.replace(enabled));
    GradModeGuard { prev }
}

/// Disable gradient recording for the lifetime of the returned guard.
pub fn no_grad() -> GradModeGuard {
    set_grad_enabled(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_enabled() {
        assert!(is_grad_enabled());
    }

    #[test]
    fn test_guard_restores_previous_mode() {
        {
            let _outer = no_grad();
            assert!(!is_grad_enabled());
            {
                let _inner = set_grad_enabled(true);
                assert!(is_grad_enabled());
            }
            assert!(!is_grad_enabled());
        }
        assert!(is_grad_enabled());
    }

    #[test]
    fn test_mode_is_thread_local() {
        let _guard = no_grad();
        let other = std::thread::spawn(is_grad_enabled).join().unwrap();
        assert!(other);
        assert!(!is_grad_enabled());
    }
}
