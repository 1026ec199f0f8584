//! Enter and exit hooks attached to states.

use std::fmt;
use std::sync::Arc;

/// Shared hook function type.
pub type HookFn<V> = Arc<dyn Fn(V) -> V + Send + Sync>;

/// Pure unary function run when a state is entered or exited.
///
/// A missing hook is `Hook::Noop`, which returns its input unchanged, so
/// dispatch never has to special-case an absent function.
///
/// # Example
///
/// ```rust
/// use mosaic::core::Hook;
///
/// let double = Hook::new(|x: i32| x * 2);
/// assert_eq!(double.invoke(21), 42);
/// assert_eq!(Hook::<i32>::noop().invoke(7), 7);
/// ```
pub enum Hook<V> {
    Noop,
    Call(HookFn<V>),
}

impl<V> Hook<V> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(V) -> V + Send + Sync + 'static,
    {
        Hook::Call(Arc::new(f))
    }

    pub fn noop() -> Self {
        Hook::Noop
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Hook::Noop)
    }

    pub fn invoke(&self, input: V) -> V {
        match self {
            Hook::Noop => input,
            Hook::Call(f) => f(input),
        }
    }

    /// Identity comparison: the same shared function, or both no-ops.
    pub fn same_as(&self, other: &Hook<V>) -> bool {
        match (self, other) {
            (Hook::Noop, Hook::Noop) => true,
            (Hook::Call(a), Hook::Call(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<V> Default for Hook<V> {
    fn default() -> Self {
        Hook::Noop
    }
}

impl<V> Clone for Hook<V> {
    fn clone(&self) -> Self {
        match self {
            Hook::Noop => Hook::Noop,
            Hook::Call(f) => Hook::Call(Arc::clone(f)),
        }
    }
}

impl<V> From<HookFn<V>> for Hook<V> {
    fn from(f: HookFn<V>) -> Self {
        Hook::Call(f)
    }
}

impl<V> fmt::Debug for Hook<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Noop => f.write_str("Hook::Noop"),
            Hook::Call(func) => write!(f, "Hook::Call({:p})", Arc::as_ptr(func)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_passes_input_through() {
        let hook: Hook<String> = Hook::noop();
        assert_eq!(hook.invoke("payload".to_string()), "payload");
        assert!(hook.is_noop());
    }

    #[test]
    fn call_applies_function() {
        let hook = Hook::new(|x: i32| x + 3);
        assert_eq!(hook.invoke(4), 7);
        assert!(!hook.is_noop());
    }

    #[test]
    fn clones_share_identity() {
        let hook = Hook::new(|x: i32| x);
        let clone = hook.clone();
        assert!(hook.same_as(&clone));
    }

    #[test]
    fn distinct_closures_differ() {
        let a = Hook::new(|x: i32| x);
        let b = Hook::new(|x: i32| x);
        assert!(!a.same_as(&b));
        assert!(!a.same_as(&Hook::noop()));
        assert!(Hook::<i32>::noop().same_as(&Hook::noop()));
    }

    #[test]
    fn shared_fn_converts() {
        let f: HookFn<i32> = Arc::new(|x| x - 1);
        let a = Hook::from(Arc::clone(&f));
        let b = Hook::from(f);
        assert!(a.same_as(&b));
        assert_eq!(a.invoke(1), 0);
    }
}
