//! Macros for ergonomic definition construction.

/// Compose fragments listed inline with the default configuration.
///
/// Expands to a call to [`compose`](crate::compose::compose) over a `Vec`
/// of the given fragments.
///
/// # Example
///
/// ```
/// use mosaic::compose;
/// use mosaic::core::{passthrough, state, transition, trigger, Hook};
///
/// let definition = compose![
///     state("idle", Hook::noop(), Hook::new(|i: i32| i + 3)),
///     state("running", Hook::new(|i: i32| i * 2), Hook::noop()),
///     passthrough("paused"),
///     trigger("start"),
///     trigger("pause"),
///     transition("idle", "start", "running"),
///     transition("running", "pause", "paused"),
/// ]
/// .unwrap();
///
/// assert_eq!(definition.states().len(), 3);
/// ```
#[macro_export]
macro_rules! compose {
    ($($fragment:expr),* $(,)?) => {
        $crate::compose::compose(::std::vec![$($fragment),*])
    };
}
