//! Builder for composing machine definitions.

use crate::builder::error::BuildError;
use crate::compose::{Composer, ComposerConfig};
use crate::core::{Composite, Fragment, Hook, Identifier};
use std::sync::Arc;

/// Collects fragments with a fluent API and composes them on `build`.
///
/// # Example
///
/// ```rust
/// use mosaic::builder::DefinitionBuilder;
/// use mosaic::core::Hook;
///
/// let definition = DefinitionBuilder::new()
///     .state("locked", Hook::noop(), Hook::noop())
///     .state("open", Hook::new(|coins: u32| coins + 1), Hook::noop())
///     .on("coin", &[("locked", "open")])
///     .on("push", &[("open", "locked")])
///     .build()
///     .unwrap();
///
/// assert!(definition.has_state("open"));
/// ```
pub struct DefinitionBuilder<V> {
    fragments: Vec<Fragment<V>>,
    config: ComposerConfig,
}

impl<V> DefinitionBuilder<V> {
    pub fn new() -> Self {
        Self {
            fragments: Vec::new(),
            config: ComposerConfig::default(),
        }
    }

    /// Set the composer configuration (optional).
    pub fn config(mut self, config: ComposerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(
        mut self,
        name: impl Into<Identifier>,
        on_enter: Hook<V>,
        on_exit: Hook<V>,
    ) -> Self {
        self.fragments.push(crate::core::state(name, on_enter, on_exit));
        self
    }

    /// Add a state with no-op hooks.
    pub fn passthrough(mut self, name: impl Into<Identifier>) -> Self {
        self.fragments.push(crate::core::passthrough(name));
        self
    }

    pub fn transition(
        mut self,
        from: impl Into<Identifier>,
        event: impl Into<Identifier>,
        to: impl Into<Identifier>,
    ) -> Self {
        self.fragments.push(crate::core::transition(from, event, to));
        self
    }

    pub fn trigger(mut self, event: impl Into<Identifier>) -> Self {
        self.fragments.push(crate::core::trigger(event));
        self
    }

    /// Declare `event` and route it between each `(from, to)` pair.
    pub fn on(mut self, event: impl Into<Identifier>, routes: &[(&str, &str)]) -> Self {
        self.fragments.extend(crate::core::on(event, routes));
        self
    }

    /// Add a pre-built fragment, including an existing composite.
    pub fn fragment(mut self, fragment: impl Into<Fragment<V>>) -> Self {
        self.fragments.push(fragment.into());
        self
    }

    pub fn fragments(mut self, fragments: impl IntoIterator<Item = Fragment<V>>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    /// Compose the collected fragments.
    pub fn build(self) -> Result<Composite<V>, BuildError> {
        if self.fragments.is_empty() {
            return Err(BuildError::NoFragments);
        }
        Ok(Composer::with_config(self.config).compose(self.fragments)?)
    }

    /// Compose into a definition ready to be shared between machines.
    pub fn build_shared(self) -> Result<Arc<Composite<V>>, BuildError> {
        self.build().map(Arc::new)
    }
}

impl<V> Default for DefinitionBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
