//! One-shot evaluation without a retained machine.

use crate::core::Composite;
use crate::machine::config::MachineConfig;
use crate::machine::error::DispatchError;
use crate::machine::instance::Machine;
use std::sync::Arc;

/// Create a machine at `initial`, dispatch `event` once, then release it.
///
/// History is not recorded. Fails with `DispatchError::Lifecycle` if
/// `initial` is not a state of `definition`.
///
/// # Example
///
/// ```rust
/// use mosaic::compose::compose;
/// use mosaic::core::{on, passthrough, state, Hook};
/// use mosaic::machine::run_stateless;
/// use std::sync::Arc;
///
/// let mut fragments = vec![
///     passthrough("cold"),
///     state("hot", Hook::new(|t: i32| t + 50), Hook::noop()),
/// ];
/// fragments.extend(on("heat", &[("cold", "hot")]));
/// let definition = Arc::new(compose(fragments).unwrap());
///
/// assert_eq!(run_stateless(&definition, "cold", "heat", 20).unwrap(), 70);
/// ```
pub fn run_stateless<V>(
    definition: &Arc<Composite<V>>,
    initial: &str,
    event: &str,
    input: V,
) -> Result<V, DispatchError> {
    let mut machine = Machine::with_config(
        Arc::clone(definition),
        initial,
        MachineConfig::default().record_history(false),
    )?;
    let output = machine.dispatch(event, input);
    machine.destroy();
    output
}
