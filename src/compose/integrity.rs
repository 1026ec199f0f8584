//! Referential integrity checks run after fragments are merged.
//!
//! Checks use Stillwater's `Validation` so every broken reference is
//! collected in one pass rather than stopping at the first.

use crate::compose::config::ComposerConfig;
use crate::compose::error::CompositionError;
use crate::core::TransitionFragment;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single integrity check.
pub(crate) type Check = Validation<(), NonEmptyVec<CompositionError>>;

/// Check every transition's endpoints and event.
///
/// Per transition the order is `from`, `to`, then `event`.
pub(crate) fn check_transitions<'a, S, E>(
    transitions: impl IntoIterator<Item = &'a TransitionFragment>,
    has_state: S,
    declares: E,
    config: &ComposerConfig,
) -> Check
where
    S: Fn(&str) -> bool,
    E: Fn(&str) -> bool,
{
    let mut checks: Vec<Check> = Vec::new();

    for t in transitions {
        let wildcard_source = config.allow_wildcard_source && t.from.is_wildcard();
        checks.push(if wildcard_source || has_state(t.from.as_str()) {
            Validation::success(())
        } else {
            Validation::fail(CompositionError::MissingStateReference {
                from: t.from.clone(),
                event: t.event.clone(),
                missing: t.from.clone(),
            })
        });

        checks.push(if has_state(t.to.as_str()) {
            Validation::success(())
        } else {
            Validation::fail(CompositionError::MissingStateReference {
                from: t.from.clone(),
                event: t.event.clone(),
                missing: t.to.clone(),
            })
        });

        if config.require_declared_events {
            checks.push(if declares(t.event.as_str()) {
                Validation::success(())
            } else {
                Validation::fail(CompositionError::UndeclaredEvent {
                    from: t.from.clone(),
                    event: t.event.clone(),
                })
            });
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a check into the list of violations it carries.
pub(crate) fn violations(check: Check) -> Vec<CompositionError> {
    match check {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
