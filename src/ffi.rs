//! C ABI over fragments, composites and machines.
//!
//! Every value crosses the boundary as an opaque pointer. Values passed to
//! hooks are `*const c_void`; the host encodes and decodes them. A null hook
//! pointer stands for the no-op hook.
//!
//! Ownership:
//! - `fsm_state`, `fsm_transition`, `fsm_trigger` and
//!   `fsm_composite_fragment` return fragment handles owned by the caller,
//!   released with `fsm_fragment_free` unless passed to `fsm_compose`.
//! - `fsm_compose` consumes every fragment handle it is given, whether or
//!   not composition succeeds, and writes a composite handle owned by the
//!   caller, released with `fsm_composite_free`.
//! - `fsm_machine` borrows the composite and writes a machine handle owned
//!   by the caller, released with `fsm_machine_free`.
//!
//! Releasing a handle twice or using it after release is undefined
//! behavior. So is dispatching on one machine from two threads at once.

use crate::compose::{compose, CompositionError};
use crate::core::{Composite, Fragment, Hook, Identifier};
use crate::machine::{run_stateless, DispatchError, Machine, MachineError};
use std::ffi::{c_char, c_void, CStr};
use std::ptr;
use std::sync::Arc;

/// Opaque value carried through hooks.
pub type RawValue = *const c_void;

/// Hook signature on the C side.
pub type RawHook = extern "C" fn(RawValue) -> RawValue;

pub type RawFragment = Fragment<RawValue>;
pub type RawComposite = Composite<RawValue>;
pub type RawMachine = Machine<RawValue>;

/// Status code returned by fallible boundary calls.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsmStatus {
    Ok = 0,
    InvalidArgument = 1,
    DuplicateState = 2,
    AmbiguousTransition = 3,
    MissingStateReference = 4,
    UndeclaredEvent = 5,
    EmptyIdentifier = 6,
    ReservedStateName = 7,
    UnknownInitialState = 8,
    NoMatchingTransition = 9,
}

impl From<&CompositionError> for FsmStatus {
    fn from(error: &CompositionError) -> Self {
        match error {
            CompositionError::DuplicateState { .. } => FsmStatus::DuplicateState,
            CompositionError::AmbiguousTransition { .. } => FsmStatus::AmbiguousTransition,
            CompositionError::MissingStateReference { .. } => FsmStatus::MissingStateReference,
            CompositionError::UndeclaredEvent { .. } => FsmStatus::UndeclaredEvent,
            CompositionError::EmptyIdentifier { .. } => FsmStatus::EmptyIdentifier,
            CompositionError::ReservedStateName { .. } => FsmStatus::ReservedStateName,
        }
    }
}

impl From<&MachineError> for FsmStatus {
    fn from(error: &MachineError) -> Self {
        match error {
            MachineError::UnknownInitialState { .. } => FsmStatus::UnknownInitialState,
        }
    }
}

impl From<&DispatchError> for FsmStatus {
    fn from(error: &DispatchError) -> Self {
        match error {
            DispatchError::NoMatchingTransition { .. } => FsmStatus::NoMatchingTransition,
            DispatchError::Lifecycle(e) => e.into(),
        }
    }
}

/// Read a NUL-terminated UTF-8 name. `None` for null or invalid UTF-8.
unsafe fn identifier(name: *const c_char) -> Option<Identifier> {
    if name.is_null() {
        return None;
    }
    match CStr::from_ptr(name).to_str() {
        Ok(name) => Some(Identifier::from(name)),
        Err(e) => {
            tracing::warn!(error = %e, "Rejected non UTF-8 identifier");
            None
        }
    }
}

fn hook(raw: Option<RawHook>) -> Hook<RawValue> {
    match raw {
        Some(f) => Hook::new(move |value: RawValue| f(value)),
        None => Hook::noop(),
    }
}

fn into_handle(fragment: RawFragment) -> *mut RawFragment {
    Box::into_raw(Box::new(fragment))
}

/// Create a state fragment. Returns null if `name` is null or not UTF-8.
///
/// # Safety
/// `name` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fsm_state(
    name: *const c_char,
    on_enter: Option<RawHook>,
    on_exit: Option<RawHook>,
) -> *mut RawFragment {
    match identifier(name) {
        Some(name) => into_handle(crate::core::state(name, hook(on_enter), hook(on_exit))),
        None => ptr::null_mut(),
    }
}

/// Create a transition fragment. Returns null if any name is invalid.
///
/// # Safety
/// Each argument must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fsm_transition(
    from: *const c_char,
    event: *const c_char,
    to: *const c_char,
) -> *mut RawFragment {
    match (identifier(from), identifier(event), identifier(to)) {
        (Some(from), Some(event), Some(to)) => {
            into_handle(crate::core::transition(from, event, to))
        }
        _ => ptr::null_mut(),
    }
}

/// Create a trigger fragment. Returns null if `event` is invalid.
///
/// # Safety
/// `event` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fsm_trigger(event: *const c_char) -> *mut RawFragment {
    match identifier(event) {
        Some(event) => into_handle(crate::core::trigger(event)),
        None => ptr::null_mut(),
    }
}

/// Release a fragment handle that was not passed to `fsm_compose`.
///
/// # Safety
/// `fragment` must be null or a live handle from this module.
#[no_mangle]
pub unsafe extern "C" fn fsm_fragment_free(fragment: *mut RawFragment) {
    if !fragment.is_null() {
        drop(Box::from_raw(fragment));
    }
}

/// Compose `len` fragment handles into a composite written to `out`.
///
/// All fragment handles are consumed, including on failure. On failure
/// `out` is set to null.
///
/// # Safety
/// `fragments` must point to `len` fragment handles, each live or null, and
/// `out` must be null or valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn fsm_compose(
    fragments: *const *mut RawFragment,
    len: usize,
    out: *mut *const RawComposite,
) -> FsmStatus {
    if fragments.is_null() && len > 0 {
        tracing::warn!("fsm_compose called with null fragment array");
        if !out.is_null() {
            *out = ptr::null();
        }
        return FsmStatus::InvalidArgument;
    }

    let handles: &[*mut RawFragment] = if len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(fragments, len)
    };
    if out.is_null() || handles.iter().any(|h| h.is_null()) {
        tracing::warn!("fsm_compose called with a null pointer");
        for &handle in handles {
            fsm_fragment_free(handle);
        }
        if !out.is_null() {
            *out = ptr::null();
        }
        return FsmStatus::InvalidArgument;
    }
    *out = ptr::null();

    let owned: Vec<RawFragment> = handles.iter().map(|&h| *Box::from_raw(h)).collect();
    match compose(owned) {
        Ok(composite) => {
            *out = Arc::into_raw(Arc::new(composite));
            FsmStatus::Ok
        }
        Err(e) => (&e).into(),
    }
}

/// Wrap a borrowed composite as a new fragment handle for nesting.
///
/// # Safety
/// `composite` must be null or a live composite handle.
#[no_mangle]
pub unsafe extern "C" fn fsm_composite_fragment(
    composite: *const RawComposite,
) -> *mut RawFragment {
    match borrow_composite(composite) {
        Some(shared) => into_handle(Fragment::Composite(shared)),
        None => ptr::null_mut(),
    }
}

/// Release a composite handle. Machines created from it stay valid.
///
/// # Safety
/// `composite` must be null or a live composite handle.
#[no_mangle]
pub unsafe extern "C" fn fsm_composite_free(composite: *const RawComposite) {
    if !composite.is_null() {
        drop(Arc::from_raw(composite));
    }
}

/// Create a machine over a borrowed composite, written to `out`.
///
/// # Safety
/// `composite` must be a live composite handle, `initial` a NUL-terminated
/// string and `out` valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn fsm_machine(
    composite: *const RawComposite,
    initial: *const c_char,
    out: *mut *mut RawMachine,
) -> FsmStatus {
    if out.is_null() {
        return FsmStatus::InvalidArgument;
    }
    *out = ptr::null_mut();

    let (Some(definition), Some(initial)) = (borrow_composite(composite), identifier(initial))
    else {
        tracing::warn!("fsm_machine called with invalid arguments");
        return FsmStatus::InvalidArgument;
    };

    match Machine::new(definition, initial) {
        Ok(machine) => {
            *out = Box::into_raw(Box::new(machine));
            FsmStatus::Ok
        }
        Err(e) => (&e).into(),
    }
}

/// Destroy a machine, releasing its reference to the composite.
///
/// # Safety
/// `machine` must be null or a live machine handle.
#[no_mangle]
pub unsafe extern "C" fn fsm_machine_free(machine: *mut RawMachine) {
    if !machine.is_null() {
        let machine = *Box::from_raw(machine);
        machine.destroy();
    }
}

/// Dispatch `event` with `input`; the enter hook's result goes to `out`.
///
/// # Safety
/// `machine` must be a live machine handle not used concurrently, `event`
/// a NUL-terminated string and `out` valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn fsm_dispatch(
    machine: *mut RawMachine,
    event: *const c_char,
    input: RawValue,
    out: *mut RawValue,
) -> FsmStatus {
    if machine.is_null() || out.is_null() {
        return FsmStatus::InvalidArgument;
    }
    let Some(event) = identifier(event) else {
        return FsmStatus::InvalidArgument;
    };

    match (*machine).dispatch(&event, input) {
        Ok(output) => {
            *out = output;
            FsmStatus::Ok
        }
        Err(e) => (&e).into(),
    }
}

/// One-shot dispatch from `initial` without retaining a machine.
///
/// # Safety
/// `composite` must be a live composite handle, `initial` and `event`
/// NUL-terminated strings and `out` valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn fsm_run(
    composite: *const RawComposite,
    initial: *const c_char,
    event: *const c_char,
    input: RawValue,
    out: *mut RawValue,
) -> FsmStatus {
    if out.is_null() {
        return FsmStatus::InvalidArgument;
    }
    let (Some(definition), Some(initial), Some(event)) = (
        borrow_composite(composite),
        identifier(initial),
        identifier(event),
    ) else {
        return FsmStatus::InvalidArgument;
    };

    match run_stateless(&definition, &initial, &event, input) {
        Ok(output) => {
            *out = output;
            FsmStatus::Ok
        }
        Err(e) => (&e).into(),
    }
}

/// Whether the machine's current state is `name`.
///
/// # Safety
/// `machine` must be null or a live machine handle and `name` null or a
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn fsm_machine_in_state(
    machine: *const RawMachine,
    name: *const c_char,
) -> bool {
    match (machine.as_ref(), identifier(name)) {
        (Some(machine), Some(name)) => machine.is_in(&name),
        _ => false,
    }
}

/// Take a new shared reference to a composite without consuming the handle.
unsafe fn borrow_composite(composite: *const RawComposite) -> Option<Arc<RawComposite>> {
    if composite.is_null() {
        return None;
    }
    Arc::increment_strong_count(composite);
    Some(Arc::from_raw(composite))
}
