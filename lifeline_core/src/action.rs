use crate::TerminationMode;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// The time allowance given to a termination action that was registered
/// without an explicit [`Allowance`](TerminationOption::Allowance).
pub const DEFAULT_ALLOWANCE: Duration = Duration::from_millis(100);

/// Label reported in log events for actions registered without a
/// [`Label`](TerminationOption::Label).
const UNNAMED: &str = "unnamed";

/// Boxed unit of work held by the registry until it is invoked (at most once).
pub(crate) type Callback = Box<dyn FnOnce() + Send + 'static>;

/// A configuration directive accepted when registering a termination action.
///
/// The set of directives is closed: each one adjusts a single property of the
/// action being registered, and directives are applied in the given order.
///
/// Scope directives are additive. Registering with neither
/// [`ShutdownOnly`](Self::ShutdownOnly) nor [`AbortOnly`](Self::AbortOnly)
/// makes the action run on every termination path, and so does registering
/// with both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationOption {
    /// Run the action on a graceful [shutdown](TerminationMode::Shutdown).
    /// Unless [`AbortOnly`](Self::AbortOnly) is also given, the action is
    /// skipped on abort.
    ShutdownOnly,

    /// Run the action on an [abort](TerminationMode::Abort). Unless
    /// [`ShutdownOnly`](Self::ShutdownOnly) is also given, the action is
    /// skipped on a graceful shutdown.
    AbortOnly,

    /// Replace the [default](DEFAULT_ALLOWANCE) time allowance of the action.
    Allowance(Duration),

    /// Human-readable name that identifies the action in log events.
    Label(String),
}

/// One unit of cleanup work registered with the lifecycle.
pub(crate) struct TerminationAction {
    callback: Callback,
    allowance: Duration,
    on_shutdown: bool,
    on_abort: bool,
    label: Arc<str>,
}

impl TerminationAction {
    /// Reports the time budgeted for this action.
    pub(crate) fn allowance(&self) -> Duration {
        self.allowance
    }

    /// Reports the human-readable label of this action.
    pub(crate) fn label(&self) -> &Arc<str> {
        &self.label
    }

    /// Reports whether this action is part of the termination sequence for
    /// the given `mode`.
    pub(crate) fn applies_to(&self, mode: TerminationMode) -> bool {
        match mode {
            TerminationMode::Shutdown => self.on_shutdown,
            TerminationMode::Abort => self.on_abort,
        }
    }

    /// Consumes this action and runs its callback on the current thread.
    pub(crate) fn invoke(self) {
        (self.callback)()
    }
}

impl Debug for TerminationAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminationAction")
            .field("label", &self.label)
            .field("allowance", &self.allowance)
            .field("on_shutdown", &self.on_shutdown)
            .field("on_abort", &self.on_abort)
            .finish_non_exhaustive()
    }
}

/// Collects [`TerminationOption`]s for a single callback before producing the
/// final [`TerminationAction`].
pub(crate) struct TerminationActionBuilder {
    callback: Callback,
    allowance: Duration,
    on_shutdown: bool,
    on_abort: bool,
    label: Option<String>,
}

impl TerminationActionBuilder {
    /// Starts building an action around the given callback, with the default
    /// allowance and no scope chosen yet.
    pub(crate) fn new(callback: Callback) -> Self {
        Self {
            callback,
            allowance: DEFAULT_ALLOWANCE,
            on_shutdown: false,
            on_abort: false,
            label: None,
        }
    }

    /// Applies a single directive.
    pub(crate) fn apply(mut self, option: TerminationOption) -> Self {
        match option {
            TerminationOption::ShutdownOnly => self.on_shutdown = true,
            TerminationOption::AbortOnly => self.on_abort = true,
            TerminationOption::Allowance(allowance) => self.allowance = allowance,
            TerminationOption::Label(label) => self.label = Some(label),
        }

        self
    }

    /// Applies every directive in order.
    pub(crate) fn apply_all(self, options: impl IntoIterator<Item = TerminationOption>) -> Self {
        options.into_iter().fold(self, Self::apply)
    }

    /// Finishes the action. An action with no chosen scope runs on every
    /// termination path.
    pub(crate) fn build(self) -> TerminationAction {
        let unscoped = !self.on_shutdown && !self.on_abort;

        TerminationAction {
            callback: self.callback,
            allowance: self.allowance,
            on_shutdown: self.on_shutdown || unscoped,
            on_abort: self.on_abort || unscoped,
            label: Arc::from(self.label.as_deref().unwrap_or(UNNAMED)),
        }
    }
}
