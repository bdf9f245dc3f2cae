use tracing::{debug, info};

/// Boxed unit of work run once, in registration order, when startup is
/// triggered.
pub(crate) type StartupAction = Box<dyn FnOnce() + Send + 'static>;

/// Runs the given startup actions synchronously on the current thread, first
/// registered first.
///
/// A panicking action is not caught: a subsystem that cannot initialize is
/// expected to take the whole process down with it.
pub(crate) fn run(actions: Vec<StartupAction>) {
    let total = actions.len();

    info!(total, "Running startup actions");

    for (index, action) in actions.into_iter().enumerate() {
        debug!(position = index + 1, total, "Invoking startup action");
        action();
    }

    info!("Startup actions completed");
}
