use std::env;
use std::process;
use std::time::SystemTime;
use tracing::info;

/// Logs a few facts about the starting process, one `info` event per line.
pub(crate) fn announce() {
    for (label, value) in lines() {
        info!("{:>12}: {}", label, value);
    }
}

/// Collects the banner as label & value pairs. Command-line arguments after
/// the program name get a line of their own, with an empty label.
pub(crate) fn lines() -> Vec<(&'static str, String)> {
    let mut lines = vec![
        (
            "Start Time",
            humantime::format_rfc3339_nanos(SystemTime::now()).to_string(),
        ),
        ("Process ID", process::id().to_string()),
        ("Working Dir", working_dir()),
        ("User", user()),
    ];

    let mut args = env::args();
    lines.push(("Command Line", args.next().unwrap_or_default()));
    lines.extend(
        args.enumerate()
            .map(|(index, arg)| ("", format!("{:>2}) {}", index + 1, arg))),
    );

    lines
}

fn working_dir() -> String {
    match env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(error) => format!("not available: {}", error),
    }
}

#[cfg(unix)]
fn user() -> String {
    let name = env::var("USER")
        .or_else(|_| env::var("LOGNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    // SAFETY: both calls always succeed and touch no memory
    let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };

    format!("{} [{}:{}]", name, uid, gid)
}

#[cfg(not(unix))]
fn user() -> String {
    env::var("USERNAME").unwrap_or_else(|error| format!("not available: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lines_describe_this_process() {
        // When
        let lines = lines();

        // Then
        let labels = lines.iter().map(|(label, _)| *label).take(5).collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec!["Start Time", "Process ID", "Working Dir", "User", "Command Line"],
        );
        assert_eq!(lines[1].1, process::id().to_string());
        assert_eq!(lines.len(), 4 + env::args().count().max(1));
    }
}
