use colored::{ColoredString, Colorize};
use fern::Dispatch;
use log::Level;

fn paint(level: Level, line: String) -> ColoredString {
    match level {
        Level::Error => line.bright_red(),
        Level::Warn => line.bright_yellow(),
        Level::Info => line.normal(),
        Level::Debug | Level::Trace => line.dimmed(),
    }
}

/// Formats one log line. Records coming from the library carry its module
/// path so they can be told apart from the demo's own messages.
pub(crate) fn format_line(time: &str, target: &str, message: &str) -> String {
    if target.starts_with("x360ctrl_demo") {
        format!("[{time}] {message}")
    } else {
        format!("[{time}] {target}: {message}")
    }
}

/// Setup the logger.
///
/// Library messages from `x360ctrl` follow the same level as the demo.
/// Log output goes to stderr so it does not interleave with the report.
pub(crate) fn setup(verbose: bool, no_color: bool) -> Result<(), log::SetLoggerError> {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if no_color {
        colored::control::set_override(false);
    }

    Dispatch::new()
        .format(|out, message, record| {
            let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
            let line = format_line(&time, record.target(), &message.to_string());
            out.finish(format_args!("{}", paint(record.level(), line)))
        })
        .level(log::LevelFilter::Warn)
        .level_for("x360ctrl", log_level)
        .level_for("x360ctrl_demo", log_level)
        .chain(std::io::stderr())
        .apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_lines_omit_target() {
        let line = format_line("12:00:00.000", "x360ctrl_demo::app", "Stopped");
        assert_eq!(line, "[12:00:00.000] Stopped");
    }

    #[test]
    fn library_lines_keep_target() {
        let line = format_line(
            "12:00:00.000",
            "x360ctrl::controller",
            "Controller #1 connected",
        );
        assert_eq!(line, "[12:00:00.000] x360ctrl::controller: Controller #1 connected");
    }
}
