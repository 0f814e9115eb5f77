use std::{
    panic,
    path::{Path, PathBuf},
};

use human_panic::metadata;
use shared::{backtrace::CaptureBacktrace, popup::error_popup};
use tracing::error;

/// `config_path` is the file the runtime settings came from; it is named in
/// the log and in the crash popup since it decides what the probe attempted
#[allow(unused_variables)]
pub fn set_hook(config_path: PathBuf) {
    let meta = metadata!();

    panic::set_hook(Box::new(move |info| {
        error!(
            config = %config_path.display(),
            "{info}\n\nstack backtrace:\n{}", CaptureBacktrace
        );

        #[allow(unused_mut)]
        let mut report: Option<PathBuf> = None;

        // release mode, store a crash report
        #[cfg(not(debug_assertions))]
        {
            report = human_panic::handle_dump(&meta, info);
        }

        let message = match make_msg(&info.to_string(), &config_path, report.as_deref()) {
            Ok(msg) => msg,
            Err(_) => info.to_string(),
        };

        error_popup("Windows App SDK probe crashed", message);
    }));
}

pub fn make_msg(
    panic: &str,
    config_path: &Path,
    report: Option<&Path>,
) -> Result<String, std::fmt::Error> {
    use std::fmt::Write as _;

    let mut buffer = String::new();

    writeln!(
        buffer,
        "{} crashed while bringing the Windows App SDK runtime up or down.\n",
        env!("CARGO_PKG_NAME")
    )?;

    writeln!(buffer, "{panic}\n")?;

    let config_state = if config_path.is_file() {
        "loaded"
    } else {
        "not found, defaults were used"
    };
    writeln!(buffer, "Config: {} ({config_state})", config_path.display())?;

    match report {
        Some(report) => writeln!(buffer, "Crash report: {}", report.display())?,
        None => writeln!(buffer, "Crash report: <not written>")?,
    }

    writeln!(
        buffer,
        r#"
Rerun with `WINAPPSDK_LOG="trace"` (or `level = "trace"` under `[log]` in the config) to see every runtime call, and attach the output to an issue at"#
    )?;

    writeln!(buffer, env!("CARGO_PKG_HOMEPAGE"))?;

    Ok(buffer)
}
