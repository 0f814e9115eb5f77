use std::fmt::{self, Display};

use backtrace::Backtrace;

/// Captures a backtrace at the point it is displayed.
/// Meant for `{}` interpolation inside panic hooks and error logs.
pub struct CaptureBacktrace;

impl Display for CaptureBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backtrace = Backtrace::new();
        let frames = backtrace
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            // skip the frames of backtrace and the panic machinery
            .skip_while(|symbol| {
                symbol.name().is_some_and(|name| {
                    let name = name.to_string();
                    name.starts_with("backtrace::")
                        || name.starts_with("shared::backtrace")
                        || name.contains("panicking")
                })
            });

        for (i, symbol) in frames.enumerate() {
            let name = symbol
                .name()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "<unknown>".to_owned());

            writeln!(f, "{i:>4}: {name}")?;

            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                writeln!(f, "             at {}:{line}", file.display())?;
            }
        }

        Ok(())
    }
}
