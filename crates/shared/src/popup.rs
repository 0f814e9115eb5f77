#[cfg(windows)]
pub fn error_popup<T: AsRef<str>, M: AsRef<str>>(title: T, message: M) {
    use windows::{
        Win32::UI::WindowsAndMessaging::{MB_ICONERROR, MessageBoxW},
        core::{HSTRING, PCWSTR},
    };

    // these must be explicitly assigned, otherwise they will be temporary and drop
    // and create an invalid pointer, causing corruption and UB
    let h_title = HSTRING::from(title.as_ref());
    let h_message = HSTRING::from(message.as_ref());

    let title = PCWSTR::from_raw(h_title.as_ptr());
    let message = PCWSTR::from_raw(h_message.as_ptr());

    // SAFETY: both strings outlive the call
    unsafe {
        MessageBoxW(None, message, title, MB_ICONERROR);
    }
}

/// No message boxes off windows; the message goes to stderr instead
#[cfg(not(windows))]
pub fn error_popup<T: AsRef<str>, M: AsRef<str>>(title: T, message: M) {
    eprintln!("{}: {}", title.as_ref(), message.as_ref());
}

/// An error popup, except that the program exits after
pub fn fatal_popup<T: AsRef<str>, M: AsRef<str>>(title: T, message: M) -> ! {
    error_popup(title, message);
    std::process::exit(1);
}

/// Exits the process, showing an error popup first only if `popup` is set.
/// Console hosts usually want the popup off.
pub fn fatal<T: AsRef<str>, M: AsRef<str>>(title: T, message: M, popup: bool) -> ! {
    if popup {
        fatal_popup(title, message);
    }

    eprintln!("{}: {}", title.as_ref(), message.as_ref());
    std::process::exit(1);
}
