use windows::Win32::{
    Foundation::APPMODEL_ERROR_NO_PACKAGE, Storage::Packaging::Appx::GetCurrentPackageFullName,
};

/// Whether the OS assigned this process a package identity.
///
/// Only a zero length query is made, so a packaged process answers with
/// `ERROR_INSUFFICIENT_BUFFER`; anything but `APPMODEL_ERROR_NO_PACKAGE` counts.
pub fn process_has_identity() -> bool {
    let mut length = 0u32;
    // SAFETY: a zero length with no buffer only asks for the required size
    let res = unsafe { GetCurrentPackageFullName(&mut length, None) };

    res != APPMODEL_ERROR_NO_PACKAGE
}
