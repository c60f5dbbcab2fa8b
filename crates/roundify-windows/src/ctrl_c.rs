//! Console Ctrl+C / Ctrl+Break handling via `SetConsoleCtrlHandler`.

use std::sync::OnceLock;

use roundify_core::WindowResult;
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

type Callback = Box<dyn Fn() + Send + Sync>;

/// Written once by `set_handler`, read by the console callback.
static CALLBACK: OnceLock<Callback> = OnceLock::new();

/// Registers `on_interrupt` to run when the console receives Ctrl+C or
/// Ctrl+Break. Only one handler can be registered per process.
///
/// The callback runs on a thread the system creates for the signal.
pub fn set_handler(on_interrupt: impl Fn() + Send + Sync + 'static) -> WindowResult<()> {
    CALLBACK
        .set(Box::new(on_interrupt))
        .map_err(|_| "Ctrl+C handler already registered")?;
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }?;
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(callback) = CALLBACK.get()
    {
        callback();
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
