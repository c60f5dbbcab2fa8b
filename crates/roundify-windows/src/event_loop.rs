use std::cell::RefCell;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread;

use roundify_core::{ForegroundChange, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_SYSTEM_FOREGROUND, PostThreadMessageW, WINEVENT_OUTOFCONTEXT, WM_QUIT,
};

use crate::event;
use crate::message_pump::run_message_pump;

/// Capacity of the channel between the hook thread and the UI loop.
pub const CHANNEL_CAPACITY: usize = 64;

/// Messages delivered to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopMsg {
    Foreground(ForegroundChange),
    Shutdown,
}

// Thread-local sender for the WinEvent callback.
thread_local! {
    static EVENT_SENDER: RefCell<Option<SyncSender<LoopMsg>>> = const { RefCell::new(None) };
}

/// Starts the foreground hook on a new thread.
///
/// Every foreground change on a top-level window is delivered through
/// `tx`. Our own overlays are not skipped here: filtering them is the
/// registry's job.
pub fn start(tx: SyncSender<LoopMsg>) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        EVENT_SENDER.with(|cell| {
            *cell.borrow_mut() = Some(tx);
        });

        let thread_id = unsafe { GetCurrentThreadId() };

        // SAFETY: the callback runs on this thread while it pumps
        // messages. WINEVENT_OUTOFCONTEXT keeps it in our process.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_SYSTEM_FOREGROUND,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT,
            )
        };

        if hook.is_invalid() {
            let _ = ready_tx.send(Err("Failed to set foreground WinEvent hook".to_string()));
            return;
        }

        let _ = ready_tx.send(Ok(thread_id));

        run_message_pump();

        unsafe {
            let _ = UnhookWinEvent(hook);
        }
        EVENT_SENDER.with(|cell| cell.borrow_mut().take());
    });

    let thread_id: u32 = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "event loop thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for stopping the hook thread.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Signals the hook thread to stop and waits for it to unhook.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    let Some(change) = event::translate(event, hwnd, id_object) else {
        return;
    };
    EVENT_SENDER.with(|cell| {
        if let Some(sender) = cell.borrow().as_ref() {
            forward(sender, change);
        }
    });
}

/// Queues a change without blocking the hook thread. When the UI loop
/// has fallen 64 changes behind, the newest one is dropped and logged;
/// the next foreground change recovers any reinforcement it would have
/// started.
fn forward(sender: &SyncSender<LoopMsg>, change: ForegroundChange) {
    match sender.try_send(LoopMsg::Foreground(change)) {
        Ok(()) | Err(TrySendError::Disconnected(_)) => {}
        Err(TrySendError::Full(LoopMsg::Foreground(change))) => {
            roundify_core::log_debug!("Event queue full, dropped {change}");
        }
        Err(TrySendError::Full(_)) => {}
    }
}
