use std::cell::RefCell;
use std::mem;
use std::sync::Once;

use roundify_core::{CornerMasks, Overlay, Rect, WindowResult};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    AC_SRC_ALPHA, AC_SRC_OVER, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION,
    CreateCompatibleDC, CreateDIBSection, DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC,
    ReleaseDC, SelectObject,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GWL_EXSTYLE, GetWindowLongPtrW,
    HWND_TOPMOST, RegisterClassW, SW_HIDE, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOMOVE,
    SWP_NOSIZE, SetWindowLongPtrW, SetWindowPos, ShowWindow, ULW_ALPHA, UpdateLayeredWindow,
    WINDOW_EX_STYLE, WM_CLOSE, WM_MOUSEACTIVATE, WM_NCHITTEST, WNDCLASSW, WS_EX_LAYERED,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::{PCWSTR, w};

/// Window class shared by every overlay.
const CLASS_NAME: PCWSTR = w!("RoundifyOverlay");

/// `WM_NCHITTEST` result that passes the hit on to the window underneath.
const HT_TRANSPARENT: isize = -1;

/// `WM_MOUSEACTIVATE` result that refuses activation and keeps the click.
const MA_NOACTIVATE: isize = 3;

static REGISTER_CLASS: Once = Once::new();

// Close requests raised by the window procedure, drained by the UI loop.
thread_local! {
    static CLOSE_REQUESTS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Extended styles every overlay carries: hidden from Alt+Tab and the
/// taskbar, click-through, alpha-composited, topmost, never activated.
fn overlay_ex_style() -> WINDOW_EX_STYLE {
    WS_EX_TOOLWINDOW | WS_EX_TRANSPARENT | WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_NOACTIVATE
}

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(overlay_wnd_proc),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_NCHITTEST => LRESULT(HT_TRANSPARENT),
        WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE),
        // Never let DefWindowProc destroy the window: the UI loop has to
        // stop the enforcer and unregister the handle first.
        WM_CLOSE => {
            CLOSE_REQUESTS.with(|q| q.borrow_mut().push(hwnd.0 as usize));
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Takes the handles of overlays that were asked to close since the last
/// call. Only meaningful on the thread that owns the overlays.
pub fn take_close_requests() -> Vec<usize> {
    CLOSE_REQUESTS.with(|q| mem::take(&mut *q.borrow_mut()))
}

/// A borderless, click-through, layered window covering one display.
///
/// Painted with `UpdateLayeredWindow` and per-pixel alpha: only the four
/// corner masks are opaque, everything else is fully transparent.
pub struct OverlayWindow {
    hwnd: HWND,
    bounds: Rect,
}

impl OverlayWindow {
    /// Creates a hidden overlay spanning `bounds`.
    pub fn new(bounds: Rect) -> WindowResult<Self> {
        if bounds.is_empty() {
            return Err(format!("display bounds {bounds} are empty").into());
        }
        ensure_class_registered();

        let hwnd = unsafe {
            CreateWindowExW(
                overlay_ex_style(),
                CLASS_NAME,
                w!("Roundify"),
                WS_POPUP,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                None,
                None,
                None,
                None,
            )?
        };

        let window = Self { hwnd, bounds };
        window.apply_ex_style();
        Ok(window)
    }

    /// Re-applies the overlay style bits in case the system dropped any
    /// of them during creation.
    fn apply_ex_style(&self) {
        let wanted = overlay_ex_style().0 as isize;
        // SAFETY: reading and writing the extended style of our own window.
        unsafe {
            let current = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE);
            if current & wanted != wanted {
                SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, current | wanted);
            }
        }
    }

    /// Rasterizes the masks into a display-sized bitmap and hands it to
    /// the compositor.
    fn render(&self, masks: &CornerMasks) -> WindowResult<()> {
        let (w, h) = (self.bounds.width, self.bounds.height);

        unsafe {
            let screen_dc = GetDC(None);
            let mem_dc = CreateCompatibleDC(Some(screen_dc));

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: w,
                    biHeight: -h, // top-down
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let mut bits = std::ptr::null_mut();
            let bmp = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
            {
                Ok(bmp) if !bits.is_null() => bmp,
                Ok(bmp) => {
                    let _ = DeleteObject(bmp.into());
                    let _ = DeleteDC(mem_dc);
                    let _ = ReleaseDC(None, screen_dc);
                    return Err("CreateDIBSection returned no pixel buffer".into());
                }
                Err(e) => {
                    let _ = DeleteDC(mem_dc);
                    let _ = ReleaseDC(None, screen_dc);
                    return Err(e.into());
                }
            };
            let old = SelectObject(mem_dc, bmp.into());

            // SAFETY: `bits` is non-null and points to `w * h` zeroed
            // pixels allocated by CreateDIBSection.
            let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (w * h) as usize);
            masks.paint(w, h, |x, y, alpha| {
                // Premultiplied black: only the alpha byte is non-zero.
                let pixel = &mut buf[(y * w + x) as usize];
                *pixel = (*pixel).max(u32::from(alpha) << 24);
            });

            let pt_dst = POINT {
                x: self.bounds.x,
                y: self.bounds.y,
            };
            let size = SIZE { cx: w, cy: h };
            let pt_src = POINT::default();
            let blend = BLENDFUNCTION {
                BlendOp: AC_SRC_OVER as u8,
                SourceConstantAlpha: 255,
                AlphaFormat: AC_SRC_ALPHA as u8,
                ..Default::default()
            };

            let result = UpdateLayeredWindow(
                self.hwnd,
                Some(screen_dc),
                Some(&pt_dst),
                Some(&size),
                Some(mem_dc),
                Some(&pt_src),
                COLORREF(0),
                Some(&blend),
                ULW_ALPHA,
            );

            SelectObject(mem_dc, old);
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);

            result?;
        }
        Ok(())
    }
}

impl Overlay for OverlayWindow {
    fn id(&self) -> usize {
        self.hwnd.0 as usize
    }

    fn force_topmost(&self) -> WindowResult<()> {
        // SAFETY: SetWindowPos only reorders; the handle may already be
        // gone, in which case the call fails and the caller moves on.
        unsafe {
            SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn show(&mut self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    fn hide(&mut self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn apply_masks(&mut self, masks: &CornerMasks) -> WindowResult<()> {
        self.render(masks)
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
