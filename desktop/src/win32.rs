//! Win32 focused-field access and message boxes.
//!
//! The field is reached through window messages, which the system marshals
//! across process boundaries, so any standard edit control in any process works.

use std::io;
use std::mem::{self, size_of};
use std::ptr;

use edhere_core::{FocusResolver, FocusedControl, Prompter};
use edhere_types::{APP_TITLE, ErrorKind, TextBuffer, recovery_message};
use windows_sys::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GUITHREADINFO, GWL_STYLE, GetGUIThreadInfo, GetWindowLongW, IDYES, IsWindow,
    MB_ICONEXCLAMATION, MB_OK, MB_SETFOREGROUND, MB_YESNO, MESSAGEBOX_STYLE, MessageBoxW,
    SendMessageW, WM_GETTEXT, WM_GETTEXTLENGTH, WM_SETTEXT, WS_CHILD,
};

fn to_wide_null(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(Some(0)).collect()
}

/// Resolves the focused window of the foreground thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Resolver;

impl FocusResolver for Win32Resolver {
    type Control = Win32Control;

    fn resolve(&self) -> Result<Win32Control, ErrorKind> {
        // SAFETY: GUITHREADINFO is plain data; all-zero is a valid value.
        let mut info: GUITHREADINFO = unsafe { mem::zeroed() };
        info.cbSize = size_of::<GUITHREADINFO>() as u32;

        // SAFETY: `info` is a valid, correctly sized out parameter.
        if unsafe { GetGUIThreadInfo(0, &raw mut info) } == 0 {
            tracing::warn!(
                "GetGUIThreadInfo failed: {}",
                io::Error::last_os_error()
            );
            return Err(ErrorKind::NoFocus);
        }
        let hwnd = info.hwndFocus;
        if hwnd.is_null() {
            tracing::warn!("Foreground thread has no focused window");
            return Err(ErrorKind::NoFocus);
        }

        // SAFETY: any HWND value is accepted; invalid handles yield 0.
        let style = unsafe { GetWindowLongW(hwnd, GWL_STYLE) } as u32;
        if style == 0 {
            tracing::warn!(
                "GetWindowLongW(GWL_STYLE) failed: {}",
                io::Error::last_os_error()
            );
            return Err(ErrorKind::NoStyle);
        }
        if style & WS_CHILD == 0 {
            tracing::warn!(style, "Focused window is not a child control");
            return Err(ErrorKind::NoControl);
        }

        tracing::debug!(hwnd = ?hwnd, "Focused control resolved");
        Ok(Win32Control { hwnd })
    }
}

/// A focused child window, addressed by its handle.
#[derive(Debug)]
pub struct Win32Control {
    hwnd: HWND,
}

impl FocusedControl for Win32Control {
    fn read_text(&self) -> Result<TextBuffer, ErrorKind> {
        // SAFETY: WM_GETTEXTLENGTH takes no pointers.
        let reported = unsafe { SendMessageW(self.hwnd, WM_GETTEXTLENGTH, 0, 0) };
        let len = usize::try_from(reported).unwrap_or(0);
        let capacity = len.checked_add(1).ok_or(ErrorKind::NoMemory)?;

        let mut units: Vec<u16> = Vec::new();
        units
            .try_reserve_exact(capacity)
            .map_err(|_| ErrorKind::NoMemory)?;
        units.resize(capacity, 0);

        // SAFETY: the buffer holds `capacity` units, which is the limit passed in wParam.
        let copied = unsafe {
            SendMessageW(
                self.hwnd,
                WM_GETTEXT,
                capacity as WPARAM,
                units.as_mut_ptr() as LPARAM,
            )
        };
        units.truncate(usize::try_from(copied).unwrap_or(0).min(len));
        Ok(TextBuffer::from_units(units))
    }

    fn write_text(&self, text: &TextBuffer) {
        let terminated = text.to_terminated();
        // SAFETY: `terminated` is NUL-terminated and outlives the synchronous call.
        unsafe {
            SendMessageW(self.hwnd, WM_SETTEXT, 0, terminated.as_ptr() as LPARAM);
        }
    }

    fn is_alive(&self) -> bool {
        // SAFETY: IsWindow accepts any handle value.
        unsafe { IsWindow(self.hwnd) != 0 }
    }
}

/// Modal message boxes owned by no window.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageBoxPrompter;

impl MessageBoxPrompter {
    fn show(text: &str, style: MESSAGEBOX_STYLE) -> i32 {
        let text = to_wide_null(text);
        let title = to_wide_null(APP_TITLE);
        // SAFETY: both strings are NUL-terminated and live across the call.
        unsafe {
            MessageBoxW(
                ptr::null_mut(),
                text.as_ptr(),
                title.as_ptr(),
                style | MB_ICONEXCLAMATION | MB_SETFOREGROUND,
            )
        }
    }
}

impl Prompter for MessageBoxPrompter {
    fn warn(&self, kind: ErrorKind) {
        Self::show(&kind.to_string(), MB_OK);
    }

    fn offer_recovery(&self, kind: ErrorKind) -> bool {
        Self::show(&recovery_message(kind), MB_YESNO) == IDYES
    }
}
