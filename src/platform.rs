//! Window and monitor primitives via the Win32 API.
//!
//! Everything here is a thin call into platform facilities: enumerate monitors with
//! their work areas, find the main window of each launched process, and reposition a
//! window. Handles cross this module's boundary as plain `isize`, never as raw Win32
//! types.
#![cfg(windows)]

use thiserror::Error;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOF_PRIMARY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowThreadProcessId, IsWindowVisible, SetWindowPos,
    HWND_TOP, SET_WINDOW_POS_FLAGS,
};

use crate::tile::Rect;

/// Failure in the Win32 layer.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    #[error("no screen with index {screen}.")]
    NoSuchScreen { screen: i64 },

    #[error("{0}")]
    Os(String),
}

struct MonitorArea {
    work: Rect,
    primary: bool,
}

unsafe extern "system" fn monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<MonitorArea>) };
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    if unsafe { GetMonitorInfoW(hmonitor, &mut info) }.as_bool() {
        monitors.push(MonitorArea {
            work: Rect {
                x: info.rcWork.left,
                y: info.rcWork.top,
                width: info.rcWork.right - info.rcWork.left,
                height: info.rcWork.bottom - info.rcWork.top,
            },
            primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
        });
    }

    TRUE // continue enumeration
}

/// The work area of the target screen. A negative index selects the primary monitor.
pub(crate) fn work_area(screen: i64) -> Result<Rect, PlatformError> {
    let mut monitors: Vec<MonitorArea> = Vec::default();
    let result = unsafe {
        EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(monitor_callback),
            LPARAM(&mut monitors as *mut Vec<MonitorArea> as isize),
        )
    };

    if !result.as_bool() {
        return Err(PlatformError::Os("EnumDisplayMonitors failed".to_string()));
    }

    let selected = if screen < 0 {
        monitors
            .iter()
            .find(|monitor| monitor.primary)
            .or_else(|| monitors.first())
    } else {
        monitors.get(screen as usize)
    };

    selected
        .map(|monitor| monitor.work)
        .ok_or(PlatformError::NoSuchScreen { screen })
}

/// Callback for EnumWindows that collects the owning pid of each visible, titled
/// top-level window.
unsafe extern "system" fn window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<(u32, isize)>) };

    if unsafe { IsWindowVisible(hwnd) }.as_bool() && unsafe { GetWindowTextLengthW(hwnd) } > 0 {
        let mut pid: u32 = 0;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };

        if pid != 0 {
            windows.push((pid, hwnd.0 as isize));
        }
    }

    TRUE
}

/// The main window handle of each process, in the order the pids are given. Processes
/// with no visible titled window yet are left out.
pub(crate) fn main_windows(pids: &[u32]) -> Result<Vec<isize>, PlatformError> {
    let mut windows: Vec<(u32, isize)> = Vec::with_capacity(64);
    unsafe {
        EnumWindows(
            Some(window_callback),
            LPARAM(&mut windows as *mut Vec<(u32, isize)> as isize),
        )
    }
    .map_err(|e| PlatformError::Os(format!("EnumWindows failed: {e}")))?;

    Ok(pids
        .iter()
        .filter_map(|pid| {
            windows
                .iter()
                .find(|(owner, _)| owner == pid)
                .map(|(_, handle)| *handle)
        })
        .collect())
}

/// Move and resize a window to the given cell, bringing it to the top of the z-order.
pub(crate) fn move_window(handle: isize, cell: &Rect) -> Result<(), PlatformError> {
    let hwnd = HWND(handle as *mut core::ffi::c_void);

    unsafe {
        SetWindowPos(
            hwnd,
            HWND_TOP,
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            SET_WINDOW_POS_FLAGS(0),
        )
    }
    .map_err(|e| PlatformError::Os(format!("SetWindowPos failed: {e}")))
}
