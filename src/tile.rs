use std::process::Child;

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The near-square grid for `count` windows: `rows` is the floor of the square root,
/// and columns grow to cover the remainder.
pub(crate) fn grid(count: usize) -> (usize, usize) {
    let rows = (count as f64).sqrt().floor() as usize;

    if rows == 0 {
        return (0, 0);
    }

    let missing = count - rows * rows;
    let cols = rows + missing.div_ceil(rows);

    (rows, cols)
}

/// One cell per window over the given work area, filled column by column.
pub(crate) fn layout(count: usize, area: Rect) -> Vec<Rect> {
    let (rows, cols) = grid(count);

    if rows == 0 {
        return Vec::default();
    }

    let width = area.width / cols as i32;
    let height = area.height / rows as i32;
    let mut cells = Vec::with_capacity(count);

    'columns: for column in 0..cols {
        for row in 0..rows {
            if cells.len() >= count {
                break 'columns;
            }

            cells.push(Rect {
                x: area.x + column as i32 * width,
                y: area.y + row as i32 * height,
                width,
                height,
            });
        }
    }

    cells
}

/// Tile the children's main windows across the target screen.
///
/// The processes need a moment to create their windows before they can be found and
/// moved.
#[cfg(windows)]
pub(crate) fn arrange(children: &[Child], screen: i64) -> Result<(), crate::error::Error> {
    use tracing::warn;

    if children.is_empty() {
        return Ok(());
    }

    std::thread::sleep(std::time::Duration::from_millis(500));

    let area = crate::platform::work_area(screen)?;
    let pids: Vec<u32> = children.iter().map(Child::id).collect();
    let handles = crate::platform::main_windows(&pids)?;

    if handles.len() < pids.len() {
        warn!(
            expected = pids.len(),
            found = handles.len(),
            "some processes have no visible window yet"
        );
    }

    for (handle, cell) in handles.iter().zip(layout(handles.len(), area)) {
        crate::platform::move_window(*handle, &cell)?;
    }

    Ok(())
}

#[cfg(not(windows))]
pub(crate) fn arrange(children: &[Child], _screen: i64) -> Result<(), crate::error::Error> {
    if !children.is_empty() {
        tracing::warn!("window tiling is unavailable on this platform");
    }

    Ok(())
}
