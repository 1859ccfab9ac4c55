use ratatui::{layout::Rect, widgets::ListState};

// ---------------------------------------------------------------------------
// Hit-testing
// ---------------------------------------------------------------------------

/// Return `true` when (`col`, `row`) falls inside `area`.
pub fn in_area(col: u16, row: u16, area: Rect) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

// ---------------------------------------------------------------------------
// Clipping
// ---------------------------------------------------------------------------

/// Clip a run of `width` cells starting at `x` (possibly negative) to a
/// window `[0, visible)`. Returns the visible start and width, or `None`
/// when nothing of it is on screen.
pub fn clip_span(x: i64, width: u16, visible: u16) -> Option<(u16, u16)> {
    let start = x.max(0);
    let end = (x + width as i64).min(visible as i64);
    (end > start).then(|| (start as u16, (end - start) as u16))
}

// ---------------------------------------------------------------------------
// List navigation helpers
// ---------------------------------------------------------------------------

/// Advance the selection in a list, wrapping around.
pub fn list_next(state: &mut ListState, len: usize) {
    if len == 0 { return; }
    let i = match state.selected() {
        Some(i) => (i + 1) % len,
        None => 0,
    };
    state.select(Some(i));
}

/// Move the selection backwards in a list, wrapping around.
pub fn list_previous(state: &mut ListState, len: usize) {
    if len == 0 { return; }
    let i = match state.selected() {
        Some(i) => if i == 0 { len - 1 } else { i - 1 },
        None => 0,
    };
    state.select(Some(i));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_span_trims_both_edges() {
        assert_eq!(clip_span(2, 4, 10), Some((2, 4)));
        assert_eq!(clip_span(-2, 4, 10), Some((0, 2)));
        assert_eq!(clip_span(8, 4, 10), Some((8, 2)));
        assert_eq!(clip_span(-4, 4, 10), None);
        assert_eq!(clip_span(10, 4, 10), None);
    }

    #[test]
    fn list_navigation_wraps() {
        let mut state = ListState::default();
        list_previous(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
        list_previous(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        list_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
    }
}
