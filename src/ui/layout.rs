use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::Tab;

/// Width of the divider drawn between tab titles
pub const TAB_DIVIDER: &str = " │ ";

/// Banners are drawn in the top-right corner, stacked downwards
pub const BANNER_WIDTH: u16 = 36;
pub const BANNER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub tab_bar: Rect,
    pub body: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    UiAreas {
        size,
        tab_bar: vertical[0],
        body: vertical[1],
        status_line: vertical[2],
        command_line: vertical[3],
    }
}

pub fn tab_label(tab: Tab) -> String {
    format!("{}:{}", tab.shortcut(), tab.title())
}

/// Tab whose title sits under column `col` of the bordered tab bar.
///
/// Mirrors the ratatui `Tabs` layout: one column of padding on each side
/// of every title and a divider between titles.
pub fn tab_at(tab_bar: Rect, col: u16, row: u16) -> Option<Tab> {
    let inner_top = tab_bar.y.saturating_add(1);
    let inner_bottom = tab_bar.y.saturating_add(tab_bar.height).saturating_sub(1);
    if row < inner_top || row >= inner_bottom {
        return None;
    }

    let divider = TAB_DIVIDER.chars().count() as u16;
    let mut x = tab_bar.x.saturating_add(1);
    for tab in Tab::ALL {
        let width = tab_label(tab).chars().count() as u16 + 2;
        if col >= x && col < x + width {
            return Some(tab);
        }
        x += width + divider;
    }
    None
}

/// Area for the `index`-th stacked banner, `None` once the screen is full
pub fn banner_area(size: Rect, index: usize) -> Option<Rect> {
    let width = BANNER_WIDTH.min(size.width.saturating_sub(2));
    let y = size.y + 1 + (index as u16).saturating_mul(BANNER_HEIGHT);
    if width == 0 || y + BANNER_HEIGHT > size.y + size.height {
        return None;
    }
    Some(Rect {
        x: size.x + size.width - width - 1,
        y,
        width,
        height: BANNER_HEIGHT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_at_maps_columns_to_tabs() {
        let bar = Rect::new(0, 0, 100, 3);
        // "1:Dashboard" occupies columns 1..=13 including padding
        assert_eq!(tab_at(bar, 2, 1), Some(Tab::Dashboard));
        assert_eq!(tab_at(bar, 13, 1), Some(Tab::Dashboard));
        // divider
        assert_eq!(tab_at(bar, 15, 1), None);
        assert_eq!(tab_at(bar, 17, 1), Some(Tab::McpConfig));
        // border rows
        assert_eq!(tab_at(bar, 2, 0), None);
        assert_eq!(tab_at(bar, 2, 2), None);
    }

    #[test]
    fn test_banner_areas_stack_and_stop_at_bottom() {
        let size = Rect::new(0, 0, 80, 10);
        let first = banner_area(size, 0).unwrap();
        let second = banner_area(size, 1).unwrap();
        assert_eq!(first.y + BANNER_HEIGHT, second.y);
        assert_eq!(first.x + first.width, 79);
        assert!(banner_area(size, 3).is_none());
    }
}
