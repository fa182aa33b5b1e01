//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{ColumnId, Priority};
use crate::notice::NoticeVariant;

/// Accent for the To Do column
pub const SLATE: Color = Color::Rgb(100, 116, 139);
/// Accent for the Doing column
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Accent for the Done column
pub const DARK_GREEN: Color = Color::Rgb(0, 120, 0);
pub const DARK_RED: Color = Color::Rgb(150, 0, 0);
pub const CARD_BG: Color = Color::DarkGray;

pub fn column_color(column: ColumnId) -> Color {
    match column {
        ColumnId::Todo => SLATE,
        ColumnId::Doing => GOLD,
        ColumnId::Done => DARK_GREEN,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

pub fn notice_color(variant: NoticeVariant) -> Color {
    match variant {
        NoticeVariant::Default => Color::Blue,
        NoticeVariant::Destructive => DARK_RED,
    }
}

/// Readable foreground on top of `bg`.
pub fn text_on(bg: Color) -> Color {
    match bg {
        GOLD => Color::Rgb(20, 20, 20),
        _ => Color::White,
    }
}
