//! Shared workbook theme

use rust_xlsxwriter::Color;

/// Accent fill for title and header rows
pub const HEADER_BLUE: Color = Color::RGB(0x1F4E79);
/// Alternating data fill, even rows
pub const LIGHT_BLUE: Color = Color::RGB(0xF0F8FF);
/// Alternating data fill, odd rows
pub const LIGHT_RED: Color = Color::RGB(0xFFE6E6);
pub const WHITE: Color = Color::White;
