use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const OK: Color = Color::BrightGreen;
pub const FAILED: Color = Color::BrightRed;
pub const SKIPPED: Color = Color::Yellow;
