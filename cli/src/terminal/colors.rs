use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 110, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 196, b: 90 };
pub const SEPARATOR: Color = Color::TrueColor { r: 110, g: 110, b: 120 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 225 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 120, g: 230, b: 160 };
pub const FIRMWARE: Color = Color::TrueColor { r: 200, g: 160, b: 255 };
pub const MODEL_BASE: Color = Color::TrueColor { r: 150, g: 190, b: 255 };
pub const MODEL_ELITE: Color = Color::TrueColor { r: 255, g: 150, b: 80 };
