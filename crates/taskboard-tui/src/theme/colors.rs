use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;
pub const DRAG_BORDER: Color = Color::Magenta;

pub const ACTIVE_ITEM: Color = Color::Green;
pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;

pub const PRIORITY_HIGH: Color = Color::LightRed;
pub const PRIORITY_MEDIUM: Color = Color::Yellow;
pub const PRIORITY_LOW: Color = Color::Green;

pub const STATUS_TODO: Color = Color::LightBlue;
pub const STATUS_IN_PROGRESS: Color = Color::Yellow;
pub const STATUS_COMPLETED: Color = Color::Gray;

pub const NOTICE_SUCCESS: Color = Color::Green;
pub const NOTICE_INFO: Color = Color::Cyan;
pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
