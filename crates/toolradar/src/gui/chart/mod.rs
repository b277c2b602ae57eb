pub mod model;
pub mod view;

pub use model::State;
pub use view::draw;

pub const PANEL_WIDTH: f64 = 300.0; // details panel on the right
pub const PANEL_PAD: f64 = 16.0;
pub const CHART_PAD: f64 = 40.0; // breathing room around the quadrant
pub const PHOTO_SIZE: i32 = 72;
pub const HOVER_GROW: f64 = 2.5; // extra dot radius when hovered/selected
pub const LABEL_FONT_SIZE: f64 = 13.0;
pub const TITLE_FONT_SIZE: f64 = 11.0;
pub const PANEL_TITLE_FONT_SIZE: f64 = 16.0;
pub const PANEL_FONT_SIZE: f64 = 12.0;
pub const LINE_HEIGHT: f64 = 17.0;
