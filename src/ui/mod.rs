//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Main draw functions
//! - `theme.rs` - Color themes and presets
//! - `layout.rs` - Feedback list paging
//! - `rating_bar.rs` - Rating selector widget
//! - `feedback_card.rs` - Feedback card widget

mod draw;
pub mod feedback_card;
pub mod layout;
pub mod rating_bar;
pub mod theme;

// Re-export main draw function
pub use draw::draw;

pub use theme::Theme;
