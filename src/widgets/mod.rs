pub mod header;
pub mod input;
pub mod list;
pub mod nav;
pub mod theme;

pub use header::Header;
pub use input::LineInput;
pub use list::SelectList;
pub use nav::NavMenu;
