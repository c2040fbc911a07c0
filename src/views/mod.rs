//! The concrete views the host swaps in and out of the body region, and
//! the factory registry contract they are constructed through.

pub mod log;
pub mod notes;
pub mod schedule;

use std::rc::Rc;

use anyhow::Result;

use crate::config::Config;
use crate::focus::{FocusNode, ViewParams};
use crate::store::Store;

/// What every view factory gets to work with.
pub struct ViewContext {
    pub store: Rc<Store>,
    pub config: Config,
}

/// Constructs a view body. A factory error is surfaced at the navigation
/// boundary; the previous view stays in place.
pub type ViewFactory = Box<dyn Fn(&ViewContext, ViewParams) -> Result<Box<dyn FocusNode>>>;

pub use log::LogView;
pub use notes::NotesView;
pub use schedule::ScheduleView;
