pub mod panels;
pub mod plot;
pub mod table;
pub mod views;

use crate::state::{Action, Notice};

/// What a frame's widgets asked for. Applied to the state once rendering is done.
#[derive(Debug, Default)]
pub struct Pending {
    pub actions: Vec<Action>,
    pub notices: Vec<Notice>,
}
