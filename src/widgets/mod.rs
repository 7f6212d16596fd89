pub mod base;
pub mod date_time;
pub mod text_edit;
pub mod traits;
pub mod validators;
