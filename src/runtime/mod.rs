pub mod event;
pub mod scheduler;
