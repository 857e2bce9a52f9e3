pub mod bubble;
pub mod panel;
pub mod widget;
