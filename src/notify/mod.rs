pub mod notification_model;
pub mod presenter;
