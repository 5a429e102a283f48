pub mod form_model;
pub mod payload;
pub mod validator;
