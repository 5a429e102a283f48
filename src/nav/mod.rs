pub mod focus;
pub mod sidebar;
