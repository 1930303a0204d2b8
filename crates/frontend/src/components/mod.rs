pub mod help_overlay;
pub mod map_view;
pub mod nav_control;
pub mod overlay;
pub mod pin;
