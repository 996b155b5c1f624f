pub mod handlers;
pub mod surface;
pub mod view;

pub use surface::{DashboardSnapshot, DashboardSurface, RenderSurface};
