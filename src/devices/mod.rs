//! Physical models: sunshine, panels, and battery storage.

/// Home battery with loss-applying charge and adaptive nightly target.
pub mod battery;
/// Fixed solar array.
pub mod solar;
/// Sunrise/sunset calendar and intraday sunshine curve.
pub mod sun;

// Re-export the main types for convenience
pub use battery::Battery;
pub use solar::Panel;
pub use sun::{SunCalendar, SunModel};
