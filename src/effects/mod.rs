//! The hypnotic effect: properties, change notification, pixel combination and the frame stage.

/// Pixel combination policies.
pub mod combine;
/// User-facing properties.
pub mod config;
/// The effect element.
pub mod hypnotic;
/// Property change notification.
pub mod notify;
