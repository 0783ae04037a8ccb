//! Icon identifiers and severity overlays.
//!
//! The host maps [`IconId`] values to real images. Error ticks are
//! composed icons: a base element icon plus a severity overlay, encoded
//! here in reserved high bits so composition and comparison stay cheap
//! value operations.

use tick_core::Severity;

/// Icon ID type. The host owns the mapping to actual images.
pub type IconId = u32;

/// Bits reserved for severity overlays.
pub const OVERLAY_MASK: IconId = 0xFF00_0000;

/// Overlay bit for a warning tick.
pub const WARNING_OVERLAY: IconId = 0x0100_0000;

/// Overlay bit for an error tick.
pub const ERROR_OVERLAY: IconId = 0x0200_0000;

/// Compose a base icon with the overlay for `severity`.
///
/// Any existing overlay on `icon` is replaced, so the composition is
/// idempotent per severity.
pub fn with_severity_overlay(icon: IconId, severity: Severity) -> IconId {
    let overlay = match severity {
        Severity::None => 0,
        Severity::Warning => WARNING_OVERLAY,
        Severity::Error => ERROR_OVERLAY,
    };
    base_icon(icon) | overlay
}

/// Strip any severity overlay from an icon.
pub fn base_icon(icon: IconId) -> IconId {
    icon & !OVERLAY_MASK
}

/// The severity encoded in an icon's overlay bits.
pub fn overlay_severity(icon: IconId) -> Severity {
    match icon & OVERLAY_MASK {
        ERROR_OVERLAY => Severity::Error,
        WARNING_OVERLAY => Severity::Warning,
        _ => Severity::None,
    }
}
