//! Shared utility functions

/// Mask a DNI for logging, keeping only the last three characters.
pub fn mask_dni(dni: &str) -> String {
    let count = dni.chars().count();
    let visible = count.min(3);
    let mut masked: String = "*".repeat(count - visible);
    masked.extend(dni.chars().skip(count - visible));
    masked
}
