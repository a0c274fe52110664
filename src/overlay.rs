use crate::catalog::ArtworkItem;

/// The mutually exclusive badge shown on a gallery tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayVariant {
    /// Star badge: this artwork matches the viewer's profile.
    ProfileMatch,
    /// Physical-location label, e.g. "Room 12".
    Location(String),
    None,
}

/// Decide which overlay a tile gets.
///
/// Profile-context listings always carry `matches_profile` (even when
/// false) and never show location; gallery and genre listings never carry
/// it and show the location when known. The presence of the field alone
/// decides the branch, regardless of its truth value.
pub fn select_overlay(item: &ArtworkItem) -> OverlayVariant {
    match item.matches_profile {
        Some(true) => OverlayVariant::ProfileMatch,
        Some(false) => OverlayVariant::None,
        None => match item
            .location
            .as_ref()
            .and_then(|loc| loc.short_name.as_deref())
        {
            Some(short) if !short.is_empty() => OverlayVariant::Location(short.to_string()),
            _ => OverlayVariant::None,
        },
    }
}
