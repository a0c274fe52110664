use crate::overlay::{select_overlay, OverlayVariant};
use crate::route::{classify, Route, RouteIdentity};
use crate::store::{FetchDispatcher, GalleryInfo};

/// The two events the gallery screen reacts to.
#[derive(Debug, Clone)]
pub enum ScreenEvent {
    RouteChanged(Route),
    StoreUpdated(GalleryInfo),
}

/// Rendering contract for one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTile {
    /// Stable per-list key, `"art{id}"`.
    pub key: String,
    pub id: i64,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub overlay: OverlayVariant,
}

/// What the presentation layer should currently display. Derived on
/// demand from route + store snapshot; never cached across events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub title: Option<String>,
    pub tiles: Vec<GalleryTile>,
    pub is_loading: bool,
    pub has_error: bool,
    pub can_go_back: bool,
}

/// Header title for the gallery screen, first match wins: suppressed while
/// loading, fixed literal on error, gallery name verbatim, otherwise a
/// recommendation label synthesized from the route's genre.
pub fn resolve_title(route: &Route, info: &GalleryInfo) -> Option<String> {
    if info.is_loading {
        return None;
    }
    if info.has_error {
        return Some("No Artwork Available".to_string());
    }
    if let Some(name) = info.name.as_deref().filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }
    let genre = route
        .genre_name
        .as_deref()
        .filter(|g| !g.is_empty())
        .unwrap_or("You");
    Some(format!("Recommendations for {genre}"))
}

/// Binds route lifecycle to fetch intents and exposes the derived view.
///
/// The controller owns no shared state: the store snapshot it holds is a
/// read-only copy, and the only way it affects the world is dispatching
/// fetch intents through the injected dispatcher.
pub struct ScreenController {
    route: Route,
    last_identity: Option<RouteIdentity>,
    info: GalleryInfo,
}

impl ScreenController {
    /// A fresh controller has no activated identity yet; the first
    /// `RouteChanged` always dispatches.
    pub fn new() -> Self {
        ScreenController {
            route: Route::profile(),
            last_identity: None,
            info: GalleryInfo::loading(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn info(&self) -> &GalleryInfo {
        &self.info
    }

    pub fn handle(&mut self, event: ScreenEvent, dispatcher: &mut dyn FetchDispatcher) {
        match event {
            ScreenEvent::RouteChanged(route) => {
                let identity = route.identity();
                if self.last_identity.as_ref() != Some(&identity) {
                    dispatcher.dispatch(classify(&route));
                    self.last_identity = Some(identity);
                }
                self.route = route;
            }
            ScreenEvent::StoreUpdated(info) => {
                self.info = info;
            }
        }
    }

    /// Recompute the view. Tile order is the store's order, untouched.
    pub fn view_state(&self) -> ViewState {
        let tiles = self
            .info
            .art
            .iter()
            .map(|item| GalleryTile {
                key: format!("art{}", item.id),
                id: item.id,
                title: item.title.clone(),
                thumbnail_url: item.thumbnail_url.clone(),
                overlay: select_overlay(item),
            })
            .collect();

        ViewState {
            title: resolve_title(&self.route, &self.info),
            tiles,
            is_loading: self.info.is_loading,
            has_error: self.info.has_error,
            can_go_back: self
                .route
                .genre_name
                .as_deref()
                .is_some_and(|g| !g.is_empty()),
        }
    }
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArtworkItem, Location};
    use crate::route::FetchIntent;

    #[derive(Default)]
    struct RecordingDispatcher {
        intents: Vec<FetchIntent>,
    }

    impl FetchDispatcher for RecordingDispatcher {
        fn dispatch(&mut self, intent: FetchIntent) {
            self.intents.push(intent);
        }
    }

    fn item(id: i64, matches_profile: Option<bool>, short: Option<&str>) -> ArtworkItem {
        ArtworkItem {
            id,
            title: format!("Artwork {id}"),
            genre: String::new(),
            thumbnail_url: Some(format!("https://catalog.example/thumbs/{id}.jpg")),
            location: short.map(|s| Location {
                short_name: Some(s.to_string()),
            }),
            matches_profile,
        }
    }

    fn loaded(name: Option<&str>, art: Vec<ArtworkItem>) -> GalleryInfo {
        GalleryInfo::loaded(name.map(str::to_string), art)
    }

    // ── title resolution ──

    #[test]
    fn title_suppressed_while_loading() {
        let info = GalleryInfo {
            name: Some("Favorites".into()),
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(resolve_title(&Route::genre("Baroque"), &info), None);
    }

    #[test]
    fn error_literal_beats_everything_but_loading() {
        let info = GalleryInfo {
            name: Some("Favorites".into()),
            has_error: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_title(&Route::profile(), &info),
            Some("No Artwork Available".into())
        );
    }

    #[test]
    fn gallery_name_verbatim() {
        let info = loaded(Some("Favorites"), Vec::new());
        assert_eq!(
            resolve_title(&Route::profile(), &info),
            Some("Favorites".into())
        );
    }

    #[test]
    fn genre_label_when_unnamed() {
        let info = loaded(None, Vec::new());
        assert_eq!(
            resolve_title(&Route::genre("Impressionism"), &info),
            Some("Recommendations for Impressionism".into())
        );
    }

    #[test]
    fn generic_label_for_profile_route() {
        let info = loaded(None, Vec::new());
        assert_eq!(
            resolve_title(&Route::profile(), &info),
            Some("Recommendations for You".into())
        );
    }

    // ── fetch coordination ──

    #[test]
    fn initial_activation_dispatches_exactly_once() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(
            ScreenEvent::RouteChanged(Route::gallery("east-wing")),
            &mut dispatcher,
        );
        assert_eq!(
            dispatcher.intents,
            vec![FetchIntent::GalleryArtwork("east-wing".into())]
        );
    }

    #[test]
    fn unchanged_identity_never_refetches() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(
            ScreenEvent::RouteChanged(Route::gallery("A")),
            &mut dispatcher,
        );
        // Same target, rebuilt route value (history churn).
        controller.handle(
            ScreenEvent::RouteChanged(Route::gallery("A")),
            &mut dispatcher,
        );
        assert_eq!(dispatcher.intents.len(), 1);
    }

    #[test]
    fn identity_change_refetches_even_mid_flight() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(
            ScreenEvent::RouteChanged(Route::gallery("A")),
            &mut dispatcher,
        );
        // No StoreUpdated in between: the previous fetch is still pending.
        controller.handle(
            ScreenEvent::RouteChanged(Route::gallery("B")),
            &mut dispatcher,
        );
        assert_eq!(
            dispatcher.intents,
            vec![
                FetchIntent::GalleryArtwork("A".into()),
                FetchIntent::GalleryArtwork("B".into()),
            ]
        );
    }

    #[test]
    fn profile_to_genre_to_profile_dispatches_each_time() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        for route in [Route::profile(), Route::genre("Cubism"), Route::profile()] {
            controller.handle(ScreenEvent::RouteChanged(route), &mut dispatcher);
        }
        assert_eq!(
            dispatcher.intents,
            vec![
                FetchIntent::ProfileArtwork,
                FetchIntent::GenreArtwork("Cubism".into()),
                FetchIntent::ProfileArtwork,
            ]
        );
    }

    // ── derived view ──

    #[test]
    fn tiles_preserve_store_order_and_key_format() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(ScreenEvent::RouteChanged(Route::profile()), &mut dispatcher);
        let art = vec![
            item(7, Some(true), None),
            item(3, Some(false), None),
            item(5, Some(true), None),
        ];
        controller.handle(
            ScreenEvent::StoreUpdated(loaded(None, art)),
            &mut dispatcher,
        );

        let vs = controller.view_state();
        let keys: Vec<&str> = vs.tiles.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["art7", "art3", "art5"]);
        assert_eq!(vs.tiles[0].overlay, OverlayVariant::ProfileMatch);
        assert_eq!(vs.tiles[1].overlay, OverlayVariant::None);
    }

    #[test]
    fn location_overlays_flow_through_for_gallery_listings() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(
            ScreenEvent::RouteChanged(Route::gallery("east-wing")),
            &mut dispatcher,
        );
        let art = vec![item(1, None, Some("Room 21")), item(2, None, None)];
        controller.handle(
            ScreenEvent::StoreUpdated(loaded(Some("East Wing"), art)),
            &mut dispatcher,
        );

        let vs = controller.view_state();
        assert_eq!(vs.title.as_deref(), Some("East Wing"));
        assert_eq!(vs.tiles[0].overlay, OverlayVariant::Location("Room 21".into()));
        assert_eq!(vs.tiles[1].overlay, OverlayVariant::None);
        assert!(!vs.can_go_back);
    }

    #[test]
    fn back_only_available_on_genre_routes() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(
            ScreenEvent::RouteChanged(Route::genre("Baroque")),
            &mut dispatcher,
        );
        controller.handle(
            ScreenEvent::StoreUpdated(loaded(None, Vec::new())),
            &mut dispatcher,
        );
        assert!(controller.view_state().can_go_back);

        controller.handle(ScreenEvent::RouteChanged(Route::profile()), &mut dispatcher);
        assert!(!controller.view_state().can_go_back);
    }

    #[test]
    fn loading_snapshot_suppresses_title_and_flags_loading() {
        let mut controller = ScreenController::new();
        let mut dispatcher = RecordingDispatcher::default();
        controller.handle(ScreenEvent::RouteChanged(Route::profile()), &mut dispatcher);
        controller.handle(
            ScreenEvent::StoreUpdated(GalleryInfo::loading()),
            &mut dispatcher,
        );
        let vs = controller.view_state();
        assert!(vs.is_loading);
        assert_eq!(vs.title, None);
        assert!(vs.tiles.is_empty());
    }
}
