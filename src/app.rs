use crate::catalog::{ArtworkRow, Catalog};
use crate::route::Route;
use crate::screen::{ScreenController, ScreenEvent};
use crate::store::FetchDispatcher;

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Gallery,
    Detail,
}

/// Input mode for the genre filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

// Grid geometry. Rows above/below the tile area: header(4) + input(3) +
// grid borders(2) + status(1).
pub const GRID_OVERHEAD: u16 = 10;
pub const TILE_WIDTH: u16 = 26;
pub const TILE_HEIGHT: u16 = 5;

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,

    pub controller: ScreenController,
    route_stack: Vec<Route>,

    // Gallery grid state
    pub selected: usize,
    pub grid_cols: usize,
    pub visible_rows: usize,
    pub row_offset: usize,

    // Genre filter input
    pub genre_input: String,
    pub input_mode: InputMode,

    // Detail view state
    pub detail: Option<ArtworkRow>,

    pub status_msg: String,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        App {
            catalog,
            should_quit: false,
            view: View::Gallery,
            show_help: false,
            controller: ScreenController::new(),
            route_stack: Vec::new(),
            selected: 0,
            grid_cols: 3,
            visible_rows: 4,
            row_offset: 0,
            genre_input: String::new(),
            input_mode: InputMode::Normal,
            detail: None,
            status_msg: "Loading artwork...".to_string(),
        }
    }

    /// Activate the initial route; dispatches its fetch intent.
    pub fn init(&mut self, route: Route, dispatch: &mut dyn FetchDispatcher) {
        self.route_stack.push(route.clone());
        self.controller
            .handle(ScreenEvent::RouteChanged(route), dispatch);
    }

    pub fn push_route(&mut self, route: Route, dispatch: &mut dyn FetchDispatcher) {
        self.route_stack.push(route.clone());
        self.reset_selection();
        self.controller
            .handle(ScreenEvent::RouteChanged(route), dispatch);
    }

    /// Pop back to the previous route. Returns false at the stack bottom.
    pub fn pop_route(&mut self, dispatch: &mut dyn FetchDispatcher) -> bool {
        if self.route_stack.len() < 2 {
            return false;
        }
        self.route_stack.pop();
        let route = self
            .route_stack
            .last()
            .cloned()
            .unwrap_or_else(Route::profile);
        self.reset_selection();
        self.controller
            .handle(ScreenEvent::RouteChanged(route), dispatch);
        true
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.row_offset = 0;
    }

    fn tile_count(&self) -> usize {
        self.controller.info().art.len()
    }

    /// Recompute grid geometry from the terminal size.
    pub fn update_grid(&mut self, width: u16, height: u16) {
        self.grid_cols = (width.saturating_sub(2) / TILE_WIDTH).max(1) as usize;
        self.visible_rows = (height.saturating_sub(GRID_OVERHEAD) / TILE_HEIGHT).max(1) as usize;
        self.ensure_visible();
    }

    pub fn select_left(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
        }
    }

    pub fn select_right(&mut self) {
        if self.selected + 1 < self.tile_count() {
            self.selected += 1;
            self.ensure_visible();
        }
    }

    pub fn select_up(&mut self) {
        if self.selected >= self.grid_cols {
            self.selected -= self.grid_cols;
            self.ensure_visible();
        }
    }

    pub fn select_down(&mut self) {
        let count = self.tile_count();
        if count == 0 {
            return;
        }
        if self.selected + self.grid_cols < count {
            self.selected += self.grid_cols;
        } else if self.selected < count - 1 {
            // Partial last row: land on its final tile.
            self.selected = count - 1;
        }
        self.ensure_visible();
    }

    pub fn select_page_down(&mut self) {
        let count = self.tile_count();
        if count == 0 {
            return;
        }
        let step = self.grid_cols * self.visible_rows;
        self.selected = (self.selected + step).min(count - 1);
        self.ensure_visible();
    }

    pub fn select_page_up(&mut self) {
        let step = self.grid_cols * self.visible_rows;
        self.selected = self.selected.saturating_sub(step);
        self.ensure_visible();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_visible();
    }

    pub fn select_last(&mut self) {
        self.selected = self.tile_count().saturating_sub(1);
        self.ensure_visible();
    }

    /// Re-clamp after a store update shrank or replaced the collection.
    pub fn clamp_selection(&mut self) {
        self.ensure_visible();
    }

    /// Keep the selected tile's row inside the visible window.
    fn ensure_visible(&mut self) {
        let count = self.tile_count();
        if count == 0 {
            self.selected = 0;
            self.row_offset = 0;
            return;
        }
        self.selected = self.selected.min(count - 1);
        let row = self.selected / self.grid_cols;
        if row < self.row_offset {
            self.row_offset = row;
        } else if row >= self.row_offset + self.visible_rows {
            self.row_offset = row + 1 - self.visible_rows;
        }
    }

    /// Open the detail view for the currently selected artwork.
    pub async fn open_detail(&mut self) -> turso::Result<()> {
        let Some(id) = self.controller.info().art.get(self.selected).map(|i| i.id) else {
            return Ok(());
        };
        match self.catalog.get_artwork(id).await? {
            Some(row) => {
                self.detail = Some(row);
                self.view = View::Detail;
            }
            None => {
                self.status_msg = format!("Artwork {id} not found in catalog");
            }
        }
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.view = View::Gallery;
    }

    /// Jump from the detail view to the gallery the artwork hangs in.
    pub fn visit_gallery(&mut self, dispatch: &mut dyn FetchDispatcher) {
        let Some(gallery_id) = self
            .detail
            .as_ref()
            .map(|d| d.gallery_id.clone())
            .filter(|id| !id.is_empty())
        else {
            self.status_msg = "This artwork is not on display in a gallery".to_string();
            return;
        };
        self.close_detail();
        self.push_route(Route::gallery(gallery_id), dispatch);
    }

    /// Apply the typed genre filter as a new route.
    pub fn submit_genre(&mut self, dispatch: &mut dyn FetchDispatcher) {
        let genre = self.genre_input.trim().to_string();
        self.input_mode = InputMode::Normal;
        if genre.is_empty() {
            return;
        }
        self.genre_input.clear();
        self.push_route(Route::genre(genre), dispatch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::FetchIntent;
    use crate::screen::ScreenEvent;
    use crate::store::GalleryInfo;

    #[derive(Default)]
    struct RecordingDispatcher {
        intents: Vec<FetchIntent>,
    }

    impl FetchDispatcher for RecordingDispatcher {
        fn dispatch(&mut self, intent: FetchIntent) {
            self.intents.push(intent);
        }
    }

    async fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::open(&dir.path().join("catalog.db")).await.unwrap();
        catalog.seed_demo().await.unwrap();
        let app = App::new(catalog);
        (dir, app)
    }

    #[tokio::test]
    async fn push_then_pop_reissues_the_previous_fetch() {
        let (_dir, mut app) = test_app().await;
        let mut dispatcher = RecordingDispatcher::default();
        app.init(Route::profile(), &mut dispatcher);
        app.push_route(Route::genre("Baroque"), &mut dispatcher);
        assert!(app.pop_route(&mut dispatcher));
        assert_eq!(
            dispatcher.intents,
            vec![
                FetchIntent::ProfileArtwork,
                FetchIntent::GenreArtwork("Baroque".into()),
                FetchIntent::ProfileArtwork,
            ]
        );
        // Bottom of the stack: nothing to pop to.
        assert!(!app.pop_route(&mut dispatcher));
    }

    #[tokio::test]
    async fn grid_selection_clamps_and_scrolls() {
        let (_dir, mut app) = test_app().await;
        let mut dispatcher = RecordingDispatcher::default();
        app.init(Route::gallery("east-wing"), &mut dispatcher);
        let (name, art) = app.catalog.gallery_artwork("east-wing").await.unwrap();
        app.controller.handle(
            ScreenEvent::StoreUpdated(GalleryInfo::loaded(name, art)),
            &mut dispatcher,
        );

        app.grid_cols = 2;
        app.visible_rows = 1;
        app.select_right();
        app.select_down(); // 3 items, lands on the last one
        assert_eq!(app.selected, 2);
        assert_eq!(app.row_offset, 1);
        app.select_down();
        assert_eq!(app.selected, 2);
        app.select_page_up();
        assert_eq!(app.selected, 0);
        assert_eq!(app.row_offset, 0);
    }

    #[tokio::test]
    async fn open_detail_loads_the_selected_row() {
        let (_dir, mut app) = test_app().await;
        let mut dispatcher = RecordingDispatcher::default();
        app.init(Route::gallery("east-wing"), &mut dispatcher);
        let (name, art) = app.catalog.gallery_artwork("east-wing").await.unwrap();
        app.controller.handle(
            ScreenEvent::StoreUpdated(GalleryInfo::loaded(name, art)),
            &mut dispatcher,
        );

        app.selected = 1;
        app.open_detail().await.unwrap();
        assert_eq!(app.view, View::Detail);
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.id, 121);
        assert_eq!(detail.gallery_name, "East Wing");

        app.close_detail();
        assert_eq!(app.view, View::Gallery);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn visit_gallery_pushes_the_owning_gallery_route() {
        let (_dir, mut app) = test_app().await;
        let mut dispatcher = RecordingDispatcher::default();
        app.init(Route::profile(), &mut dispatcher);
        app.detail = app.catalog.get_artwork(110).await.unwrap();
        app.view = View::Detail;

        app.visit_gallery(&mut dispatcher);
        assert_eq!(app.view, View::Gallery);
        assert_eq!(
            dispatcher.intents.last(),
            Some(&FetchIntent::GalleryArtwork("modern-annex".into()))
        );
    }

    #[tokio::test]
    async fn blank_genre_input_is_ignored() {
        let (_dir, mut app) = test_app().await;
        let mut dispatcher = RecordingDispatcher::default();
        app.init(Route::profile(), &mut dispatcher);
        app.input_mode = InputMode::Editing;
        app.genre_input = "   ".to_string();
        app.submit_genre(&mut dispatcher);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(dispatcher.intents, vec![FetchIntent::ProfileArtwork]);
    }
}
