use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::catalog::{ArtworkItem, Catalog};
use crate::config::ProfileConfig;
use crate::route::FetchIntent;

/// Shared gallery state as last published by the store.
///
/// The screen controller only ever reads this; all mutation happens in the
/// store worker in response to dispatched fetch intents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryInfo {
    pub name: Option<String>,
    pub art: Vec<ArtworkItem>,
    pub is_loading: bool,
    pub has_error: bool,
}

impl GalleryInfo {
    pub fn loading() -> Self {
        GalleryInfo {
            is_loading: true,
            ..Default::default()
        }
    }

    pub fn error() -> Self {
        GalleryInfo {
            has_error: true,
            ..Default::default()
        }
    }

    pub fn loaded(name: Option<String>, art: Vec<ArtworkItem>) -> Self {
        GalleryInfo {
            name,
            art,
            is_loading: false,
            has_error: false,
        }
    }
}

/// One-way sink for fetch intents. The controller fires and forgets;
/// results come back later as store snapshots.
pub trait FetchDispatcher {
    fn dispatch(&mut self, intent: FetchIntent);
}

#[derive(Debug, Clone)]
struct FetchRequest {
    generation: u64,
    intent: FetchIntent,
}

/// A state snapshot tagged with the request that produced it.
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    pub generation: u64,
    pub info: GalleryInfo,
}

/// Main-thread handle to the catalog worker.
///
/// Each dispatch bumps the request generation. `poll` only surfaces
/// snapshots for the latest issued request, so a fetch that was superseded
/// by a route change can never clobber the newer route's state.
pub struct ArtworkStore {
    request_tx: Sender<FetchRequest>,
    update_rx: Receiver<StoreUpdate>,
    generation: u64,
}

impl ArtworkStore {
    /// Start the worker thread. The catalog is opened inside the worker,
    /// on its own current-thread runtime; an open failure surfaces as
    /// `has_error` snapshots rather than a startup error.
    pub fn spawn(catalog_path: PathBuf, profile: ProfileConfig) -> Self {
        let (request_tx, request_rx) = channel();
        let (update_tx, update_rx) = channel();
        std::thread::spawn(move || worker_loop(catalog_path, profile, request_rx, update_tx));
        Self::with_channels(request_tx, update_rx)
    }

    fn with_channels(request_tx: Sender<FetchRequest>, update_rx: Receiver<StoreUpdate>) -> Self {
        ArtworkStore {
            request_tx,
            update_rx,
            generation: 0,
        }
    }

    /// Drain pending snapshots and return the freshest one, discarding any
    /// tagged with a superseded generation.
    pub fn poll(&mut self) -> Option<GalleryInfo> {
        let mut latest = None;
        while let Ok(update) = self.update_rx.try_recv() {
            if update.generation == self.generation {
                latest = Some(update.info);
            }
        }
        latest
    }
}

impl FetchDispatcher for ArtworkStore {
    fn dispatch(&mut self, intent: FetchIntent) {
        self.generation += 1;
        // Worker gone means we are shutting down; nothing to handle here.
        let _ = self.request_tx.send(FetchRequest {
            generation: self.generation,
            intent,
        });
    }
}

fn worker_loop(
    catalog_path: PathBuf,
    profile: ProfileConfig,
    request_rx: Receiver<FetchRequest>,
    update_tx: Sender<StoreUpdate>,
) {
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(_) => return,
    };
    rt.block_on(async move {
        let catalog = Catalog::open(&catalog_path).await;
        while let Ok(mut req) = request_rx.recv() {
            // Skip straight to the newest pending request; the ones in
            // between were superseded before we even started them.
            while let Ok(newer) = request_rx.try_recv() {
                req = newer;
            }

            let loading = StoreUpdate {
                generation: req.generation,
                info: GalleryInfo::loading(),
            };
            if update_tx.send(loading).is_err() {
                return;
            }

            let info = match &catalog {
                Ok(catalog) => run_fetch(catalog, &profile, &req.intent)
                    .await
                    .unwrap_or_else(|_| GalleryInfo::error()),
                Err(_) => GalleryInfo::error(),
            };
            let done = StoreUpdate {
                generation: req.generation,
                info,
            };
            if update_tx.send(done).is_err() {
                return;
            }
        }
    });
}

async fn run_fetch(
    catalog: &Catalog,
    profile: &ProfileConfig,
    intent: &FetchIntent,
) -> turso::Result<GalleryInfo> {
    match intent {
        FetchIntent::GalleryArtwork(gallery_id) => {
            let (name, art) = catalog.gallery_artwork(gallery_id).await?;
            Ok(GalleryInfo::loaded(name, art))
        }
        FetchIntent::GenreArtwork(genre) => {
            let art = catalog
                .genre_artwork(std::slice::from_ref(genre))
                .await?;
            Ok(GalleryInfo::loaded(None, art))
        }
        FetchIntent::ProfileArtwork => {
            let art = catalog.profile_artwork(&profile.favorite_genres).await?;
            Ok(GalleryInfo::loaded(None, art))
        }
    }
}
