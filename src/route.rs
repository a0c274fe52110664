/// Navigation parameters for a gallery screen.
///
/// At most one of the two fields is meaningfully set per navigation; both
/// absent (or empty) means the default profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub gallery_id: Option<String>,
    pub genre_name: Option<String>,
}

impl Route {
    pub fn gallery(id: impl Into<String>) -> Self {
        Route {
            gallery_id: Some(id.into()),
            genre_name: None,
        }
    }

    pub fn genre(name: impl Into<String>) -> Self {
        Route {
            gallery_id: None,
            genre_name: Some(name.into()),
        }
    }

    pub fn profile() -> Self {
        Route::default()
    }

    /// The identifying field of this route. Only a change of identity
    /// triggers a refetch; rebuilding an identical route does not.
    pub fn identity(&self) -> RouteIdentity {
        if let Some(id) = non_empty(&self.gallery_id) {
            RouteIdentity::Gallery(id.to_string())
        } else if let Some(genre) = non_empty(&self.genre_name) {
            RouteIdentity::Genre(genre.to_string())
        } else {
            RouteIdentity::Profile
        }
    }
}

/// Which data set a route is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteIdentity {
    Gallery(String),
    Genre(String),
    Profile,
}

/// A description of which fetch to perform, decoupled from performing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchIntent {
    GalleryArtwork(String),
    GenreArtwork(String),
    ProfileArtwork,
}

/// Pick the fetch intent for a route. Gallery beats genre beats the
/// profile default; every route classifies to exactly one intent.
pub fn classify(route: &Route) -> FetchIntent {
    if let Some(id) = non_empty(&route.gallery_id) {
        FetchIntent::GalleryArtwork(id.to_string())
    } else if let Some(genre) = non_empty(&route.genre_name) {
        FetchIntent::GenreArtwork(genre.to_string())
    } else {
        FetchIntent::ProfileArtwork
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
