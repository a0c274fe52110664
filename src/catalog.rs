use chrono::{DateTime, Utc};
use std::path::Path;
use turso::Value;

/// Physical placement of an artwork inside the museum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub short_name: Option<String>,
}

/// Lightweight record for the tile grid.
///
/// `matches_profile` is three-state: `Some(_)` only on rows coming from a
/// profile fetch; gallery and genre fetches leave it `None`, which the
/// overlay selector reads as "not applicable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkItem {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub thumbnail_url: Option<String>,
    pub location: Option<Location>,
    pub matches_profile: Option<bool>,
}

/// Full record for the detail view.
#[derive(Debug, Clone)]
pub struct ArtworkRow {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub medium: String,
    pub thumbnail_url: Option<String>,
    pub gallery_id: String,
    pub gallery_name: String,
    pub gallery_short: String,
    pub acquired_at: Option<DateTime<Utc>>,
}

// ── Value extraction helpers ──

fn val_i64(v: &Value) -> i64 {
    match v {
        Value::Integer(i) => *i,
        _ => 0,
    }
}

fn val_string(v: &Value) -> String {
    match v {
        Value::Text(s) => s.clone(),
        _ => String::new(),
    }
}

fn opt_string(v: &Value) -> Option<String> {
    match v {
        Value::Text(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

const ITEM_COLUMNS: &str = "object_id, title, COALESCE(genre, ''), \
     COALESCE(thumbnail, ''), COALESCE(gallery_short, '')";

/// Catalog handle wrapping a turso connection.
pub struct Catalog {
    conn: turso::Connection,
}

impl Catalog {
    /// Open a local SQLite catalog file via Turso.
    pub async fn open(path: &Path) -> turso::Result<Self> {
        let path_str = path.to_string_lossy().to_string();
        let db = turso::Builder::new_local(&path_str).build().await?;
        let conn = db.connect()?;
        Ok(Catalog { conn })
    }

    /// Artwork hanging in one named gallery, plus the gallery's display name.
    pub async fn gallery_artwork(
        &self,
        gallery_id: &str,
    ) -> turso::Result<(Option<String>, Vec<ArtworkItem>)> {
        let mut name = None;
        let mut rows = self
            .conn
            .query(
                "SELECT name FROM galleries WHERE gallery_id = ?1",
                turso::params::Params::Positional(vec![Value::Text(gallery_id.to_string())]),
            )
            .await?;
        if let Some(row) = rows.next().await? {
            name = opt_string(&row.get_value(0)?);
        }

        let mut items = Vec::new();
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {ITEM_COLUMNS} FROM artworks \
                     WHERE gallery_id = ?1 ORDER BY object_id"
                ),
                turso::params::Params::Positional(vec![Value::Text(gallery_id.to_string())]),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row, None)?);
        }
        Ok((name, items))
    }

    /// Artwork matching any of the given genres (case-insensitive).
    pub async fn genre_artwork(&self, genres: &[String]) -> turso::Result<Vec<ArtworkItem>> {
        if genres.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=genres.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let params = genres
            .iter()
            .map(|g| Value::Text(g.to_lowercase()))
            .collect::<Vec<_>>();

        let mut items = Vec::new();
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {ITEM_COLUMNS} FROM artworks \
                     WHERE lower(genre) IN ({placeholders}) ORDER BY object_id"
                ),
                turso::params::Params::Positional(params),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row, None)?);
        }
        Ok(items)
    }

    /// Recommendation sweep across the collection. Every returned row
    /// carries a concrete `matches_profile`, even when false.
    pub async fn profile_artwork(
        &self,
        favorite_genres: &[String],
    ) -> turso::Result<Vec<ArtworkItem>> {
        let mut items = Vec::new();
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {ITEM_COLUMNS} FROM artworks ORDER BY object_id LIMIT 60"),
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let item = row_to_item(&row, Some(false))?;
            let matches = favorite_genres
                .iter()
                .any(|g| g.eq_ignore_ascii_case(&item.genre));
            items.push(ArtworkItem {
                matches_profile: Some(matches),
                ..item
            });
        }
        Ok(items)
    }

    /// Get a single artwork by object id.
    pub async fn get_artwork(&self, id: i64) -> turso::Result<Option<ArtworkRow>> {
        let mut rows = self
            .conn
            .query(
                "SELECT a.object_id, a.title, COALESCE(a.artist, ''), \
                 COALESCE(a.genre, ''), COALESCE(a.medium, ''), \
                 COALESCE(a.thumbnail, ''), COALESCE(a.gallery_id, ''), \
                 COALESCE(g.name, ''), COALESCE(a.gallery_short, ''), \
                 COALESCE(a.acquired_at, '') \
                 FROM artworks a \
                 LEFT JOIN galleries g ON g.gallery_id = a.gallery_id \
                 WHERE a.object_id = ?1",
                turso::params::Params::Positional(vec![Value::Integer(id)]),
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(ArtworkRow {
                id: val_i64(&row.get_value(0)?),
                title: val_string(&row.get_value(1)?),
                artist: val_string(&row.get_value(2)?),
                genre: val_string(&row.get_value(3)?),
                medium: val_string(&row.get_value(4)?),
                thumbnail_url: opt_string(&row.get_value(5)?),
                gallery_id: val_string(&row.get_value(6)?),
                gallery_name: val_string(&row.get_value(7)?),
                gallery_short: val_string(&row.get_value(8)?),
                acquired_at: val_string(&row.get_value(9)?)
                    .parse::<DateTime<Utc>>()
                    .ok(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Create the schema and load a small demo collection.
    pub async fn seed_demo(&self) -> turso::Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS galleries (\
                 gallery_id TEXT PRIMARY KEY, name TEXT)",
                (),
            )
            .await?;
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS artworks (\
                 object_id INTEGER PRIMARY KEY, title TEXT, artist TEXT, \
                 genre TEXT, medium TEXT, thumbnail TEXT, \
                 gallery_id TEXT, gallery_short TEXT, acquired_at TEXT)",
                (),
            )
            .await?;
        self.conn.execute("DELETE FROM artworks", ()).await?;
        self.conn.execute("DELETE FROM galleries", ()).await?;

        for (id, name) in DEMO_GALLERIES {
            self.conn
                .execute(
                    "INSERT INTO galleries (gallery_id, name) VALUES (?1, ?2)",
                    turso::params::Params::Positional(vec![
                        Value::Text(id.to_string()),
                        Value::Text(name.to_string()),
                    ]),
                )
                .await?;
        }

        for art in DEMO_ARTWORKS {
            self.conn
                .execute(
                    "INSERT INTO artworks \
                     (object_id, title, artist, genre, medium, thumbnail, \
                      gallery_id, gallery_short, acquired_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    turso::params::Params::Positional(vec![
                        Value::Integer(art.0),
                        Value::Text(art.1.to_string()),
                        Value::Text(art.2.to_string()),
                        Value::Text(art.3.to_string()),
                        Value::Text(art.4.to_string()),
                        Value::Text(format!("https://catalog.example/thumbs/{}.jpg", art.0)),
                        Value::Text(art.5.to_string()),
                        Value::Text(art.6.to_string()),
                        Value::Text(art.7.to_string()),
                    ]),
                )
                .await?;
        }
        Ok(())
    }
}

fn row_to_item(row: &turso::Row, matches_profile: Option<bool>) -> turso::Result<ArtworkItem> {
    let short = val_string(&row.get_value(4)?);
    Ok(ArtworkItem {
        id: val_i64(&row.get_value(0)?),
        title: val_string(&row.get_value(1)?),
        genre: val_string(&row.get_value(2)?),
        thumbnail_url: opt_string(&row.get_value(3)?),
        location: if short.is_empty() {
            None
        } else {
            Some(Location {
                short_name: Some(short),
            })
        },
        matches_profile,
    })
}

const DEMO_GALLERIES: &[(&str, &str)] = &[
    ("east-wing", "East Wing"),
    ("impressionist-hall", "Impressionist Hall"),
    ("modern-annex", "Modern Annex"),
];

// (object_id, title, artist, genre, medium, gallery_id, gallery_short, acquired_at)
const DEMO_ARTWORKS: &[(i64, &str, &str, &str, &str, &str, &str, &str)] = &[
    (101, "Morning on the Seine", "C. Monet", "Impressionism", "Oil on canvas", "impressionist-hall", "Room 3", "1998-04-12T00:00:00Z"),
    (102, "Dance Rehearsal", "E. Degas", "Impressionism", "Pastel", "impressionist-hall", "Room 3", "2001-09-30T00:00:00Z"),
    (103, "Garden Path at Giverny", "C. Monet", "Impressionism", "Oil on canvas", "impressionist-hall", "Room 4", "1987-06-01T00:00:00Z"),
    (110, "Still Life with Guitar", "P. Picasso", "Cubism", "Oil on canvas", "modern-annex", "Room 12", "2005-11-20T00:00:00Z"),
    (111, "Violin and Newspaper", "G. Braque", "Cubism", "Collage", "modern-annex", "Room 12", "2010-02-14T00:00:00Z"),
    (112, "Composition in Grey", "J. Gris", "Cubism", "Oil on canvas", "modern-annex", "Room 14", "2012-07-08T00:00:00Z"),
    (120, "Portrait of a Merchant", "Rembrandt van Rijn", "Baroque", "Oil on panel", "east-wing", "Room 21", "1965-03-02T00:00:00Z"),
    (121, "The Calling", "Caravaggio (after)", "Baroque", "Oil on canvas", "east-wing", "Room 21", "1972-10-19T00:00:00Z"),
    (122, "Dutch Interior", "P. de Hooch", "Baroque", "Oil on canvas", "east-wing", "Room 22", "1980-01-25T00:00:00Z"),
    (130, "Pier at Dusk", "A. Stieglitz", "Photography", "Gelatin silver print", "modern-annex", "Room 16", "1999-12-05T00:00:00Z"),
    (131, "Factory Windows", "B. Abbott", "Photography", "Gelatin silver print", "modern-annex", "Room 16", "2003-05-17T00:00:00Z"),
    (132, "Winter Orchard", "A. Adams", "Photography", "Gelatin silver print", "modern-annex", "", "2008-08-23T00:00:00Z"),
];

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_catalog() -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = Catalog::open(&dir.path().join("catalog.db"))
            .await
            .expect("open");
        catalog.seed_demo().await.expect("seed");
        (dir, catalog)
    }

    #[tokio::test]
    async fn gallery_fetch_returns_name_and_located_items() {
        let (_dir, catalog) = seeded_catalog().await;
        let (name, items) = catalog.gallery_artwork("east-wing").await.unwrap();
        assert_eq!(name.as_deref(), Some("East Wing"));
        assert!(!items.is_empty());
        for item in &items {
            assert_eq!(item.matches_profile, None);
            assert!(item.location.is_some());
        }
    }

    #[tokio::test]
    async fn unknown_gallery_has_no_name_and_no_items() {
        let (_dir, catalog) = seeded_catalog().await;
        let (name, items) = catalog.gallery_artwork("west-wing").await.unwrap();
        assert_eq!(name, None);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn genre_fetch_is_case_insensitive_and_untagged() {
        let (_dir, catalog) = seeded_catalog().await;
        let items = catalog
            .genre_artwork(&["impressionism".to_string()])
            .await
            .unwrap();
        assert_eq!(items.len(), 3);
        for item in &items {
            assert_eq!(item.genre, "Impressionism");
            assert_eq!(item.matches_profile, None);
        }
    }

    #[tokio::test]
    async fn profile_fetch_tags_every_row() {
        let (_dir, catalog) = seeded_catalog().await;
        let items = catalog
            .profile_artwork(&["Cubism".to_string()])
            .await
            .unwrap();
        assert!(!items.is_empty());
        let mut matched = 0;
        for item in &items {
            match item.matches_profile {
                Some(true) => {
                    assert_eq!(item.genre, "Cubism");
                    matched += 1;
                }
                Some(false) => assert_ne!(item.genre, "Cubism"),
                None => panic!("profile rows must carry the match field"),
            }
        }
        assert_eq!(matched, 3);
    }

    #[tokio::test]
    async fn items_come_back_in_object_id_order() {
        let (_dir, catalog) = seeded_catalog().await;
        let items = catalog.profile_artwork(&[]).await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn detail_row_joins_gallery_and_parses_date() {
        let (_dir, catalog) = seeded_catalog().await;
        let row = catalog.get_artwork(101).await.unwrap().expect("row");
        assert_eq!(row.title, "Morning on the Seine");
        assert_eq!(row.gallery_name, "Impressionist Hall");
        assert!(row.acquired_at.is_some());
        assert!(catalog.get_artwork(999).await.unwrap().is_none());
    }
}
