//! Query service - read-only filtering and search over loaded albums

use crate::models::{Album, Stage};

/// Optional narrowing criteria; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumFilter {
    pub stage: Option<Stage>,
    pub artist: Option<String>,
    pub tag: Option<String>,
}

impl AlbumFilter {
    pub fn is_empty(&self) -> bool {
        self.stage.is_none() && self.artist.is_none() && self.tag.is_none()
    }

    pub fn matches(&self, album: &Album) -> bool {
        self.stage.map_or(true, |stage| album.stage() == stage)
            && self.artist.as_ref().map_or(true, |artist| &album.artist == artist)
            && self.tag.as_ref().map_or(true, |tag| album.tags.contains(tag))
    }
}

/// Albums matching every present criterion, in collection order
pub fn filter<'a>(albums: &'a [Album], criteria: &AlbumFilter) -> Vec<&'a Album> {
    albums.iter().filter(|a| criteria.matches(a)).collect()
}

/// Albums whose artist or title contains `query`, ignoring case
pub fn search<'a>(albums: &'a [Album], query: &str) -> Vec<&'a Album> {
    let query = query.to_lowercase();
    albums
        .iter()
        .filter(|a| a.artist.to_lowercase().contains(&query) || a.album.to_lowercase().contains(&query))
        .collect()
}
