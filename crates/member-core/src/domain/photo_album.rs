// ============================================================================
// Member Core - Photo Album
// File: crates/member-core/src/domain/photo_album.rs
// Description: Ordered photo collection that owns the main-photo rules
// ============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::photo::Photo;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PhotoError {
    #[error("Photo not found: {0}")]
    NotFound(i32),

    #[error("This is already your main photo")]
    AlreadyMain,

    #[error("You cannot delete your main photo")]
    IsMain,
}

/// A member's photos, in upload order.
///
/// At most one photo is main, and a non-empty album created through
/// [`PhotoAlbum::add`] always has exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoAlbum(Vec<Photo>);

impl PhotoAlbum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an album from stored photos, keeping their stored order.
    pub fn from_photos(photos: Vec<Photo>) -> Self {
        Self(photos)
    }

    /// Append a photo. The first photo of an empty album becomes main.
    pub fn add(&mut self, mut photo: Photo) -> &Photo {
        photo.is_main = self.0.is_empty();
        self.0.push(photo);
        &self.0[self.0.len() - 1]
    }

    /// Move the main flag to `photo_id`.
    pub fn set_main(&mut self, photo_id: i32) -> Result<(), PhotoError> {
        let target = self.position(photo_id)?;
        if self.0[target].is_main {
            return Err(PhotoError::AlreadyMain);
        }

        if let Some(current) = self.0.iter_mut().find(|p| p.is_main) {
            current.is_main = false;
        }
        self.0[target].is_main = true;
        Ok(())
    }

    /// The photo `photo_id`, provided it may be deleted.
    pub fn removable(&self, photo_id: i32) -> Result<&Photo, PhotoError> {
        let photo = self.get(photo_id).ok_or(PhotoError::NotFound(photo_id))?;
        if photo.is_main {
            return Err(PhotoError::IsMain);
        }
        Ok(photo)
    }

    pub fn remove(&mut self, photo_id: i32) -> Result<Photo, PhotoError> {
        self.removable(photo_id)?;
        let index = self.position(photo_id)?;
        Ok(self.0.remove(index))
    }

    pub fn main(&self) -> Option<&Photo> {
        self.0.iter().find(|p| p.is_main)
    }

    pub fn get(&self, photo_id: i32) -> Option<&Photo> {
        self.0.iter().find(|p| p.id == photo_id)
    }

    pub fn last(&self) -> Option<&Photo> {
        self.0.last()
    }

    /// Record the id storage assigned to the photo at `index`.
    pub fn assign_id(&mut self, index: usize, id: i32) {
        if let Some(photo) = self.0.get_mut(index) {
            photo.id = id;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, photo_id: i32) -> Result<usize, PhotoError> {
        self.0
            .iter()
            .position(|p| p.id == photo_id)
            .ok_or(PhotoError::NotFound(photo_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: i32, is_main: bool) -> Photo {
        Photo {
            id,
            url: format!("https://img.example/{}.jpg", id),
            is_main,
            public_id: Some(format!("members/{}", id)),
        }
    }

    fn main_count(album: &PhotoAlbum) -> usize {
        album.iter().filter(|p| p.is_main).count()
    }

    #[test]
    fn test_first_photo_becomes_main() {
        let mut album = PhotoAlbum::new();
        let added = album.add(Photo::new("https://img.example/a.jpg".into(), None));
        assert!(added.is_main);
        assert_eq!(main_count(&album), 1);
    }

    #[test]
    fn test_later_photo_is_not_main() {
        let mut album = PhotoAlbum::from_photos(vec![stored(1, true)]);
        let added = album.add(Photo::new("https://img.example/b.jpg".into(), None));
        assert!(!added.is_main);

        assert!(album.get(1).unwrap().is_main);
        assert_eq!(album.len(), 2);
        assert_eq!(main_count(&album), 1);
    }

    #[test]
    fn test_add_ignores_incoming_main_flag() {
        let mut album = PhotoAlbum::from_photos(vec![stored(1, true)]);
        let mut photo = Photo::new("https://img.example/c.jpg".into(), None);
        photo.is_main = true;

        album.add(photo);
        assert_eq!(main_count(&album), 1);
    }

    #[test]
    fn test_set_main_moves_flag() {
        let mut album = PhotoAlbum::from_photos(vec![stored(5, true), stored(6, false)]);
        album.set_main(6).unwrap();

        assert!(!album.get(5).unwrap().is_main);
        assert!(album.get(6).unwrap().is_main);
        assert_eq!(main_count(&album), 1);
    }

    #[test]
    fn test_set_main_on_current_main_is_rejected() {
        let mut album = PhotoAlbum::from_photos(vec![stored(5, true), stored(6, false)]);
        let before = album.clone();

        assert_eq!(album.set_main(5), Err(PhotoError::AlreadyMain));
        assert_eq!(album, before);
    }

    #[test]
    fn test_set_main_without_existing_main() {
        let mut album = PhotoAlbum::from_photos(vec![stored(3, false)]);
        album.set_main(3).unwrap();
        assert_eq!(album.main().map(|p| p.id), Some(3));
    }

    #[test]
    fn test_set_main_unknown_photo() {
        let mut album = PhotoAlbum::from_photos(vec![stored(5, true)]);
        assert_eq!(album.set_main(42), Err(PhotoError::NotFound(42)));
    }

    #[test]
    fn test_main_photo_cannot_be_removed() {
        let mut album = PhotoAlbum::from_photos(vec![stored(9, true)]);
        assert_eq!(album.remove(9), Err(PhotoError::IsMain));
        assert_eq!(album.len(), 1);
    }

    #[test]
    fn test_remove_non_main_photo() {
        let mut album = PhotoAlbum::from_photos(vec![stored(1, true), stored(2, false)]);
        let removed = album.remove(2).unwrap();

        assert_eq!(removed.id, 2);
        assert!(album.get(2).is_none());
        assert_eq!(main_count(&album), 1);
    }

    #[test]
    fn test_removable_unknown_photo() {
        let album = PhotoAlbum::from_photos(vec![stored(1, true)]);
        assert_eq!(album.removable(7), Err(PhotoError::NotFound(7)));
    }

    #[test]
    fn test_assign_id_marks_persisted() {
        let mut album = PhotoAlbum::new();
        album.add(Photo::new("https://img.example/a.jpg".into(), None));
        assert!(!album.last().unwrap().is_persisted());

        album.assign_id(0, 11);
        assert_eq!(album.last().unwrap().id, 11);
        assert!(album.last().unwrap().is_persisted());
    }
}
