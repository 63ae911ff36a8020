//! Media host adapters

pub mod cloudinary;

pub use cloudinary::CloudinaryPhotoService;
