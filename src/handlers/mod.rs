pub mod health;
pub mod image;
pub mod note;
