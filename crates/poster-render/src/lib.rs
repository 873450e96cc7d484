pub mod books;
pub mod canvas;
pub mod cover;
pub mod fonts;
mod options;
pub mod qr;
pub mod render;
mod types;

pub use books::{BookRecord, BookSelection, load_books, select_books};
pub use canvas::{Canvas, TextAnchor};
pub use fonts::FontCache;
pub use options::*;
pub use render::{render, render_poster, save_poster};
pub use types::*;
