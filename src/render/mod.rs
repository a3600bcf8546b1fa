pub mod c;

pub use c::{render_header, render_source};
