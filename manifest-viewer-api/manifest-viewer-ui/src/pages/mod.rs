pub mod viewer;

pub use viewer::ViewerPage;
