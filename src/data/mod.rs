pub mod example;
pub mod images;
pub mod split;

pub use example::Example;
pub use images::load_sign_images;
pub use split::{shuffle_split, balanced_subset};
