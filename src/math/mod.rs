pub mod matrix;
pub mod feature_map;
