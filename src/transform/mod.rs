pub mod css;
pub mod css_transform;
