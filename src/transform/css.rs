use crate::css::{Root, parse_stylesheet};
use crate::errors::TransformResult;
use crate::transform::css_transform::{ImportOptions, ImportReplacer, Warning};

/// Output of [`transform_from_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub css: String,
    pub warnings: Vec<Warning>,
}

/// Rewrites the top-level `@import` rules of `root` in place.
pub fn transform_root(root: &mut Root, options: &ImportOptions) -> Vec<Warning> {
    ImportReplacer::new(options).build(root)
}

pub fn transform_from_string(css_content: &str, options: &ImportOptions) -> TransformResult<TransformOutput> {
    let mut root = parse_stylesheet(css_content)?;
    let warnings = transform_root(&mut root, options);

    Ok(TransformOutput {
        css: root.to_string(),
        warnings,
    })
}
