//! Conversion configuration types

use crate::image_pipeline::repack::types::TransformKind;

/// Configuration for STB to raw conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Transforms applied to each decoded frame, in order
    pub transforms: Vec<TransformKind>,
    /// Whether to reject zero-sized frames before transforming
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            transforms: vec![TransformKind::Raw],
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    transforms: Option<Vec<TransformKind>>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn transforms(mut self, transforms: Vec<TransformKind>) -> Self {
        self.transforms = Some(transforms);
        self
    }

    pub fn transform(mut self, transform: TransformKind) -> Self {
        self.transforms.get_or_insert_with(Vec::new).push(transform);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            transforms: self.transforms.unwrap_or(default.transforms),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}
