//! Repacking transform selection types

/// Bit-level repacking applied to a decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// No repacking; the frame is written as decoded (header stripped only)
    Raw,
    /// Uniform 4-bit left shift, low nibble zero-filled
    NvZeroPad,
    /// Region-aware shift that merges bits 8-11 back into the low nibble of
    /// the active-pixel rows
    NvStandard,
}

impl TransformKind {
    /// Label embedded in derived output file names.
    pub fn label(&self) -> &'static str {
        match self {
            TransformKind::Raw => "STB_to_Raw",
            TransformKind::NvZeroPad => "STB_to_NV(0 Padding)",
            TransformKind::NvStandard => "STB_to_NV(Standard)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_output_naming() {
        assert_eq!(TransformKind::Raw.label(), "STB_to_Raw");
        assert_eq!(TransformKind::NvZeroPad.label(), "STB_to_NV(0 Padding)");
        assert_eq!(TransformKind::NvStandard.label(), "STB_to_NV(Standard)");
    }
}
