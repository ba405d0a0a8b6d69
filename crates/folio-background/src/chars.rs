//! Glyph ramps for rasterized points.

/// Glyphs for increasing point intensity in a cell.
pub const POINT_GLYPHS: &[char] = &['·', '∙', '•', '*', '✦'];

/// Fallback ramp for terminals without a UTF-8 locale.
pub const ASCII_POINT_GLYPHS: &[char] = &['.', ':', 'o', '*', '#'];
