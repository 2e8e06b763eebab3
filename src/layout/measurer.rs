use crate::core::types::Size;

/// Text measurement seam. Shaping lives in the host toolkit.
pub trait LabelMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

impl<M: LabelMeasurer + ?Sized> LabelMeasurer for &M {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        (**self).measure(text, font_size)
    }
}

/// Deterministic, backend-independent estimate from character classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateLabelMeasurer {
    pub line_height_ratio: f64,
}

impl Default for ApproximateLabelMeasurer {
    fn default() -> Self {
        Self {
            line_height_ratio: 1.2,
        }
    }
}

fn char_width_units(ch: char) -> f64 {
    match ch {
        '0'..='9' => 0.62,
        '.' | ',' | ':' | '/' => 0.34,
        '-' | '+' | '%' => 0.42,
        ' ' => 0.33,
        _ => 0.58,
    }
}

impl LabelMeasurer for ApproximateLabelMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        if text.is_empty() || !font_size.is_finite() || font_size <= 0.0 {
            return Size::new(0.0, 0.0);
        }
        let lines = text.lines().count().max(1);
        let widest = text
            .lines()
            .map(|line| line.chars().map(char_width_units).sum::<f64>())
            .fold(0.0, f64::max);
        Size::new(
            (widest * font_size).max(font_size),
            lines as f64 * font_size * self.line_height_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ApproximateLabelMeasurer, LabelMeasurer};

    #[test]
    fn digits_are_wider_than_separators() {
        let measurer = ApproximateLabelMeasurer::default();
        let digits = measurer.measure("1000", 10.0);
        let separated = measurer.measure("1,0.0", 10.0);
        assert!(digits.width > 24.0 && digits.width < 25.0);
        assert!(separated.width < digits.width + 6.2);
    }

    #[test]
    fn multi_line_text_stacks_height() {
        let size = ApproximateLabelMeasurer::default().measure("Jan\n2024", 10.0);
        assert!((size.height - 24.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_has_no_extent() {
        let size = ApproximateLabelMeasurer::default().measure("", 12.0);
        assert_eq!(size.width, 0.0);
    }
}
