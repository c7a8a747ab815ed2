//! Corner annotation overlay state

use serde::{Serialize, Deserialize};

/// Corner of the view an annotation is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Bottom-left corner
    LowerLeft = 0,
    /// Bottom-right corner
    LowerRight = 1,
    /// Top-left corner, where the view writes its own text
    UpperLeft = 2,
    /// Top-right corner
    UpperRight = 3,
}

impl Corner {
    /// All corners in slot order
    pub const ALL: [Corner; 4] = [
        Corner::LowerLeft,
        Corner::LowerRight,
        Corner::UpperLeft,
        Corner::UpperRight,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Text drawn in the corners of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerAnnotation {
    /// One text per corner, indexed by `Corner` slot
    texts: [String; 4],
    /// Maximum text line height as a fraction of the view height
    pub maximum_line_height: f64,
    /// Draw a drop shadow behind the text
    pub shadow: bool,
}

impl CornerAnnotation {
    /// Empty annotation with shadowed text no taller than 7% of the view
    pub fn new() -> Self {
        Self {
            texts: Default::default(),
            maximum_line_height: 0.07,
            shadow: true,
        }
    }

    /// Set the text of one corner
    pub fn set_text(&mut self, corner: Corner, text: impl Into<String>) {
        self.texts[corner.slot()] = text.into();
    }

    /// Text of one corner; empty when unset
    pub fn text(&self, corner: Corner) -> &str {
        &self.texts[corner.slot()]
    }

    /// Clear every corner
    pub fn clear_all_texts(&mut self) {
        for text in &mut self.texts {
            text.clear();
        }
    }

    /// Whether any corner has text
    pub fn is_empty(&self) -> bool {
        self.texts.iter().all(String::is_empty)
    }
}

impl Default for CornerAnnotation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let annotation = CornerAnnotation::new();
        assert!(annotation.is_empty());
        assert!(annotation.shadow);
        assert!((annotation.maximum_line_height - 0.07).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_and_clear() {
        let mut annotation = CornerAnnotation::new();
        annotation.set_text(Corner::UpperLeft, "Axial");
        annotation.set_text(Corner::LowerRight, "Slice 12");

        assert_eq!(annotation.text(Corner::UpperLeft), "Axial");
        assert_eq!(annotation.text(Corner::LowerRight), "Slice 12");
        assert_eq!(annotation.text(Corner::UpperRight), "");

        annotation.clear_all_texts();
        assert!(Corner::ALL.iter().all(|c| annotation.text(*c).is_empty()));
    }
}
