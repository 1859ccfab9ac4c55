use ratatui::style::Color;

/// Sizing and styling knobs for a tab strip.
///
/// Every length is measured in terminal cells. An `Appearance` is handed to
/// the strip by value, so later edits on the caller's copy never leak into a
/// live strip; use `apply_appearance` on the controller to swap it.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    /// Height of the row of tab buttons (without the indicator).
    pub strip_height: u16,
    /// Gap between the strip's left edge and the first tab.
    pub left_spacing: u16,
    /// Gap between the last visible tab and the strip's right edge.
    pub right_spacing: u16,
    /// Gap between two neighbouring tabs.
    pub inner_spacing: u16,
    pub background: Color,
    pub indicator_visible: bool,
    pub indicator_color: Color,
    pub indicator_thickness: u16,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            strip_height: 3,
            left_spacing: 1,
            right_spacing: 1,
            inner_spacing: 1,
            background: Color::Reset,
            indicator_visible: false,
            indicator_color: Color::Blue,
            indicator_thickness: 1,
        }
    }
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip_height(mut self, height: u16) -> Self {
        self.strip_height = height;
        self
    }

    pub fn with_spacing(mut self, left: u16, right: u16, inner: u16) -> Self {
        self.left_spacing = left;
        self.right_spacing = right;
        self.inner_spacing = inner;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Turn the selection indicator on with the given colour and thickness.
    pub fn with_indicator(mut self, color: Color, thickness: u16) -> Self {
        self.indicator_visible = true;
        self.indicator_color = color;
        self.indicator_thickness = thickness;
        self
    }

    /// Height reserved for the indicator bar, zero when it is hidden.
    pub fn indicator_height(&self) -> u16 {
        if self.indicator_visible { self.indicator_thickness } else { 0 }
    }

    /// Full height of the strip including the indicator bar.
    pub fn total_height(&self) -> u16 {
        self.strip_height + self.indicator_height()
    }

    /// Horizontal room left for tabs once the outer spacing is taken out.
    pub fn content_width(&self, outer_width: u16) -> u16 {
        outer_width.saturating_sub(self.left_spacing + self.right_spacing)
    }
}

/// Parse a colour name (`blue`, `light-red`), an index (`42`) or a hex
/// triplet (`#ff8800`).
pub fn parse_color(name: &str) -> Result<Color, String> {
    name.parse::<Color>().map_err(|_| format!("Unknown colour: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_adds_to_total_height() {
        let plain = Appearance::new().with_strip_height(3);
        assert_eq!(plain.total_height(), 3);

        let marked = plain.with_indicator(Color::Yellow, 2);
        assert_eq!(marked.indicator_height(), 2);
        assert_eq!(marked.total_height(), 5);
    }

    #[test]
    fn content_width_never_underflows() {
        let a = Appearance::new().with_spacing(4, 4, 1);
        assert_eq!(a.content_width(20), 12);
        assert_eq!(a.content_width(5), 0);
    }

    #[test]
    fn colours_parse_by_name_and_hex() {
        assert_eq!(parse_color("blue"), Ok(Color::Blue));
        assert_eq!(parse_color("#ff8800"), Ok(Color::Rgb(0xff, 0x88, 0x00)));
        assert!(parse_color("not-a-colour").is_err());
    }
}
