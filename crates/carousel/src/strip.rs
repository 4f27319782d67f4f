/// Horizontal scroll position of a row of equally sized cards.
///
/// `offset` is 0 when the first card is flush with the leading gutter and goes negative
/// as the row is pulled left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip {
    pub offset: f32,
    content_width: f32,
    gutter: f32,
    viewport_width: f32,
}

impl Strip {
    pub fn new(card_count: usize, card_width: f32, gutter: f32, viewport_width: f32) -> Self {
        let gaps = card_count.saturating_sub(1) as f32;
        Self {
            offset: 0.0,
            content_width: (card_count as f32).mul_add(card_width, gaps * gutter),
            gutter,
            viewport_width,
        }
    }

    /// Most negative offset, where the last card touches the trailing gutter.
    pub fn min_offset(&self) -> f32 {
        2.0f32
            .mul_add(-self.gutter, self.viewport_width - self.content_width)
            .min(0.0)
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(self.min_offset(), 0.0);
    }

    pub fn resize(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width;
        self.scroll_by(0.0);
    }

    /// Distance from the strip's left edge to the center of card `index`.
    pub fn card_center(&self, index: usize, card_width: f32) -> f32 {
        (index as f32).mul_add(card_width + self.gutter, self.gutter + card_width / 2.0)
    }
}

/// Tilt the cards lean toward, in degrees: a fraction of the last drag step while
/// dragging, upright otherwise.
pub fn tilt_target(drag_delta: Option<f32>, degrees_per_pixel: f32) -> f32 {
    drag_delta.map_or(0.0, |delta| delta * degrees_per_pixel)
}
