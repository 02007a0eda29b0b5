/// Draw layer — tells the presentation layer how to order entities.
///
/// Layers are drawn back-to-front: Background first, Effect last.
/// The core never reads this; it only carries it for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Layer {
    Background = 0,
    #[default]
    Foreground = 1,
    Effect = 2,
}

impl Layer {
    /// Convert to u8 for the readout buffer.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_foreground() {
        assert_eq!(Layer::default(), Layer::Foreground);
    }

    #[test]
    fn ordering_is_back_to_front() {
        assert!(Layer::Background < Layer::Foreground);
        assert!(Layer::Foreground < Layer::Effect);
    }

    #[test]
    fn codes_follow_draw_order() {
        assert_eq!(Layer::Background.as_u8(), 0);
        assert_eq!(Layer::Effect.as_u8(), 2);
    }
}
