use xstrack_model::OverlayTarget;

/// The surface active cues are rendered into.
pub trait SubtitleOverlay {
    fn replace_text(&mut self, text: &str);

    fn set_visible(&mut self, visible: bool);

    /// Replace the whole class list of one overlay element.
    fn set_classes(&mut self, target: OverlayTarget, classes: &[String]);
}
