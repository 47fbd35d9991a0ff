/// One cell of a character/object animation: which sprite to show and an
/// optional frame sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFrame {
    pub sprite: i32,
    /// Clip to play when the frame is shown, or -1.
    pub sound: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewLoop {
    pub frames: Vec<ViewFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub loops: Vec<ViewLoop>,
}
