use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct GuiControlFlags: u32 {
        const ENABLED = 1 << 0;
        const VISIBLE = 1 << 1;
        const CLICKABLE = 1 << 2;
        const ACTIVATED = 1 << 3;
    }
}

impl Default for GuiControlFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Reference to a control hosted on a GUI surface, by family and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlRef {
    pub control_type: i32,
    pub id: i32,
}

/// State shared by every control family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuiControlState {
    pub flags: GuiControlFlags,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiSurface {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub z_order: i32,
    pub visible: bool,
    pub clickable: bool,
    pub transparency: i32,
    /// Index of the focused control, or -1.
    pub focus_ctrl: i32,
    pub mouse_over_ctrl: i32,
    pub highlight_ctrl: i32,
    pub blend_mode: i32,
    pub rotation: f32,
    pub ctrl_refs: Vec<ControlRef>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiButton {
    pub state: GuiControlState,
    pub sprite: i32,
    pub sprite_over: i32,
    pub sprite_pushed: i32,
    pub text: String,
    pub font: i32,
    pub text_color: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiLabel {
    pub state: GuiControlState,
    pub text: String,
    pub font: i32,
    pub text_color: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuiInvWindow {
    pub state: GuiControlState,
    /// Character whose inventory is shown, or -1 for the player.
    pub character_id: i32,
    pub item_width: i32,
    pub item_height: i32,
    pub top_item: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuiSlider {
    pub state: GuiControlState,
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiTextBox {
    pub state: GuiControlState,
    pub text: String,
    pub font: i32,
    pub text_color: i32,
    pub show_border: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiListBox {
    pub state: GuiControlState,
    pub items: Vec<String>,
    pub selected: i32,
    pub top_item: i32,
    pub font: i32,
    pub text_color: i32,
}

/// A button animation in flight, driven by the game loop rather than any GUI
/// definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimatingButton {
    pub gui: i32,
    pub control: i32,
    pub view: i32,
    pub anim_loop: i32,
    pub frame: i32,
    pub speed: i32,
    pub repeat: i32,
    pub wait: i32,
    pub volume: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiCollection {
    pub surfaces: Vec<GuiSurface>,
    pub buttons: Vec<GuiButton>,
    pub labels: Vec<GuiLabel>,
    pub inv_windows: Vec<GuiInvWindow>,
    pub sliders: Vec<GuiSlider>,
    pub text_boxes: Vec<GuiTextBox>,
    pub list_boxes: Vec<GuiListBox>,
    pub animating: Vec<AnimatingButton>,
}
