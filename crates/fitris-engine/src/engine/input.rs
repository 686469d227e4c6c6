/// Logical buttons the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    LeftMouse,
}

impl Button {
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Enter,
        Self::Escape,
        Self::LeftMouse,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame input snapshot fed by the front-end.
///
/// Press and release edges last until [`end_frame`](Self::end_frame); the
/// held state persists across frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    down: [bool; Button::LEN],
    pressed: [bool; Button::LEN],
    released: [bool; Button::LEN],
    mouse_screen: Option<(i32, i32)>,
    mouse_board: Option<(f32, f32)>,
    hovered_menu_item: Option<usize>,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.down[button.index()] = true;
        self.pressed[button.index()] = true;
    }

    pub fn release(&mut self, button: Button) {
        self.down[button.index()] = false;
        self.released[button.index()] = true;
    }

    /// Presses and releases `button` within the current frame.
    ///
    /// Terminal keyboards only report presses, so keys are fed this way.
    pub fn tap(&mut self, button: Button) {
        self.press(button);
        self.release(button);
    }

    #[must_use]
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    #[must_use]
    pub fn was_released(&self, button: Button) -> bool {
        self.released[button.index()]
    }

    #[must_use]
    pub fn is_down(&self, button: Button) -> bool {
        self.down[button.index()]
    }

    /// Mouse position in screen units (terminal columns and rows).
    #[must_use]
    pub fn mouse_screen(&self) -> Option<(i32, i32)> {
        self.mouse_screen
    }

    pub fn set_mouse_screen(&mut self, pos: Option<(i32, i32)>) {
        self.mouse_screen = pos;
    }

    /// Mouse position in board units, `y` growing upwards. `None` when the
    /// board is not on screen.
    #[must_use]
    pub fn mouse_board(&self) -> Option<(f32, f32)> {
        self.mouse_board
    }

    pub fn set_mouse_board(&mut self, pos: Option<(f32, f32)>) {
        self.mouse_board = pos;
    }

    /// Menu option under the mouse, resolved against the last rendered layout.
    #[must_use]
    pub fn hovered_menu_item(&self) -> Option<usize> {
        self.hovered_menu_item
    }

    pub fn set_hovered_menu_item(&mut self, index: Option<usize>) {
        self.hovered_menu_item = index;
    }

    /// Clears press and release edges. Call once after each update.
    pub fn end_frame(&mut self) {
        self.pressed = [false; Button::LEN];
        self.released = [false; Button::LEN];
    }
}
