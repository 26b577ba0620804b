//! Input events delivered by the windowing layer.
//!
//! Positions use the windowing convention: origin at the top-left corner,
//! y growing downwards.

use glam::IVec2;

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Buttons held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl PointerButtons {
    /// No buttons held.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        middle: false,
    };

    /// Only the left button held.
    pub const LEFT: Self = Self {
        left: true,
        right: false,
        middle: false,
    };

    /// Only the right button held.
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
        middle: false,
    };

    /// Returns whether `button` is held.
    pub fn contains(self, button: PointerButton) -> bool {
        match button {
            PointerButton::Left => self.left,
            PointerButton::Right => self.right,
            PointerButton::Middle => self.middle,
        }
    }
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };
}

/// A pointer press, move or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Position in window pixels (origin top-left).
    pub position: IVec2,
    /// Button that changed state; `None` for moves.
    pub button: Option<PointerButton>,
    /// Buttons held after the event.
    pub buttons: PointerButtons,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates a press or release of `button` at `(x, y)`.
    pub fn button(x: i32, y: i32, button: PointerButton) -> Self {
        let buttons = match button {
            PointerButton::Left => PointerButtons::LEFT,
            PointerButton::Right => PointerButtons::RIGHT,
            PointerButton::Middle => PointerButtons {
                middle: true,
                ..PointerButtons::NONE
            },
        };
        Self {
            position: IVec2::new(x, y),
            button: Some(button),
            buttons,
            modifiers: Modifiers::NONE,
        }
    }

    /// Creates a move to `(x, y)` with `buttons` held.
    pub fn moved(x: i32, y: i32, buttons: PointerButtons) -> Self {
        Self {
            position: IVec2::new(x, y),
            button: None,
            buttons,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the event with different modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A mouse wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    /// Rotation in eighths of a degree; one notch is usually 120.
    pub delta: i32,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Wheel step of `delta` eighths of a degree, no modifiers.
    pub fn new(delta: i32) -> Self {
        Self {
            delta,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the step with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the render window reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Toggle fullscreen.
    F,
    /// Toggle coordinate arrows.
    C,
    /// Transfer the 3D rotation to the MIP views.
    T,
    /// Toggle slice planes in the 3D view.
    P,
    /// Reset rendering parameters.
    R,
    /// Pick the dataset position under the cursor.
    S,
    /// Cycle the view mode.
    Space,
    /// Flip a slice view horizontally.
    X,
    /// Flip a slice view vertically.
    Y,
    /// Toggle maximum intensity projection on a slice view.
    M,
    /// Toggle arcball translation.
    A,
    PageUp,
    PageDown,
    Other,
}

/// Cursor shape hint for the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    #[default]
    Default,
    /// Over the horizontal splitter.
    SplitVertical,
    /// Over the vertical splitter.
    SplitHorizontal,
    /// Over the splitter crossing.
    SizeAll,
    /// Translating a 3D region.
    ClosedHand,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_event() {
        let ev = PointerEvent::button(3, 4, PointerButton::Right);
        assert_eq!(ev.position, IVec2::new(3, 4));
        assert!(ev.buttons.contains(PointerButton::Right));
        assert!(!ev.buttons.contains(PointerButton::Left));
    }

    #[test]
    fn test_modifiers() {
        let ev = PointerEvent::moved(0, 0, PointerButtons::LEFT).with_modifiers(Modifiers::CONTROL);
        assert!(ev.modifiers.control);
        assert!(!ev.modifiers.shift);
    }
}
