//! Menus: a title, a list of options that each map to a mode instruction,
//! and a cursor that wraps around.

use crate::context::{Instruction, ModeName};
use crate::input::{InputEvent, Key};

#[derive(Clone, Debug, PartialEq)]
pub struct MenuOption {
    pub label: &'static str,
    pub instruction: Instruction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    title: &'static str,
    options: Vec<MenuOption>,
    cursor: usize,
    /// Pause menus are drawn over the frozen game instead of a backdrop.
    overlay: bool,
}

impl Menu {
    /// Only the factories below build menus, always from a non-empty list.
    fn new(title: &'static str, options: Vec<MenuOption>, overlay: bool) -> Self {
        debug_assert!(!options.is_empty(), "menu '{title}' has no options");
        Menu { title, options, cursor: 0, overlay }
    }

    pub fn main_menu() -> Self {
        Menu::new(
            "Archery",
            vec![
                MenuOption { label: "Play", instruction: Instruction::New(ModeName::Game) },
                MenuOption { label: "Quit", instruction: Instruction::Switch(ModeName::Quit) },
            ],
            false,
        )
    }

    pub fn pause_menu() -> Self {
        Menu::new(
            "Pause",
            vec![
                MenuOption { label: "Resume", instruction: Instruction::Switch(ModeName::Game) },
                MenuOption { label: "Menu", instruction: Instruction::Switch(ModeName::Menu) },
                MenuOption { label: "Quit", instruction: Instruction::Switch(ModeName::Quit) },
            ],
            true,
        )
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_overlay(&self) -> bool {
        self.overlay
    }

    pub fn selected(&self) -> &MenuOption {
        &self.options[self.cursor]
    }

    /// Move the cursor by `delta`, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.options.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    /// Navigate with Up/Down; Confirm returns the selected option's instruction.
    /// Events after a Confirm in the same batch are dropped.
    pub fn update(&mut self, inputs: &[InputEvent]) -> Option<Instruction> {
        for input in inputs {
            match input {
                InputEvent::Pressed(Key::Down) => self.move_cursor(1),
                InputEvent::Pressed(Key::Up) => self.move_cursor(-1),
                InputEvent::Pressed(Key::Confirm) => return Some(self.selected().instruction),
                _ => {}
            }
        }
        None
    }
}
