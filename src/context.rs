//! Top-level mode switching.
//!
//! Exactly one mode is active at a time. Each frame the active mode receives
//! the input batch and may answer with an [`Instruction`]; `Switch` reuses the
//! cached instance of the named mode, `New` replaces it with a fresh one.

use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use tracing::info;

use crate::compute::{new_session, tick};
use crate::config::GameConfig;
use crate::entities::GameSession;
use crate::error::GameError;
use crate::input::{InputEvent, Key};
use crate::menu::Menu;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeName {
    Game,
    Menu,
    Pause,
    Quit,
}

impl fmt::Display for ModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeName::Game => "Game",
            ModeName::Menu => "Menu",
            ModeName::Pause => "Pause",
            ModeName::Quit => "Quit",
        };
        f.write_str(name)
    }
}

impl FromStr for ModeName {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Game" => Ok(ModeName::Game),
            "Menu" => Ok(ModeName::Menu),
            "Pause" => Ok(ModeName::Pause),
            "Quit" => Ok(ModeName::Quit),
            other => Err(GameError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Activate the cached instance, building it first if there is none.
    Switch(ModeName),
    /// Throw away the cached instance and activate a brand-new one.
    New(ModeName),
}

impl Instruction {
    pub fn target(self) -> ModeName {
        match self {
            Instruction::Switch(name) | Instruction::New(name) => name,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Switch(name) => write!(f, "{name} Switch"),
            Instruction::New(name) => write!(f, "{name} New"),
        }
    }
}

/// Parses the two-word form, e.g. `"Game New"` or `"Menu Switch"`.
impl FromStr for Instruction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let (Some(mode), Some(action), None) = (words.next(), words.next(), words.next()) else {
            return Err(GameError::MalformedInstruction(s.to_string()));
        };
        let mode: ModeName = mode.parse()?;
        match action {
            "Switch" => Ok(Instruction::Switch(mode)),
            "New" => Ok(Instruction::New(mode)),
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// What the active mode wants after handling a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeUpdate {
    Stay,
    Change(Instruction),
    /// End the program.
    Exit,
}

#[derive(Clone, Debug)]
pub enum Mode {
    Game(Box<GameSession>),
    Menu(Menu),
    Quit,
}

impl Mode {
    pub fn update(
        &mut self,
        inputs: &[InputEvent],
        config: &GameConfig,
    ) -> Result<ModeUpdate, GameError> {
        match self {
            Mode::Game(session) => {
                **session = tick(session, inputs, config)?;
                if inputs.contains(&InputEvent::Pressed(Key::Escape)) {
                    return Ok(ModeUpdate::Change(Instruction::Switch(ModeName::Pause)));
                }
                Ok(ModeUpdate::Stay)
            }
            Mode::Menu(menu) => Ok(menu.update(inputs).map_or(ModeUpdate::Stay, ModeUpdate::Change)),
            Mode::Quit => Ok(ModeUpdate::Exit),
        }
    }
}

fn build_game() -> Mode {
    Mode::Game(Box::new(new_session()))
}

fn build_main_menu() -> Mode {
    Mode::Menu(Menu::main_menu())
}

fn build_pause_menu() -> Mode {
    Mode::Menu(Menu::pause_menu())
}

fn build_quit() -> Mode {
    Mode::Quit
}

struct ModeEntry {
    construct: fn() -> Mode,
    instance: Option<Mode>,
}

impl ModeEntry {
    fn eager(construct: fn() -> Mode) -> Self {
        ModeEntry { construct, instance: Some(construct()) }
    }

    fn lazy(construct: fn() -> Mode) -> Self {
        ModeEntry { construct, instance: None }
    }
}

struct Registry {
    game: ModeEntry,
    menu: ModeEntry,
    pause: ModeEntry,
    quit: ModeEntry,
}

impl Registry {
    fn entry(&self, name: ModeName) -> &ModeEntry {
        match name {
            ModeName::Game => &self.game,
            ModeName::Menu => &self.menu,
            ModeName::Pause => &self.pause,
            ModeName::Quit => &self.quit,
        }
    }

    fn entry_mut(&mut self, name: ModeName) -> &mut ModeEntry {
        match name {
            ModeName::Game => &mut self.game,
            ModeName::Menu => &mut self.menu,
            ModeName::Pause => &mut self.pause,
            ModeName::Quit => &mut self.quit,
        }
    }
}

pub struct ContextSwitcher {
    config: GameConfig,
    registry: Registry,
    active: ModeName,
}

impl ContextSwitcher {
    /// Menus and Quit are built up front; the game waits for `Game New`.
    /// Starts on the main menu.
    pub fn new(config: GameConfig) -> Self {
        ContextSwitcher {
            config,
            registry: Registry {
                game: ModeEntry::lazy(build_game),
                menu: ModeEntry::eager(build_main_menu),
                pause: ModeEntry::eager(build_pause_menu),
                quit: ModeEntry::eager(build_quit),
            },
            active: ModeName::Menu,
        }
    }

    pub fn active(&self) -> ModeName {
        self.active
    }

    /// Cached instance for `name`, if one has been built.
    pub fn mode(&self, name: ModeName) -> Option<&Mode> {
        self.registry.entry(name).instance.as_ref()
    }

    pub fn active_mode(&self) -> Option<&Mode> {
        self.mode(self.active)
    }

    /// The current game, whether or not it is the active mode.
    pub fn session(&self) -> Option<&GameSession> {
        match self.mode(ModeName::Game) {
            Some(Mode::Game(session)) => Some(&**session),
            _ => None,
        }
    }

    /// Run one frame of the active mode and act on its answer.
    pub fn update(&mut self, inputs: &[InputEvent]) -> Result<ControlFlow<()>, GameError> {
        let config = self.config;
        let entry = self.registry.entry_mut(self.active);
        let construct = entry.construct;
        let mode = entry.instance.get_or_insert_with(construct);

        match mode.update(inputs, &config)? {
            ModeUpdate::Stay => Ok(ControlFlow::Continue(())),
            ModeUpdate::Change(instruction) => {
                self.apply(instruction);
                Ok(ControlFlow::Continue(()))
            }
            ModeUpdate::Exit => Ok(ControlFlow::Break(())),
        }
    }

    pub fn apply(&mut self, instruction: Instruction) {
        let name = instruction.target();
        let entry = self.registry.entry_mut(name);
        match instruction {
            Instruction::Switch(_) => {
                if entry.instance.is_none() {
                    entry.instance = Some((entry.construct)());
                }
            }
            Instruction::New(_) => {
                entry.instance = Some((entry.construct)());
                info!(mode = %name, "fresh instance");
            }
        }
        info!(from = %self.active, to = %name, "mode change");
        self.active = name;
    }
}
