//! Input handling.
//!
//! The host feeds raw key and mouse events into the listeners. The
//! [`InputManager`] turns key bindings into persistent action flags that the
//! simulation reads each frame. Nothing in here moves the player or fires a
//! gun; it only records what is held.

use glam::Vec2;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown input action '{0}'")]
    UnknownAction(String),
}

/// Named boolean actions the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    Sprint,
}

impl InputAction {
    pub const ALL: [InputAction; 5] = [
        InputAction::Forward,
        InputAction::Backward,
        InputAction::Left,
        InputAction::Right,
        InputAction::Sprint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputAction::Forward => "forward",
            InputAction::Backward => "backward",
            InputAction::Left => "left",
            InputAction::Right => "right",
            InputAction::Sprint => "sprint",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputAction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputAction::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownAction(s.to_string()))
    }
}

/// What a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    /// Held action flag
    Action(InputAction),
    /// One-shot reload command
    Reload,
    /// Select the held gun at this 0-based slot
    Hotkey(usize),
}

impl KeyBinding {
    /// Parse a binding name from configuration ("forward", "sprint", "reload", ...)
    pub fn parse(name: &str) -> Result<Self, InputError> {
        if name.eq_ignore_ascii_case("reload") {
            return Ok(KeyBinding::Reload);
        }
        name.parse().map(KeyBinding::Action)
    }
}

/// Persistent action flags, one per [`InputAction`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    flags: [bool; InputAction::ALL.len()],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&mut self, action: InputAction, pressed: bool) {
        self.flags[action.index()] = pressed;
    }

    pub fn is_pressed(&self, action: InputAction) -> bool {
        self.flags[action.index()]
    }

    pub fn any_movement(&self) -> bool {
        self.is_pressed(InputAction::Forward)
            || self.is_pressed(InputAction::Backward)
            || self.is_pressed(InputAction::Left)
            || self.is_pressed(InputAction::Right)
    }

    pub fn reset(&mut self) {
        self.flags = Default::default();
    }
}

/// Routes raw key events to the bindings registered for each key.
///
/// Keys are case-insensitive. A second key-down for a key that is already
/// down (OS auto-repeat) triggers nothing.
#[derive(Debug, Default)]
pub struct KeyboardListener {
    listeners: HashMap<String, Vec<KeyBinding>>,
    keys_pressed: HashSet<String>,
}

impl KeyboardListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, key: &str, binding: KeyBinding) {
        self.listeners
            .entry(normalize_key(key))
            .or_default()
            .push(binding);
    }

    /// Remove one registration of `binding` for `key`. Returns false if none existed.
    pub fn off(&mut self, key: &str, binding: KeyBinding) -> bool {
        let key = normalize_key(key);
        let Some(bindings) = self.listeners.get_mut(&key) else {
            return false;
        };
        let Some(index) = bindings.iter().position(|b| *b == binding) else {
            return false;
        };
        bindings.remove(index);
        if bindings.is_empty() {
            self.listeners.remove(&key);
        }
        true
    }

    pub fn listener_count(&self, key: &str) -> usize {
        self.listeners
            .get(&normalize_key(key))
            .map_or(0, |bindings| bindings.len())
    }

    /// Bindings triggered by a key press
    pub fn key_down(&mut self, key: &str) -> Vec<KeyBinding> {
        let key = normalize_key(key);
        if !self.keys_pressed.insert(key.clone()) {
            return Vec::new();
        }
        self.listeners.get(&key).cloned().unwrap_or_default()
    }

    /// Bindings triggered by a key release
    pub fn key_up(&mut self, key: &str) -> Vec<KeyBinding> {
        let key = normalize_key(key);
        if !self.keys_pressed.remove(&key) {
            return Vec::new();
        }
        self.listeners.get(&key).cloned().unwrap_or_default()
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys_pressed.contains(&normalize_key(key))
    }

    /// Forget every held key (focus or pointer lock was lost)
    pub fn release_all(&mut self) {
        self.keys_pressed.clear();
    }
}

fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// Aggregates key bindings into [`InputState`] flags.
pub struct InputManager {
    state: InputState,
    bindings: Vec<(String, KeyBinding)>,
    enabled: bool,
}

impl InputManager {
    /// Build from a key → binding-name table. Unknown names are reported
    /// and left unbound.
    pub fn from_bindings(table: &BTreeMap<String, String>) -> Self {
        let bindings = table
            .iter()
            .filter_map(|(key, name)| match KeyBinding::parse(name) {
                Ok(binding) => Some((key.clone(), binding)),
                Err(e) => {
                    log::error!("Key '{}' not bound: {}", key, e);
                    None
                }
            })
            .collect();

        Self {
            state: InputState::new(),
            bindings,
            enabled: false,
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bindings(&self) -> &[(String, KeyBinding)] {
        &self.bindings
    }

    /// Register every binding with the listener. Calling twice has no further effect.
    pub fn enable(&mut self, listener: &mut KeyboardListener) {
        if self.enabled {
            return;
        }
        for (key, binding) in &self.bindings {
            listener.on(key, *binding);
        }
        self.enabled = true;
    }

    /// Unregister every binding and clear all flags.
    pub fn disable(&mut self, listener: &mut KeyboardListener) {
        if !self.enabled {
            return;
        }
        for (key, binding) in &self.bindings {
            listener.off(key, *binding);
        }
        self.state.reset();
        self.enabled = false;
    }

    /// Record a triggered binding. Only action bindings touch the flags.
    pub fn record(&mut self, binding: KeyBinding, pressed: bool) {
        if !self.enabled {
            return;
        }
        if let KeyBinding::Action(action) = binding {
            self.state.set_pressed(action, pressed);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse buttons and accumulated look movement while pointer lock is held.
#[derive(Debug, Default)]
pub struct MouseListener {
    enabled: bool,
    left_down: bool,
    look_delta: Vec2,
}

impl MouseListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.left_down = false;
        self.look_delta = Vec2::ZERO;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn button_down(&mut self, button: MouseButton) {
        if self.enabled && button == MouseButton::Left {
            self.left_down = true;
        }
    }

    pub fn button_up(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.left_down = false;
        }
    }

    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        if self.enabled {
            self.look_delta += Vec2::new(dx, dy);
        }
    }

    /// Consume the movement accumulated since the last frame
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    pub fn trigger_held(&self) -> bool {
        self.left_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> BTreeMap<String, String> {
        [
            ("w", "forward"),
            ("s", "backward"),
            ("a", "left"),
            ("d", "right"),
            ("shift", "sprint"),
            ("r", "reload"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn press(manager: &mut InputManager, listener: &mut KeyboardListener, key: &str) {
        for binding in listener.key_down(key) {
            manager.record(binding, true);
        }
    }

    fn release(manager: &mut InputManager, listener: &mut KeyboardListener, key: &str) {
        for binding in listener.key_up(key) {
            manager.record(binding, false);
        }
    }

    #[test]
    fn test_parse_action_names() {
        assert_eq!("Forward".parse::<InputAction>(), Ok(InputAction::Forward));
        assert_eq!(KeyBinding::parse("reload"), Ok(KeyBinding::Reload));
        assert_eq!(
            KeyBinding::parse("jump"),
            Err(InputError::UnknownAction("jump".to_string()))
        );
    }

    #[test]
    fn test_flags_follow_press_and_release() {
        let mut listener = KeyboardListener::new();
        let mut manager = InputManager::from_bindings(&default_table());
        manager.enable(&mut listener);

        press(&mut manager, &mut listener, "w");
        press(&mut manager, &mut listener, "Shift");
        assert!(manager.state().is_pressed(InputAction::Forward));
        assert!(manager.state().is_pressed(InputAction::Sprint));
        assert!(!manager.state().is_pressed(InputAction::Left));

        release(&mut manager, &mut listener, "w");
        assert!(!manager.state().is_pressed(InputAction::Forward));
        assert!(manager.state().is_pressed(InputAction::Sprint));
    }

    #[test]
    fn test_enable_is_idempotent() {
        let mut listener = KeyboardListener::new();
        let mut manager = InputManager::from_bindings(&default_table());
        manager.enable(&mut listener);
        manager.enable(&mut listener);
        assert_eq!(listener.listener_count("w"), 1);

        manager.disable(&mut listener);
        manager.disable(&mut listener);
        assert_eq!(listener.listener_count("w"), 0);
    }

    #[test]
    fn test_disable_resets_flags() {
        let mut listener = KeyboardListener::new();
        let mut manager = InputManager::from_bindings(&default_table());
        manager.enable(&mut listener);
        press(&mut manager, &mut listener, "d");
        manager.disable(&mut listener);
        assert_eq!(*manager.state(), InputState::new());
    }

    #[test]
    fn test_unknown_binding_is_skipped() {
        let mut table = default_table();
        table.insert("space".to_string(), "jump".to_string());
        let manager = InputManager::from_bindings(&table);
        assert_eq!(manager.bindings().len(), 6);
    }

    #[test]
    fn test_auto_repeat_is_debounced() {
        let mut listener = KeyboardListener::new();
        listener.on("1", KeyBinding::Hotkey(0));
        assert_eq!(listener.key_down("1"), vec![KeyBinding::Hotkey(0)]);
        assert!(listener.key_down("1").is_empty());
        assert_eq!(listener.key_up("1"), vec![KeyBinding::Hotkey(0)]);
        assert!(listener.key_up("1").is_empty());
    }

    #[test]
    fn test_mouse_ignored_while_disabled() {
        let mut mouse = MouseListener::new();
        mouse.button_down(MouseButton::Left);
        mouse.mouse_move(4.0, 2.0);
        assert!(!mouse.trigger_held());
        assert_eq!(mouse.take_look_delta(), Vec2::ZERO);

        mouse.enable();
        mouse.button_down(MouseButton::Left);
        mouse.mouse_move(4.0, 2.0);
        mouse.mouse_move(1.0, 0.0);
        assert!(mouse.trigger_held());
        assert_eq!(mouse.take_look_delta(), Vec2::new(5.0, 2.0));
        assert_eq!(mouse.take_look_delta(), Vec2::ZERO);

        mouse.disable();
        assert!(!mouse.trigger_held());
    }
}
