use iced::futures::{channel::mpsc, SinkExt, Stream, StreamExt};
use iced::stream;
use rdev::{listen, EventType, Key};

use crate::core::errors::OcrAppError;
use crate::core::models::HotkeyBinding;
use crate::global_constants::{LOG_TAG_KEYBOARD, MESSAGE_KEYBOARD_HOTKEY_DETECTED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalKeyboardEvent {
    PasteHotkeyPressed,
    ListenerFailed(OcrAppError),
}

enum ListenerSignal {
    Key(EventType),
    Failed(String),
}

pub struct GlobalKeyboardListener;

impl GlobalKeyboardListener {
    pub fn create_event_stream(binding: &HotkeyBinding) -> impl Stream<Item = GlobalKeyboardEvent> {
        let binding = *binding;
        stream::channel(
            1,
            move |mut output_channel: mpsc::Sender<GlobalKeyboardEvent>| async move {
                let (keyboard_sender, mut keyboard_receiver) = mpsc::channel(16);

                Self::spawn_keyboard_listener_thread(keyboard_sender);

                let mut state = match KeyboardState::for_binding(binding) {
                    Some(state) => state,
                    None => {
                        let error = OcrAppError::HotkeyRegistrationFailed(format!(
                            "{} cannot be mapped to a keyboard key",
                            binding
                        ));
                        let _ = output_channel
                            .send(GlobalKeyboardEvent::ListenerFailed(error))
                            .await;
                        return;
                    }
                };

                log::info!("{} Listening for {}", LOG_TAG_KEYBOARD, binding);
                if !binding.has_modifier() {
                    log::warn!(
                        "{} {} has no modifier and fires on every plain key press",
                        LOG_TAG_KEYBOARD,
                        binding
                    );
                }

                loop {
                    match keyboard_receiver.select_next_some().await {
                        ListenerSignal::Key(event_type) => {
                            if let Some(global_event) = state.process_event_type(event_type) {
                                let _ = output_channel.send(global_event).await;
                            }
                        }
                        ListenerSignal::Failed(detail) => {
                            let error = OcrAppError::HotkeyRegistrationFailed(detail);
                            let _ = output_channel
                                .send(GlobalKeyboardEvent::ListenerFailed(error))
                                .await;
                        }
                    }
                }
            },
        )
    }

    fn spawn_keyboard_listener_thread(mut keyboard_sender: mpsc::Sender<ListenerSignal>) {
        std::thread::spawn(move || {
            log::info!(
                "{} Starting global keyboard listener thread",
                LOG_TAG_KEYBOARD
            );
            let mut event_sender = keyboard_sender.clone();
            if let Err(e) = listen(move |event| {
                if matches!(
                    event.event_type,
                    EventType::KeyPress(_) | EventType::KeyRelease(_)
                ) {
                    let _ = event_sender.try_send(ListenerSignal::Key(event.event_type));
                }
            }) {
                log::error!(
                    "{} Failed to start keyboard listener: {:?}. The main window keeps working without the hotkey.",
                    LOG_TAG_KEYBOARD,
                    e
                );
                let _ = keyboard_sender.try_send(ListenerSignal::Failed(format!("{:?}", e)));
            }
        });
    }
}

#[derive(Default)]
struct ModifierState {
    ctrl: bool,
    alt: bool,
    shift: bool,
    meta: bool,
}

struct KeyboardState {
    binding: HotkeyBinding,
    trigger_key: Key,
    modifiers: ModifierState,
    is_trigger_held: bool,
}

impl KeyboardState {
    fn for_binding(binding: HotkeyBinding) -> Option<Self> {
        Some(Self {
            binding,
            trigger_key: rdev_key_for(binding.key)?,
            modifiers: ModifierState::default(),
            is_trigger_held: false,
        })
    }

    fn process_event_type(&mut self, event_type: EventType) -> Option<GlobalKeyboardEvent> {
        match event_type {
            EventType::KeyPress(key) => self.handle_key_press(key),
            EventType::KeyRelease(key) => {
                self.handle_key_release(key);
                None
            }
            _ => None,
        }
    }

    fn handle_key_press(&mut self, key: Key) -> Option<GlobalKeyboardEvent> {
        if self.set_modifier(key, true) {
            return None;
        }

        if key != self.trigger_key {
            return None;
        }

        // Auto-repeat sends repeated presses while the key is held.
        if self.is_trigger_held {
            return None;
        }
        self.is_trigger_held = true;

        if self.modifiers_match() {
            log::info!("{} {}", LOG_TAG_KEYBOARD, MESSAGE_KEYBOARD_HOTKEY_DETECTED);
            Some(GlobalKeyboardEvent::PasteHotkeyPressed)
        } else {
            None
        }
    }

    fn handle_key_release(&mut self, key: Key) {
        if self.set_modifier(key, false) {
            return;
        }
        if key == self.trigger_key {
            self.is_trigger_held = false;
        }
    }

    fn set_modifier(&mut self, key: Key, is_pressed: bool) -> bool {
        let slot = match key {
            Key::ControlLeft | Key::ControlRight => &mut self.modifiers.ctrl,
            Key::Alt | Key::AltGr => &mut self.modifiers.alt,
            Key::ShiftLeft | Key::ShiftRight => &mut self.modifiers.shift,
            Key::MetaLeft | Key::MetaRight => &mut self.modifiers.meta,
            _ => return false,
        };
        log::trace!("{} modifier {:?} pressed={}", LOG_TAG_KEYBOARD, key, is_pressed);
        *slot = is_pressed;
        true
    }

    fn modifiers_match(&self) -> bool {
        self.modifiers.ctrl == self.binding.ctrl
            && self.modifiers.alt == self.binding.alt
            && self.modifiers.shift == self.binding.shift
            && self.modifiers.meta == self.binding.meta
    }
}

fn rdev_key_for(key: char) -> Option<Key> {
    let mapped = match key.to_ascii_uppercase() {
        'A' => Key::KeyA,
        'B' => Key::KeyB,
        'C' => Key::KeyC,
        'D' => Key::KeyD,
        'E' => Key::KeyE,
        'F' => Key::KeyF,
        'G' => Key::KeyG,
        'H' => Key::KeyH,
        'I' => Key::KeyI,
        'J' => Key::KeyJ,
        'K' => Key::KeyK,
        'L' => Key::KeyL,
        'M' => Key::KeyM,
        'N' => Key::KeyN,
        'O' => Key::KeyO,
        'P' => Key::KeyP,
        'Q' => Key::KeyQ,
        'R' => Key::KeyR,
        'S' => Key::KeyS,
        'T' => Key::KeyT,
        'U' => Key::KeyU,
        'V' => Key::KeyV,
        'W' => Key::KeyW,
        'X' => Key::KeyX,
        'Y' => Key::KeyY,
        'Z' => Key::KeyZ,
        '0' => Key::Num0,
        '1' => Key::Num1,
        '2' => Key::Num2,
        '3' => Key::Num3,
        '4' => Key::Num4,
        '5' => Key::Num5,
        '6' => Key::Num6,
        '7' => Key::Num7,
        '8' => Key::Num8,
        '9' => Key::Num9,
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_for(hotkey: &str) -> KeyboardState {
        KeyboardState::for_binding(HotkeyBinding::parse(hotkey).unwrap()).unwrap()
    }

    fn press(state: &mut KeyboardState, key: Key) -> Option<GlobalKeyboardEvent> {
        state.process_event_type(EventType::KeyPress(key))
    }

    fn release(state: &mut KeyboardState, key: Key) -> Option<GlobalKeyboardEvent> {
        state.process_event_type(EventType::KeyRelease(key))
    }

    #[test]
    fn test_hotkey_fires_when_all_modifiers_held() {
        let mut state = state_for("Ctrl+Alt+V");

        assert_eq!(press(&mut state, Key::ControlLeft), None);
        assert_eq!(press(&mut state, Key::Alt), None);

        assert_eq!(
            press(&mut state, Key::KeyV),
            Some(GlobalKeyboardEvent::PasteHotkeyPressed)
        );
    }

    #[test]
    fn test_trigger_without_modifiers_is_ignored() {
        let mut state = state_for("Ctrl+Alt+V");

        assert_eq!(press(&mut state, Key::KeyV), None);
    }

    #[test]
    fn test_extra_modifier_prevents_trigger() {
        let mut state = state_for("Ctrl+Alt+V");

        press(&mut state, Key::ControlRight);
        press(&mut state, Key::Alt);
        press(&mut state, Key::ShiftLeft);

        assert_eq!(press(&mut state, Key::KeyV), None);
    }

    #[test]
    fn test_auto_repeat_fires_once_per_physical_press() {
        let mut state = state_for("Ctrl+Alt+V");
        press(&mut state, Key::ControlLeft);
        press(&mut state, Key::Alt);

        assert!(press(&mut state, Key::KeyV).is_some());
        assert!(press(&mut state, Key::KeyV).is_none());

        release(&mut state, Key::KeyV);
        assert!(press(&mut state, Key::KeyV).is_some());
    }

    #[test]
    fn test_released_modifier_stops_trigger() {
        let mut state = state_for("Ctrl+Alt+V");
        press(&mut state, Key::ControlLeft);
        press(&mut state, Key::Alt);
        release(&mut state, Key::Alt);

        assert_eq!(press(&mut state, Key::KeyV), None);
    }

    #[test]
    fn test_other_keys_do_not_trigger() {
        let mut state = state_for("Ctrl+Alt+V");
        press(&mut state, Key::ControlLeft);
        press(&mut state, Key::Alt);

        assert_eq!(press(&mut state, Key::KeyC), None);
    }

    #[test]
    fn test_rdev_key_for_maps_letters_and_digits() {
        assert_eq!(rdev_key_for('v'), Some(Key::KeyV));
        assert_eq!(rdev_key_for('7'), Some(Key::Num7));
        assert_eq!(rdev_key_for('?'), None);
    }
}
