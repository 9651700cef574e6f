use std::fmt;

use anyhow::{bail, Result};

/// A global shortcut such as `Ctrl+Alt+V`: a set of modifiers plus one letter or digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyBinding {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    pub key: char,
}

impl HotkeyBinding {
    pub fn parse(input: &str) -> Result<Self> {
        let mut binding = HotkeyBinding {
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            key: ' ',
        };
        let mut trigger_key = None;

        for token in input.split('+').map(str::trim) {
            if token.is_empty() {
                bail!("Empty key in hotkey '{}'", input);
            }

            match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => binding.ctrl = true,
                "alt" | "option" => binding.alt = true,
                "shift" => binding.shift = true,
                "meta" | "cmd" | "command" | "super" | "win" => binding.meta = true,
                other => {
                    let mut chars = other.chars();
                    let key = match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase(),
                        _ => bail!("Unknown key '{}' in hotkey '{}'", token, input),
                    };
                    if trigger_key.replace(key).is_some() {
                        bail!("Hotkey '{}' has more than one trigger key", input);
                    }
                }
            }
        }

        match trigger_key {
            Some(key) => {
                binding.key = key;
                Ok(binding)
            }
            None => bail!("Hotkey '{}' has no trigger key", input),
        }
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.meta {
            write!(f, "Meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_paste_hotkey() {
        let binding = HotkeyBinding::parse("Ctrl+Alt+V").unwrap();

        assert!(binding.ctrl);
        assert!(binding.alt);
        assert!(!binding.shift);
        assert!(!binding.meta);
        assert_eq!(binding.key, 'V');
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims_spaces() {
        let binding = HotkeyBinding::parse(" shift + CMD + o ").unwrap();

        assert!(binding.shift);
        assert!(binding.meta);
        assert_eq!(binding.key, 'O');
    }

    #[test]
    fn test_parse_accepts_digit_key() {
        let binding = HotkeyBinding::parse("Alt+3").unwrap();

        assert_eq!(binding.key, '3');
    }

    #[test]
    fn test_parse_rejects_missing_trigger_key() {
        assert!(HotkeyBinding::parse("Ctrl+Alt").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        assert!(HotkeyBinding::parse("Ctrl+Hyper+V").is_err());
    }

    #[test]
    fn test_parse_rejects_two_trigger_keys() {
        assert!(HotkeyBinding::parse("Ctrl+V+C").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(HotkeyBinding::parse("").is_err());
        assert!(HotkeyBinding::parse("Ctrl++V").is_err());
    }

    #[test]
    fn test_display_uses_canonical_order() {
        let binding = HotkeyBinding::parse("v+shift+ctrl").unwrap();

        assert_eq!(binding.to_string(), "Ctrl+Shift+V");
    }

    #[test]
    fn test_has_modifier() {
        assert!(HotkeyBinding::parse("Ctrl+V").unwrap().has_modifier());
        assert!(!HotkeyBinding::parse("V").unwrap().has_modifier());
    }
}
