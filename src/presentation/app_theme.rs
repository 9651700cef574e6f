use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme};

use crate::core::models::ThemeMode;

pub fn get_theme(mode: &ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::custom(
            "Dark".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.08, 0.08, 0.09),
                text: Color::from_rgb(0.95, 0.95, 0.95),
                primary: Color::from_rgb(0.4, 0.6, 1.0),
                success: Color::from_rgb(0.2, 0.9, 0.4),
                danger: Color::from_rgb(1.0, 0.3, 0.3),
                warning: Color::from_rgb(1.0, 0.7, 0.0),
            },
        ),
        ThemeMode::Light => Theme::custom(
            "Light".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.95, 0.95, 0.97),
                text: Color::from_rgb(0.1, 0.1, 0.1),
                primary: Color::from_rgb(0.2, 0.4, 0.9),
                success: Color::from_rgb(0.1, 0.7, 0.3),
                danger: Color::from_rgb(0.9, 0.2, 0.2),
                warning: Color::from_rgb(0.9, 0.6, 0.0),
            },
        ),
    }
}

struct ButtonColors {
    active: Color,
    hovered: Color,
    pressed: Color,
    text: Color,
}

fn styled_button(colors: ButtonColors, status: button::Status) -> button::Style {
    let (background, text_color, snap) = match status {
        button::Status::Active => (colors.active, colors.text, false),
        button::Status::Hovered => (colors.hovered, colors.text, false),
        button::Status::Pressed => (colors.pressed, colors.text, true),
        button::Status::Disabled => (
            Color::from_rgb(0.3, 0.3, 0.3),
            Color::from_rgb(0.5, 0.5, 0.5),
            false,
        ),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: background,
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap,
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    styled_button(
        ButtonColors {
            active: Color::from_rgb(0.098, 0.529, 0.329),
            hovered: Color::from_rgb(0.122, 0.655, 0.408),
            pressed: Color::from_rgb(0.078, 0.420, 0.263),
            text: Color::WHITE,
        },
        status,
    )
}

pub fn secondary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    styled_button(
        ButtonColors {
            active: Color::from_rgb(0.25, 0.25, 0.25),
            hovered: Color::from_rgb(0.35, 0.35, 0.35),
            pressed: Color::from_rgb(0.2, 0.2, 0.2),
            text: Color::from_rgb(0.9, 0.9, 0.9),
        },
        status,
    )
}

pub fn danger_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    styled_button(
        ButtonColors {
            active: Color::from_rgb(0.8, 0.25, 0.25),
            hovered: Color::from_rgb(0.9, 0.35, 0.35),
            pressed: Color::from_rgb(0.7, 0.2, 0.2),
            text: Color::WHITE,
        },
        status,
    )
}

pub fn preview_frame_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.12))),
        border: Border {
            color: Color::from_rgba(0.5, 0.5, 0.5, 0.4),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_theme_uses_distinct_backgrounds() {
        let dark = get_theme(&ThemeMode::Dark).palette();
        let light = get_theme(&ThemeMode::Light).palette();

        assert_ne!(dark.background, light.background);
        assert!(dark.background.r < light.background.r);
    }

    #[test]
    fn test_disabled_buttons_share_muted_style() {
        let primary = primary_button_style(&Theme::Dark, button::Status::Disabled);
        let danger = danger_button_style(&Theme::Dark, button::Status::Disabled);

        assert_eq!(primary.background, danger.background);
        assert_eq!(primary.text_color, Color::from_rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_pressed_button_snaps() {
        let style = secondary_button_style(&Theme::Dark, button::Status::Pressed);

        assert!(style.snap);
    }
}
