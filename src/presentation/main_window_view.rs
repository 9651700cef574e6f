use iced::keyboard;
use iced::widget::{button, column, container, image, row, text, text_editor, Space};
use iced::{Alignment, Background, ContentFit, Element, Length};

use crate::core::models::{ImageHandle, ThemeMode};
use crate::global_constants::{APPLICATION_TITLE, RESULT_PLACEHOLDER};
use crate::presentation::app_theme;

pub struct MainWindowView {
    preview: Option<image::Handle>,
    preview_caption: String,
    result_content: text_editor::Content,
    status: String,
    is_recognizing: bool,
    theme_mode: ThemeMode,
}

#[derive(Debug, Clone)]
pub enum MainWindowMessage {
    SelectImage,
    ImportFromClipboard,
    ClearImage,
    Recognize,
    CopyResult,
    ResultEdited(text_editor::Action),
}

/// Alt+O selects an image and Alt+R recognizes it.
pub fn shortcut_for(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<MainWindowMessage> {
    if !modifiers.alt() || modifiers.control() || modifiers.logo() {
        return None;
    }

    match key.as_ref() {
        keyboard::Key::Character(c) if c.eq_ignore_ascii_case("o") => {
            Some(MainWindowMessage::SelectImage)
        }
        keyboard::Key::Character(c) if c.eq_ignore_ascii_case("r") => {
            Some(MainWindowMessage::Recognize)
        }
        _ => None,
    }
}

impl MainWindowView {
    pub fn build(theme_mode: ThemeMode, status: &str) -> Self {
        Self {
            preview: None,
            preview_caption: String::new(),
            result_content: text_editor::Content::new(),
            status: status.to_string(),
            is_recognizing: false,
            theme_mode,
        }
    }

    pub fn show_preview(&mut self, handle: &ImageHandle) {
        log::debug!("[MAIN_VIEW] Showing preview for {:?}", handle);
        self.preview = Some(handle.preview().clone());
        self.preview_caption = format!(
            "{} ({}x{})",
            handle.source_path().display(),
            handle.width(),
            handle.height()
        );
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
        self.preview_caption.clear();
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn set_result_text(&mut self, result: &str) {
        self.result_content = text_editor::Content::with_text(result);
    }

    pub fn clear_result(&mut self) {
        self.result_content = text_editor::Content::new();
    }

    pub fn result_text(&self) -> String {
        self.result_content.text()
    }

    pub fn apply_edit(&mut self, action: text_editor::Action) {
        self.result_content.perform(action);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_recognizing(&mut self, is_recognizing: bool) {
        self.is_recognizing = is_recognizing;
    }

    pub fn render_ui(&self) -> Element<'_, MainWindowMessage> {
        let theme = app_theme::get_theme(&self.theme_mode);
        let has_image = self.has_preview();

        let title = text(APPLICATION_TITLE).size(24);

        let source_buttons = row![
            button(text("Select Image (Alt+O)"))
                .padding([10, 20])
                .style(app_theme::primary_button_style)
                .on_press(MainWindowMessage::SelectImage),
            button(text("Paste from Clipboard"))
                .padding([10, 20])
                .style(app_theme::secondary_button_style)
                .on_press(MainWindowMessage::ImportFromClipboard),
            Space::new().width(Length::Fill),
            button(text("Clear"))
                .padding([10, 20])
                .style(app_theme::danger_button_style)
                .on_press_maybe(has_image.then_some(MainWindowMessage::ClearImage)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let preview: Element<'_, MainWindowMessage> = match &self.preview {
            Some(handle) => column![
                image(handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill),
                text(&self.preview_caption).size(12),
            ]
            .spacing(6)
            .align_x(Alignment::Center)
            .into(),
            None => text("No image selected").size(16).into(),
        };

        let preview_frame = container(preview)
            .padding(10)
            .center_x(Length::Fill)
            .center_y(Length::FillPortion(3))
            .style(app_theme::preview_frame_style);

        let recognize_label = if self.is_recognizing {
            "Recognizing..."
        } else {
            "Recognize Text (Alt+R)"
        };

        let action_buttons = row![
            button(text(recognize_label))
                .padding([10, 20])
                .style(app_theme::primary_button_style)
                .on_press_maybe((!self.is_recognizing).then_some(MainWindowMessage::Recognize)),
            button(text("Copy Result"))
                .padding([10, 20])
                .style(app_theme::secondary_button_style)
                .on_press(MainWindowMessage::CopyResult),
        ]
        .spacing(10);

        let result_editor = text_editor(&self.result_content)
            .placeholder(RESULT_PLACEHOLDER)
            .on_action(MainWindowMessage::ResultEdited)
            .height(Length::FillPortion(2));

        let status_line = text(&self.status).size(12);

        let content = column![
            title,
            source_buttons,
            preview_frame,
            action_buttons,
            result_editor,
            status_line,
        ]
        .spacing(14)
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| {
                let palette = theme.palette();
                container::Style {
                    background: Some(Background::Color(palette.background)),
                    text_color: Some(palette.text),
                    ..Default::default()
                }
            })
            .into()
    }
}
