use tui_textarea::{CursorMove, TextArea};

/// Which value a modal prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewTab,
    ApiKey,
    OpenFile,
    SaveTranscript,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::NewTab => "Enter a name for the new chat tab",
            PromptKind::ApiKey => "Enter new API key",
            PromptKind::OpenFile => "Open text file into the input box",
            PromptKind::SaveTranscript => "Save chat history to",
        }
    }

    pub fn is_secret(self) -> bool {
        self == PromptKind::ApiKey
    }
}

pub struct Prompt {
    pub kind: PromptKind,
    pub input: TextArea<'static>,
}

impl Prompt {
    pub fn new(kind: PromptKind, initial: &str) -> Self {
        let mut input = TextArea::from([initial.to_string()]);
        input.move_cursor(CursorMove::End);
        if kind.is_secret() {
            input.set_mask_char('•');
        }
        Self { kind, input }
    }

    pub fn value(&self) -> String {
        self.input.lines().join("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub body: String,
}

impl Dialog {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(DialogKind::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(DialogKind::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(DialogKind::Error, title, body)
    }

    fn new(kind: DialogKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Overlay that captures keyboard input until dismissed.
pub enum Modal {
    Prompt(Prompt),
    Dialog(Dialog),
}

/// One-line status shown under the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub is_error: bool,
}

/// Per-tab presentation state. Several views may point at the same session
/// when a duplicate name is merged or overwritten.
pub struct TabView {
    pub name: String,
    pub input: TextArea<'static>,
    /// Lines scrolled up from the newest message.
    pub scroll_from_bottom: u16,
    /// Index of the highlighted bubble, if any.
    pub selected: Option<usize>,
    /// Requests sent from this tab still waiting for a reply.
    pub pending: usize,
}

impl TabView {
    pub fn new(name: impl Into<String>) -> Self {
        let mut view = Self {
            name: name.into(),
            input: TextArea::default(),
            scroll_from_bottom: 0,
            selected: None,
            pending: 0,
        };
        view.configure_input();
        view
    }

    fn configure_input(&mut self) {
        self.input.set_placeholder_text("Type your message...");
        self.input
            .set_cursor_line_style(ratatui::style::Style::default());
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        self.input = TextArea::from(text.lines().map(str::to_owned).collect::<Vec<_>>());
        self.input.move_cursor(CursorMove::Bottom);
        self.input.move_cursor(CursorMove::End);
        self.configure_input();
    }

    pub fn clear_input(&mut self) {
        self.set_input_text("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_round_trips_multiline_text() {
        let mut view = TabView::new("t");
        view.set_input_text("one\ntwo");
        assert_eq!(view.input_text(), "one\ntwo");
        view.clear_input();
        assert_eq!(view.input_text(), "");
    }

    #[test]
    fn prompt_value_is_prefilled() {
        let prompt = Prompt::new(PromptKind::SaveTranscript, "Work Chat History.txt");
        assert_eq!(prompt.value(), "Work Chat History.txt");
        assert!(!prompt.kind.is_secret());
        assert!(PromptKind::ApiKey.is_secret());
    }
}
