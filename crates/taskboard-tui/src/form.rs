//! Single-line text fields and small multi-field forms.

use taskboard_domain::Text;

#[derive(Debug, Clone, Default)]
pub struct TextField {
    buffer: String,
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// What to draw: bullets for masked fields.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }

    /// Cursor position in terminal columns.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }
}

/// An ordered set of labelled fields with one focused.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<(Text, TextField)>,
    focus: usize,
}

impl Form {
    pub fn new(fields: Vec<(Text, TextField)>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn login() -> Self {
        Self::new(vec![
            (Text::Email, TextField::new()),
            (Text::Password, TextField::masked()),
        ])
    }

    pub fn signup() -> Self {
        Self::new(vec![
            (Text::FullName, TextField::new()),
            (Text::Email, TextField::new()),
            (Text::Password, TextField::masked()),
        ])
    }

    pub fn task() -> Self {
        let mut priority = TextField::new();
        priority.set("medium");
        Self::new(vec![
            (Text::Title, TextField::new()),
            (Text::Notes, TextField::new()),
            (Text::Priority, priority),
        ])
    }

    pub fn fields(&self) -> impl Iterator<Item = (Text, &TextField)> {
        self.fields.iter().map(|(label, field)| (*label, field))
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        &mut self.fields[self.focus].1
    }

    pub fn value(&self, label: Text) -> &str {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, f)| f.as_str())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, label: Text, value: impl Into<String>) {
        if let Some((_, field)) = self.fields.iter_mut().find(|(l, _)| *l == label) {
            field.set(value);
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn clear(&mut self) {
        for (_, field) in &mut self.fields {
            field.clear();
        }
        self.focus = 0;
    }
}
