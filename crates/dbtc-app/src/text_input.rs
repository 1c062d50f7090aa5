//! Single-line text field state

/// Editable text with the cursor fixed at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character. Returns false if the field was empty.
    pub fn backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Take the current contents, leaving the field empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

/// Edit applied to whichever text field has focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Clear,
}

impl TextInput {
    pub fn apply(&mut self, edit: &TextEdit) {
        match edit {
            TextEdit::Insert(c) => self.insert(*c),
            TextEdit::Backspace => {
                self.backspace();
            }
            TextEdit::Clear => self.clear(),
        }
    }
}
