//! Contact form validation
//!
//! Required fields left empty (after trimming) block submission and get an
//! error mark; typing into a field clears its mark once it has content. A
//! valid submission swaps the form for a success message and is final.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub required: bool,
    pub value: String,
    pub errored: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            value: String::new(),
            errored: false,
        }
    }

    #[inline]
    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submission prevented; names of the fields now marked errored
    Blocked { errored: Vec<String> },
    /// Valid; the host replaces the form with the success message
    Accepted,
    /// The form already succeeded
    AlreadySubmitted,
}

#[derive(Debug, Clone)]
pub struct FormValidator {
    fields: Vec<Field>,
    state: FormState,
}

impl FormValidator {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            state: FormState::Editing,
        }
    }

    #[inline]
    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn errored(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.errored)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Input event: store the value and clear the error once non-empty
    ///
    /// Returns whether the field's error mark was cleared.
    pub fn input(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.state == FormState::Submitted {
            return false;
        }
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return false;
        };
        field.value = value.into();
        if field.errored && !field.is_blank() {
            field.errored = false;
            return true;
        }
        false
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.state == FormState::Submitted {
            return SubmitOutcome::AlreadySubmitted;
        }

        let mut errored = Vec::new();
        for field in &mut self.fields {
            field.errored = field.required && field.is_blank();
            if field.errored {
                errored.push(field.name.clone());
            }
        }

        if errored.is_empty() {
            self.state = FormState::Submitted;
            SubmitOutcome::Accepted
        } else {
            SubmitOutcome::Blocked { errored }
        }
    }
}
