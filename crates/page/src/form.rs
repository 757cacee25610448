//! Form validation and delete confirmation

use serde::Serialize;

/// Kind of value a form field accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number { min: Option<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FormField {
    pub fn text(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            required,
            kind: FieldKind::Text,
        }
    }

    pub fn number(name: &str, required: bool, min: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            required,
            kind: FieldKind::Number { min },
        }
    }

    fn check(&self) -> Option<ValidationIssue> {
        let value = self.value.trim();
        if value.is_empty() {
            return self.required.then_some(ValidationIssue::Missing);
        }

        match self.kind {
            FieldKind::Text => None,
            FieldKind::Number { min } => match value.parse::<f64>() {
                Ok(n) if !n.is_finite() => Some(ValidationIssue::NotANumber),
                Ok(n) => match min {
                    Some(min) if n < min => Some(ValidationIssue::BelowMinimum(min)),
                    _ => None,
                },
                Err(_) => Some(ValidationIssue::NotANumber),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    Missing,
    NotANumber,
    BelowMinimum(f64),
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::Missing => write!(f, "is required"),
            ValidationIssue::NotANumber => write!(f, "must be a number"),
            ValidationIssue::BelowMinimum(min) => write!(f, "must be at least {}", min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub issue: ValidationIssue,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Proceed,
    Blocked(Vec<FieldError>),
}

impl SubmitOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitOutcome::Blocked(_))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
    validated: bool,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            validated: false,
        }
    }

    /// The create/edit product form
    pub fn product() -> Self {
        Self::new(vec![
            FormField::text("name", true),
            FormField::text("description", true),
            FormField::number("price", true, Some(0.0)),
            FormField::text("category", true),
            FormField::text("tags", false),
        ])
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn check_validity(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|field| {
                field.check().map(|issue| FieldError {
                    field: field.name.clone(),
                    issue,
                })
            })
            .collect()
    }

    /// Validate on submit. The form is marked validated either way.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.validated = true;
        let errors = self.check_validity();
        if errors.is_empty() {
            SubmitOutcome::Proceed
        } else {
            SubmitOutcome::Blocked(errors)
        }
    }

    pub fn was_validated(&self) -> bool {
        self.validated
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// A submit button, with the title of the card it sits in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub card_title: Option<String>,
}

impl Button {
    pub fn new(label: &str, card_title: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            card_title: card_title.map(str::to_string),
        }
    }

    pub fn is_delete(&self) -> bool {
        self.label.trim() == "Delete"
    }
}

pub fn delete_confirmation(product_name: Option<&str>) -> String {
    let name = product_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("this product");
    format!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone.",
        name
    )
}

/// Whether clicking `button` may go ahead
pub fn confirm_click(button: &Button, confirmer: &dyn Confirmer) -> bool {
    if !button.is_delete() {
        return true;
    }
    confirmer.confirm(&delete_confirmation(button.card_title.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Answer {
        reply: bool,
        asked: Mutex<Vec<String>>,
    }

    impl Confirmer for Answer {
        fn confirm(&self, message: &str) -> bool {
            self.asked.lock().push(message.to_string());
            self.reply
        }
    }

    fn answer(reply: bool) -> Answer {
        Answer {
            reply,
            asked: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_empty_product_form_blocked() {
        let mut form = Form::product();
        assert!(!form.was_validated());

        let outcome = form.submit();
        assert!(form.was_validated());
        match outcome {
            SubmitOutcome::Blocked(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "description", "price", "category"]);
            }
            SubmitOutcome::Proceed => panic!("expected blocked submission"),
        }
    }

    #[test]
    fn test_price_rules() {
        let mut form = Form::product();
        for (name, value) in [("name", "Mug"), ("description", "Red"), ("category", "Kitchen")] {
            assert!(form.set(name, value));
        }

        form.set("price", "-1");
        assert_eq!(
            form.check_validity()[0].issue,
            ValidationIssue::BelowMinimum(0.0)
        );

        form.set("price", "cheap");
        assert_eq!(form.check_validity()[0].issue, ValidationIssue::NotANumber);

        form.set("price", "4.50");
        assert_eq!(form.submit(), SubmitOutcome::Proceed);
        assert!(!form.set("colour", "red"));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let refuse = answer(false);
        let button = Button::new(" Delete ", Some("Office Chair"));
        assert!(!confirm_click(&button, &refuse));
        assert_eq!(
            refuse.asked.lock()[0],
            "Are you sure you want to delete \"Office Chair\"? This action cannot be undone."
        );

        let accept = answer(true);
        assert!(confirm_click(&Button::new("Delete", None), &accept));
        assert!(accept.asked.lock()[0].contains("\"this product\""));
    }

    #[test]
    fn test_other_buttons_skip_confirmation() {
        let refuse = answer(false);
        assert!(confirm_click(&Button::new("Save", Some("Mug")), &refuse));
        assert!(refuse.asked.lock().is_empty());
    }
}
