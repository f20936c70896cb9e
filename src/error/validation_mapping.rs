use validator::{ValidationErrors, ValidationErrorsKind};

use super::app_error::ValidationIssue;

/// Flattens nested validator output into per-field issues. Paths use the
/// camelCase names clients send, e.g. `phoneNumber` or `items[2].name`.
pub(super) fn validation_issues(errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    walk(None, errors, &mut issues);
    issues.sort_by(|left, right| {
        left.field
            .cmp(&right.field)
            .then_with(|| left.code.cmp(&right.code))
    });
    issues
}

fn walk(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<ValidationIssue>) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name,
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| ValidationIssue {
                    field: path.clone(),
                    message: error
                        .message
                        .as_deref()
                        .map_or_else(|| format!("{path} is invalid"), str::to_string),
                    code: error.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => walk(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    walk(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
