//! Message templates and rendering

use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MemberRecord, TemplateKind, TemplateSet};

/// Replace each `{key}` with its value in a single left-to-right pass.
///
/// Inserted values are never scanned again. Unknown placeholders stay verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Operator-editable templates
#[derive(Debug)]
pub struct TemplateStore {
    templates: RwLock<TemplateSet>,
}

impl TemplateStore {
    pub fn new(portal_name: &str) -> Self {
        Self {
            templates: RwLock::new(TemplateSet {
                password: format!(
                    "Dear {{name}}, your {portal_name} portal login ID is {{membership_id}} and your password is: {{password}}"
                ),
                birthday: format!(
                    "Happy Birthday {{name}}! Warm wishes from everyone at {portal_name}."
                ),
            }),
        }
    }

    pub fn current(&self) -> TemplateSet {
        self.templates.read().clone()
    }

    /// Replace a template after checking its required placeholders.
    /// A rejected update leaves the previous template in place.
    pub fn update(&self, kind: TemplateKind, template: &str) -> AppResult<()> {
        if template.trim().is_empty() {
            return Err(AppError::new(ErrorCode::TemplateEmpty));
        }
        if let Some(missing) = kind
            .required_placeholders()
            .iter()
            .find(|p| !template.contains(**p))
        {
            return Err(AppError::with_message(
                ErrorCode::TemplateMissingPlaceholder,
                format!("Template must contain {missing}"),
            )
            .with_detail("placeholder", *missing));
        }

        let mut templates = self.templates.write();
        match kind {
            TemplateKind::Password => templates.password = template.to_string(),
            TemplateKind::Birthday => templates.birthday = template.to_string(),
        }
        tracing::info!(kind = ?kind, "Template updated");
        Ok(())
    }

    pub fn render_password(&self, member: &MemberRecord, password: &str) -> String {
        render(
            &self.templates.read().password,
            &[
                ("membership_id", member.membership_id.as_str()),
                ("password", password),
                ("name", member.name.as_str()),
            ],
        )
    }

    pub fn render_birthday(&self, member: &MemberRecord) -> String {
        render(
            &self.templates.read().birthday,
            &[
                ("name", member.name.as_str()),
                ("membership_id", member.membership_id.as_str()),
            ],
        )
    }
}
