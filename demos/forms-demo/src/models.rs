use ledgerly_validator::{FieldValue, FormModel, ValueBag};

// ==================== 自定义校验 ====================

fn strong_password(value: &FieldValue) -> Option<String> {
    let password = value.as_text()?;
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    (!(has_letter && has_digit))
        .then(|| "Password must contain both letters and digits".to_string())
}

fn known_role(value: &FieldValue) -> Option<String> {
    match value.as_text()? {
        "admin" | "partner" | "manager" | "article" | "staff" => None,
        _ => Some("Role must be one of admin, partner, manager, article, staff".to_string()),
    }
}

// ==================== 表单模型 ====================

/// 客户新建/编辑表单
#[derive(Debug, Clone, FormModel)]
#[form(name = "client")]
pub struct ClientForm {
    #[rule(required, max_length = 60)]
    pub first_name: String,
    #[rule(max_length = 60)]
    pub last_name: Option<String>,
    #[rule(email)]
    pub email: String,
    #[rule(phone)]
    pub phone: String,
    #[rule(optional_phone)]
    pub alternate_phone: Option<String>,
    #[rule(required, max_length = 200)]
    pub address: String,
    #[rule(required)]
    pub city: String,
    #[rule(required)]
    pub state: String,
    #[rule(pincode)]
    pub pincode: String,
    /// PAN：5 个字母 + 4 个数字 + 1 个字母
    #[rule(pattern = "^[A-Z]{5}[0-9]{4}[A-Z]$")]
    pub pan: Option<String>,
}

/// 用户（员工账号）表单
#[derive(Debug, Clone, FormModel)]
#[form(name = "user")]
pub struct UserForm {
    #[rule(required, min_length = 2, max_length = 50)]
    pub first_name: String,
    #[rule(required, max_length = 50)]
    pub last_name: String,
    #[rule(email)]
    pub email: String,
    #[rule(phone)]
    pub phone: String,
    #[rule(required, min_length = 8, max_length = 64, custom = strong_password)]
    pub password: String,
    #[rule(required, custom = known_role)]
    pub role: String,
}

/// 任务/项目表单
#[derive(Debug, Clone, FormModel)]
#[form(name = "task")]
pub struct TaskForm {
    #[rule(required, min_length = 3, max_length = 120)]
    pub title: String,
    #[rule(required)]
    pub client_id: String,
    #[rule(required, pattern = "^[0-9]{4}-[0-9]{2}-[0-9]{2}$")]
    pub due_date: String,
    #[rule(max_length = 1000)]
    pub description: Option<String>,
    #[rule(amount)]
    pub estimated_hours: Option<f64>,
}

/// 发票表单
#[derive(Debug, Clone, FormModel)]
#[form(name = "invoice")]
pub struct InvoiceForm {
    #[rule(required)]
    pub client_id: String,
    #[rule(required, pattern = "^[0-9]{4}-[0-9]{2}-[0-9]{2}$")]
    pub invoice_date: String,
    #[rule(pattern = "^[0-9]{4}-[0-9]{2}-[0-9]{2}$")]
    pub due_date: Option<String>,
    #[rule(amount, required)]
    pub amount: Option<f64>,
    #[rule(percentage)]
    pub gst_rate: Option<f64>,
    #[rule(percentage)]
    pub discount: Option<f64>,
    #[rule(max_length = 500)]
    pub notes: Option<String>,
}

/// 贷记单表单
#[derive(Debug, Clone, FormModel)]
#[form(name = "credit-note")]
pub struct CreditNoteForm {
    #[rule(required)]
    pub invoice_id: String,
    #[rule(amount, required)]
    pub amount: Option<f64>,
    #[rule(required, min_length = 5, max_length = 500)]
    pub reason: String,
    #[rule(required, pattern = "^[0-9]{4}-[0-9]{2}-[0-9]{2}$")]
    pub note_date: String,
}

/// 借记单表单
#[derive(Debug, Clone, FormModel)]
#[form(name = "debit-note")]
pub struct DebitNoteForm {
    #[rule(required)]
    pub invoice_id: String,
    #[rule(amount, required)]
    pub amount: Option<f64>,
    #[rule(percentage)]
    pub gst_rate: Option<f64>,
    #[rule(required, min_length = 5, max_length = 500)]
    pub reason: String,
    #[rule(required, pattern = "^[0-9]{4}-[0-9]{2}-[0-9]{2}$")]
    pub note_date: String,
}

// ==================== 示例数据 ====================

impl ClientForm {
    pub fn sample() -> Self {
        Self {
            first_name: "Anita".into(),
            last_name: Some("Rao".into()),
            email: "anita@raoassociates.in".into(),
            phone: "9845012345".into(),
            alternate_phone: None,
            address: "12 MG Road".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            pincode: "560001".into(),
            pan: Some("ABCPR1234K".into()),
        }
    }
}

impl UserForm {
    pub fn sample() -> Self {
        Self {
            first_name: "Vikram".into(),
            last_name: "Shah".into(),
            email: "vikram@raoassociates.in".into(),
            phone: "9820098200".into(),
            password: "ledger2026".into(),
            role: "manager".into(),
        }
    }
}

impl TaskForm {
    pub fn sample() -> Self {
        Self {
            title: "GST return Q1".into(),
            client_id: "CL-0042".into(),
            due_date: "2026-07-31".into(),
            description: Some("GSTR-1 and GSTR-3B for April to June".into()),
            estimated_hours: Some(6.5),
        }
    }
}

impl InvoiceForm {
    pub fn sample() -> Self {
        Self {
            client_id: "CL-0042".into(),
            invoice_date: "2026-04-01".into(),
            due_date: Some("2026-04-30".into()),
            amount: Some(45000.0),
            gst_rate: Some(18.0),
            discount: None,
            notes: None,
        }
    }
}

impl CreditNoteForm {
    pub fn sample() -> Self {
        Self {
            invoice_id: "INV-2026-0091".into(),
            amount: Some(1200.0),
            reason: "Fee revised after scope change".into(),
            note_date: "2026-05-02".into(),
        }
    }
}

impl DebitNoteForm {
    pub fn sample() -> Self {
        Self {
            invoice_id: "INV-2026-0091".into(),
            amount: Some(300.0),
            gst_rate: Some(18.0),
            reason: "Additional out-of-pocket expenses".into(),
            note_date: "2026-05-02".into(),
        }
    }
}

/// 按表单名取一份合法的示例值袋
pub fn sample_values(form: &str) -> Option<ValueBag> {
    let values = match form {
        "client" => ClientForm::sample().values(),
        "user" => UserForm::sample().values(),
        "task" => TaskForm::sample().values(),
        "invoice" => InvoiceForm::sample().values(),
        "credit-note" => CreditNoteForm::sample().values(),
        "debit-note" => DebitNoteForm::sample().values(),
        _ => return None,
    };
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerly_validator::{FormRegistry, Validate};

    #[test]
    fn test_samples_are_valid() {
        assert!(ClientForm::sample().validate().is_ok());
        assert!(UserForm::sample().validate().is_ok());
        assert!(TaskForm::sample().validate().is_ok());
        assert!(InvoiceForm::sample().validate().is_ok());
        assert!(CreditNoteForm::sample().validate().is_ok());
        assert!(DebitNoteForm::sample().validate().is_ok());
        assert!(sample_values("report-filter").is_none());
    }

    #[test]
    fn test_client_errors() {
        let mut form = ClientForm::sample();
        form.first_name = "   ".into();
        form.email = "anita@rao".into();
        form.pan = Some("abcpr1234k".into());
        form.alternate_phone = Some(String::new());

        let mut session = ClientForm::session();
        assert!(!session.validate_all(&form.values()));
        assert_eq!(session.errors().len(), 3);
        assert_eq!(session.error("firstName"), Some("FirstName is required"));
        assert_eq!(session.error("email"), Some("Email format is invalid"));
        assert_eq!(session.error("pan"), Some("Pan format is invalid"));
    }

    #[test]
    fn test_user_password_and_role() {
        let mut form = UserForm::sample();
        form.password = "password".into();
        form.role = "intern".into();

        let err = form.validate().unwrap_err();
        let errors = err.field_errors();
        assert_eq!(errors["password"], "Password must contain both letters and digits");
        assert_eq!(
            errors["role"],
            "Role must be one of admin, partner, manager, article, staff"
        );

        form.password = "ledger2026".into();
        form.role = "manager".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_invoice_amounts() {
        let mut form = InvoiceForm::sample();
        form.amount = None;
        form.gst_rate = Some(118.0);

        let err = form.validate().unwrap_err();
        let errors = err.field_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["amount"], "Amount is required");
        assert_eq!(errors["gstRate"], "Percentage must be between 0 and 100");
    }

    #[test]
    fn test_credit_note_reason_length() {
        let mut form = CreditNoteForm::sample();
        form.reason = "Dup".into();
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.field_errors()["reason"],
            "Reason must be at least 5 characters"
        );
    }

    #[test]
    fn test_all_forms_registered() {
        let registry = FormRegistry::discover();
        for name in ["client", "user", "task", "invoice", "credit-note", "debit-note"] {
            assert!(registry.contains(name), "form '{}' missing", name);
        }
        assert_eq!(registry.get("client").unwrap().len(), 10);
    }

    #[test]
    fn test_task_due_date_format() {
        let mut session = TaskForm::session();
        let mut form = TaskForm::sample();
        form.due_date = "31/07/2026".into();
        assert!(!session.validate_all(&form.values()));
        assert_eq!(session.error("dueDate"), Some("DueDate format is invalid"));
    }
}
