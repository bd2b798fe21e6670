// ============================================================================
// VALIDATION VIEWMODEL - Reglas de validación de formularios (puras)
// ============================================================================

pub const MAX_UPLOAD_BYTES: f64 = 10.0 * 1024.0 * 1024.0;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;
/// Bloqueo tras un submit válido (doble envío)
pub const SUBMIT_LOCK_MS: u32 = 3000;
/// Re-validación de emails mientras se escribe
pub const EMAIL_RECHECK_MS: u32 = 500;

pub const USERNAME_HELP: &str = "Letters, numbers, and underscores only. 3-30 characters.";
pub const EMAIL_HELP: &str = "We'll use this for account recovery if needed.";
pub const FILE_HELP: &str = "Maximum file size: 10MB. Supported formats: OFX, XML";

const STATEMENT_EXTENSIONS: [&str; 2] = [".ofx", ".xml"];

/// Tipo de campo relevante para la validación
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    File,
}

impl FieldKind {
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type {
            "email" => FieldKind::Email,
            "password" => FieldKind::Password,
            "file" => FieldKind::File,
            _ => FieldKind::Text,
        }
    }
}

/// Snapshot de un input a validar
#[derive(Clone, Debug, Default)]
pub struct FieldInput {
    pub name: String,
    pub display_name: String,
    pub value: String,
    pub required: bool,
    /// Fichero elegido (nombre, tamaño en bytes) si es input file
    pub file: Option<(String, f64)>,
    /// Atributo accept del input file
    pub accept: String,
}

/// "first_name" => "First Name" (sin <label for>)
pub fn display_name_from_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Texto de un <label>: sin "*" ni ":"
pub fn display_name_from_label(label: &str) -> String {
    label.replace(['*', ':'], "").trim().to_string()
}

/// Equivalente a /^[^\s@]+@[^\s@]+\.[^\s@]+$/
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() {
        return false;
    }
    // Algún punto con texto a ambos lados
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters long".to_string());
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return Err("Password must contain both uppercase and lowercase letters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number".to_string());
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err("Username must be at least 3 characters long".to_string());
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }
    Ok(())
}

pub fn validate_file(name: &str, size_bytes: f64, accept: &str) -> Result<(), String> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err("File size must be less than 10MB".to_string());
    }
    if accept.contains("ofx") {
        let lower = name.to_lowercase();
        if !STATEMENT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err("Please select a valid OFX file (.ofx or .xml)".to_string());
        }
    }
    Ok(())
}

/// Validación completa de un campo; Err con el mensaje a mostrar
pub fn validate_field(field: &FieldInput, kind: FieldKind) -> Result<(), String> {
    let value = field.value.trim();
    if field.required && value.is_empty() && field.file.is_none() {
        return Err(format!("{} is required", field.display_name));
    }
    if value.is_empty() && field.file.is_none() {
        return Ok(());
    }

    match kind {
        FieldKind::Email if !is_valid_email(value) => {
            return Err("Please enter a valid email address".to_string());
        }
        FieldKind::Password => validate_password(value)?,
        FieldKind::File => {
            if let Some((name, size)) = &field.file {
                validate_file(name, *size, &field.accept)?;
            }
        }
        _ => {}
    }

    if field.name == "username" {
        validate_username(value)?;
    }
    Ok(())
}

pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), String> {
    if password == confirmation {
        Ok(())
    } else {
        Err("Passwords do not match".to_string())
    }
}

// ============================================================================
// Envío del formulario
// ============================================================================

pub const PROCESSING_LABEL: &str = "Processing...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Otra guarda ya canceló este submit (p.ej. confirmación pendiente)
    Skip,
    /// Submit repetido dentro de SUBMIT_LOCK_MS
    Blocked,
    Invalid,
    /// Dejar pasar y activar el bloqueo
    Submit,
}

/// `valid` solo se evalúa si el submit puede llegar a enviarse
pub fn submit_decision(already_prevented: bool, locked: bool, valid: impl FnOnce() -> bool) -> SubmitDecision {
    if already_prevented {
        SubmitDecision::Skip
    } else if locked {
        SubmitDecision::Blocked
    } else if valid() {
        SubmitDecision::Submit
    } else {
        SubmitDecision::Invalid
    }
}

/// 0 Bytes, 512 Bytes, 1.5 KB, 2 MB
pub fn format_file_size(bytes: f64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes <= 0.0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes.ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes / 1024f64.powi(exponent as i32);
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// Lo que sigue al nombre del fichero elegido: "(1.5 KB) selected"
pub fn file_info_detail(size_bytes: f64) -> String {
    format!("({}) selected", format_file_size(size_bytes))
}

// ============================================================================
// Fuerza de contraseña
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStrength {
    Empty,
    Weak,
    Fair,
    Good,
    Strong,
}

impl PasswordStrength {
    /// 0-5: longitud >= 8, minúscula, mayúscula, dígito, símbolo
    pub fn score(password: &str) -> u8 {
        let checks = [
            password.chars().count() >= MIN_PASSWORD_LEN,
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        checks.iter().filter(|passed| **passed).count() as u8
    }

    pub fn evaluate(password: &str) -> Self {
        match Self::score(password) {
            0 | 1 if password.is_empty() => PasswordStrength::Empty,
            0 | 1 => PasswordStrength::Weak,
            2 => PasswordStrength::Fair,
            3 => PasswordStrength::Good,
            _ => PasswordStrength::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Empty => "Enter a password",
            PasswordStrength::Weak => "Weak password",
            PasswordStrength::Fair => "Fair password",
            PasswordStrength::Good => "Good password",
            PasswordStrength::Strong => "Strong password",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            PasswordStrength::Empty => "strength-text text-muted",
            PasswordStrength::Weak => "strength-text text-danger",
            PasswordStrength::Fair => "strength-text text-warning",
            PasswordStrength::Good => "strength-text text-info",
            PasswordStrength::Strong => "strength-text text-success",
        }
    }

    /// Clase de cada una de las 4 barras ("" = apagada)
    pub fn bar_classes(&self) -> [&'static str; 4] {
        match self {
            PasswordStrength::Empty => ["", "", "", ""],
            PasswordStrength::Weak => ["weak", "", "", ""],
            PasswordStrength::Fair => ["weak", "weak", "", ""],
            PasswordStrength::Good => ["good", "good", "good", ""],
            PasswordStrength::Strong => ["strong", "strong", "strong", "strong"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: &str, required: bool) -> FieldInput {
        FieldInput {
            name: name.to_string(),
            display_name: display_name_from_name(name),
            value: value.to_string(),
            required,
            ..Default::default()
        }
    }

    #[test]
    fn test_required_message_uses_display_name() {
        let f = field("first_name", "  ", true);
        assert_eq!(validate_field(&f, FieldKind::Text), Err("First Name is required".to_string()));
        assert_eq!(display_name_from_label("Email address *:"), "Email address");
    }

    #[test]
    fn test_optional_empty_field_is_valid() {
        let f = field("email", "", false);
        assert_eq!(validate_field(&f, FieldKind::Email), Ok(()));
    }

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b@mail.co.uk"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@@example.com"));
        assert!(!is_valid_email("ana@.com"));
    }

    #[test]
    fn test_password_rules_in_order() {
        assert_eq!(
            validate_password("Ab1"),
            Err("Password must be at least 8 characters long".to_string())
        );
        assert_eq!(
            validate_password("abcdefg1"),
            Err("Password must contain both uppercase and lowercase letters".to_string())
        );
        assert_eq!(
            validate_password("Abcdefgh"),
            Err("Password must contain at least one number".to_string())
        );
        assert_eq!(validate_password("Abcdefg1"), Ok(()));
    }

    #[test]
    fn test_username_rules() {
        let f = field("username", "ab", true);
        assert_eq!(
            validate_field(&f, FieldKind::Text),
            Err("Username must be at least 3 characters long".to_string())
        );
        assert!(validate_username("joe-doe").is_err());
        assert!(validate_username("joe_doe42").is_ok());
    }

    #[test]
    fn test_file_rules() {
        assert!(validate_file("bank.OFX", 1024.0, ".ofx,.xml").is_ok());
        assert_eq!(
            validate_file("bank.csv", 1024.0, ".ofx,.xml"),
            Err("Please select a valid OFX file (.ofx or .xml)".to_string())
        );
        assert_eq!(
            validate_file("bank.ofx", MAX_UPLOAD_BYTES + 1.0, ".ofx"),
            Err("File size must be less than 10MB".to_string())
        );
        assert!(validate_file("photo.png", 10.0, "image/*").is_ok());
    }

    #[test]
    fn test_password_match() {
        assert!(passwords_match("Secret12", "Secret12").is_ok());
        assert_eq!(passwords_match("Secret12", "secret12"), Err("Passwords do not match".to_string()));
    }

    #[test]
    fn test_strength_scale() {
        assert_eq!(PasswordStrength::evaluate(""), PasswordStrength::Empty);
        assert_eq!(PasswordStrength::evaluate("abc"), PasswordStrength::Weak);
        assert_eq!(PasswordStrength::evaluate("abcABC"), PasswordStrength::Fair);
        assert_eq!(PasswordStrength::evaluate("abcdefgh1"), PasswordStrength::Good);
        assert_eq!(PasswordStrength::evaluate("Abcdefgh1"), PasswordStrength::Strong);
        assert_eq!(PasswordStrength::score("Abcdefgh1!"), 5);
        assert_eq!(PasswordStrength::Good.bar_classes(), ["good", "good", "good", ""]);
    }

    #[test]
    fn test_replayed_submit_is_not_blocked_by_intercepted_one() {
        // El guarda de confirmación cancela el primer submit
        let mut locked = false;
        let first = submit_decision(true, locked, || panic!("no se valida un submit cancelado"));
        assert_eq!(first, SubmitDecision::Skip);
        if first == SubmitDecision::Submit {
            locked = true;
        }

        // Replay tras confirmar, dentro de la ventana de bloqueo
        let replay = submit_decision(false, locked, || true);
        assert_eq!(replay, SubmitDecision::Submit);
        locked = true;

        // Un segundo envío real sí queda bloqueado
        assert_eq!(submit_decision(false, locked, || true), SubmitDecision::Blocked);
    }

    #[test]
    fn test_invalid_submit_does_not_lock() {
        assert_eq!(submit_decision(false, false, || false), SubmitDecision::Invalid);
    }

    #[test]
    fn test_file_size_format() {
        assert_eq!(format_file_size(0.0), "0 Bytes");
        assert_eq!(format_file_size(512.0), "512 Bytes");
        assert_eq!(format_file_size(1536.0), "1.5 KB");
        assert_eq!(format_file_size(2.0 * 1024.0 * 1024.0), "2 MB");
        assert_eq!(file_info_detail(1024.0), "(1 KB) selected");
    }
}
