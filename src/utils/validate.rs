use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

/// 姓名长度校验：2 <= x <= 50
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len < 2 || len > 50 {
        return Err("Name length must be between 2 and 50 characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 作业标题校验：3 <= x <= 200
pub fn validate_title(title: &str) -> Result<(), &'static str> {
    let len = title.trim().chars().count();
    if len < 3 || len > 200 {
        return Err("Title length must be between 3 and 200 characters");
    }
    Ok(())
}

/// 作业描述校验：10 <= x <= 5000
pub fn validate_description(description: &str) -> Result<(), &'static str> {
    let len = description.trim().chars().count();
    if len < 10 || len > 5000 {
        return Err("Description length must be between 10 and 5000 characters");
    }
    Ok(())
}

/// 满分校验：0 <= x <= 1000
pub fn validate_max_score(max_score: f64) -> Result<(), &'static str> {
    if !max_score.is_finite() || max_score < 0.0 || max_score > 1000.0 {
        return Err("Max score must be between 0 and 1000");
    }
    Ok(())
}

/// 文本提交内容校验：非空白，且不超过 10000 字符
pub fn validate_submission_content(content: &str) -> Result<(), &'static str> {
    if content.trim().is_empty() {
        return Err("Submission content must not be empty");
    }
    if content.chars().count() > 10000 {
        return Err("Submission content must not exceed 10000 characters");
    }
    Ok(())
}

/// 评语校验：10 <= x <= 2000
pub fn validate_comments(comments: &str) -> Result<(), &'static str> {
    let len = comments.trim().chars().count();
    if len < 10 || len > 2000 {
        return Err("Comments length must be between 10 and 2000 characters");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}
