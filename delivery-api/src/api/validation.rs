// リクエストボディの入力検証

use crate::common::error::ValidationErrors;

/// パスワードの最小文字数
pub const MIN_PASSWORD_LEN: usize = 6;

/// 氏名の最小文字数
pub const MIN_NAME_LEN: usize = 2;

/// メールアドレスの簡易形式チェック
///
/// `local@domain.tld` の形で、空白を含まないこと。
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !domain.starts_with('.'),
        None => false,
    }
}

/// メールアドレスを検証してエラーを追加
pub fn check_email(errors: &mut ValidationErrors, email: &str) {
    if !is_valid_email(email) {
        errors.add("email", "Invalid email");
    }
}

/// パスワード長を検証してエラーを追加
pub fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must have at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}

/// 前後の空白を除いた値が最小文字数を満たすか検証する
pub fn check_min_trimmed<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: &'a str,
    min: usize,
) -> &'a str {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        errors.add(
            field,
            format!("{} must have at least {} characters", capitalize(field), min),
        );
    }
    trimmed
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
