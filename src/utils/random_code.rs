use rand::Rng;
use rand::distr::Alphanumeric;

/// 签到码长度
pub const CHECKIN_CODE_LEN: usize = 32;

/// 生成不透明的随机签到码
pub fn generate_checkin_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CHECKIN_CODE_LEN)
        .map(char::from)
        .collect()
}

/// 生成初始管理员密码，保证包含大小写字母和数字
pub fn generate_admin_password() -> String {
    let body: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(13)
        .map(char::from)
        .collect();
    format!("Ad{body}9")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password_simple;

    #[test]
    fn test_checkin_code_shape() {
        let a = generate_checkin_code();
        let b = generate_checkin_code();
        assert_eq!(a.len(), CHECKIN_CODE_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_admin_password_passes_policy() {
        for _ in 0..20 {
            assert!(validate_password_simple(&generate_admin_password()).is_ok());
        }
    }
}
