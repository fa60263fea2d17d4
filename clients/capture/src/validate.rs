use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-\+\(\)]{8,}$").expect("phone regex should compile"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whitespace is ignored, at least eight ASCII digits or `+-()` characters must remain
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    PHONE_REGEX.is_match(&compact)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("jane@example.com", true)]
    #[case("jane.doe+leads@mail.example.com.au", true)]
    #[case("jane@example", false)]
    #[case("jane doe@example.com", false)]
    #[case("@example.com", false)]
    #[case("", false)]
    fn emails(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email), valid);
    }

    #[rstest]
    #[case("0405678979", true)]
    #[case("0405 678 979", true)]
    #[case("+61 (4) 0567-8979", true)]
    #[case("1234 567", false)]
    #[case("0405x678979", false)]
    #[case("٠٤٠٥٦٧٨٩٧٩", false)]
    #[case("０４０５６７８９７９", false)]
    fn phones(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(validate_phone(phone), valid);
    }
}
