//! 날짜 포맷팅 유틸리티

use mongodb::bson::DateTime;

/// BSON 날짜를 RFC 3339 문자열로 변환합니다. 표현 범위를 벗어나면 빈 문자열.
pub fn to_rfc3339(value: &DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rfc3339() {
        let value = DateTime::from_millis(0);
        assert_eq!(to_rfc3339(&value), "1970-01-01T00:00:00Z");
    }
}
