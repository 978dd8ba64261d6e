//! AWS Signature Version 4 요청 서명
//!
//! 오브젝트 스토리지(S3)와 이메일(SES) 호출에 사용합니다.
//!
//! ```text
//! CanonicalRequest = METHOD \n PATH \n QUERY \n HEADERS \n SIGNED_HEADERS \n PAYLOAD_HASH
//! StringToSign     = "AWS4-HMAC-SHA256" \n AMZ_DATE \n SCOPE \n hex(sha256(CanonicalRequest))
//! SigningKey       = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")
//! ```

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::config::AwsCredentials;
use crate::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// 서명 대상 요청
#[derive(Debug, Clone)]
pub struct SignableRequest {
    pub method: String,
    pub host: String,
    /// 인코딩 전 경로 (`/` 로 시작)
    pub path: String,
    pub query: Vec<(String, String)>,
    /// 서명에 포함할 추가 헤더. `host`와 `x-amz-date`는 서명기가 넣습니다.
    pub headers: Vec<(String, String)>,
    pub payload_hash: String,
}

pub struct SigV4Signer<'a> {
    credentials: &'a AwsCredentials,
    region: &'a str,
    service: &'a str,
}

impl<'a> SigV4Signer<'a> {
    pub fn new(credentials: &'a AwsCredentials, region: &'a str, service: &'a str) -> Self {
        Self {
            credentials,
            region,
            service,
        }
    }

    /// 요청에 붙일 헤더(`x-amz-date`, 세션 토큰, `authorization`)를 계산합니다.
    pub fn sign(&self, request: &SignableRequest, now: DateTime<Utc>) -> AppResult<Vec<(String, String)>> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        let mut headers: Vec<(String, String)> = request
            .headers
            .iter()
            .map(|(name, value)| (name.to_lowercase(), value.trim().to_string()))
            .collect();
        headers.push(("host".to_string(), request.host.clone()));
        headers.push(("x-amz-date".to_string(), amz_date.clone()));
        if let Some(token) = &self.credentials.session_token {
            headers.push(("x-amz-security-token".to_string(), token.clone()));
        }
        headers.sort_by(|a, b| a.0.cmp(&b.0));

        let signed_headers = headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let canonical_request = canonical_request(request, &headers, &signed_headers);
        let scope = format!("{}/{}/{}/aws4_request", date, self.region, self.service);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            sha256_hex(canonical_request.as_bytes())
        );

        let signing_key = derive_signing_key(
            &self.credentials.secret_access_key,
            &date,
            self.region,
            self.service,
        )?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, self.credentials.access_key_id, scope, signed_headers, signature
        );

        let mut out = vec![("x-amz-date".to_string(), amz_date)];
        if let Some(token) = &self.credentials.session_token {
            out.push(("x-amz-security-token".to_string(), token.clone()));
        }
        out.push(("authorization".to_string(), authorization));

        Ok(out)
    }
}

fn canonical_request(request: &SignableRequest, headers: &[(String, String)], signed_headers: &str) -> String {
    let mut query: Vec<(String, String)> = request
        .query
        .iter()
        .map(|(k, v)| (uri_encode(k, true), uri_encode(v, true)))
        .collect();
    query.sort();
    let canonical_query = query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect();

    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method.to_uppercase(),
        uri_encode(&request.path, false),
        canonical_query,
        canonical_headers,
        signed_headers,
        request.payload_hash
    )
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> AppResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::InternalError(format!("HMAC 키 생성 실패: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn derive_signing_key(secret: &str, date: &str, region: &str, service: &str) -> AppResult<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// RFC 3986 unreserved 문자를 제외하고 퍼센트 인코딩합니다.
pub fn uri_encode(value: &str, encode_slash: bool) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b'/' if !encode_slash => encoded.push('/'),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn example_credentials() -> AwsCredentials {
        AwsCredentials {
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
            session_token: None,
        }
    }

    #[test]
    fn test_signing_key_vector() {
        let key = derive_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20150830",
            "us-east-1",
            "iam",
        )
        .unwrap();

        assert_eq!(
            hex::encode(key),
            "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
        );
    }

    #[test]
    fn test_empty_payload_hash() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_list_users_signature_vector() {
        let credentials = example_credentials();
        let signer = SigV4Signer::new(&credentials, "us-east-1", "iam");
        let request = SignableRequest {
            method: "GET".into(),
            host: "iam.amazonaws.com".into(),
            path: "/".into(),
            query: vec![
                ("Version".into(), "2010-05-08".into()),
                ("Action".into(), "ListUsers".into()),
            ],
            headers: vec![(
                "Content-Type".into(),
                "application/x-www-form-urlencoded; charset=utf-8".into(),
            )],
            payload_hash: sha256_hex(b""),
        };
        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();

        let headers = signer.sign(&request, now).unwrap();
        let authorization = &headers.iter().find(|(k, _)| k == "authorization").unwrap().1;

        assert_eq!(
            authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
        assert!(headers.iter().any(|(k, v)| k == "x-amz-date" && v == "20150830T123600Z"));
    }

    #[test]
    fn test_session_token_is_signed_and_returned() {
        let mut credentials = example_credentials();
        credentials.session_token = Some("session".into());
        let signer = SigV4Signer::new(&credentials, "us-east-1", "s3");
        let request = SignableRequest {
            method: "DELETE".into(),
            host: "bucket.s3.us-east-1.amazonaws.com".into(),
            path: "/a.png".into(),
            query: vec![],
            headers: vec![],
            payload_hash: sha256_hex(b""),
        };

        let headers = signer.sign(&request, Utc::now()).unwrap();
        let authorization = &headers.iter().find(|(k, _)| k == "authorization").unwrap().1;

        assert!(headers.iter().any(|(k, v)| k == "x-amz-security-token" && v == "session"));
        assert!(authorization.contains("SignedHeaders=host;x-amz-date;x-amz-security-token"));
    }

    #[test]
    fn test_uri_encode() {
        assert_eq!(uri_encode("videos/a b.mp4", false), "videos/a%20b.mp4");
        assert_eq!(uri_encode("a/b", true), "a%2Fb");
        assert_eq!(uri_encode("Action=Send&x", true), "Action%3DSend%26x");
        assert_eq!(uri_encode("~-_.", true), "~-_.");
    }
}
