#![no_main]

use libfuzzer_sys::fuzz_target;
use momento_sdk::credential::{Credential, HostOverrides, TokenKind, token};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let kind = token::classify(raw);

    // A successful decode always agrees with classification.
    match token::decode(raw) {
        Ok(decoded) => assert_eq!(decoded.kind(), kind, "decode/classify mismatch"),
        Err(_) => assert_ne!(kind, TokenKind::V2, "V2 keys always decode"),
    }

    // Resolution never panics and never yields a blank endpoint.
    if let Ok(credential) = Credential::from_string(raw, HostOverrides::none()) {
        assert!(matches!(kind, TokenKind::Legacy | TokenKind::V1));
        assert!(!credential.control_endpoint().trim().is_empty());
        assert!(!credential.data_endpoint().trim().is_empty());
    }
    if let Ok(credential) = Credential::from_api_key_v2(raw, "cell.example.com") {
        assert_eq!(kind, TokenKind::V2);
        assert_eq!(credential.raw_key(), raw);
    }
});
