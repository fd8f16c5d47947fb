// src/barcode.rs - 组装 Wi-Fi 二维码文本
//
// 格式: WIFI:T:<加密>;S:<SSID>;P:<密码>;;

use crate::error::EncodeError;
use crate::types::{CredentialRecord, Security};
use crate::wep;

/// 把一条凭据编码成二维码文本，要么完整返回，要么报错
pub fn encode(record: &CredentialRecord) -> Result<String, EncodeError> {
    if record.ssid.is_empty() {
        return Err(EncodeError::invalid("SSID 不能为空"));
    }

    let passphrase = match record.security {
        Security::Open => String::new(),
        Security::Wpa => match record.key.as_deref() {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => return Err(EncodeError::invalid("WPA 网络缺少密码")),
        },
        Security::Wep => {
            let phrase = record.key.as_deref().unwrap_or_default();
            wep::passphrase_to_key(phrase.as_bytes())?
        }
    };

    let ssid_esc = escape_field(&record.ssid);
    let mut pass_field = escape_field(&passphrase);
    // 纯十六进制且偶数长度的密码会被扫码端当成十六进制密钥，需加引号；
    // WEP 派生结果本身就是十六进制密钥，保持原样
    if record.security != Security::Wep && needs_quoting(&passphrase) {
        pass_field = format!("\"{pass_field}\"");
    }

    Ok(format!(
        "WIFI:T:{};S:{ssid_esc};P:{pass_field};;",
        record.security.barcode_label()
    ))
}

/// 转义 Wi-Fi QR 格式中的保留字符（\ ; , "）
pub fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\\' | ';' | ',' | '"' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// 非空、全为十六进制数字且长度为偶数
pub fn needs_quoting(value: &str) -> bool {
    !value.is_empty() && value.len() % 2 == 0 && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wpa(ssid: &str, key: &str) -> CredentialRecord {
        CredentialRecord::new(ssid, Security::Wpa, Some(key.to_string()))
    }

    #[test]
    fn open_network() {
        assert_eq!(
            encode(&CredentialRecord::open("home")).unwrap(),
            "WIFI:T:;S:home;P:;;"
        );
    }

    #[test]
    fn open_ignores_stray_key() {
        let rec = CredentialRecord::new("home", Security::Open, Some("junk".into()));
        assert_eq!(encode(&rec).unwrap(), "WIFI:T:;S:home;P:;;");
    }

    #[test]
    fn wpa_escapes_key_and_keeps_spaces() {
        let out = encode(&wpa("home net", "s3cr3t;pw")).unwrap();
        assert_eq!(out, "WIFI:T:WPA;S:home net;P:s3cr3t\\;pw;;");
        assert!(out.contains("P:s3cr3t\\;pw;"));
    }

    #[test]
    fn escapes_all_reserved_in_ssid() {
        let out = encode(&wpa(r#"a\b;c,d"e"#, "hunter22x")).unwrap();
        assert!(out.contains(r#"S:a\\b\;c\,d\"e;"#), "{out}");
    }

    #[test]
    fn unicode_ssid_passes_through() {
        let out = encode(&wpa("咖啡店 Wi-Fi:2", "password1")).unwrap();
        assert_eq!(out, "WIFI:T:WPA;S:咖啡店 Wi-Fi:2;P:password1;;");
    }

    #[test]
    fn wep_uses_derived_key() {
        let rec = CredentialRecord::new("lab", Security::Wep, Some("password".into()));
        let key = wep::passphrase_to_key(b"password").unwrap();
        let out = encode(&rec).unwrap();
        assert_eq!(out, "WIFI:T:WEP;S:lab;P:2b204a3f1042643e480fdd655e;;");
        assert_eq!(key, "2b204a3f1042643e480fdd655e");

        // 同一口令重新派生结果一致
        let again = wep::passphrase_to_key(b"password").unwrap();
        assert!(out.contains(&again));
    }

    #[test]
    fn wpa_escapes_every_reserved_char_in_key() {
        let out = encode(&wpa("x", r#"a\b,c"d"#)).unwrap();
        assert!(out.contains(r#"P:a\\b\,c\"d;"#), "{out}");
    }

    #[test]
    fn wep_derives_from_unescaped_passphrase() {
        let rec = CredentialRecord::new("lab", Security::Wep, Some("pa;ss".into()));
        let out = encode(&rec).unwrap();
        assert_eq!(out, "WIFI:T:WEP;S:lab;P:41e8e1abbc074ce75c13ddaa51;;");
        // 派生用的是原始口令，不是转义后的 "pa\;ss"
        let escaped = wep::passphrase_to_key(br"pa\;ss").unwrap();
        assert!(!out.contains(&escaped));
    }

    #[test]
    fn same_record_same_output() {
        let rec = wpa("cafe", "a,b\"c");
        assert_eq!(encode(&rec).unwrap(), encode(&rec).unwrap());
    }

    #[test]
    fn hex_looking_wpa_key_is_quoted() {
        let out = encode(&wpa("x", "deadbeef12")).unwrap();
        assert!(out.contains("P:\"deadbeef12\";"), "{out}");
        let out = encode(&wpa("x", "DEADBEEF")).unwrap();
        assert!(out.contains("P:\"DEADBEEF\";"), "{out}");
    }

    #[test]
    fn odd_length_or_non_hex_is_not_quoted() {
        assert!(encode(&wpa("x", "deadbeef1"))
            .unwrap()
            .contains("P:deadbeef1;"));
        assert!(encode(&wpa("x", "deadbeefzz"))
            .unwrap()
            .contains("P:deadbeefzz;"));
    }

    #[test]
    fn needs_quoting_rules() {
        assert!(needs_quoting("00"));
        assert!(needs_quoting("12345678"));
        assert!(!needs_quoting(""));
        assert!(!needs_quoting("123"));
        assert!(!needs_quoting("12 4"));
    }

    #[test]
    fn escape_field_leaves_plain_text() {
        assert_eq!(escape_field("plain text:ok"), "plain text:ok");
        assert_eq!(escape_field("\\"), "\\\\");
    }

    #[test]
    fn empty_ssid_is_invalid() {
        assert!(matches!(
            encode(&wpa("", "password1")),
            Err(EncodeError::InvalidInput(_))
        ));
    }

    #[test]
    fn wpa_without_key_is_invalid() {
        let rec = CredentialRecord::new("x", Security::Wpa, None);
        assert!(matches!(encode(&rec), Err(EncodeError::InvalidInput(_))));
        assert!(matches!(
            encode(&wpa("x", "")),
            Err(EncodeError::InvalidInput(_))
        ));
    }

    #[test]
    fn wep_without_key_is_invalid() {
        let rec = CredentialRecord::new("x", Security::Wep, None);
        assert!(matches!(encode(&rec), Err(EncodeError::InvalidInput(_))));
    }
}
