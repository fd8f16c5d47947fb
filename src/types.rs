// src/types.rs - 所有核心数据类型

use crate::error::EncodeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 加密类型（只覆盖二维码分享支持的三种）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    Open,
    Wep,
    /// WPA / WPA2-personal
    Wpa,
}

impl Security {
    pub fn needs_password(&self) -> bool {
        !matches!(self, Security::Open)
    }

    /// 二维码 `T:` 段的取值，开放网络留空
    pub fn barcode_label(&self) -> &'static str {
        match self {
            Security::Open => "",
            Security::Wep => "WEP",
            Security::Wpa => "WPA",
        }
    }
}

impl std::fmt::Display for Security {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Security::Open => write!(f, "Open"),
            Security::Wep => write!(f, "WEP"),
            Security::Wpa => write!(f, "WPA"),
        }
    }
}

impl FromStr for Security {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "open" | "nopass" | "none" => Ok(Security::Open),
            "wep" => Ok(Security::Wep),
            "wpa" | "wpa2" | "wpa-psk" => Ok(Security::Wpa),
            _ => Err(EncodeError::UnsupportedSecurityType(s.to_string())),
        }
    }
}

/// 一次编码的输入，编码过程中只读（含密钥，不做序列化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub ssid: String,
    pub security: Security,
    /// WPA 为 PSK，WEP 为口令；开放网络为 None
    pub key: Option<String>,
}

impl CredentialRecord {
    pub fn new(ssid: impl Into<String>, security: Security, key: Option<String>) -> Self {
        Self {
            ssid: ssid.into(),
            security,
            key,
        }
    }

    pub fn open(ssid: impl Into<String>) -> Self {
        Self::new(ssid, Security::Open, None)
    }
}

/// NetworkManager 中已保存的 Wi-Fi 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConnection {
    pub name: String,
    pub uuid: String,
}
