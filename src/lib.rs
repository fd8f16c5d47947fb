// src/lib.rs - Wi-Fi 凭据到二维码文本的编码

pub mod barcode;
pub mod config;
pub mod error;
pub mod nmcli;
pub mod qr;
pub mod types;
pub mod wep;

pub use barcode::encode;
pub use error::EncodeError;
pub use types::{CredentialRecord, SavedConnection, Security};
pub use wep::passphrase_to_key;
