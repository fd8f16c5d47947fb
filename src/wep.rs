// src/wep.rs - WEP 口令到 128 位密钥的派生

use crate::error::EncodeError;
use md5::{Digest, Md5};

/// 派生缓冲区长度
const WEP_BUFFER_LEN: usize = 64;

/// 128 位 WEP 密钥字节数（104 位密钥 + 24 位 IV）
pub const WEP128_KEY_LEN: usize = 13;

/// 把任意长度的口令派生为 26 位小写十六进制的 128 位 WEP 密钥
///
/// 口令循环填满 64 字节后做 MD5，取摘要前 13 字节。
/// 与其他设备上的同名约定逐位一致。
pub fn passphrase_to_key(passphrase: &[u8]) -> Result<String, EncodeError> {
    if passphrase.is_empty() {
        return Err(EncodeError::invalid("WEP 口令不能为空"));
    }

    let mut buf = [0u8; WEP_BUFFER_LEN];
    for (dst, src) in buf.iter_mut().zip(passphrase.iter().cycle()) {
        *dst = *src;
    }

    let digest = Md5::digest(buf);
    Ok(hex::encode(&digest[..WEP128_KEY_LEN]))
}
