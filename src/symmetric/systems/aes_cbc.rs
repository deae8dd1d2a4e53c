//! AES-CBC 对称加密实现
//!
//! 支持 PKCS#7 填充与无填充两种方式。无填充时明文长度必须是 16 字节的整数倍。
use crate::common::config::BlockPadding;
use crate::common::errors::Error;
use crate::symmetric::traits::SymmetricCryptographicSystem;
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};

const BLOCK_SIZE: usize = 16;
const IV_SIZE: usize = 16;

/// AES-128-CBC 对称加密系统
#[derive(Debug)]
pub struct Aes128CbcSystem;

/// AES-256-CBC 对称加密系统
#[derive(Debug)]
pub struct Aes256CbcSystem;

impl SymmetricCryptographicSystem for Aes128CbcSystem {
    const KEY_SIZE: usize = 16;
    const IV_SIZE: usize = IV_SIZE;
    const BLOCK_SIZE: usize = BLOCK_SIZE;

    fn encrypt(
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        padding: BlockPadding,
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        cbc_encrypt::<aes::Aes128>(key, iv, plaintext, padding)
    }

    fn decrypt(
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        padding: BlockPadding,
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        cbc_decrypt::<aes::Aes128>(key, iv, ciphertext, padding)
    }
}

impl SymmetricCryptographicSystem for Aes256CbcSystem {
    const KEY_SIZE: usize = 32;
    const IV_SIZE: usize = IV_SIZE;
    const BLOCK_SIZE: usize = BLOCK_SIZE;

    fn encrypt(
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        padding: BlockPadding,
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        cbc_encrypt::<aes::Aes256>(key, iv, plaintext, padding)
    }

    fn decrypt(
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        padding: BlockPadding,
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        cbc_decrypt::<aes::Aes256>(key, iv, ciphertext, padding)
    }
}

fn cbc_encrypt<C>(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    padding: BlockPadding,
) -> Result<Vec<u8>, Error>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    if padding == BlockPadding::NoPadding && plaintext.len() % BLOCK_SIZE != 0 {
        return Err(Error::EncryptionFailure(format!(
            "unpadded CBC input must be a multiple of {BLOCK_SIZE} bytes, got {}",
            plaintext.len()
        )));
    }

    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|e| Error::EncryptionFailure(format!("invalid key or IV length: {e}")))?;

    let ciphertext = match padding {
        BlockPadding::Pkcs7 => encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        BlockPadding::NoPadding => encryptor.encrypt_padded_vec_mut::<NoPadding>(plaintext),
    };
    Ok(ciphertext)
}

fn cbc_decrypt<C>(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    padding: BlockPadding,
) -> Result<Vec<u8>, Error>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    // PKCS#7 密文至少包含一个填充块；无填充时空密文对应空明文
    let too_short = padding == BlockPadding::Pkcs7 && ciphertext.is_empty();
    if too_short || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::DecryptionFailure);
    }

    let decryptor =
        cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(|_| Error::DecryptionFailure)?;

    match padding {
        BlockPadding::Pkcs7 => decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        BlockPadding::NoPadding => decryptor.decrypt_padded_vec_mut::<NoPadding>(ciphertext),
    }
    .map_err(|_| Error::DecryptionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_128: [u8; 16] = [0x11; 16];
    const KEY_256: [u8; 32] = [0x22; 32];
    const IV: [u8; 16] = [0x33; 16];

    #[test]
    fn test_aes256_cbc_roundtrip() {
        let plaintext = b"this is a secret message";
        let ciphertext =
            Aes256CbcSystem::encrypt(&KEY_256, &IV, plaintext, BlockPadding::Pkcs7).unwrap();
        assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
        assert!(ciphertext.len() > plaintext.len());

        let decrypted =
            Aes256CbcSystem::decrypt(&KEY_256, &IV, &ciphertext, BlockPadding::Pkcs7).unwrap();
        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_aes128_cbc_roundtrip() {
        let plaintext = b"hello world";
        let ciphertext =
            Aes128CbcSystem::encrypt(&KEY_128, &IV, plaintext, BlockPadding::Pkcs7).unwrap();
        assert_eq!(ciphertext.len(), 16);

        let decrypted =
            Aes128CbcSystem::decrypt(&KEY_128, &IV, &ciphertext, BlockPadding::Pkcs7).unwrap();
        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_empty_plaintext_pads_to_full_block() {
        let ciphertext = Aes256CbcSystem::encrypt(&KEY_256, &IV, b"", BlockPadding::Pkcs7).unwrap();
        assert_eq!(ciphertext.len(), BLOCK_SIZE);

        let decrypted =
            Aes256CbcSystem::decrypt(&KEY_256, &IV, &ciphertext, BlockPadding::Pkcs7).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_known_answer_aes128_cbc() {
        // NIST SP 800-38A F.2.1 CBC-AES128.Encrypt, 第一个块
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let iv: Vec<u8> = (0u8..16).collect();
        let plaintext = [
            0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93,
            0x17, 0x2a,
        ];
        let expected = [
            0x76, 0x49, 0xab, 0xac, 0x81, 0x19, 0xb2, 0x46, 0xce, 0xe9, 0x8e, 0x9b, 0x12, 0xe9,
            0x19, 0x7d,
        ];

        let ciphertext =
            Aes128CbcSystem::encrypt(&key, &iv, &plaintext, BlockPadding::NoPadding).unwrap();
        assert_eq!(ciphertext, expected);
    }

    #[test]
    fn test_no_padding_requires_block_multiple() {
        let result = Aes256CbcSystem::encrypt(&KEY_256, &IV, b"not sixteen", BlockPadding::NoPadding);
        assert!(matches!(result, Err(Error::EncryptionFailure(_))));

        let block = [0x44u8; 32];
        let ciphertext =
            Aes256CbcSystem::encrypt(&KEY_256, &IV, &block, BlockPadding::NoPadding).unwrap();
        assert_eq!(ciphertext.len(), 32);
        let decrypted =
            Aes256CbcSystem::decrypt(&KEY_256, &IV, &ciphertext, BlockPadding::NoPadding).unwrap();
        assert_eq!(decrypted, block);
    }

    #[test]
    fn test_decrypt_truncated_ciphertext_fails() {
        let ciphertext =
            Aes256CbcSystem::encrypt(&KEY_256, &IV, b"some data here!!!", BlockPadding::Pkcs7)
                .unwrap();
        let result = Aes256CbcSystem::decrypt(
            &KEY_256,
            &IV,
            &ciphertext[..ciphertext.len() - 1],
            BlockPadding::Pkcs7,
        );
        assert!(matches!(result, Err(Error::DecryptionFailure)));

        let result = Aes256CbcSystem::decrypt(&KEY_256, &IV, &[], BlockPadding::Pkcs7);
        assert!(matches!(result, Err(Error::DecryptionFailure)));
    }

    #[test]
    fn test_decrypt_tampered_padding_fails() {
        let ciphertext =
            Aes256CbcSystem::encrypt(&KEY_256, &IV, b"secret", BlockPadding::Pkcs7).unwrap();
        // 单块密文的明文等于 D(C) ^ IV：翻转 IV 最后一个字节，填充字节 0x0a 变为 0xf5
        let mut tampered_iv = IV;
        tampered_iv[15] ^= 0xff;

        let result =
            Aes256CbcSystem::decrypt(&KEY_256, &tampered_iv, &ciphertext, BlockPadding::Pkcs7);
        assert!(matches!(result, Err(Error::DecryptionFailure)));
    }

    #[test]
    fn test_wrong_key_length_is_configuration_error() {
        let result = Aes256CbcSystem::encrypt(&KEY_128, &IV, b"data", BlockPadding::Pkcs7);
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = Aes128CbcSystem::decrypt(&KEY_128, &IV[..12], &[0u8; 16], BlockPadding::Pkcs7);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    fn assert_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}

    #[test]
    fn test_key_schedules_zeroize_on_drop() {
        assert_zeroize_on_drop::<aes::Aes128>();
        assert_zeroize_on_drop::<aes::Aes256>();
        assert_zeroize_on_drop::<cbc::Encryptor<aes::Aes256>>();
        assert_zeroize_on_drop::<cbc::Decryptor<aes::Aes256>>();
    }
}
