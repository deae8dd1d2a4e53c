//! 批量加解密（rayon）
//!
//! 每个载荷拥有独立的对称密钥与 IV，批次中任一元素失败则整个调用失败。
use super::{Envelope, EnvelopeCodec};
use crate::asymmetric::KeyPair;
use crate::common::errors::Error;
use rayon::prelude::*;
use rsa::RsaPublicKey;
use tracing::debug;
use zeroize::Zeroizing;

impl EnvelopeCodec<'_> {
    /// 并行加密一组载荷，结果顺序与输入一致
    pub fn encrypt_batch<P>(
        &self,
        payloads: &[P],
        public_key: &RsaPublicKey,
    ) -> Result<Vec<Envelope>, Error>
    where
        P: AsRef<[u8]> + Sync,
    {
        let envelopes = payloads
            .par_iter()
            .map(|payload| self.encrypt(payload.as_ref(), public_key))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = envelopes.len(), "sealed envelope batch");
        Ok(envelopes)
    }

    /// 并行解密一组信封，结果顺序与输入一致。
    ///
    /// 任一信封失败时，已解出的其余明文在丢弃前会被清零。
    pub fn decrypt_batch(
        &self,
        envelopes: &[Envelope],
        key_pair: &KeyPair,
    ) -> Result<Vec<Vec<u8>>, Error> {
        key_pair.private_key()?;
        collect_plaintexts(
            envelopes
                .par_iter()
                .map(|envelope| self.decrypt(envelope, key_pair)),
        )
    }
}

fn collect_plaintexts<I>(results: I) -> Result<Vec<Vec<u8>>, Error>
where
    I: IndexedParallelIterator<Item = Result<Vec<u8>, Error>>,
{
    let plaintexts = results
        .map(|result| result.map(Zeroizing::new))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(plaintexts
        .into_iter()
        .map(|mut plaintext| std::mem::take(&mut *plaintext))
        .collect())
}
