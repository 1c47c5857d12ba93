use alloy::signers::local::PrivateKeySigner;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use pbg_common::Secret;
use peerbill_engine::{db_types::KeyPair, traits::ChainClientError};

fn keypair_from_signer(signer: &PrivateKeySigner) -> KeyPair {
    let public_key = signer.credential().verifying_key().as_affine().to_encoded_point(false);
    KeyPair {
        address: signer.address().to_checksum(None),
        public_key: hex::encode(public_key.as_bytes()),
        private_key: Secret::new(hex::encode(signer.to_bytes())),
    }
}

/// A fresh secp256k1 key pair from the OS random number generator. The public key is the uncompressed SEC1 point
/// (`04` prefix) and the address is EIP-55 checksummed.
pub fn generate_keypair() -> KeyPair {
    keypair_from_signer(&PrivateKeySigner::random())
}

/// Rebuilds the key pair for a hex-encoded private key, with or without a `0x` prefix.
pub fn keypair_from_private_key(private_key: &str) -> Result<KeyPair, ChainClientError> {
    let signer = parse_signer(private_key)?;
    Ok(keypair_from_signer(&signer))
}

pub(crate) fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, ChainClientError> {
    private_key.trim().parse::<PrivateKeySigner>().map_err(|e| ChainClientError::InvalidKey(e.to_string()))
}
