use std::fmt;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use zeroize::Zeroizing;

use crate::error::ChainError;

/// The process-wide administrative keypair.
///
/// Loaded once at startup from configuration and injected into the chain
/// client — never a module-level singleton. Authorizes mint, burn, and
/// approve operations on the fiat token contracts.
pub struct AdminSigner {
    signer: PrivateKeySigner,
}

impl AdminSigner {
    /// Parse the signer from a hex-encoded secp256k1 private key, with or
    /// without a `0x` prefix. The raw key string is zeroized by the caller's
    /// `Zeroizing` wrapper once parsing is done.
    pub fn from_hex(key: &Zeroizing<String>) -> Result<Self, ChainError> {
        let signer: PrivateKeySigner = key
            .trim()
            .trim_start_matches("0x")
            .parse()
            .map_err(|e| ChainError::InvalidKey(format!("{e}")))?;
        Ok(Self { signer })
    }

    /// The derived administrative address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Consume the signer into a wallet for the provider's signing filler.
    pub fn into_wallet(self) -> EthereumWallet {
        EthereumWallet::from(self.signer)
    }
}

impl fmt::Debug for AdminSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.debug_struct("AdminSigner")
            .field("address", &self.signer.address())
            .finish()
    }
}
