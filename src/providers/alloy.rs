//! Alloy-based transaction signer implementation.

use alloy_network::{Ethereum, TransactionBuilder};
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use crate::api::TransactionDescriptor;
use crate::error::{BridgeError, Result};
use crate::traits::TransactionSigner;

/// Production signer wrapping an Alloy [`Provider`] that carries a wallet.
///
/// The provider is expected to fill nonce, fees and signature (for example
/// one built with `ProviderBuilder::new().wallet(..)`). Gas is estimated by
/// the provider when the descriptor carries no limit.
///
/// # Examples
///
/// ```rust,no_run
/// use deposit_bridge::providers::AlloySigner;
/// use alloy_network::EthereumWallet;
/// use alloy_provider::ProviderBuilder;
/// use alloy_signer_local::PrivateKeySigner;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer: PrivateKeySigner = std::env::var("PRIVATE_KEY")?.parse()?;
/// let from = signer.address();
/// let provider = ProviderBuilder::new()
///     .wallet(EthereumWallet::from(signer))
///     .connect_http("https://arb1.arbitrum.io/rpc".parse()?);
///
/// let signer = AlloySigner::new(provider, from);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlloySigner<P>
where
    P: Provider<Ethereum> + Clone,
{
    provider: P,
    from: Address,
}

impl<P> AlloySigner<P>
where
    P: Provider<Ethereum> + Clone,
{
    /// Creates a signer sending from `from` through `provider`.
    pub fn new(provider: P, from: Address) -> Self {
        Self { provider, from }
    }

    /// Returns a reference to the underlying Alloy provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> TransactionSigner for AlloySigner<P>
where
    P: Provider<Ethereum> + Clone + Send + Sync,
{
    fn address(&self) -> Address {
        self.from
    }

    #[instrument(skip_all, fields(to = %tx.to, chain_id = tx.chain_id))]
    async fn send_transaction(&self, tx: TransactionDescriptor) -> Result<TxHash> {
        let mut request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(tx.to)
            .with_value(tx.value)
            .with_input(tx.data)
            .with_chain_id(tx.chain_id);
        if let Some(gas_limit) = tx.gas_limit {
            request = request.with_gas_limit(gas_limit);
        }

        trace!("Submitting transaction");
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| BridgeError::SigningFailed {
                reason: e.to_string(),
            })?;

        let tx_hash = *pending.tx_hash();
        debug!(tx_hash = %tx_hash, "Transaction broadcast");

        Ok(tx_hash)
    }
}
