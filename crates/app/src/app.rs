//! Ethereum app client

use crate::config::EthAppConfig;
use crate::dispatch::{dispatch, Reply};
use crate::error::{EthAppError, EthAppResult};
use crate::transport::Transport;
use eth_hw_apdu::request::{
    self, StarkOrder, StarkOrderV2, StarkTransfer, StarkTransferV2,
};
use eth_hw_apdu::response::{self, AddressInfo, AppConfiguration, Signature, StarkSignature};
use eth_hw_apdu::{
    DerivationPath, EthAddress, Operation, Quantity, Request, StarkAsset, StatusWord, Word,
};

/// Client for the Ethereum app running on a hardware wallet.
///
/// Every operation takes `&mut self`: one operation at a time per device.
/// Share an `EthApp` between tasks behind an async mutex.
pub struct EthApp<T> {
    transport: T,
    config: EthAppConfig,
}

impl<T: Transport> EthApp<T> {
    /// Create a client with the default configuration
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: EthAppConfig::default(),
        }
    }

    /// Create a client with a validated configuration
    pub fn with_config(transport: T, config: EthAppConfig) -> EthAppResult<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Active configuration
    pub fn config(&self) -> &EthAppConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back
    pub fn into_inner(self) -> T {
        self.transport
    }

    async fn run(&mut self, request: Request) -> EthAppResult<Reply> {
        dispatch(&self.transport, &request).await
    }

    /// Run a request that has no soft fallback and return its data
    async fn run_for_data(&mut self, request: Request) -> EthAppResult<Vec<u8>> {
        let operation = request.operation();
        match self.run(request).await? {
            Reply::Data(data) => Ok(data),
            Reply::Unsupported => Err(EthAppError::DeviceRefusal {
                operation,
                status: StatusWord::INS_NOT_SUPPORTED,
            }),
        }
    }

    /// Run a request whose "not supported" answer means `false`
    async fn run_for_flag(&mut self, request: Request) -> EthAppResult<bool> {
        Ok(matches!(self.run(request).await?, Reply::Data(_)))
    }

    /// Public key and address for `path`, optionally confirmed on screen and
    /// with the BIP 32 chain code
    pub async fn get_address(
        &mut self,
        path: &str,
        display: bool,
        chain_code: bool,
    ) -> EthAppResult<AddressInfo> {
        let path: DerivationPath = path.parse()?;
        let display_flag = display;
        tracing::debug!(target: "eth_hw::app", %path, display = display_flag, chain_code, "get address");
        let data = self
            .run_for_data(request::get_address(&path, display, chain_code)?)
            .await?;
        Ok(AddressInfo::parse(&data, chain_code)?)
    }

    /// Provide signed token metadata ahead of a token transaction.
    ///
    /// Returns `false` when the app predates the command (its token list is
    /// built in).
    pub async fn provide_erc20_token_information(&mut self, data: &[u8]) -> EthAppResult<bool> {
        tracing::debug!(target: "eth_hw::app", len = data.len(), "provide ERC-20 token information");
        self.run_for_flag(request::provide_erc20_token_information(data)?)
            .await
    }

    /// Sign an RLP-encoded transaction
    pub async fn sign_transaction(&mut self, path: &str, raw_tx: &[u8]) -> EthAppResult<Signature> {
        let path: DerivationPath = path.parse()?;
        let request = request::sign_transaction(&path, raw_tx, self.config.chunk_size)?;
        tracing::debug!(
            target: "eth_hw::app",
            %path,
            len = raw_tx.len(),
            frames = request.frames().len(),
            "sign transaction"
        );
        let data = self.run_for_data(request).await?;
        Ok(Signature::parse(Operation::SignTransaction, &data)?)
    }

    /// App flags and version
    pub async fn get_app_configuration(&mut self) -> EthAppResult<AppConfiguration> {
        let data = self.run_for_data(request::get_app_configuration()?).await?;
        Ok(AppConfiguration::parse(&data)?)
    }

    /// Sign a message with the `personal_sign` prefix applied on device
    pub async fn sign_personal_message(
        &mut self,
        path: &str,
        message: &[u8],
    ) -> EthAppResult<Signature> {
        let path: DerivationPath = path.parse()?;
        let request = request::sign_personal_message(&path, message, self.config.chunk_size)?;
        tracing::debug!(
            target: "eth_hw::app",
            %path,
            len = message.len(),
            frames = request.frames().len(),
            "sign personal message"
        );
        let data = self.run_for_data(request).await?;
        Ok(Signature::parse(Operation::SignPersonalMessage, &data)?)
    }

    /// Sign EIP-712 typed data given its domain separator and message hash
    pub async fn sign_eip712_hashed_message(
        &mut self,
        path: &str,
        domain_separator: &Word,
        message_hash: &Word,
    ) -> EthAppResult<Signature> {
        let path: DerivationPath = path.parse()?;
        tracing::debug!(target: "eth_hw::app", %path, "sign EIP-712 hashed message");
        let request = request::sign_eip712_hashed_message(&path, domain_separator, message_hash)?;
        let data = self.run_for_data(request).await?;
        Ok(Signature::parse(Operation::SignEip712HashedMessage, &data)?)
    }

    /// Stark public key for `path`
    pub async fn stark_get_public_key(&mut self, path: &str, display: bool) -> EthAppResult<Vec<u8>> {
        let path: DerivationPath = path.parse()?;
        let display_flag = display;
        tracing::debug!(target: "eth_hw::app", %path, display = display_flag, "stark get public key");
        let data = self
            .run_for_data(request::stark_get_public_key(&path, display)?)
            .await?;
        Ok(response::parse_public_key(Operation::StarkGetPublicKey, &data)?)
    }

    /// Sign a StarkEx limit order, fixed asset layout
    pub async fn stark_sign_order(
        &mut self,
        path: &str,
        order: &StarkOrder,
    ) -> EthAppResult<StarkSignature> {
        let path: DerivationPath = path.parse()?;
        tracing::debug!(target: "eth_hw::app", %path, nonce = order.nonce, "stark sign order");
        let data = self
            .run_for_data(request::stark_sign_order(&path, order)?)
            .await?;
        Ok(StarkSignature::parse(Operation::StarkSignOrder, &data)?)
    }

    /// Sign a StarkEx limit order, tagged asset layout
    pub async fn stark_sign_order_v2(
        &mut self,
        path: &str,
        order: &StarkOrderV2,
    ) -> EthAppResult<StarkSignature> {
        let path: DerivationPath = path.parse()?;
        tracing::debug!(
            target: "eth_hw::app",
            %path,
            sell = %order.sell.quantization_type(),
            buy = %order.buy.quantization_type(),
            "stark sign order v2"
        );
        let data = self
            .run_for_data(request::stark_sign_order_v2(&path, order)?)
            .await?;
        Ok(StarkSignature::parse(Operation::StarkSignOrder, &data)?)
    }

    /// Sign a StarkEx transfer, fixed asset layout
    pub async fn stark_sign_transfer(
        &mut self,
        path: &str,
        transfer: &StarkTransfer,
    ) -> EthAppResult<StarkSignature> {
        let path: DerivationPath = path.parse()?;
        tracing::debug!(target: "eth_hw::app", %path, nonce = transfer.nonce, "stark sign transfer");
        let data = self
            .run_for_data(request::stark_sign_transfer(&path, transfer)?)
            .await?;
        Ok(StarkSignature::parse(Operation::StarkSignTransfer, &data)?)
    }

    /// Sign a StarkEx transfer, tagged asset layout, optionally conditional
    pub async fn stark_sign_transfer_v2(
        &mut self,
        path: &str,
        transfer: &StarkTransferV2,
    ) -> EthAppResult<StarkSignature> {
        let path: DerivationPath = path.parse()?;
        tracing::debug!(
            target: "eth_hw::app",
            %path,
            asset = %transfer.asset.quantization_type(),
            conditional = transfer.conditional.is_some(),
            "stark sign transfer v2"
        );
        let data = self
            .run_for_data(request::stark_sign_transfer_v2(&path, transfer)?)
            .await?;
        Ok(StarkSignature::parse(Operation::StarkSignTransfer, &data)?)
    }

    /// Provide the quantum of the asset in the next transaction.
    ///
    /// `None` as contract means ether. Returns `false` on apps without the
    /// command.
    pub async fn stark_provide_quantum(
        &mut self,
        contract: Option<&EthAddress>,
        quantization: &Quantity,
    ) -> EthAppResult<bool> {
        tracing::debug!(target: "eth_hw::app", %quantization, "stark provide quantum");
        self.run_for_flag(request::stark_provide_quantum(contract, quantization)?)
            .await
    }

    /// Provide the asset descriptor of the next transaction.
    ///
    /// Returns `false` on apps without the command.
    pub async fn stark_provide_quantum_v2(&mut self, asset: &StarkAsset) -> EthAppResult<bool> {
        tracing::debug!(
            target: "eth_hw::app",
            asset = %asset.quantization_type(),
            "stark provide quantum v2"
        );
        self.run_for_flag(request::stark_provide_quantum_v2(asset)?)
            .await
    }

    /// Sign a raw hash with the Stark key; the device shows no details
    pub async fn stark_unsafe_sign(
        &mut self,
        path: &str,
        hash: &Quantity,
    ) -> EthAppResult<StarkSignature> {
        let path: DerivationPath = path.parse()?;
        tracing::debug!(target: "eth_hw::app", %path, "stark unsafe sign");
        let data = self
            .run_for_data(request::stark_unsafe_sign(&path, hash)?)
            .await?;
        Ok(StarkSignature::parse(Operation::StarkUnsafeSign, &data)?)
    }

    /// BLS public key for `path`
    pub async fn eth2_get_public_key(&mut self, path: &str, display: bool) -> EthAppResult<Vec<u8>> {
        let path: DerivationPath = path.parse()?;
        let display_flag = display;
        tracing::debug!(target: "eth_hw::app", %path, display = display_flag, "eth2 get public key");
        let data = self
            .run_for_data(request::eth2_get_public_key(&path, display)?)
            .await?;
        Ok(response::parse_public_key(Operation::Eth2GetPublicKey, &data)?)
    }

    /// Set the withdrawal key index used for deposits.
    ///
    /// Returns `false` on apps without the command.
    pub async fn eth2_set_withdrawal_index(&mut self, withdrawal_index: u32) -> EthAppResult<bool> {
        tracing::debug!(target: "eth_hw::app", withdrawal_index, "eth2 set withdrawal index");
        self.run_for_flag(request::eth2_set_withdrawal_index(withdrawal_index)?)
            .await
    }
}
