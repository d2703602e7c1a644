//! Protocol constants for the Ethereum app

/// Class byte for Ethereum and Eth2 commands
pub const ETH_CLA: u8 = 0xE0;

/// Class byte for StarkEx commands
pub const STARK_CLA: u8 = 0xF0;

/// Instruction codes for the Ethereum class
pub mod ins {
    /// Get public key, address and optional chain code
    pub const GET_ETH_PUBLIC_ADDRESS: u8 = 0x02;
    /// Sign a transaction, chunked
    pub const SIGN_ETH_TRANSACTION: u8 = 0x04;
    /// Get app flags and version
    pub const GET_APP_CONFIGURATION: u8 = 0x06;
    /// Sign a personal message, chunked
    pub const SIGN_ETH_PERSONAL_MESSAGE: u8 = 0x08;
    /// Provide signed ERC-20 token metadata
    pub const PROVIDE_ERC20_TOKEN_INFO: u8 = 0x0A;
    /// Sign an EIP-712 message from its two hashes
    pub const SIGN_ETH_EIP712: u8 = 0x0C;
    /// Get an Eth2 BLS public key
    pub const GET_ETH2_PUBLIC_KEY: u8 = 0x0E;
    /// Set the Eth2 withdrawal key index
    pub const SET_ETH2_WITHDRAWAL_INDEX: u8 = 0x10;
}

/// Instruction codes for the StarkEx class
pub mod stark_ins {
    /// Get the Stark public key
    pub const GET_PUBLIC_KEY: u8 = 0x02;
    /// Sign an order or a transfer, selected by p1
    pub const SIGN_MESSAGE: u8 = 0x04;
    /// Provide the quantum of the next asset
    pub const PROVIDE_QUANTUM: u8 = 0x08;
    /// Sign a raw hash
    pub const UNSAFE_SIGN: u8 = 0x0A;
}

/// p1 values for chunked commands
pub mod p1_chunk {
    /// First data block
    pub const FIRST_DATA_BLOCK: u8 = 0x00;
    /// Subsequent data block
    pub const SUBSEQUENT_DATA_BLOCK: u8 = 0x80;
}

/// p1 values for StarkEx signing
pub mod p1_stark_sign {
    /// Order, fixed layout
    pub const ORDER: u8 = 0x01;
    /// Transfer, fixed layout
    pub const TRANSFER: u8 = 0x02;
    /// Order, tag-based asset layout
    pub const ORDER_V2: u8 = 0x03;
    /// Transfer, tag-based asset layout
    pub const TRANSFER_V2: u8 = 0x04;
    /// Transfer with conditional fact and address
    pub const CONDITIONAL_TRANSFER: u8 = 0x05;
}

/// Field and frame sizes
pub mod length {
    /// Maximum data length of one APDU
    pub const APDU_MAX_PAYLOAD: usize = 255;
    /// Default chunk size used for chunked commands
    pub const DEFAULT_CHUNK_SIZE: usize = 150;
    /// Maximum BIP 32 derivation path depth
    pub const MAX_BIP32_PATH_DEPTH: usize = 10;
    /// Size of each BIP 32 derivation index
    pub const BIP32_INDEX_SIZE: usize = 4;
    /// Size of an Ethereum address
    pub const ETH_ADDRESS_SIZE: usize = 20;
    /// Size of hashes, quantums, blobs and Stark keys
    pub const WORD_SIZE: usize = 32;
    /// Size of Stark amounts
    pub const AMOUNT_SIZE: usize = 8;
    /// Size of the chain code returned with an address
    pub const CHAIN_CODE_SIZE: usize = 32;
    /// Size of a signature component (r or s)
    pub const SIGNATURE_COMPONENT_SIZE: usize = 32;
    /// Size of the personal message length prefix
    pub const MESSAGE_LENGTH_PREFIX_SIZE: usize = 4;
    /// Size of an encoded Stark asset descriptor: tag, contract, quantum, blob
    pub const STARK_ASSET_SIZE: usize = 1 + ETH_ADDRESS_SIZE + WORD_SIZE + WORD_SIZE;
}

/// App configuration flags
pub mod config_flags {
    /// Arbitrary data signature enabled by user
    pub const ARBITRARY_DATA_SIGNATURE: u8 = 0x01;
    /// ERC 20 token information needs to be provided externally
    pub const ERC20_EXTERNAL_INFO: u8 = 0x02;
    /// StarkEx support compiled in
    pub const STARK_ENABLED: u8 = 0x04;
    /// StarkEx v2 commands supported
    pub const STARK_V2_SUPPORTED: u8 = 0x08;
}
