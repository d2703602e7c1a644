//! # eth-hw-rs: Ethereum hardware wallet app protocol
//!
//! Talks to the Ethereum app of a Ledger-style hardware wallet over APDU
//! frames. The crate covers the protocol layer only; a USB/HID or BLE
//! transport is supplied by the caller through [`app::Transport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eth_hw_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EthAppError> {
//!     let device = SimulatedDevice::new();
//!     let mut signature = vec![0x1b];
//!     signature.extend_from_slice(&[0u8; 64]);
//!     device.respond_ok(&signature);
//!
//!     let mut app = EthApp::new(&device);
//!     let signature = app.sign_personal_message("44'/60'/0'/0/0", b"hello").await?;
//!     println!("v={} r={} s={}", signature.v_hex(), signature.r_hex(), signature.s_hex());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`apdu`] - path encoding, frame layouts, chunking, status table, response decoding
//! - [`app`] - transport seam, sequential dispatcher, [`app::EthApp`] operations, configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use eth_hw_apdu as apdu;
pub use eth_hw_app as app;

/// Common imports for talking to the Ethereum app
pub mod prelude {
    pub use crate::apdu::{
        AddressInfo, AppConfiguration, DerivationPath, EthAddress, Quantity, Signature,
        StarkAsset, StarkSignature, StatusWord, Word,
    };
    pub use crate::app::{EthApp, EthAppConfig, EthAppError, EthAppResult, Transport};

    #[cfg(feature = "simulation")]
    pub use crate::app::SimulatedDevice;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
