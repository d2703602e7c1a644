//! # eth-hw-app
//!
//! Async client for the Ethereum app of a hardware wallet.
//!
//! [`EthApp`] turns each logical operation into frames (via `eth-hw-apdu`),
//! sends them one at a time over a caller-supplied [`Transport`], and
//! decodes the final response. The transport is the only collaborator: it
//! moves bytes, and everything protocol-related happens here.
//!
//! ## Features
//!
//! - `simulation` (default): [`SimulatedDevice`], a scripted transport for tests
//!
//! ## Usage
//!
//! ```ignore
//! use eth_hw_app::{EthApp, EthAppConfig};
//!
//! let mut app = EthApp::with_config(transport, EthAppConfig::load("eth-hw.toml")?)?;
//!
//! let info = app.get_address("44'/60'/0'/0/0", false, false).await?;
//! let signature = app.sign_transaction("44'/60'/0'/0/0", &raw_tx).await?;
//! println!("{} v={} r={} s={}", info.address, signature.v_hex(), signature.r_hex(), signature.s_hex());
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod transport;

#[cfg(feature = "simulation")]
pub mod simulation;

// Re-exports
pub use app::EthApp;
pub use config::EthAppConfig;
pub use dispatch::{dispatch, Reply};
pub use error::{EthAppError, EthAppResult, TransportError};
pub use transport::Transport;

#[cfg(feature = "simulation")]
pub use simulation::SimulatedDevice;
