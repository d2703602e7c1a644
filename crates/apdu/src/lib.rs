//! # eth-hw-apdu
//!
//! Command encoding and response decoding for the Ethereum hardware wallet
//! app. Everything here is pure: requests become [`ApduCommand`] frames,
//! response bytes become typed results, and status words become
//! [`StatusOutcome`]s. Sending frames is the job of `eth-hw-app`.
//!
//! ## Layout
//!
//! - [`path`]: BIP 32 path parsing and the `count || u32be*` header
//! - [`field`]: fixed-width values (addresses, words, padded magnitudes)
//! - [`quantization`]: StarkEx asset descriptors
//! - [`frame`]: immutable command frames
//! - [`chunk`] and [`rlp`]: splitting long payloads, EIP-155 aware
//! - [`request`]: one builder per device operation
//! - [`response`]: fixed-offset response parsers
//! - [`status`]: status words and the per-operation translation table
//!
//! ## Usage
//!
//! ```
//! use eth_hw_apdu::{request, DerivationPath};
//!
//! let path: DerivationPath = "44'/60'/0'/0/0".parse()?;
//! let req = request::get_address(&path, false, true)?;
//! assert_eq!(req.frames().len(), 1);
//! # Ok::<(), eth_hw_apdu::InputError>(())
//! ```

#![warn(missing_docs)]

pub mod chunk;
pub mod constants;
pub mod error;
pub mod field;
pub mod frame;
pub mod path;
pub mod quantization;
pub mod request;
pub mod response;
pub mod rlp;
pub mod status;

// Re-exports
pub use error::{InputError, InputResult, ResponseError, ResponseResult};
pub use field::{EthAddress, Quantity, Word};
pub use frame::ApduCommand;
pub use path::DerivationPath;
pub use quantization::{QuantizationType, StarkAsset};
pub use request::Request;
pub use response::{AddressInfo, AppConfiguration, Signature, StarkSignature};
pub use status::{translate, Operation, StatusOutcome, StatusWord};
