//! Response reading and decoding.

pub mod decoder;
pub mod error;
pub mod reader;

pub use decoder::{decode_text, Decoder, StandardDecoder};
pub use error::DecodeError;
pub use reader::{ResponseReader, DEFAULT_ENCODING};
