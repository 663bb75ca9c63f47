//! # Call Codec
//!
//! Packs typed parameters into embedded-contract call data and back.
//!
//! ## Layout
//!
//! Every argument occupies one 32-byte big-endian word in the head.
//! Static values are right-aligned in their word (`int64` sign-extends).
//! `bytes` is dynamic: its head word is the offset of the tail, and the
//! tail is a length word followed by the data zero-padded to a word
//! boundary. A method call prefixes the arguments with a 4-byte selector,
//! the leading bytes of `SHA3-256(signature)`.
//!
//! Decoding is strict about widths and padding inside each word but does
//! not reject trailing or unreferenced bytes; callers that need canonical
//! input re-pack and compare.

use sha3::{Digest, Sha3_256};
use shared_types::{Address, Hash, TokenStandard, U256};
use std::fmt;
use thiserror::Error;

/// Size of one encoded word.
pub const WORD_SIZE: usize = 32;

/// Size of a method selector.
pub const SELECTOR_SIZE: usize = 4;

/// Errors raised while packing or unpacking call data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Input ends before the encoding does.
    #[error("input too short: need {expected} bytes, got {got}")]
    InputTooShort {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        got: usize,
    },

    /// Selector does not belong to the expected method.
    #[error("unknown selector 0x{0}")]
    UnknownSelector(String),

    /// A word carries bits outside its type's range.
    #[error("invalid padding for {abi_type} argument {index}")]
    InvalidPadding {
        /// Argument position.
        index: usize,
        /// Declared type.
        abi_type: AbiType,
    },

    /// A dynamic offset or length points outside the input.
    #[error("offset out of range for argument {index}")]
    OffsetOutOfRange {
        /// Argument position.
        index: usize,
    },

    /// Value does not match the declared type.
    #[error("type mismatch for argument {index}: expected {expected}, got {got}")]
    TypeMismatch {
        /// Argument position.
        index: usize,
        /// Declared type.
        expected: AbiType,
        /// Supplied type.
        got: AbiType,
    },

    /// Wrong number of arguments.
    #[error("expected {expected} arguments, got {got}")]
    ArgumentCount {
        /// Declared arity.
        expected: usize,
        /// Supplied arity.
        got: usize,
    },
}

// =============================================================================
// TYPES AND VALUES
// =============================================================================

/// Parameter types understood by the embedded contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    /// 20-byte account address.
    Address,
    /// 32-byte hash.
    Hash,
    /// 10-byte token standard.
    TokenStandard,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 256-bit integer.
    Uint256,
    /// Variable-length byte string.
    Bytes,
}

impl AbiType {
    /// Name used in signatures.
    pub const fn name(self) -> &'static str {
        match self {
            AbiType::Address => "address",
            AbiType::Hash => "hash",
            AbiType::TokenStandard => "tokenStandard",
            AbiType::Int64 => "int64",
            AbiType::Uint8 => "uint8",
            AbiType::Uint256 => "uint256",
            AbiType::Bytes => "bytes",
        }
    }

    /// Whether the value lives in the tail.
    pub const fn is_dynamic(self) -> bool {
        matches!(self, AbiType::Bytes)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// `address`
    Address(Address),
    /// `hash`
    Hash(Hash),
    /// `tokenStandard`
    TokenStandard(TokenStandard),
    /// `int64`
    Int64(i64),
    /// `uint8`
    Uint8(u8),
    /// `uint256`
    Uint256(U256),
    /// `bytes`
    Bytes(Vec<u8>),
}

impl AbiValue {
    /// Type of this value.
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::Hash(_) => AbiType::Hash,
            AbiValue::TokenStandard(_) => AbiType::TokenStandard,
            AbiValue::Int64(_) => AbiType::Int64,
            AbiValue::Uint8(_) => AbiType::Uint8,
            AbiValue::Uint256(_) => AbiType::Uint256,
            AbiValue::Bytes(_) => AbiType::Bytes,
        }
    }
}

// =============================================================================
// SIGNATURES
// =============================================================================

/// 4-byte method selector.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector(pub [u8; SELECTOR_SIZE]);

impl Selector {
    /// Selector of a `Name(type1,type2)` signature.
    pub fn from_signature(signature: &str) -> Self {
        let digest = Sha3_256::digest(signature.as_bytes());
        let mut bytes = [0u8; SELECTOR_SIZE];
        bytes.copy_from_slice(&digest[..SELECTOR_SIZE]);
        Self(bytes)
    }

    /// Leading selector of call data, if long enough.
    pub fn from_call_data(data: &[u8]) -> Option<Self> {
        let bytes: [u8; SELECTOR_SIZE] = data.get(..SELECTOR_SIZE)?.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

fn signature(name: &str, inputs: &[AbiType]) -> String {
    let types: Vec<&str> = inputs.iter().map(|t| t.name()).collect();
    format!("{}({})", name, types.join(","))
}

/// A callable method.
#[derive(Debug, Clone, Copy)]
pub struct Method {
    /// Method name.
    pub name: &'static str,
    /// Argument types, in order.
    pub inputs: &'static [AbiType],
}

impl Method {
    /// `Name(type1,type2)` form.
    pub fn signature(&self) -> String {
        signature(self.name, self.inputs)
    }

    /// Selector prefixing this method's call data.
    pub fn selector(&self) -> Selector {
        Selector::from_signature(&self.signature())
    }

    /// Pack a call: selector followed by the encoded arguments.
    pub fn encode_call(&self, args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        let mut data = self.selector().0.to_vec();
        data.extend(encode(self.inputs, args)?);
        Ok(data)
    }

    /// Unpack a call, checking the selector.
    pub fn decode_call(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        let selector = Selector::from_call_data(data).ok_or(AbiError::InputTooShort {
            expected: SELECTOR_SIZE,
            got: data.len(),
        })?;
        if selector != self.selector() {
            return Err(AbiError::UnknownSelector(hex::encode(selector.0)));
        }
        decode(self.inputs, &data[SELECTOR_SIZE..])
    }
}

/// A persisted record layout. Encoded like method arguments, without a selector.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    /// Variable name.
    pub name: &'static str,
    /// Field types, in order.
    pub fields: &'static [AbiType],
}

impl Variable {
    /// `name(type1,type2)` form.
    pub fn signature(&self) -> String {
        signature(self.name, self.fields)
    }

    /// Pack a record.
    pub fn encode(&self, values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        encode(self.fields, values)
    }

    /// Unpack a record.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        decode(self.fields, data)
    }
}

/// A contract interface: its methods and persisted variables.
#[derive(Debug, Clone, Copy)]
pub struct Abi {
    /// Callable methods.
    pub methods: &'static [Method],
    /// Persisted record layouts.
    pub variables: &'static [Variable],
}

impl Abi {
    /// Method whose selector prefixes `data`.
    pub fn method_for_call(&self, data: &[u8]) -> Option<&'static Method> {
        let selector = Selector::from_call_data(data)?;
        self.methods.iter().find(|m| m.selector() == selector)
    }

    /// Method by name.
    pub fn method(&self, name: &str) -> Option<&'static Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

fn right_aligned(bytes: &[u8]) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
    word
}

fn usize_word(value: usize) -> [u8; WORD_SIZE] {
    right_aligned(&(value as u64).to_be_bytes())
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Encode `values` against `types`.
pub fn encode(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            got: values.len(),
        });
    }

    let mut head = Vec::with_capacity(types.len() * WORD_SIZE);
    let mut tail = Vec::new();
    let head_size = types.len() * WORD_SIZE;

    for (index, (expected, value)) in types.iter().zip(values).enumerate() {
        if value.abi_type() != *expected {
            return Err(AbiError::TypeMismatch {
                index,
                expected: *expected,
                got: value.abi_type(),
            });
        }

        match value {
            AbiValue::Address(address) => head.extend_from_slice(&right_aligned(address.as_bytes())),
            AbiValue::Hash(hash) => head.extend_from_slice(hash.as_bytes()),
            AbiValue::TokenStandard(zts) => head.extend_from_slice(&right_aligned(zts.as_bytes())),
            AbiValue::Int64(v) => {
                let fill = if *v < 0 { 0xff } else { 0x00 };
                let mut word = [fill; WORD_SIZE];
                word[WORD_SIZE - 8..].copy_from_slice(&v.to_be_bytes());
                head.extend_from_slice(&word);
            }
            AbiValue::Uint8(v) => head.extend_from_slice(&right_aligned(&[*v])),
            AbiValue::Uint256(v) => {
                let mut word = [0u8; WORD_SIZE];
                v.to_big_endian(&mut word);
                head.extend_from_slice(&word);
            }
            AbiValue::Bytes(bytes) => {
                head.extend_from_slice(&usize_word(head_size + tail.len()));
                tail.extend_from_slice(&usize_word(bytes.len()));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padded_len(bytes.len()) - bytes.len(), 0);
            }
        }
    }

    head.extend(tail);
    Ok(head)
}

// =============================================================================
// DECODING
// =============================================================================

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    let end = offset.checked_add(WORD_SIZE).ok_or(AbiError::InputTooShort {
        expected: usize::MAX,
        got: data.len(),
    })?;
    data.get(offset..end).ok_or(AbiError::InputTooShort {
        expected: end,
        got: data.len(),
    })
}

/// Right-aligned payload of `width` bytes; everything left of it must be `fill`.
fn payload(word: &[u8], width: usize, fill: u8, index: usize, abi_type: AbiType) -> Result<&[u8], AbiError> {
    let (padding, value) = word.split_at(WORD_SIZE - width);
    if padding.iter().any(|b| *b != fill) {
        return Err(AbiError::InvalidPadding { index, abi_type });
    }
    Ok(value)
}

fn word_as_usize(word: &[u8], index: usize) -> Result<usize, AbiError> {
    let value = payload(word, 8, 0, index, AbiType::Uint256)
        .map_err(|_| AbiError::OffsetOutOfRange { index })?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(value);
    usize::try_from(u64::from_be_bytes(bytes)).map_err(|_| AbiError::OffsetOutOfRange { index })
}

/// Decode `data` against `types`.
pub fn decode(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    let head_size = types.len() * WORD_SIZE;
    if data.len() < head_size {
        return Err(AbiError::InputTooShort {
            expected: head_size,
            got: data.len(),
        });
    }

    let mut values = Vec::with_capacity(types.len());
    for (index, abi_type) in types.iter().copied().enumerate() {
        let word = word_at(data, index * WORD_SIZE)?;
        let value = match abi_type {
            AbiType::Address => {
                let raw = payload(word, Address::LEN, 0, index, abi_type)?;
                AbiValue::Address(Address::from_slice(raw).ok_or(AbiError::InvalidPadding { index, abi_type })?)
            }
            AbiType::Hash => {
                AbiValue::Hash(Hash::from_slice(word).ok_or(AbiError::InvalidPadding { index, abi_type })?)
            }
            AbiType::TokenStandard => {
                let raw = payload(word, TokenStandard::LEN, 0, index, abi_type)?;
                AbiValue::TokenStandard(
                    TokenStandard::from_slice(raw).ok_or(AbiError::InvalidPadding { index, abi_type })?,
                )
            }
            AbiType::Int64 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&word[WORD_SIZE - 8..]);
                let v = i64::from_be_bytes(bytes);
                let fill = if v < 0 { 0xff } else { 0x00 };
                payload(word, 8, fill, index, abi_type)?;
                AbiValue::Int64(v)
            }
            AbiType::Uint8 => {
                let raw = payload(word, 1, 0, index, abi_type)?;
                AbiValue::Uint8(raw[0])
            }
            AbiType::Uint256 => AbiValue::Uint256(U256::from_big_endian(word)),
            AbiType::Bytes => {
                let offset = word_as_usize(word, index)?;
                let len = word_as_usize(word_at(data, offset)?, index)?;
                let start = offset + WORD_SIZE;
                let end = start.checked_add(len).ok_or(AbiError::OffsetOutOfRange { index })?;
                let bytes = data.get(start..end).ok_or(AbiError::OffsetOutOfRange { index })?;
                AbiValue::Bytes(bytes.to_vec())
            }
        };
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Method = Method {
        name: "Sample",
        inputs: &[AbiType::Address, AbiType::Int64, AbiType::Uint8, AbiType::Bytes],
    };

    fn sample_args() -> Vec<AbiValue> {
        vec![
            AbiValue::Address(Address([0x11; 20])),
            AbiValue::Int64(-2),
            AbiValue::Uint8(7),
            AbiValue::Bytes(vec![0xaa; 33]),
        ]
    }

    #[test]
    fn test_signature_and_selector() {
        assert_eq!(SAMPLE.signature(), "Sample(address,int64,uint8,bytes)");
        let digest = Sha3_256::digest(b"Sample(address,int64,uint8,bytes)");
        assert_eq!(SAMPLE.selector().0, digest[..4]);
    }

    #[test]
    fn test_layout() {
        let data = SAMPLE.encode_call(&sample_args()).unwrap();
        let args = &data[SELECTOR_SIZE..];

        // 4 head words + length word + 2 data words
        assert_eq!(args.len(), 7 * WORD_SIZE);
        assert_eq!(&args[12..32], &[0x11; 20]);
        assert!(args[32..56].iter().all(|b| *b == 0xff));
        assert_eq!(args[95], 7);
        assert_eq!(args[127], 128);
        assert_eq!(args[159], 33);
        assert!(args[160 + 33..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_decode_reverses_encode() {
        let data = SAMPLE.encode_call(&sample_args()).unwrap();
        assert_eq!(SAMPLE.decode_call(&data).unwrap(), sample_args());
    }

    #[test]
    fn test_decode_wrong_selector() {
        let mut data = SAMPLE.encode_call(&sample_args()).unwrap();
        data[0] ^= 0xff;
        assert!(matches!(
            SAMPLE.decode_call(&data),
            Err(AbiError::UnknownSelector(_))
        ));
    }

    #[test]
    fn test_decode_short_input() {
        let data = SAMPLE.encode_call(&sample_args()).unwrap();
        assert!(matches!(
            SAMPLE.decode_call(&data[..SELECTOR_SIZE + 40]),
            Err(AbiError::InputTooShort { .. })
        ));
    }

    #[test]
    fn test_decode_dirty_uint8_padding() {
        let mut data = SAMPLE.encode_call(&sample_args()).unwrap();
        data[SELECTOR_SIZE + 64] = 1;
        assert_eq!(
            SAMPLE.decode_call(&data),
            Err(AbiError::InvalidPadding {
                index: 2,
                abi_type: AbiType::Uint8
            })
        );
    }

    #[test]
    fn test_decode_bad_sign_extension() {
        let mut data = SAMPLE.encode_call(&sample_args()).unwrap();
        data[SELECTOR_SIZE + 32] = 0;
        assert!(matches!(
            SAMPLE.decode_call(&data),
            Err(AbiError::InvalidPadding { index: 1, .. })
        ));
    }

    #[test]
    fn test_decode_offset_out_of_range() {
        let mut data = SAMPLE.encode_call(&sample_args()).unwrap();
        data[SELECTOR_SIZE + 127] = 0xf0;
        assert!(SAMPLE.decode_call(&data).is_err());
    }

    #[test]
    fn test_encode_type_mismatch() {
        let mut args = sample_args();
        args[2] = AbiValue::Int64(7);
        assert!(matches!(
            SAMPLE.encode_call(&args),
            Err(AbiError::TypeMismatch { index: 2, .. })
        ));
    }

    #[test]
    fn test_encode_argument_count() {
        assert_eq!(
            SAMPLE.encode_call(&[]),
            Err(AbiError::ArgumentCount {
                expected: 4,
                got: 0
            })
        );
    }

    #[test]
    fn test_uint256_word() {
        let types = [AbiType::Uint256];
        let data = encode(&types, &[AbiValue::Uint256(U256::from(258u64))]).unwrap();
        assert_eq!(&data[30..], &[1, 2]);
        assert_eq!(decode(&types, &data).unwrap(), vec![AbiValue::Uint256(U256::from(258u64))]);
    }

    #[test]
    fn test_no_argument_method() {
        let method = Method {
            name: "Ping",
            inputs: &[],
        };
        let data = method.encode_call(&[]).unwrap();
        assert_eq!(data.len(), SELECTOR_SIZE);
        assert!(method.decode_call(&data).unwrap().is_empty());
    }
}
