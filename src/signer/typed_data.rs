//! EIP-712 typed structured data hashing
//!
//! Values are supplied as JSON (the same shape wallets receive for
//! `eth_signTypedData_v4`); the type dictionary fixes field order.

use crate::{
    error::{HyperliquidError, Result},
    signer::utils::decode_hex,
};
use ethers::{
    types::{I256, U256},
    utils::keccak256,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Name of the domain struct in the type dictionary
pub const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// A single `type name` entry of a struct definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    /// Field name
    pub name: String,
    /// Solidity type string (e.g. `bytes32`, `Person[]`)
    #[serde(rename = "type")]
    pub r#type: String,
}

impl TypedDataField {
    /// Create a new field
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }
}

/// Type dictionary: struct name to ordered field list
pub type Types = BTreeMap<String, Vec<TypedDataField>>;

/// EIP-712 domain; absent fields are left out of the domain type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// Domain name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Domain version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Chain ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Verifying contract address (0x-hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,
}

impl Eip712Domain {
    /// Field list of the `EIP712Domain` struct for the fields that are set
    pub fn fields(&self) -> Vec<TypedDataField> {
        let mut fields = Vec::with_capacity(4);
        if self.name.is_some() {
            fields.push(TypedDataField::new("name", "string"));
        }
        if self.version.is_some() {
            fields.push(TypedDataField::new("version", "string"));
        }
        if self.chain_id.is_some() {
            fields.push(TypedDataField::new("chainId", "uint256"));
        }
        if self.verifying_contract.is_some() {
            fields.push(TypedDataField::new("verifyingContract", "address"));
        }
        fields
    }

    /// Domain separator: `hashStruct("EIP712Domain", domain)`
    pub fn separator(&self, types: &Types) -> Result<[u8; 32]> {
        let types = with_domain_type(self, types);
        hash_struct(EIP712_DOMAIN_TYPE, &serde_json::to_value(self)?, &types)
    }
}

/// A complete typed-data payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    /// Signing domain
    pub domain: Eip712Domain,
    /// Struct definitions (the domain struct may be omitted)
    pub types: Types,
    /// Name of the struct being signed
    pub primary_type: String,
    /// Message matching the primary type
    pub message: Value,
}

impl TypedData {
    /// Compute the EIP-712 digest of this payload
    pub fn hash(&self) -> Result<[u8; 32]> {
        hash_typed_data(&self.domain, &self.types, &self.primary_type, &self.message)
    }
}

/// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(primaryType, message))`
pub fn hash_typed_data(
    domain: &Eip712Domain,
    types: &Types,
    primary_type: &str,
    message: &Value,
) -> Result<[u8; 32]> {
    let types = with_domain_type(domain, types);

    let mut preimage = Vec::with_capacity(66);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(&hash_struct(
        EIP712_DOMAIN_TYPE,
        &serde_json::to_value(domain)?,
        &types,
    )?);
    if primary_type != EIP712_DOMAIN_TYPE {
        preimage.extend_from_slice(&hash_struct(primary_type, message, &types)?);
    }
    Ok(keccak256(preimage))
}

/// Dictionary with `EIP712Domain` filled in from the domain when the caller did not declare it
fn with_domain_type(domain: &Eip712Domain, types: &Types) -> Types {
    let mut types = types.clone();
    types
        .entry(EIP712_DOMAIN_TYPE.to_string())
        .or_insert_with(|| domain.fields());
    types
}

/// `keccak256(typeHash ‖ encodeField(f) for f in fields)`
pub fn hash_struct(type_name: &str, data: &Value, types: &Types) -> Result<[u8; 32]> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| HyperliquidError::missing_type(type_name))?;

    let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));
    encoded.extend_from_slice(&type_hash(type_name, types)?);
    for field in fields {
        let value = data.get(&field.name).unwrap_or(&Value::Null);
        encoded.extend_from_slice(&encode_field(&field.r#type, value, types)?);
    }
    Ok(keccak256(encoded))
}

/// `keccak256(encodeType(type))`
pub fn type_hash(type_name: &str, types: &Types) -> Result<[u8; 32]> {
    Ok(keccak256(encode_type(type_name, types)?.as_bytes()))
}

/// Render `Primary(type name,...)Dep1(...)Dep2(...)`, dependencies sorted by name
pub fn encode_type(primary_type: &str, types: &Types) -> Result<String> {
    let mut found = BTreeSet::new();
    find_dependencies(primary_type, types, &mut found);
    found.remove(primary_type);

    let mut out = String::new();
    for name in std::iter::once(primary_type).chain(found.iter().map(String::as_str)) {
        let fields = types
            .get(name)
            .ok_or_else(|| HyperliquidError::missing_type(name))?;
        let rendered = fields
            .iter()
            .map(|f| format!("{} {}", resolve_alias(&f.r#type), f.name))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(name);
        out.push('(');
        out.push_str(&rendered);
        out.push(')');
    }
    Ok(out)
}

/// Collect every struct reachable from `type_name`; `found` doubles as the visited set
fn find_dependencies(type_name: &str, types: &Types, found: &mut BTreeSet<String>) {
    if found.contains(type_name) {
        return;
    }
    let Some(fields) = types.get(type_name) else {
        return;
    };
    found.insert(type_name.to_string());
    for field in fields {
        let base = strip_array_suffixes(&field.r#type);
        if types.contains_key(base) {
            find_dependencies(base, types, found);
        }
    }
}

fn strip_array_suffixes(ty: &str) -> &str {
    match ty.find('[') {
        Some(idx) => &ty[..idx],
        None => ty,
    }
}

fn resolve_alias(ty: &str) -> &str {
    match ty {
        "uint" => "uint256",
        "int" => "int256",
        other => other,
    }
}

/// Encode one field value to its 32-byte slot
fn encode_field(ty: &str, value: &Value, types: &Types) -> Result<[u8; 32]> {
    if let Some(open) = ty.rfind('[') {
        if !ty.ends_with(']') {
            return Err(HyperliquidError::unsupported_type(ty));
        }
        let base = &ty[..open];
        let len = &ty[open + 1..ty.len() - 1];
        let items = value.as_array().ok_or_else(|| {
            HyperliquidError::encoding(format!("expected array for {}, got {}", ty, value))
        })?;
        if !len.is_empty() {
            let expected: usize = len
                .parse()
                .map_err(|_| HyperliquidError::unsupported_type(ty))?;
            if items.len() != expected {
                return Err(HyperliquidError::length_mismatch(ty, expected, items.len()));
            }
        }
        let mut concat = Vec::with_capacity(32 * items.len());
        for item in items {
            concat.extend_from_slice(&encode_field(base, item, types)?);
        }
        return Ok(keccak256(concat));
    }

    if types.contains_key(ty) {
        if value.is_null() {
            return Ok([0u8; 32]);
        }
        return hash_struct(ty, value, types);
    }

    match ty {
        "string" => Ok(keccak256(expect_str(ty, value)?.as_bytes())),
        "bytes" => Ok(keccak256(decode_hex(expect_str(ty, value)?)?)),
        "bool" => {
            let b = value.as_bool().ok_or_else(|| {
                HyperliquidError::encoding(format!("expected bool, got {}", value))
            })?;
            let mut slot = [0u8; 32];
            slot[31] = b as u8;
            Ok(slot)
        }
        "address" => {
            let bytes = decode_hex(expect_str(ty, value)?)?;
            if bytes.len() != 20 {
                return Err(HyperliquidError::length_mismatch(ty, 20, bytes.len()));
            }
            let mut slot = [0u8; 32];
            slot[12..].copy_from_slice(&bytes);
            Ok(slot)
        }
        _ => {
            if let Some(bits) = ty.strip_prefix("uint") {
                let bits = parse_width(ty, bits, 256)?;
                encode_uint(ty, bits, value)
            } else if let Some(bits) = ty.strip_prefix("int") {
                let bits = parse_width(ty, bits, 256)?;
                encode_int(ty, bits, value)
            } else if let Some(size) = ty.strip_prefix("bytes") {
                encode_fixed_bytes(ty, size, value)
            } else {
                Err(HyperliquidError::unsupported_type(ty))
            }
        }
    }
}

fn expect_str<'a>(ty: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| HyperliquidError::encoding(format!("expected string for {}, got {}", ty, value)))
}

/// Bit width of `uintN`/`intN`; an empty suffix means `default`
fn parse_width(ty: &str, suffix: &str, default: usize) -> Result<usize> {
    if suffix.is_empty() {
        return Ok(default);
    }
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HyperliquidError::unsupported_type(ty));
    }
    let bits: usize = suffix
        .parse()
        .map_err(|_| HyperliquidError::range(format!("invalid size in {}", ty)))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(HyperliquidError::range(format!(
            "invalid size {} in {}: must be 8-256 in steps of 8",
            bits, ty
        )));
    }
    Ok(bits)
}

fn encode_uint(ty: &str, bits: usize, value: &Value) -> Result<[u8; 32]> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().map(U256::from),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex_digits) => {
                let bytes = if hex_digits.len() % 2 == 1 {
                    decode_hex(&format!("0{}", hex_digits))?
                } else {
                    decode_hex(hex_digits)?
                };
                (bytes.len() <= 32).then(|| U256::from_big_endian(&bytes))
            }
            None => U256::from_dec_str(s).ok(),
        },
        _ => None,
    };
    let v = parsed.ok_or_else(|| {
        HyperliquidError::encoding(format!("invalid {} value: {}", ty, value))
    })?;
    if v.bits() > bits {
        return Err(HyperliquidError::encoding(format!(
            "value {} does not fit in {}",
            v, ty
        )));
    }
    let mut slot = [0u8; 32];
    v.to_big_endian(&mut slot);
    Ok(slot)
}

fn encode_int(ty: &str, bits: usize, value: &Value) -> Result<[u8; 32]> {
    let parsed = match value {
        Value::Number(n) => I256::from_dec_str(&n.to_string()).ok(),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex_digits) => I256::from_hex_str(hex_digits).ok(),
            None => I256::from_dec_str(s).ok(),
        },
        _ => None,
    };
    let v = parsed.ok_or_else(|| {
        HyperliquidError::encoding(format!("invalid {} value: {}", ty, value))
    })?;

    // Two's complement: a negative value fits when its complement does.
    let raw = v.into_raw();
    if bits < 256 {
        let limit = U256::one() << (bits - 1);
        let magnitude = if v.is_negative() { !raw } else { raw };
        if magnitude >= limit {
            return Err(HyperliquidError::encoding(format!(
                "value {} does not fit in {}",
                v, ty
            )));
        }
    }
    let mut slot = [0u8; 32];
    raw.to_big_endian(&mut slot);
    Ok(slot)
}

fn encode_fixed_bytes(ty: &str, size: &str, value: &Value) -> Result<[u8; 32]> {
    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HyperliquidError::unsupported_type(ty));
    }
    let size: usize = size
        .parse()
        .map_err(|_| HyperliquidError::range(format!("invalid size in {}", ty)))?;
    if size == 0 || size > 32 {
        return Err(HyperliquidError::range(format!(
            "bytesN size must be 1-32, got {}",
            size
        )));
    }
    let bytes = decode_hex(expect_str(ty, value)?)?;
    if bytes.len() != size {
        return Err(HyperliquidError::length_mismatch(ty, size, bytes.len()));
    }
    let mut slot = [0u8; 32];
    slot[..size].copy_from_slice(&bytes);
    Ok(slot)
}
