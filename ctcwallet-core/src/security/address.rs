use rand::RngCore;

/// Human-readable prefix of every wallet address.
pub const ADDRESS_PREFIX: &str = "ctc1q";

/// Random bytes behind the address body (38 hex chars).
const ADDRESS_BODY_BYTES: usize = 19;

/// Generate a display address: `ctc1q` followed by 38 lowercase hex chars.
///
/// The address is cosmetic; it is not derived from the recovery secret.
pub fn generate_address() -> String {
    let mut body = [0u8; ADDRESS_BODY_BYTES];
    rand::rng().fill_bytes(&mut body);
    format!("{}{}", ADDRESS_PREFIX, hex::encode(body))
}

/// Whether `address` has the shape produced by [`generate_address`].
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix(ADDRESS_PREFIX) {
        Some(body) => {
            body.len() == ADDRESS_BODY_BYTES * 2
                && body.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        }
        None => false,
    }
}
