use std::str::FromStr;

use ethers::types::Address;
use ethers::utils::to_checksum;

/// Returns true if `address` is a well-formed Ethereum address.
///
/// The `0x` prefix is optional. Addresses written entirely in lower or upper
/// case are accepted as-is; mixed-case addresses must carry a valid EIP-55
/// checksum. ICAP (`XE...`) addresses are not accepted.
pub fn is_address(address: &str) -> bool {
    let digits = address.strip_prefix("0x").unwrap_or(address);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let is_lower = digits == digits.to_ascii_lowercase();
    let is_upper = digits == digits.to_ascii_uppercase();
    if is_lower || is_upper {
        return true;
    }

    match Address::from_str(digits) {
        Ok(parsed) => to_checksum(&parsed, None)[2..] == *digits,
        Err(_) => false,
    }
}
