mod address;
mod mnemonic;
mod pin;
mod private_key;

pub use address::{generate_address, is_valid_address, ADDRESS_PREFIX};
pub use mnemonic::{generate_mnemonic, validate_mnemonic};
pub use pin::{validate_pin, PinHash, PIN_LENGTH};
pub use private_key::validate_private_key;
