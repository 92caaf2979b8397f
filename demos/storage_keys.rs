//! Addresses as sort keys in byte-oriented storage.
//!
//! This example shows how to:
//! - Encode addresses as big-endian `AddressKey`s
//! - Read a packed run of keys back without copying
//! - Scan one subtree out of an ordered map with `subtree_range`

use std::collections::BTreeMap;

use node_address::{address, AddressKey, NodeAddress};
use zerocopy::IntoBytes;

fn main() {
    println!("=== Storage Keys Example ===\n");

    // 1. Keys sort the same way as addresses
    let mut keys = vec![
        AddressKey::new(address![2]),
        AddressKey::new(address![1, 5]),
        AddressKey::new(address![1]),
        AddressKey::new(NodeAddress::ROOT),
    ];
    keys.sort();
    println!("Sorted keys:");
    for key in &keys {
        println!("  {:02x?}  {:?}", key.to_bytes(), key);
    }
    println!();

    // 2. Zero-copy view over a buffer
    let buffer: Vec<u8> = keys.as_bytes().to_vec();
    match AddressKey::slice_from_bytes(&buffer) {
        Ok(view) => println!("Read {} keys from {} bytes", view.len(), buffer.len()),
        Err(err) => println!("Bad buffer: {}", err),
    }
    if let Err(err) = AddressKey::slice_from_bytes(&buffer[..5]) {
        println!("Truncated buffer: {}", err);
    }
    println!();

    // 3. Range scan of one subtree
    let mut titles = BTreeMap::new();
    titles.insert(address![1], "Books");
    titles.insert(address![1, 1], "Fiction");
    titles.insert(address![1, 1, 3], "A Novel");
    titles.insert(address![1, 2], "Science");
    titles.insert(address![2], "Music");

    println!("Subtree of /1/1:");
    for (address, title) in titles.range(address![1, 1].subtree_range()) {
        println!("  {:<8} {}", address.to_string(), title);
    }
}
