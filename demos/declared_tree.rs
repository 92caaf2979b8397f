//! Declaring a tree at compile time.
//!
//! This example shows how to:
//! - Declare a hierarchy with the `tree!` macro
//! - Pin a sibling index with `#[index = N]`
//! - Use the generated constants and the pre-ordered address table

use node_address::{tree, AddressSet};

tree! {
    pub mod Catalog {
        Books {
            Fiction;
            Science {
                Physics;
                Biology;
            }
        }
        Music {
            Jazz;
            Classical;
        }
        #[index = 200]
        Archive;
    }
}

fn main() {
    println!("=== Declared Tree Example ===\n");

    // 1. Every node in pre-order
    println!("{} nodes, {} levels deep:", Catalog::NODE_COUNT, Catalog::TREE_DEPTH);
    for (address, path) in Catalog::ADDRESSES.iter().zip(Catalog::PATHS) {
        println!("  {:<12} {}", address.to_string(), path);
    }
    println!();

    // 2. Constants per node
    println!("Science:");
    println!("  ADDRESS = {}", Catalog::Books::Science::ADDRESS);
    println!("  LEVEL   = {}", Catalog::Books::Science::LEVEL);
    println!("  INDEX   = {}", Catalog::Books::Science::INDEX);
    println!("Archive pinned at {}", Catalog::Archive::ADDRESS);
    println!();

    // 3. Subtree queries over a set of shelved items
    let shelved: AddressSet = [
        Catalog::Books::Fiction::ADDRESS,
        Catalog::Books::Science::Physics::ADDRESS,
        Catalog::Music::Jazz::ADDRESS,
    ]
    .into_iter()
    .collect();

    println!("Shelved under Books:");
    for address in shelved.descendants_of(Catalog::Books::ADDRESS) {
        println!("  - {}", address);
    }
    println!(
        "Anything under Music::Classical? {}",
        shelved.has_descendant_of(Catalog::Music::Classical::ADDRESS)
    );
}
