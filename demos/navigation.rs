//! Walking a tree with packed addresses.
//!
//! This example shows how to:
//! - Step to children, siblings and parents from the root
//! - See where each address falls in the total order
//! - Tell the bitwise `has_descendant` test apart from the exact prefix test

use node_address::{address, NodeAddress};

fn main() {
    println!("=== Navigation Example ===\n");

    // 1. Walk down and across
    let first = NodeAddress::ROOT.first_child().unwrap();
    let nested = first.first_child().unwrap();
    let second = first.next_sibling().unwrap();

    for node in [NodeAddress::ROOT, first, nested, second] {
        println!("  {:<8} level {}  raw {:#018x}", node.to_string(), node.level(), node);
    }
    println!();

    // 2. Running off the tree gives None, not an error
    println!("Boundaries:");
    println!("  ROOT.parent()                = {:?}", NodeAddress::ROOT.parent());
    println!("  /1.previous_sibling()        = {:?}", first.previous_sibling());
    println!("  /255.next_sibling()          = {:?}", address![255].next_sibling());
    println!("  /1/1/1/1/1/1/1/1.first_child = {:?}", address![1, 1, 1, 1, 1, 1, 1, 1].first_child());
    println!();

    // 3. Ancestors and children
    let deep = address![2, 7, 4];
    let chain: Vec<String> = deep.ancestors().map(|a| a.to_string()).collect();
    println!("Ancestors of {}: {}", deep, chain.join(" -> "));
    println!("{} has {} possible children", deep, deep.children().len());
    println!();

    // 4. Bitwise vs. exact subtree tests
    let three = address![3];
    let seven = address![7];
    println!("Relationship tests between {} and {}:", three, seven);
    println!("  has_descendant (bitwise) = {}", three.has_descendant(seven));
    println!("  is_prefix_of   (exact)   = {}", three.is_prefix_of(seven));
}
