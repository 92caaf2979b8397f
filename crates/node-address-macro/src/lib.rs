use proc_macro::TokenStream;
use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, token, Attribute, Error, Expr, ExprLit, Ident, Lit, LitInt, Result, Token, Visibility};

use proc_macro_crate::{crate_name, FoundCrate};

/// Maximum supported tree depth.
const MAX_LEVEL: u8 = 8;

/// Largest sibling index a level slot can hold.
const MAX_INDEX: u16 = 255;

/// Parsed attributes for a node.
#[derive(Clone, Default)]
struct NodeAttrs {
    /// Pinned sibling index (#[index = N])
    index: Option<LitInt>,
    /// Doc comments and #[deprecated], copied onto the generated module
    passthrough: Vec<Attribute>,
}

struct Node {
    name: Ident,
    attrs: NodeAttrs,
    children: Vec<Node>,
}

struct TreeInput {
    vis: Visibility,
    root: Ident,
    nodes: Vec<Node>,
}

impl Parse for TreeInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let vis: Visibility = input.parse()?;
        input.parse::<Token![mod]>()?;
        let root: Ident = input.parse()?;
        let content;
        braced!(content in input);
        let nodes = parse_nodes(&content)?;
        Ok(Self { vis, root, nodes })
    }
}

fn parse_nodes(input: ParseStream) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    while !input.is_empty() {
        let attrs = parse_node_attrs(input)?;
        let name: Ident = input.parse()?;

        // Parse children or semicolon
        let children = if input.peek(token::Brace) {
            let content;
            braced!(content in input);
            parse_nodes(&content)?
        } else {
            input.parse::<Token![;]>()?;
            Vec::new()
        };

        nodes.push(Node {
            name,
            attrs,
            children,
        });
    }
    Ok(nodes)
}

/// Parse the outer attributes of a node.
///
/// Handles:
/// - `#[index = N]` (pin the sibling index)
/// - `#[deprecated]`, `#[deprecated(note = "...")]` and doc comments (passed through)
fn parse_node_attrs(input: ParseStream) -> Result<NodeAttrs> {
    let mut result = NodeAttrs::default();

    for attr in input.call(Attribute::parse_outer)? {
        if attr.path().is_ident("index") {
            let value = &attr.meta.require_name_value()?.value;
            let Expr::Lit(ExprLit {
                lit: Lit::Int(lit), ..
            }) = value
            else {
                return Err(Error::new_spanned(
                    value,
                    "expected an integer literal, e.g. #[index = 3]",
                ));
            };
            if result.index.is_some() {
                return Err(Error::new_spanned(&attr, "duplicate #[index] attribute"));
            }
            result.index = Some(lit.clone());
        } else if attr.path().is_ident("doc") || attr.path().is_ident("deprecated") {
            result.passthrough.push(attr);
        } else {
            return Err(Error::new_spanned(
                &attr,
                "unsupported attribute; expected #[index = N], #[deprecated] or a doc comment",
            ));
        }
    }

    Ok(result)
}

// =============================================================================
// Address assignment (runs at macro expansion time)
// =============================================================================

/// A node with its position in the tree worked out.
struct Placed<'a> {
    node: &'a Node,
    /// Dot-separated node names: "Books.Science"
    path: String,
    level: u8,
    index: u8,
    raw: u64,
    children: Vec<Placed<'a>>,
}

/// Number siblings 1, 2, ... in declaration order, honouring pinned indices.
fn place_nodes<'a>(
    nodes: &'a [Node],
    parent_raw: u64,
    level: u8,
    prefix: &str,
) -> Result<Vec<Placed<'a>>> {
    let Some(first) = nodes.first() else {
        return Ok(Vec::new());
    };
    if level > MAX_LEVEL {
        return Err(Error::new(
            first.name.span(),
            format!("tree depth exceeds the maximum of {} levels", MAX_LEVEL),
        ));
    }

    let mut next: u16 = 1;
    let mut placed = Vec::with_capacity(nodes.len());

    for node in nodes {
        let index = match &node.attrs.index {
            Some(lit) => {
                let pinned: u16 = lit.base10_parse()?;
                if pinned == 0 || pinned > MAX_INDEX {
                    return Err(Error::new(lit.span(), "sibling index must be in 1..=255"));
                }
                if pinned < next {
                    return Err(Error::new(
                        lit.span(),
                        format!(
                            "sibling index {} must be greater than the previous sibling's ({})",
                            pinned,
                            next - 1
                        ),
                    ));
                }
                pinned
            }
            None => next,
        };
        if index > MAX_INDEX {
            return Err(Error::new(
                node.name.span(),
                format!(
                    "`{}` would get sibling index {}; a node has at most 255 children",
                    node.name, index
                ),
            ));
        }

        let path = if prefix.is_empty() {
            node.name.to_string()
        } else {
            format!("{}.{}", prefix, node.name)
        };
        let raw = parent_raw | (u64::from(index) << ((MAX_LEVEL - level) as u32 * 8));
        let children = place_nodes(&node.children, raw, level + 1, &path)?;

        placed.push(Placed {
            node,
            path,
            level,
            index: index as u8,
            raw,
            children,
        });
        next = index + 1;
    }

    Ok(placed)
}

/// Flatten placed nodes in pre-order, which is also ascending address order.
fn flatten<'p, 'a>(placed: &'p [Placed<'a>], out: &mut Vec<&'p Placed<'a>>) {
    for node in placed {
        out.push(node);
        flatten(&node.children, out);
    }
}

/// Pack a list of sibling indices, root side first.
fn pack_path<'a>(indices: impl IntoIterator<Item = &'a LitInt>) -> Result<u64> {
    let mut raw = 0u64;
    for (i, lit) in indices.into_iter().enumerate() {
        let level = i + 1;
        if level > MAX_LEVEL as usize {
            return Err(Error::new(
                lit.span(),
                format!("address has more than {} levels", MAX_LEVEL),
            ));
        }
        let index: u16 = lit.base10_parse()?;
        if index == 0 || index > MAX_INDEX {
            return Err(Error::new(lit.span(), "sibling index must be in 1..=255"));
        }
        raw |= u64::from(index) << ((MAX_LEVEL as usize - level) * 8);
    }
    Ok(raw)
}

// =============================================================================
// Crate path resolution
// =============================================================================

fn address_crate_path() -> TokenStream2 {
    match crate_name("node-address") {
        Ok(FoundCrate::Itself) => {
            quote!(::node_address)
        }
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::node_address),
    }
}

// =============================================================================
// Code generation
// =============================================================================

/// Recursively generate one module per node.
///
/// Example:
/// ```ignore
/// tree! {
///     pub mod Catalog {
///         Books {          // /1
///             Fiction;     // /1/1
///             #[index = 5]
///             Science;     // /1/5
///         }
///         Music;           // /2
///     }
/// }
///
/// // Generates:
/// #[allow(non_snake_case)]
/// pub mod Catalog {
///     pub mod Books {
///         pub const PATH: &str = "Books";
///         pub const LEVEL: u8 = 1;
///         pub const INDEX: u8 = 1;
///         pub const ADDRESS: NodeAddress = NodeAddress::from_raw(0x0100_0000_0000_0000);
///
///         pub mod Fiction { ... }
///         pub mod Science { ... }
///     }
///     pub mod Music { ... }
/// }
/// ```
fn generate_modules(placed: &[Placed<'_>], krate: &TokenStream2) -> Vec<TokenStream2> {
    placed
        .iter()
        .map(|p| {
            let node_ident = &p.node.name;
            let passthrough = &p.node.attrs.passthrough;
            let path_lit = syn::LitStr::new(&p.path, Span::call_site());
            let level = p.level;
            let index = p.index;
            let raw = Literal::u64_suffixed(p.raw);
            let children = generate_modules(&p.children, krate);

            quote! {
                #(#passthrough)*
                #[allow(non_snake_case)]
                pub mod #node_ident {
                    /// Dot-separated node names from the top of the tree.
                    pub const PATH: &'static str = #path_lit;

                    /// Depth in the tree (1 = directly below the root).
                    pub const LEVEL: u8 = #level;

                    /// Position among siblings, starting at 1.
                    pub const INDEX: u8 = #index;

                    /// Packed address, computed at compile time.
                    pub const ADDRESS: #krate::NodeAddress = #krate::NodeAddress::from_raw(#raw);

                    #(#children)*
                }
            }
        })
        .collect()
}

fn expand_tree(input: TreeInput, krate: &TokenStream2) -> Result<TokenStream2> {
    // 1. Assign addresses
    let placed = place_nodes(&input.nodes, 0, 1, "")?;

    // 2. Flatten in pre-order
    let mut flat = Vec::new();
    flatten(&placed, &mut flat);

    let tree_depth = flat.iter().map(|p| p.level as usize).max().unwrap_or(0);
    let node_count = flat.len();
    let raws = flat.iter().map(|p| Literal::u64_suffixed(p.raw));
    let paths = flat.iter().map(|p| syn::LitStr::new(&p.path, Span::call_site()));

    // 3. Generate node modules
    let modules = generate_modules(&placed, krate);

    // 4. Assemble
    let vis = input.vis;
    let root = input.root;

    Ok(quote! {
        #[allow(non_snake_case, non_camel_case_types)]
        #vis mod #root {
            /// The tree's root node.
            pub const ROOT: #krate::NodeAddress = #krate::NodeAddress::ROOT;

            /// Deepest level used by any declared node.
            pub const TREE_DEPTH: usize = #tree_depth;

            /// Number of declared nodes (the root is not counted).
            pub const NODE_COUNT: usize = #node_count;

            /// Every declared node, in pre-order (ascending address order).
            pub const ADDRESSES: &'static [#krate::NodeAddress] = &[
                #(#krate::NodeAddress::from_raw(#raws)),*
            ];

            /// Dot-separated paths, parallel to `ADDRESSES`.
            pub const PATHS: &'static [&'static str] = &[#(#paths),*];

            #(#modules)*
        }
    })
}

// =============================================================================
// Entry points
// =============================================================================

/// Declare a tree and get a compile-time address for every node.
///
/// Siblings are numbered 1, 2, ... in declaration order. `#[index = N]` pins a
/// node to index `N`; the siblings after it continue from `N + 1`. Trees
/// deeper than 8 levels or with more than 255 children under one node are
/// rejected at compile time.
#[proc_macro]
pub fn tree(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as TreeInput);
    let krate = address_crate_path();

    match expand_tree(input, &krate) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Build a `NodeAddress` from sibling indices at compile time.
///
/// `address![1, 4, 2]` is the node `/1/4/2`; `address![]` is the root. The
/// result is a const expression.
#[proc_macro]
pub fn address(input: TokenStream) -> TokenStream {
    let indices =
        syn::parse_macro_input!(input with Punctuated::<LitInt, Token![,]>::parse_terminated);
    let krate = address_crate_path();

    match pack_path(&indices) {
        Ok(raw) => {
            let raw = Literal::u64_suffixed(raw);
            quote!(#krate::NodeAddress::from_raw(#raw)).into()
        }
        Err(err) => err.to_compile_error().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Node {
        Node {
            name: Ident::new(name, Span::call_site()),
            attrs: NodeAttrs::default(),
            children: vec![],
        }
    }

    fn branch(name: &str, children: Vec<Node>) -> Node {
        Node {
            children,
            ..leaf(name)
        }
    }

    fn pinned(name: &str, index: &str) -> Node {
        Node {
            attrs: NodeAttrs {
                index: Some(LitInt::new(index, Span::call_site())),
                passthrough: vec![],
            },
            ..leaf(name)
        }
    }

    #[test]
    fn siblings_are_numbered_in_order() {
        // Books { Fiction; Science; } Music;
        let nodes = vec![
            branch("Books", vec![leaf("Fiction"), leaf("Science")]),
            leaf("Music"),
        ];
        let placed = place_nodes(&nodes, 0, 1, "").unwrap();

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].raw, 0x0100_0000_0000_0000);
        assert_eq!(placed[1].raw, 0x0200_0000_0000_0000);
        assert_eq!(placed[0].children[1].raw, 0x0102_0000_0000_0000);
        assert_eq!(placed[0].children[1].path, "Books.Science");
        assert_eq!(placed[0].children[1].level, 2);
    }

    #[test]
    fn pinned_index_resets_numbering() {
        let nodes = vec![leaf("A"), pinned("B", "10"), leaf("C")];
        let placed = place_nodes(&nodes, 0, 1, "").unwrap();
        let indices: Vec<u8> = placed.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 10, 11]);
    }

    #[test]
    fn pinned_index_must_increase() {
        let nodes = vec![pinned("A", "4"), pinned("B", "4")];
        assert!(place_nodes(&nodes, 0, 1, "").is_err());

        let nodes = vec![pinned("A", "0")];
        assert!(place_nodes(&nodes, 0, 1, "").is_err());

        let nodes = vec![pinned("A", "256")];
        assert!(place_nodes(&nodes, 0, 1, "").is_err());
    }

    #[test]
    fn too_many_siblings_is_rejected() {
        let nodes: Vec<Node> = (0..256).map(|i| leaf(&format!("N{}", i))).collect();
        let err = place_nodes(&nodes, 0, 1, "").err().unwrap();
        assert!(err.to_string().contains("at most 255 children"));

        let nodes = vec![pinned("Last", "255"), leaf("Overflow")];
        assert!(place_nodes(&nodes, 0, 1, "").is_err());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut deepest = leaf("L8");
        for level in (1..8).rev() {
            deepest = branch(&format!("L{}", level), vec![deepest]);
        }
        let placed = place_nodes(std::slice::from_ref(&deepest), 0, 1, "").unwrap();
        let mut flat = Vec::new();
        flatten(&placed, &mut flat);
        assert_eq!(flat.len(), 8);
        assert_eq!(flat[7].raw, 0x0101_0101_0101_0101);

        let too_deep = branch("L0", vec![deepest]);
        let err = place_nodes(std::slice::from_ref(&too_deep), 0, 1, "").err().unwrap();
        assert!(err.to_string().contains("maximum of 8 levels"));
    }

    /// Same-named children under different parents live in different modules.
    #[test]
    fn same_name_different_parents_no_conflict() {
        let nodes = vec![
            branch("Combat", vec![leaf("Attack")]),
            branch("Movement", vec![leaf("Attack")]),
        ];
        let placed = place_nodes(&nodes, 0, 1, "").unwrap();
        let krate = quote!(::node_address);
        let output = generate_modules(&placed, &krate);

        assert_eq!(output.len(), 2);

        let code = quote! { #(#output)* }.to_string();
        assert!(code.contains("pub mod Combat"));
        assert!(code.contains("pub mod Movement"));
        assert!(code.contains("\"Combat.Attack\""));
        assert!(code.contains("\"Movement.Attack\""));
        // Movement.Attack = /2/1
        assert!(code.contains(&0x0201_0000_0000_0000u64.to_string()));
        assert!(!code.contains("pub use"));
    }

    #[test]
    fn pack_path_checks_indices() {
        let lits = |s: &[&str]| -> Vec<LitInt> {
            s.iter().map(|v| LitInt::new(v, Span::call_site())).collect()
        };

        assert_eq!(pack_path(&lits(&[])).unwrap(), 0);
        assert_eq!(pack_path(&lits(&["1", "2"])).unwrap(), 0x0102_0000_0000_0000);
        assert!(pack_path(&lits(&["0"])).is_err());
        assert!(pack_path(&lits(&["300"])).is_err());
        assert!(pack_path(&lits(&["1"; 9])).is_err());
    }
}
