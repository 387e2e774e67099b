use codespan::Span;

pub mod decls;
pub mod ident;
pub mod types;

pub use decls::*;
pub use ident::*;
pub use types::*;

pub type HashMap<K, V> = std::collections::HashMap<K, V, fxhash::FxBuildHasher>;
pub type HashSet<V> = fxhash::FxHashSet<V>;

pub trait HasSpan {
    fn span(&self) -> Option<Span>;
}
