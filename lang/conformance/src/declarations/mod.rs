use table_lang_ast::{GenericFunctionDecl, HashMap, InterfaceDecl, StructDecl};

mod build;
mod lookup;

pub use build::build_declaration_table;

/// The canonical declarations of one compilation unit, keyed by name.
///
/// Structs, interfaces and functions occupy separate namespaces. The table
/// is populated once during the collection phase and becomes read-only after
/// [DeclarationTable::seal]; every conformance query runs against a sealed
/// table. One table is owned per compilation unit, never shared.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    // Namespaces
    //
    //
    map_struct: HashMap<String, StructDecl>,
    map_interface: HashMap<String, InterfaceDecl>,
    map_fun: HashMap<String, GenericFunctionDecl>,
    sealed: bool,
}

impl DeclarationTable {
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}
