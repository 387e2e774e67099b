use table_lang_ast::{GenericFunctionDecl, Ident, InterfaceDecl, StructDecl};
use table_lang_miette_util::ToMiette;

use super::DeclarationTable;
use crate::result::{ConformanceError, ConformanceResult};

impl DeclarationTable {
    pub fn lookup_struct(&self, name: &Ident) -> ConformanceResult<&StructDecl> {
        if let Some(strukt) = self.map_struct.get(&name.id) {
            return Ok(strukt);
        }
        Err(unknown(name))
    }

    pub fn lookup_interface(&self, name: &Ident) -> ConformanceResult<&InterfaceDecl> {
        if let Some(interface) = self.map_interface.get(&name.id) {
            return Ok(interface);
        }
        Err(unknown(name))
    }

    pub fn lookup_fun(&self, name: &Ident) -> ConformanceResult<&GenericFunctionDecl> {
        if let Some(fun) = self.map_fun.get(&name.id) {
            return Ok(fun);
        }
        Err(unknown(name))
    }
}

fn unknown(name: &Ident) -> Box<ConformanceError> {
    ConformanceError::UnknownIdentifier { name: name.id.clone(), span: name.span.to_miette() }
        .into()
}
