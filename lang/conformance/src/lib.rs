pub mod bounds;
pub mod builtin;
pub mod declarations;
pub mod iterable;
pub mod matcher;
pub mod resolver;
pub mod result;

pub use bounds::{check_instantiation, instantiate, FunctionInstance};
pub use declarations::{build_declaration_table, DeclarationTable};
pub use iterable::{check_iterable, ITER_INTERFACE};
pub use resolver::{Conformance, ConformanceResolver};
pub use result::{BoundViolation, ConformanceError, ConformanceResult};
