/*!
# Machine module

Everything stateful: values, the variable store, operator and function
semantics, the statement dispatch table, the stored program, and the
execution engine. Drive it through `Runtime`.

*/

mod codespace;
mod function;
mod io;
mod operation;
mod registry;
mod runtime;
mod statement;
mod val;
mod var;

pub use codespace::{Codespace, Cursor, GosubFrame, LoopFrame, SkipTo};
pub use function::Function;
pub use io::{FileSystem, NullFileSystem, NullScreen, Screen};
pub use operation::Operation;
pub use registry::{Flow, Handler, Registry};
pub use runtime::{Event, PendingInput, Runtime, UserFunction};
pub use val::{Val, ValType};
pub use var::Store;
