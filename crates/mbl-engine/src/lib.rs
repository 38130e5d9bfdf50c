//! The tick engine: turns parsed [`mbl_board::Board`] templates into
//! running instances and steps them forward one synchronous transition
//! at a time.

mod context;
mod error;
mod instance;
mod io;
mod resolver;
mod tick;
mod trace;

pub use context::InterpreterContext;
pub use error::ResolveError;
pub use instance::{BoardInstance, CallFrame};
pub use io::{FixedStdin, NullStdin, NullTrace, StdinSource, StdoutSink, TraceSink, VecStdout, VecTrace};
pub use resolver::resolve_all;
pub use tick::{tick, TickResult};
pub use trace::dump_active_chain;
