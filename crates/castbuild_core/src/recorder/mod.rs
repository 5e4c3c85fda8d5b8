//! Wrappers for the external recording and conversion tools.
//!
//! castbuild does not record terminal sessions or encode GIFs itself;
//! both are delegated to pre-existing binaries found on PATH (or at
//! configured locations). Argument building is kept separate from
//! process execution so command templates stay unit-testable, and every
//! invocation returns an explicit result.

mod agg;
mod asciinema;
mod types;

pub use agg::{convert_args, convert_recording, CONVERTER_TOOL};
pub use asciinema::{record_args, record_session, RECORDER_TOOL};
pub use types::{RecorderError, RecorderResult};
