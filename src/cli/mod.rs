//! CLI argument parsing, script input, and audio output.

mod args;
mod docx;
mod io;

pub use args::Args;
pub use io::{InputError, ScriptSource, load_script, write_output};
