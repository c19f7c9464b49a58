//! Goblin: small cross-platform utilities for Makefiles, CI and scripting.
//!
//! Each subcommand of the `goblin` binary replaces a shell builtin that
//! behaves differently (or does not exist) across platforms:
//!
//! - [`sub`]: regex substitution driven by numerically named groups
//! - [`remove`]: `rm` with `-r` / `-f`
//! - [`clock`]: strftime and Unix timestamps
//! - [`embed`]: files to C/C++ byte arrays
//! - [`usage`]: usage listing of every subcommand
//!
//! # Substitution
//!
//! Group labels index into a [`SubstitutionList`] whose slot 0 holds piped
//! input and whose remaining slots hold the caller's arguments:
//!
//! ```
//! use goblin::{substitute, Pattern, SubstitutionList};
//!
//! let pattern = Pattern::new(r"(?P<2>Hello) (?P<1>World)").unwrap();
//! let list = SubstitutionList::with_explicit("", ["Foo", "Bar"]);
//! let out = substitute(b"Hello World", &pattern, &list).unwrap();
//! assert_eq!(out, b"Bar Foo");
//! ```

pub mod clock;
pub mod embed;
pub mod io;
pub mod remove;
pub mod sub;
pub mod usage;

// Re-exports
pub use clock::{format_now, format_time, unix_now, TimeFormatError};
pub use embed::{embed_directory, EmbedError, EmbedOptions, EmbedReport};
pub use io::{IoError, OutputSink};
pub use remove::{remove_paths, RemoveError, RemoveOptions};
pub use sub::{substitute, Pattern, Span, SubstituteError, SubstitutionList};
