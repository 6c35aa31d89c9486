//! Pipeline stages for text-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step, so each is
//! independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ detect ──▶ decode ──▶ normalize ──▶ render ──▶ write
//! (path)    (BOM)     (bytes→str) (BOM, CR)    (printpdf)  (temp + rename)
//! ```
//!
//! 1. [`input`]     — validate the input path, read its bytes, create the
//!    output directory
//! 2. [`detect`]    — pick an [`detect::EncodingTag`] from the first three bytes
//! 3. [`decode`]    — decode under that encoding, strictly or leniently
//! 4. [`normalize`] — drop the leading U+FEFF and unify line endings to LF
//! 5. [`render`]    — wrap, paginate and serialise the PDF; runs in
//!    `spawn_blocking`. Line widths are measured with [`widths`]
//! 6. [`write`]     — best-effort stale-file removal, then the write session;
//!    the only stage that awaits I/O completion

pub mod decode;
pub mod detect;
pub mod input;
pub mod normalize;
pub mod render;
pub mod widths;
pub mod write;
