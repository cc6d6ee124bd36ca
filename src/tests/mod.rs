use super::*;

// Submodules (topic-based)
mod candidates;
mod comments;
mod omit_flags;
mod strings_escapes;
