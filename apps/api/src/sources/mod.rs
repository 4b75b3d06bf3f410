// Source recommendation and works-cited generation.
// These are the strict-decode operations: a malformed completion surfaces a
// decode error with a snippet instead of silently degrading.

pub mod handlers;
pub mod prompts;
