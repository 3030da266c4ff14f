// Renders the grammar document into the crate docs.

#![doc = include_str!("./v1.md")]
